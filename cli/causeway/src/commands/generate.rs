//! Proxy generation CLI command.

use std::path::Path;

use anyhow::{Context, Result};
use causeway_emit::write_unit;
use causeway_gen::{assemble_proxy, GenOptions};
use causeway_model::BridgeDeclaration;
use tracing::info;

/// Run the `causeway generate` workflow.
///
/// Each declaration file is loaded and resolved, then every type is
/// assembled and written independently: a failed type is reported and
/// skipped without touching its siblings. Returns an error when any type
/// failed, after the whole batch has run.
pub fn run(declarations: &[String], out_dir: &Path, skip_signatures: bool) -> Result<()> {
    let options = GenOptions { skip_signatures };
    let mut generated = 0usize;
    let mut failed: Vec<(String, String)> = Vec::new();

    for declaration in declarations {
        let path = Path::new(declaration);
        let decl = BridgeDeclaration::load(path)
            .with_context(|| format!("loading {}", path.display()))?;
        let bridge = decl
            .resolve()
            .with_context(|| format!("resolving {}", path.display()))?;
        info!(bridge = %bridge.name, types = bridge.types.len(), "generating bridge");

        for ty in &bridge.types {
            let unit = match assemble_proxy(&ty.descriptor, &ty.members, &bridge.well_known, &options)
            {
                Ok(unit) => unit,
                Err(e) => {
                    failed.push((ty.descriptor.qualified_name(), e.to_string()));
                    continue;
                }
            };
            match write_unit(out_dir, &unit) {
                Ok(path) => {
                    generated += 1;
                    println!("Generated {} → {}", unit.qualified_name, path.display());
                }
                Err(e) => failed.push((unit.qualified_name.clone(), e.to_string())),
            }
        }
    }

    for (ty, detail) in &failed {
        eprintln!("error: {ty}: {detail}");
    }
    println!("Generated {generated} proxy unit(s), {} failed.", failed.len());

    if !failed.is_empty() {
        anyhow::bail!("{} type(s) failed to generate", failed.len());
    }
    Ok(())
}
