//! Write-on-success file output.
//!
//! The unit is rendered completely before any directory or file is touched,
//! so a failed render leaves the output tree unchanged. Namespace
//! directories are created on demand.

use std::fs;
use std::path::{Path, PathBuf};

use causeway_gen::ProxyUnit;
use tracing::debug;

use crate::error::Result;
use crate::path::unit_path;
use crate::render::render_unit;

/// Render one proxy unit and write it under `out_dir`.
///
/// Returns the path written. Nothing is written when rendering fails.
pub fn write_unit(out_dir: &Path, unit: &ProxyUnit) -> Result<PathBuf> {
    let text = render_unit(unit)?;

    let path = unit_path(out_dir, &unit.namespace, &unit.type_name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, text)?;
    debug!(ty = %unit.qualified_name, path = %path.display(), "wrote proxy unit");
    Ok(path)
}
