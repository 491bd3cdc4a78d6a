//! Classification inspection CLI command.
//!
//! Prints the generated shape and conversion plan for every member of a
//! declaration, without writing any output files.

use std::path::Path;

use anyhow::{Context, Result};
use causeway_gen::member::{ForwardPlan, GeneratedMember};
use causeway_gen::{assemble_proxy, Conversion, GenOptions};
use causeway_model::BridgeDeclaration;
use serde_json::json;

/// Run the `causeway inspect` workflow.
pub fn run(declaration: &str, type_filter: Option<&str>, export: Option<&str>) -> Result<()> {
    match export {
        Some("json") => run_json(declaration, type_filter),
        Some(other) => anyhow::bail!("unknown export format `{other}` (expected: json)"),
        None => run_text(declaration, type_filter),
    }
}

fn run_text(declaration: &str, type_filter: Option<&str>) -> Result<()> {
    let path = Path::new(declaration);
    let decl =
        BridgeDeclaration::load(path).with_context(|| format!("loading {}", path.display()))?;
    let bridge = decl
        .resolve()
        .with_context(|| format!("resolving {}", path.display()))?;

    let mut shown = 0usize;
    for ty in &bridge.types {
        let qualified = ty.descriptor.qualified_name();
        if let Some(filter) = type_filter {
            if qualified != filter {
                continue;
            }
        }
        shown += 1;

        let shape = if ty.descriptor.is_interface {
            "interface"
        } else if ty.descriptor.is_delegate {
            "delegate"
        } else {
            "class"
        };
        println!("{qualified} ({shape})");

        match assemble_proxy(&ty.descriptor, &ty.members, &bridge.well_known, &GenOptions::default())
        {
            Ok(unit) => {
                for member in &unit.members {
                    print_member(member);
                }
            }
            Err(e) => println!("  error: {e}"),
        }
        println!();
    }

    if shown == 0 {
        match type_filter {
            Some(filter) => anyhow::bail!("no type named `{filter}` in {declaration}"),
            None => println!("No types declared."),
        }
    }
    Ok(())
}

fn run_json(declaration: &str, type_filter: Option<&str>) -> Result<()> {
    let path = Path::new(declaration);
    let decl =
        BridgeDeclaration::load(path).with_context(|| format!("loading {}", path.display()))?;
    let bridge = decl
        .resolve()
        .with_context(|| format!("resolving {}", path.display()))?;

    let mut entries = Vec::new();
    for ty in &bridge.types {
        let qualified = ty.descriptor.qualified_name();
        if let Some(filter) = type_filter {
            if qualified != filter {
                continue;
            }
        }
        let entry = match assemble_proxy(
            &ty.descriptor,
            &ty.members,
            &bridge.well_known,
            &GenOptions::default(),
        ) {
            Ok(unit) => json!({
                "type": qualified,
                "proxy": unit.proxy_type,
                "members": unit
                    .members
                    .iter()
                    .map(|m| json!({
                        "kind": m.kind_label(),
                        "name": m.public_name(),
                    }))
                    .collect::<Vec<_>>(),
            }),
            Err(e) => json!({ "type": qualified, "error": e.to_string() }),
        };
        entries.push(entry);
    }

    println!("{}", serde_json::to_string_pretty(&json!({ "types": entries }))?);
    Ok(())
}

fn print_member(member: &GeneratedMember) {
    match member {
        GeneratedMember::StaticField(f) => {
            let qualifier = if f.is_new { " [new]" } else { "" };
            println!("  static-field {}{qualifier}", f.name);
        }
        GeneratedMember::Init(i) => println!("  init {}", i.name),
        GeneratedMember::Method(m) => {
            println!("  method {} → {}", m.name, m.return_type);
            if let Some(plan) = &m.plan {
                print_plan(plan);
            }
        }
        GeneratedMember::Wrapper(w) => {
            println!("  wrapper {} (wraps {})", w.name, w.source_name);
            print_plan(&w.plan);
        }
        GeneratedMember::Property(p) => {
            println!("  {} {} : {}", member.kind_label(), p.name, p.value_type);
            if let Some(plan) = &p.getter {
                print_accessor("get", plan);
            }
            if let Some(plan) = &p.setter {
                print_accessor("set", plan);
            }
        }
        GeneratedMember::Event(e) => {
            println!("  event {} : {}", e.name, e.value_type);
            if let Some(plan) = &e.add {
                print_accessor("add", plan);
            }
            if let Some(plan) = &e.remove {
                print_accessor("remove", plan);
            }
        }
        GeneratedMember::Constructor(c) => {
            println!("  constructor ({} parameter(s))", c.parameters.len());
            if let Some(plan) = &c.plan {
                print_plan(plan);
            }
        }
        GeneratedMember::EnvConstructor(_) => println!("  env-constructor"),
        GeneratedMember::Helper(_) => println!("  construction-helper"),
    }
}

fn print_accessor(keyword: &str, plan: &ForwardPlan) {
    println!("    {keyword} via {}", plan.call_target);
    print_conversions(plan);
}

fn print_plan(plan: &ForwardPlan) {
    println!("    dispatch {} via {}", plan.dispatch, plan.call_target);
    print_conversions(plan);
}

fn print_conversions(plan: &ForwardPlan) {
    for (i, conversion) in plan.arg_conversions.iter().enumerate() {
        println!("      arg {i}: {}", describe(conversion));
    }
    if let Some(conversion) = &plan.return_conversion {
        println!("      ret: {}", describe(conversion));
    }
}

fn describe(conversion: &Conversion) -> String {
    if conversion.needs_env {
        format!("{} (env)", conversion.primitive)
    } else {
        conversion.primitive.clone()
    }
}
