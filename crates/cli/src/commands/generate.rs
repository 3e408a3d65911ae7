use std::fs;

use anyhow::{Context, Result};
use saboteur_core::report::{batch_to_csv, DEFAULT_GROUP_NAMING};
use saboteur_core::services::design::generate_combinatorial_groups;

use crate::resolve_path;
use crate::commands::load_design_spec;

/// Generate every combination of a design spec's positions.
pub fn generate_command(spec_file: &str, out: Option<&str>, json: bool) -> Result<()> {
    let loaded = load_design_spec(spec_file)?;
    let batch = generate_combinatorial_groups(&loaded.spec.positions, loaded.spec.prefix())
        .context("Failed to generate combinatorial groups")?;

    let written = match out {
        Some(out) => {
            let out_path = resolve_path(out)?;
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output dir: {}", parent.display())
                })?;
            }
            fs::write(&out_path, batch_to_csv(&batch, DEFAULT_GROUP_NAMING))
                .with_context(|| format!("Failed to write groups CSV: {}", out_path.display()))?;
            Some(out_path)
        }
        None => None,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    println!("Design: {}", loaded.name);
    if let Some(description) = &loaded.spec.description {
        println!("  {description}");
    }
    println!("Groups ({}):", batch.len());
    for group in &batch {
        println!("- {}: {}", group.name, group.elements.join(", "));
    }
    if let Some(path) = written {
        println!("Wrote: {}", path.display());
    }

    Ok(())
}
