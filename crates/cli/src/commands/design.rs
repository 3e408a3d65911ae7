use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use saboteur_core::io::load_groups_csv;
use saboteur_core::model::GroupBatch;
use saboteur_core::report::write_batch_report;
use saboteur_core::services::design::{design_test_batch_report, generate_combinatorial_groups};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::{load_design_spec, DEFAULT_MAX_SABOTEURS};
use crate::{infer_design_name, resolve_path, sha256_file};

/// File name of the JSON document written next to the batch report.
pub const DESIGN_OUTPUT_FILE: &str = "design.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct DesignRunMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: String,
    pub input_hash: String,
    pub generated_at: String,
    pub tool_version: String,
    pub max_saboteurs: usize,
    pub candidate_groups: usize,
    pub selected_groups: usize,
    pub elements: usize,
    pub fault_hypotheses: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DesignOutput {
    pub metadata: DesignRunMetadata,
    pub selected: GroupBatch,
}

/// Candidate groups for a design run, with what they were read from.
struct DesignSource {
    name: String,
    description: Option<String>,
    source: String,
    input_hash: String,
    candidates: GroupBatch,
    max_saboteurs: Option<usize>,
}

fn resolve_source(spec: Option<&str>, groups: Option<&str>) -> Result<DesignSource> {
    match (spec, groups) {
        (Some(file), None) => {
            let loaded = load_design_spec(file)?;
            let candidates =
                generate_combinatorial_groups(&loaded.spec.positions, loaded.spec.prefix())
                    .context("Failed to generate combinatorial groups")?;
            Ok(DesignSource {
                name: loaded.name,
                description: loaded.spec.description,
                source: file.to_string(),
                input_hash: loaded.hash,
                candidates,
                max_saboteurs: loaded.spec.max_saboteurs,
            })
        }
        (None, Some(file)) => {
            let path = Path::new(file);
            let data = load_groups_csv(path)
                .with_context(|| format!("Failed to load candidate groups from {file}"))?;
            Ok(DesignSource {
                name: infer_design_name(path),
                description: None,
                source: file.to_string(),
                input_hash: sha256_file(path)?,
                candidates: data.groups,
                max_saboteurs: None,
            })
        }
        _ => Err(anyhow!("Provide exactly one of --spec or --groups")),
    }
}

/// Select the smallest batch of groups that identifies up to `max_saboteurs`
/// bad elements, optionally writing a report directory.
pub fn design_command(
    spec: Option<&str>,
    groups: Option<&str>,
    max_saboteurs: Option<usize>,
    out_dir: Option<&str>,
    group_naming: &str,
    json: bool,
) -> Result<()> {
    let source = resolve_source(spec, groups)?;
    // CLI flag > spec > default.
    let max_saboteurs = max_saboteurs.or(source.max_saboteurs).unwrap_or(DEFAULT_MAX_SABOTEURS);

    let report = design_test_batch_report(&source.candidates, max_saboteurs)
        .with_context(|| format!("Failed to design a test batch for '{}'", source.name))?;

    let output = DesignOutput {
        metadata: DesignRunMetadata {
            name: source.name,
            description: source.description,
            source: source.source,
            input_hash: source.input_hash,
            generated_at: Utc::now().to_rfc3339(),
            tool_version: saboteur_core::version().to_string(),
            max_saboteurs,
            candidate_groups: report.candidate_groups,
            selected_groups: report.selected.len(),
            elements: report.elements,
            fault_hypotheses: report.fault_hypotheses,
        },
        selected: report.selected,
    };

    let written = match out_dir {
        Some(dir) => {
            let dir_path = resolve_path(dir)?;
            let mut written = write_batch_report(&output.selected, &dir_path, group_naming)
                .with_context(|| format!("Failed to write batch report to {}", dir_path.display()))?;
            let output_path = dir_path.join(DESIGN_OUTPUT_FILE);
            fs::write(&output_path, serde_json::to_string_pretty(&output)?).with_context(|| {
                format!("Failed to write design output: {}", output_path.display())
            })?;
            written.push(output_path);
            info!(dir = %dir_path.display(), files = written.len(), "wrote design report");
            written
        }
        None => Vec::new(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let meta = &output.metadata;
    println!("Design: {}", meta.name);
    if let Some(description) = &meta.description {
        println!("  {description}");
    }
    println!("  Max saboteurs: {}", meta.max_saboteurs);
    println!("  Candidate groups: {}", meta.candidate_groups);
    println!("  Elements: {}", meta.elements);
    println!("  Fault hypotheses: {}", meta.fault_hypotheses);
    println!("Selected groups ({}):", meta.selected_groups);
    for group in &output.selected {
        println!("- {}: {}", group.name, group.elements.join(", "));
    }
    for path in written {
        println!("Wrote: {}", path.display());
    }

    Ok(())
}
