use std::path::Path;

use anyhow::{anyhow, Context, Result};
use saboteur_core::io::load_groups_csv;
use saboteur_core::services::diagnosis::find_logical_saboteurs;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DiagnosisOutput {
    pub source: String,
    pub groups: usize,
    pub failed_groups: Vec<String>,
    pub saboteurs: Vec<String>,
    pub suspicious: Vec<String>,
}

/// Read an outcome sheet and report confirmed and suspicious elements.
pub fn diagnose_command(results: &str, json: bool) -> Result<()> {
    let path = Path::new(results);
    let data = load_groups_csv(path)
        .with_context(|| format!("Failed to load results from {}", path.display()))?;
    if !data.has_results {
        return Err(anyhow!("Results sheet {} has no 'result' column", path.display()));
    }

    let diagnosis = find_logical_saboteurs(&data.groups, data.failed.iter().map(String::as_str))
        .context("Failed to diagnose results")?;

    let output = DiagnosisOutput {
        source: results.to_string(),
        groups: data.groups.len(),
        failed_groups: data.failed,
        saboteurs: diagnosis.saboteurs,
        suspicious: diagnosis.suspicious,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Groups: {} ({} failed)", output.groups, output.failed_groups.len());
    print_list("Saboteurs", &output.saboteurs);
    print_list("Suspicious", &output.suspicious);

    Ok(())
}

fn print_list(label: &str, items: &[String]) {
    println!("{label} ({}):", items.len());
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!("- {item}");
    }
}
