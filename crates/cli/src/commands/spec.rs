use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use saboteur_core::services::design::{Position, DEFAULT_GROUP_PREFIX};
use serde::{Deserialize, Serialize};

use crate::{infer_design_name, sha256_bytes};

/// Default fault tolerance when neither the CLI nor the design spec sets one.
pub const DEFAULT_MAX_SABOTEURS: usize = 1;

/// Combinatorial design described in YAML or JSON.
///
/// ```yaml
/// name: assembly-batch
/// prefix: G
/// max_saboteurs: 2
/// positions:
///   - name: promoter
///     elements: [A, B, C]
///   - name: terminator
///     elements: [D, E]
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct DesignSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub max_saboteurs: Option<usize>,
    pub positions: Vec<Position>,
}

impl DesignSpec {
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(anyhow!("Design spec must include at least one position"));
        }
        let mut seen = HashSet::new();
        for position in &self.positions {
            if position.name.trim().is_empty() {
                return Err(anyhow!("Design spec position 'name' is required"));
            }
            if !seen.insert(position.name.as_str()) {
                return Err(anyhow!("Design spec position '{}' is listed twice", position.name));
            }
            if position.elements.is_empty() {
                return Err(anyhow!("Design spec position '{}' has no elements", position.name));
            }
        }
        Ok(())
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_GROUP_PREFIX)
    }
}

/// A validated spec together with its resolved name and content hash.
#[derive(Debug)]
pub struct LoadedSpec {
    pub spec: DesignSpec,
    pub name: String,
    pub hash: String,
}

/// Load a design spec (YAML or JSON based on extension) and validate it.
pub fn load_design_spec(file: &str) -> Result<LoadedSpec> {
    let spec_path = Path::new(file);
    let spec_bytes = fs::read(spec_path)
        .with_context(|| format!("Failed to read design spec at {}", spec_path.display()))?;
    let hash = sha256_bytes(&spec_bytes);
    let spec: DesignSpec = if spec_path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_slice(&spec_bytes).context("Failed to parse design spec JSON")?
    } else {
        serde_yaml::from_slice(&spec_bytes).context("Failed to parse design spec YAML")?
    };
    spec.validate()?;

    let name = spec.name.clone().unwrap_or_else(|| infer_design_name(spec_path));
    Ok(LoadedSpec { spec, name, hash })
}
