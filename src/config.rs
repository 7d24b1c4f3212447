//! Analyzer configuration
//!
//! Per-diagnostic settings applied on top of what each style check declares:
//! severity overrides and disabled diagnostics.
//! Read from YAML or JSON, with `extends` chains resolved relative to the
//! including file.
//!
//! ```yaml
//! extends: [base.yaml]
//! disabled: [STYLE0040]
//! severity:
//!   STYLE0011: error
//! ```

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Per-diagnostic analyzer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Other configuration files merged underneath this one
    pub extends: Vec<String>,

    /// Diagnostic ids forced off
    pub disabled: Vec<String>,

    /// Severity overrides (diagnostic id -> severity)
    pub severity: HashMap<String, Severity>,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_depth(path, 0)
    }

    fn load_with_depth(path: &Path, depth: usize) -> Result<Self, ConfigError> {
        const MAX_DEPTH: usize = 10;
        if depth >= MAX_DEPTH {
            return Err(ConfigError::Invalid(
                "Maximum config inheritance depth exceeded".to_string(),
            ));
        }

        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        if config.extends.is_empty() {
            return Ok(config);
        }

        let base_dir = path.parent().unwrap_or(Path::new("."));
        let mut merged = Self::default();
        for extend in &config.extends {
            let extend_path = if Path::new(extend).is_absolute() {
                PathBuf::from(extend)
            } else {
                base_dir.join(extend)
            };
            log::debug!("{}: extending {}", path.display(), extend_path.display());
            merged.merge(Self::load_with_depth(&extend_path, depth + 1)?);
        }
        merged.merge(config);
        Ok(merged)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        self.disabled.extend(other.disabled);
        self.severity.extend(other.severity);
    }

    /// Disable a diagnostic
    pub fn disable(&mut self, id: &str) {
        if !self.is_disabled(id) {
            self.disabled.push(id.to_string());
        }
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.iter().any(|d| d == id)
    }

    /// Severity to enforce for `id`, if configured
    ///
    /// A disabled diagnostic resolves to [`Severity::Off`] whatever its
    /// severity entry says.
    pub fn severity_override(&self, id: &str) -> Option<Severity> {
        if self.is_disabled(id) {
            return Some(Severity::Off);
        }
        self.severity.get(id).copied()
    }
}
