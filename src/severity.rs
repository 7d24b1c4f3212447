//! Severity levels attached to style options

use serde::{Deserialize, Serialize};

/// Configured strength of a style check
///
/// Only [`Severity::Suggestion`], [`Severity::Warning`] and [`Severity::Error`]
/// let a check run. `Off` and `Silent` keep it dormant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Check is turned off
    #[serde(alias = "none")]
    Off,
    /// Check is configured but reports nothing
    #[default]
    #[serde(alias = "hidden", alias = "refactoring")]
    Silent,
    /// Informational suggestion
    #[serde(alias = "info")]
    Suggestion,
    /// Warning - potential issue
    #[serde(alias = "warn")]
    Warning,
    /// Error - definite problem
    Error,
}

impl Severity {
    /// All severities, weakest first
    pub const ALL: [Severity; 5] = [
        Severity::Off,
        Severity::Silent,
        Severity::Suggestion,
        Severity::Warning,
        Severity::Error,
    ];

    /// Whether a check governed by this severity is allowed to run
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Severity::Suggestion | Severity::Warning | Severity::Error
        )
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Off => write!(f, "none"),
            Severity::Silent => write!(f, "silent"),
            Severity::Suggestion => write!(f, "suggestion"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(Severity::Off),
            "silent" | "hidden" | "refactoring" => Ok(Severity::Silent),
            "suggestion" | "info" => Ok(Severity::Suggestion),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}
