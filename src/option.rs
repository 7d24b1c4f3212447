//! Style options and their resolved values
//!
//! A style option is declared once with a key and a default. Per document the
//! host hands back an [`OptionSet`], from which the option's current
//! [`CodeStyleValue`] is read. Raw entries use the `value:severity` form, e.g.
//! `true:warning` or `when_multiline:suggestion`. The severity half is optional
//! and falls back to the option's default severity.

use crate::severity::Severity;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error reading an option out of a resolved option set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Invalid value for option '{key}': '{raw}'")]
    InvalidValue { key: String, raw: String },

    #[error("Unknown severity for option '{key}': '{raw}'")]
    UnknownSeverity { key: String, raw: String },
}

/// A per-document snapshot of configuration entries
///
/// Implemented by the host. Lookups are by option key and return the raw
/// entry text exactly as configured.
pub trait OptionSet: Send + Sync {
    /// Raw entry for `key`, if the document configures it
    fn get(&self, key: &str) -> Option<String>;
}

impl OptionSet for std::collections::HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        std::collections::HashMap::get(self, key).cloned()
    }
}

/// An option value paired with the severity it is enforced at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeStyleValue<V> {
    pub value: V,
    pub severity: Severity,
}

impl<V> CodeStyleValue<V> {
    pub fn new(value: V, severity: Severity) -> Self {
        Self { value, severity }
    }

    /// Same value, different severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl<V: fmt::Display> fmt::Display for CodeStyleValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.value, self.severity)
    }
}

/// A declared configuration key with its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOption<V> {
    key: String,
    default: CodeStyleValue<V>,
}

impl<V> StyleOption<V> {
    /// Declare an option
    pub fn new(key: &str, default_value: V, default_severity: Severity) -> Self {
        Self {
            key: key.to_string(),
            default: CodeStyleValue::new(default_value, default_severity),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &CodeStyleValue<V> {
        &self.default
    }
}

impl<V> StyleOption<V>
where
    V: FromStr + Clone,
{
    /// Read this option from a resolved set
    ///
    /// An absent key yields the default. A present entry must parse;
    /// an unknown severity word is reported separately from a bad value so
    /// callers can treat it as "not enabled" rather than as a fault.
    pub fn read(&self, options: &dyn OptionSet) -> Result<CodeStyleValue<V>, OptionError> {
        match options.get(&self.key) {
            Some(raw) => self.parse(&raw),
            None => Ok(self.default.clone()),
        }
    }

    /// Parse a raw `value[:severity]` entry for this option
    ///
    /// The text after the last `:` is a severity only if it names one;
    /// otherwise the whole entry is the value, so values may contain `:`.
    pub fn parse(&self, raw: &str) -> Result<CodeStyleValue<V>, OptionError> {
        let invalid = || OptionError::InvalidValue {
            key: self.key.clone(),
            raw: raw.to_string(),
        };

        let split = raw
            .rsplit_once(':')
            .map(|(value, severity)| (value.trim(), severity.trim()));

        if let Some((value_text, severity_text)) = split {
            if let Ok(severity) = severity_text.parse::<Severity>() {
                let value = value_text.parse::<V>().map_err(|_| invalid())?;
                return Ok(CodeStyleValue::new(value, severity));
            }
        }

        if let Ok(value) = raw.trim().parse::<V>() {
            return Ok(CodeStyleValue::new(value, self.default.severity));
        }

        match split {
            Some((value_text, severity_text)) if value_text.parse::<V>().is_ok() => {
                Err(OptionError::UnknownSeverity {
                    key: self.key.clone(),
                    raw: severity_text.to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }
}
