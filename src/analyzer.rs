//! Analyzer adapter
//!
//! Wraps one [`StyleCheck`] in the surface a host drives uniformly: identity,
//! scheduling category, open-files-only predicate and one-time initialization.
//! All registration is delegated to the check through an
//! [`OptionGatedDispatcher`]; the adapter itself never registers anything.

use crate::check::{AnalyzerCategory, StyleCheck};
use crate::config::AnalyzerConfig;
use crate::context::AnalysisContext;
use crate::dispatcher::OptionGatedDispatcher;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Error driving an analyzer's lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    #[error("Analyzer '{id}' is already initialized")]
    AlreadyInitialized { id: String },
}

/// Identity of the diagnostic a style check may report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticDescriptor {
    /// Stable identifier (e.g., "STYLE0011")
    pub id: String,

    /// Localizable title
    pub title: String,

    /// Localizable message template
    pub message_format: String,

    /// Scheduling category of the reporting analyzer
    pub category: AnalyzerCategory,

    /// Severity of the governing option when nothing is configured
    pub default_severity: Severity,

    /// Whether users can change the severity
    pub configurable: bool,

    /// Documentation URL
    #[serde(default)]
    pub help_link: Option<String>,
}

impl DiagnosticDescriptor {
    /// Describe a style check
    pub fn of<S: StyleCheck>(check: &S) -> Self {
        Self {
            id: check.id().to_string(),
            title: check.title().to_string(),
            message_format: check.message_format().to_string(),
            category: check.category(),
            default_severity: check.option().default_value().severity,
            configurable: check.is_configurable(),
            help_link: None,
        }
    }

    pub fn with_help_link(mut self, url: &str) -> Self {
        self.help_link = Some(url.to_string());
        self
    }
}

/// Host-facing analyzer surface, independent of the concrete check type
pub trait DiagnosticAnalyzer<C: AnalysisContext>: Send + Sync {
    fn descriptor(&self) -> &DiagnosticDescriptor;

    fn id(&self) -> &str {
        &self.descriptor().id
    }

    /// Register the analyzer's callbacks; call once per analyzer
    fn initialize(&self, context: &mut C) -> Result<(), AnalyzerError>;

    fn category(&self) -> AnalyzerCategory;

    fn open_file_only(&self, workspace: &C::Workspace) -> bool;

    /// Configured severity reported when a document enables the check
    fn severity_override(&self) -> Option<Severity>;
}

/// Adapter from a [`StyleCheck`] to the host analyzer surface
pub struct StyleCheckAnalyzer<S: StyleCheck> {
    check: S,
    descriptor: DiagnosticDescriptor,
    severity_override: Option<Severity>,
    initialized: AtomicBool,
}

impl<S: StyleCheck> StyleCheckAnalyzer<S> {
    /// Build from a default-constructed check
    pub fn new() -> Self {
        let check = S::default();
        let descriptor = DiagnosticDescriptor::of(&check);
        Self {
            check,
            descriptor,
            severity_override: None,
            initialized: AtomicBool::new(false),
        }
    }

    /// Report at `severity` whenever the document enables the check
    ///
    /// A dormant severity (`Off` or `Silent`) disables the check outright.
    pub fn with_severity_override(mut self, severity: Severity) -> Self {
        self.severity_override = Some(severity);
        self
    }

    /// Apply the configured overrides for this diagnostic
    ///
    /// Severity overrides only apply to configurable checks.
    pub fn with_config(self, config: &AnalyzerConfig) -> Self {
        let Some(severity) = config.severity_override(self.id()) else {
            return self;
        };

        if self.is_configurable() {
            self.with_severity_override(severity)
        } else {
            log::debug!("{}: not configurable, ignoring severity override", self.id());
            self
        }
    }

    pub fn with_help_link(mut self, url: &str) -> Self {
        self.descriptor = self.descriptor.with_help_link(url);
        self
    }

    pub fn check(&self) -> &S {
        &self.check
    }

    pub fn descriptor(&self) -> &DiagnosticDescriptor {
        &self.descriptor
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn title(&self) -> &str {
        &self.descriptor.title
    }

    pub fn message_format(&self) -> &str {
        &self.descriptor.message_format
    }

    pub fn is_configurable(&self) -> bool {
        self.descriptor.configurable
    }

    pub fn severity_override(&self) -> Option<Severity> {
        self.severity_override
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Hand the check a dispatcher bound to `context`
    ///
    /// The host calls this once per analyzer lifetime. A repeated call
    /// registers nothing and returns [`AnalyzerError::AlreadyInitialized`].
    pub fn initialize(&self, context: &mut S::Context) -> Result<(), AnalyzerError> {
        if self.initialized.swap(true, Ordering::AcqRel) {
            return Err(AnalyzerError::AlreadyInitialized {
                id: self.descriptor.id.clone(),
            });
        }

        log::debug!("{}: initializing analyzer", self.descriptor.id);
        let mut dispatcher = OptionGatedDispatcher::new(&self.check, context, self.severity_override);
        self.check.register(&mut dispatcher);
        Ok(())
    }

    pub fn category(&self) -> AnalyzerCategory {
        self.check.category()
    }

    pub fn open_file_only(
        &self,
        workspace: &<S::Context as AnalysisContext>::Workspace,
    ) -> bool {
        self.check.open_file_only(workspace)
    }
}

impl<S: StyleCheck> Default for StyleCheckAnalyzer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StyleCheck> DiagnosticAnalyzer<S::Context> for StyleCheckAnalyzer<S> {
    fn descriptor(&self) -> &DiagnosticDescriptor {
        StyleCheckAnalyzer::descriptor(self)
    }

    fn initialize(&self, context: &mut S::Context) -> Result<(), AnalyzerError> {
        StyleCheckAnalyzer::initialize(self, context)
    }

    fn category(&self) -> AnalyzerCategory {
        StyleCheckAnalyzer::category(self)
    }

    fn open_file_only(&self, workspace: &<S::Context as AnalysisContext>::Workspace) -> bool {
        StyleCheckAnalyzer::open_file_only(self, workspace)
    }

    fn severity_override(&self) -> Option<Severity> {
        self.severity_override
    }
}
