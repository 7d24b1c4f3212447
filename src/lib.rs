//! stylegate - option-gated dispatch for configurable style checks
//!
//! Sits between a static-analysis host and a family of style checks. Each
//! check is governed by one option whose value and severity are resolved per
//! document; a check's callbacks only run when that severity is
//! `suggestion`, `warning` or `error`.
//!
//! # Architecture
//!
//! ```text
//! Host -> StyleCheckAnalyzer::initialize -> StyleCheck::register -> OptionGatedDispatcher
//! Host event -> gated action -> resolve options -> severity active? -> check callback
//! ```
//!
//! The host implements [`AnalysisContext`] (registration), [`AnalysisEvent`]
//! (per-event payloads) and [`OptionsProvider`] (per-document options). Style
//! checks implement [`StyleCheck`]. Everything in between lives here.

pub mod analyzer;
pub mod check;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod option;
pub mod registry;
pub mod severity;

// Re-export main types
pub use analyzer::{AnalyzerError, DiagnosticAnalyzer, DiagnosticDescriptor, StyleCheckAnalyzer};
pub use check::{AnalyzerCategory, StyleCheck};
pub use config::{AnalyzerConfig, ConfigError};
pub use context::{
    Action, AnalysisContext, AnalysisError, AnalysisEvent, AnalyzerOptions, CancellationToken,
    HostError, OptionsProvider,
};
pub use dispatcher::{evaluate, GateOutcome, OptionGatedDispatcher, SkipReason};
pub use option::{CodeStyleValue, OptionError, OptionSet, StyleOption};
pub use registry::{AnalyzerRegistry, Analyzers, RegistryError};
pub use severity::Severity;
