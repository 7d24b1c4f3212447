//! Style check contract

use crate::context::AnalysisContext;
use crate::dispatcher::OptionGatedDispatcher;
use crate::option::StyleOption;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When and how the host schedules an analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnalyzerCategory {
    /// Runs on syntax trees alone, no semantic model needed
    #[default]
    SyntaxTree,
    /// Runs on the semantic model for a span of a document
    SemanticSpan,
    /// Runs on the semantic model of a whole document
    SemanticDocument,
    /// Runs once per project
    Project,
}

impl fmt::Display for AnalyzerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerCategory::SyntaxTree => write!(f, "syntax-tree"),
            AnalyzerCategory::SemanticSpan => write!(f, "semantic-span"),
            AnalyzerCategory::SemanticDocument => write!(f, "semantic-document"),
            AnalyzerCategory::Project => write!(f, "project"),
        }
    }
}

impl FromStr for AnalyzerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "syntax-tree" | "syntax" => Ok(AnalyzerCategory::SyntaxTree),
            "semantic-span" => Ok(AnalyzerCategory::SemanticSpan),
            "semantic-document" | "semantic" => Ok(AnalyzerCategory::SemanticDocument),
            "project" => Ok(AnalyzerCategory::Project),
            _ => Err(format!("Unknown analyzer category: {}", s)),
        }
    }
}

/// A pluggable style check governed by a single option
///
/// Checks are created with [`Default`], so a host can build one without
/// knowing anything but its type. All analysis work happens inside the
/// callbacks the check registers from [`StyleCheck::register`].
///
/// # Example
///
/// ```ignore
/// struct PreferBraces {
///     option: StyleOption<bool>,
/// }
///
/// impl Default for PreferBraces {
///     fn default() -> Self {
///         Self {
///             option: StyleOption::new("style_prefer_braces", true, Severity::Silent),
///         }
///     }
/// }
///
/// impl StyleCheck for PreferBraces {
///     type Context = MyHost;
///     type Value = bool;
///
///     fn id(&self) -> &str { "STYLE0011" }
///     fn title(&self) -> &str { "Add braces" }
///     fn message_format(&self) -> &str { "Add braces to '{0}' statement" }
///     fn category(&self) -> AnalyzerCategory { AnalyzerCategory::SyntaxTree }
///     fn option(&self) -> &StyleOption<bool> { &self.option }
///
///     fn register(&self, dispatcher: &mut OptionGatedDispatcher<'_, Self>) {
///         dispatcher.register_syntax_node_action(
///             |node, value| { /* inspect and report */ },
///             vec![SyntaxKind::IfStatement],
///         );
///     }
/// }
/// ```
pub trait StyleCheck: Default + Send + Sync + Sized + 'static {
    /// Host registration surface this check is written against
    type Context: AnalysisContext;

    /// Value type of the governing option
    type Value: FromStr + Clone + Send + Sync + 'static;

    /// Stable diagnostic identifier (e.g., "STYLE0011")
    fn id(&self) -> &str;

    /// Localizable title
    fn title(&self) -> &str;

    /// Localizable message template
    fn message_format(&self) -> &str;

    /// Whether users can change the severity of this check
    fn is_configurable(&self) -> bool {
        true
    }

    /// Scheduling category
    fn category(&self) -> AnalyzerCategory;

    /// Whether the check only runs on documents open in an editor
    fn open_file_only(&self, _workspace: &<Self::Context as AnalysisContext>::Workspace) -> bool {
        false
    }

    /// The option that gates every callback of this check
    fn option(&self) -> &StyleOption<Self::Value>;

    /// Register all analysis callbacks through the dispatcher
    fn register(&self, dispatcher: &mut OptionGatedDispatcher<'_, Self>);
}
