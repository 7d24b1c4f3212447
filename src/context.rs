//! Host-facing traits: registration surface, event payloads, option resolution
//!
//! The gateway never looks inside an event beyond three things: the options
//! accessor, a representative syntax tree and a cancellation token. Everything
//! else about the host (its tree type, its node and operation kinds, its
//! workspace) is named through associated types.

use crate::option::{OptionError, OptionSet};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use tokio_util::sync::CancellationToken;

/// Failure raised by the host while resolving options
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Option resolution failed: {0}")]
    Resolution(String),

    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Outcome of a wrapped action that the host must see
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis was cancelled")]
    Cancelled,

    #[error(transparent)]
    Host(#[from] HostError),
}

impl AnalysisError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnalysisError::Cancelled)
    }
}

/// A callback as the host stores it
pub type Action<E> = Box<dyn Fn(&E) -> Result<(), AnalysisError> + Send + Sync>;

/// Resolves the per-document option set for a syntax tree
///
/// Resolution may load configuration files or merge editor state, so it is
/// asynchronous. `Ok(None)` means no configuration applies to the tree.
#[async_trait]
pub trait OptionsProvider<T: ?Sized + Sync>: Send + Sync {
    async fn document_options(
        &self,
        tree: &T,
        cancellation: &CancellationToken,
    ) -> Result<Option<Arc<dyn OptionSet>>, HostError>;
}

/// Document-level options accessor carried by every event
pub struct AnalyzerOptions<T: ?Sized + Sync> {
    provider: Arc<dyn OptionsProvider<T>>,
}

impl<T: ?Sized + Sync> AnalyzerOptions<T> {
    pub fn new(provider: Arc<dyn OptionsProvider<T>>) -> Self {
        Self { provider }
    }

    /// Start resolving the option set for `tree`
    pub async fn resolve(
        &self,
        tree: &T,
        cancellation: &CancellationToken,
    ) -> Result<Option<Arc<dyn OptionSet>>, HostError> {
        self.provider.document_options(tree, cancellation).await
    }
}

impl<T: ?Sized + Sync> Clone for AnalyzerOptions<T> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

/// One analysis event as fired by the host
pub trait AnalysisEvent: Send + Sync {
    /// Syntax tree type the host analyzes
    type Tree: ?Sized + Sync;

    /// Options accessor for the document under analysis
    fn options(&self) -> &AnalyzerOptions<Self::Tree>;

    /// Representative tree of the analyzed unit
    fn tree(&self) -> &Self::Tree;

    /// Cancellation signal for this event
    fn cancellation(&self) -> &CancellationToken;
}

/// Registration surface handed to an analyzer at initialization
pub trait AnalysisContext {
    /// Ambient workspace the host runs in
    type Workspace: ?Sized;

    /// Kind tag for operation-level events
    type OperationKind: Clone + Send + Sync + 'static;

    /// Kind tag for syntax-node-level events
    type SyntaxKind: Clone + Send + Sync + 'static;

    type CodeBlock: AnalysisEvent + 'static;
    type SemanticModel: AnalysisEvent + 'static;
    type SyntaxTree: AnalysisEvent + 'static;
    type Operation: AnalysisEvent + 'static;
    type SyntaxNode: AnalysisEvent + 'static;

    fn register_code_block_action(&mut self, action: Action<Self::CodeBlock>);

    fn register_semantic_model_action(&mut self, action: Action<Self::SemanticModel>);

    fn register_syntax_tree_action(&mut self, action: Action<Self::SyntaxTree>);

    fn register_operation_action(
        &mut self,
        action: Action<Self::Operation>,
        kinds: Vec<Self::OperationKind>,
    );

    fn register_syntax_node_action(
        &mut self,
        action: Action<Self::SyntaxNode>,
        kinds: Vec<Self::SyntaxKind>,
    );
}
