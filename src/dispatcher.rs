//! Option-gated dispatch
//!
//! Every callback a style check registers is wrapped in the same gate:
//!
//! ```text
//! event -> resolve document options -> read option -> classify severity -> callback?
//! ```
//!
//! Resolution is asynchronous on the host side but the host fires events
//! synchronously and cannot resume one later, so the gate blocks the event
//! thread until resolution finishes or the event's cancellation token fires.

use crate::check::StyleCheck;
use crate::context::{
    Action, AnalysisContext, AnalysisError, AnalysisEvent, AnalyzerOptions, CancellationToken,
    HostError,
};
use crate::option::{CodeStyleValue, OptionError, OptionSet, StyleOption};
use crate::severity::Severity;
use futures::future::{self, Either};
use std::pin::pin;
use std::str::FromStr;
use std::sync::Arc;

/// Why a gated callback was not invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No option set applies to the document
    NotApplicable,
    /// The option resolved to a severity that keeps the check dormant
    Disabled(Severity),
    /// The configured severity word is not one we know
    UnrecognizedSeverity,
}

/// Result of gating one event
#[derive(Debug)]
pub enum GateOutcome<V> {
    /// Run the callback with this value
    Proceed(CodeStyleValue<V>),
    /// Do nothing; normal per-document variability
    Skip(SkipReason),
    /// The host cancelled the event
    Cancelled,
    /// The host failed while resolving options
    Fault(HostError),
}

impl<V> GateOutcome<V> {
    pub fn is_proceed(&self) -> bool {
        matches!(self, GateOutcome::Proceed(_))
    }

    /// Invoke `callback` on `Proceed` and translate the rest for the host
    ///
    /// Skips are silent. Cancellation and faults are returned as errors.
    pub fn forward<E, F>(self, event: &E, callback: F) -> Result<(), AnalysisError>
    where
        F: FnOnce(&E, &CodeStyleValue<V>),
    {
        match self {
            GateOutcome::Proceed(value) => {
                callback(event, &value);
                Ok(())
            }
            GateOutcome::Skip(_) => Ok(()),
            GateOutcome::Cancelled => Err(AnalysisError::Cancelled),
            GateOutcome::Fault(err) => Err(AnalysisError::Host(err)),
        }
    }
}

/// Gate one event for `option`
///
/// The document's own severity decides whether the check runs. When it is
/// active, `severity_override` (a configured per-diagnostic severity) sets the
/// severity carried by the value, and a dormant override still disables the
/// check.
pub fn evaluate<E, V>(
    option: &StyleOption<V>,
    severity_override: Option<Severity>,
    event: &E,
) -> GateOutcome<V>
where
    E: AnalysisEvent,
    V: FromStr + Clone,
{
    let cancellation = event.cancellation();
    if cancellation.is_cancelled() {
        log::debug!("{}: cancelled before option resolution", option.key());
        return GateOutcome::Cancelled;
    }

    let resolved = pollster::block_on(resolve_or_cancel(
        event.options(),
        event.tree(),
        cancellation,
    ));

    // A result that raced a cancellation still counts as cancelled
    if cancellation.is_cancelled() {
        log::debug!("{}: cancelled during option resolution", option.key());
        return GateOutcome::Cancelled;
    }

    let options = match resolved {
        Some(Ok(Some(options))) => options,
        Some(Ok(None)) => {
            log::trace!("{}: no options for document", option.key());
            return GateOutcome::Skip(SkipReason::NotApplicable);
        }
        Some(Err(err)) => {
            log::debug!("{}: option resolution failed: {}", option.key(), err);
            return GateOutcome::Fault(err);
        }
        None => return GateOutcome::Cancelled,
    };

    let value = match option.read(options.as_ref()) {
        Ok(value) => value,
        Err(OptionError::UnknownSeverity { raw, .. }) => {
            log::trace!("{}: unrecognized severity '{}'", option.key(), raw);
            return GateOutcome::Skip(SkipReason::UnrecognizedSeverity);
        }
        Err(err) => {
            log::debug!("{}: {}", option.key(), err);
            return GateOutcome::Fault(err.into());
        }
    };

    if !value.severity.is_active() {
        log::trace!("{}: disabled at {}", option.key(), value.severity);
        return GateOutcome::Skip(SkipReason::Disabled(value.severity));
    }

    match severity_override {
        Some(severity) if !severity.is_active() => {
            log::trace!("{}: disabled by configuration", option.key());
            GateOutcome::Skip(SkipReason::Disabled(severity))
        }
        Some(severity) => GateOutcome::Proceed(value.with_severity(severity)),
        None => GateOutcome::Proceed(value),
    }
}

/// Drive resolution until it completes or the token fires (`None`)
async fn resolve_or_cancel<T: ?Sized + Sync>(
    options: &AnalyzerOptions<T>,
    tree: &T,
    cancellation: &CancellationToken,
) -> Option<Result<Option<Arc<dyn OptionSet>>, HostError>> {
    let resolution = pin!(options.resolve(tree, cancellation));
    let cancelled = pin!(cancellation.cancelled());

    match future::select(resolution, cancelled).await {
        Either::Left((result, _)) => Some(result),
        Either::Right(((), _)) => None,
    }
}

type Ctx<S> = <S as StyleCheck>::Context;

/// Registers a style check's callbacks with the host, each behind the gate
///
/// Holds no per-event state: everything captured by a wrapped action is
/// immutable and shared, so one dispatcher's actions can run concurrently
/// for different documents.
pub struct OptionGatedDispatcher<'a, S: StyleCheck> {
    context: &'a mut Ctx<S>,
    option: Arc<StyleOption<S::Value>>,
    severity_override: Option<Severity>,
    check_id: String,
}

impl<'a, S: StyleCheck> OptionGatedDispatcher<'a, S> {
    /// Bind `check`'s option to a host registration surface
    pub fn new(check: &S, context: &'a mut Ctx<S>, severity_override: Option<Severity>) -> Self {
        Self {
            context,
            option: Arc::new(check.option().clone()),
            severity_override,
            check_id: check.id().to_string(),
        }
    }

    /// The option every registered callback is gated on
    pub fn option(&self) -> &StyleOption<S::Value> {
        &self.option
    }

    pub fn severity_override(&self) -> Option<Severity> {
        self.severity_override
    }

    pub fn register_code_block_action<F>(&mut self, callback: F)
    where
        F: Fn(&<Ctx<S> as AnalysisContext>::CodeBlock, &CodeStyleValue<S::Value>)
            + Send
            + Sync
            + 'static,
    {
        log::debug!("{}: registering code block action", self.check_id);
        let action = self.gated(callback);
        self.context.register_code_block_action(action);
    }

    pub fn register_semantic_model_action<F>(&mut self, callback: F)
    where
        F: Fn(&<Ctx<S> as AnalysisContext>::SemanticModel, &CodeStyleValue<S::Value>)
            + Send
            + Sync
            + 'static,
    {
        log::debug!("{}: registering semantic model action", self.check_id);
        let action = self.gated(callback);
        self.context.register_semantic_model_action(action);
    }

    pub fn register_syntax_tree_action<F>(&mut self, callback: F)
    where
        F: Fn(&<Ctx<S> as AnalysisContext>::SyntaxTree, &CodeStyleValue<S::Value>)
            + Send
            + Sync
            + 'static,
    {
        log::debug!("{}: registering syntax tree action", self.check_id);
        let action = self.gated(callback);
        self.context.register_syntax_tree_action(action);
    }

    pub fn register_operation_action<F>(
        &mut self,
        callback: F,
        kinds: Vec<<Ctx<S> as AnalysisContext>::OperationKind>,
    ) where
        F: Fn(&<Ctx<S> as AnalysisContext>::Operation, &CodeStyleValue<S::Value>)
            + Send
            + Sync
            + 'static,
    {
        log::debug!(
            "{}: registering operation action for {} kind(s)",
            self.check_id,
            kinds.len()
        );
        let action = self.gated(callback);
        self.context.register_operation_action(action, kinds);
    }

    pub fn register_syntax_node_action<F>(
        &mut self,
        callback: F,
        kinds: Vec<<Ctx<S> as AnalysisContext>::SyntaxKind>,
    ) where
        F: Fn(&<Ctx<S> as AnalysisContext>::SyntaxNode, &CodeStyleValue<S::Value>)
            + Send
            + Sync
            + 'static,
    {
        log::debug!(
            "{}: registering syntax node action for {} kind(s)",
            self.check_id,
            kinds.len()
        );
        let action = self.gated(callback);
        self.context.register_syntax_node_action(action, kinds);
    }

    fn gated<E, F>(&self, callback: F) -> Action<E>
    where
        E: AnalysisEvent + 'static,
        F: Fn(&E, &CodeStyleValue<S::Value>) + Send + Sync + 'static,
    {
        let option = Arc::clone(&self.option);
        let severity_override = self.severity_override;
        Box::new(move |event: &E| {
            evaluate(&option, severity_override, event).forward(event, &callback)
        })
    }
}
