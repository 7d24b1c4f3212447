//! In-memory analysis host shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use stylegate::{
    Action, AnalysisContext, AnalysisError, AnalysisEvent, AnalyzerCategory, AnalyzerOptions,
    CancellationToken, CodeStyleValue, HostError, OptionGatedDispatcher, OptionSet,
    OptionsProvider, Severity, StyleCheck, StyleOption,
};
use tokio::sync::Notify;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A parsed source file
#[derive(Debug, Clone)]
pub struct Tree {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Invocation,
    Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    IfStatement,
    ForStatement,
}

/// Event payload used for every event kind
pub struct Event {
    options: AnalyzerOptions<Tree>,
    tree: Tree,
    cancellation: CancellationToken,
}

impl Event {
    pub fn new(provider: Arc<dyn OptionsProvider<Tree>>, path: &str) -> Self {
        Self {
            options: AnalyzerOptions::new(provider),
            tree: Tree {
                path: PathBuf::from(path),
            },
            cancellation: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn address(&self) -> usize {
        self as *const Event as usize
    }
}

impl AnalysisEvent for Event {
    type Tree = Tree;

    fn options(&self) -> &AnalyzerOptions<Tree> {
        &self.options
    }

    fn tree(&self) -> &Tree {
        &self.tree
    }

    fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

pub struct Workspace {
    pub full_solution_analysis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    CodeBlock,
    SemanticModel,
    SyntaxTree,
    Operation(OperationKind),
    SyntaxNode(SyntaxKind),
}

/// Records registrations and fires events at them
#[derive(Default)]
pub struct Host {
    code_block: Vec<Action<Event>>,
    semantic_model: Vec<Action<Event>>,
    syntax_tree: Vec<Action<Event>>,
    operation: Vec<(Action<Event>, Vec<OperationKind>)>,
    syntax_node: Vec<(Action<Event>, Vec<SyntaxKind>)>,
}

impl Host {
    pub fn registration_count(&self) -> usize {
        self.code_block.len()
            + self.semantic_model.len()
            + self.syntax_tree.len()
            + self.operation.len()
            + self.syntax_node.len()
    }

    pub fn operation_kinds(&self) -> Vec<Vec<OperationKind>> {
        self.operation.iter().map(|(_, k)| k.clone()).collect()
    }

    pub fn syntax_kinds(&self) -> Vec<Vec<SyntaxKind>> {
        self.syntax_node.iter().map(|(_, k)| k.clone()).collect()
    }

    /// Fire `event` at every action registered for `kind`
    pub fn fire(&self, kind: EventKind, event: &Event) -> Vec<Result<(), AnalysisError>> {
        match kind {
            EventKind::CodeBlock => self.code_block.iter().map(|a| a(event)).collect(),
            EventKind::SemanticModel => self.semantic_model.iter().map(|a| a(event)).collect(),
            EventKind::SyntaxTree => self.syntax_tree.iter().map(|a| a(event)).collect(),
            EventKind::Operation(op) => self
                .operation
                .iter()
                .filter(|(_, kinds)| kinds.contains(&op))
                .map(|(a, _)| a(event))
                .collect(),
            EventKind::SyntaxNode(node) => self
                .syntax_node
                .iter()
                .filter(|(_, kinds)| kinds.contains(&node))
                .map(|(a, _)| a(event))
                .collect(),
        }
    }
}

impl AnalysisContext for Host {
    type Workspace = Workspace;
    type OperationKind = OperationKind;
    type SyntaxKind = SyntaxKind;
    type CodeBlock = Event;
    type SemanticModel = Event;
    type SyntaxTree = Event;
    type Operation = Event;
    type SyntaxNode = Event;

    fn register_code_block_action(&mut self, action: Action<Event>) {
        self.code_block.push(action);
    }

    fn register_semantic_model_action(&mut self, action: Action<Event>) {
        self.semantic_model.push(action);
    }

    fn register_syntax_tree_action(&mut self, action: Action<Event>) {
        self.syntax_tree.push(action);
    }

    fn register_operation_action(&mut self, action: Action<Event>, kinds: Vec<OperationKind>) {
        self.operation.push((action, kinds));
    }

    fn register_syntax_node_action(&mut self, action: Action<Event>, kinds: Vec<SyntaxKind>) {
        self.syntax_node.push((action, kinds));
    }
}

/// Per-path option entries; paths without entries are not configured
#[derive(Default)]
pub struct Documents {
    entries: HashMap<PathBuf, HashMap<String, String>>,
}

impl Documents {
    pub fn with(mut self, path: &str, key: &str, raw: &str) -> Self {
        self.entries
            .entry(PathBuf::from(path))
            .or_default()
            .insert(key.to_string(), raw.to_string());
        self
    }

    pub fn empty(mut self, path: &str) -> Self {
        self.entries.entry(PathBuf::from(path)).or_default();
        self
    }

    fn lookup(&self, path: &Path) -> Option<Arc<dyn OptionSet>> {
        self.entries.get(path).map(|entries| {
            let set: Arc<dyn OptionSet> = Arc::new(entries.clone());
            set
        })
    }

    pub fn into_provider(self) -> Arc<dyn OptionsProvider<Tree>> {
        Arc::new(self)
    }
}

#[async_trait]
impl OptionsProvider<Tree> for Documents {
    async fn document_options(
        &self,
        tree: &Tree,
        _cancellation: &CancellationToken,
    ) -> Result<Option<Arc<dyn OptionSet>>, HostError> {
        Ok(self.lookup(&tree.path))
    }
}

/// Provider whose resolution always fails
pub struct Broken;

#[async_trait]
impl OptionsProvider<Tree> for Broken {
    async fn document_options(
        &self,
        _tree: &Tree,
        _cancellation: &CancellationToken,
    ) -> Result<Option<Arc<dyn OptionSet>>, HostError> {
        Err(HostError::Resolution("project not loaded".to_string()))
    }
}

/// Provider that never finishes resolving
pub struct Stalled;

#[async_trait]
impl OptionsProvider<Tree> for Stalled {
    async fn document_options(
        &self,
        _tree: &Tree,
        _cancellation: &CancellationToken,
    ) -> Result<Option<Arc<dyn OptionSet>>, HostError> {
        std::future::pending::<()>().await;
        Ok(None)
    }
}

/// Provider that waits for a release signal before answering
pub struct Deferred {
    pub documents: Documents,
    pub release: Arc<Notify>,
}

#[async_trait]
impl OptionsProvider<Tree> for Deferred {
    async fn document_options(
        &self,
        tree: &Tree,
        _cancellation: &CancellationToken,
    ) -> Result<Option<Arc<dyn OptionSet>>, HostError> {
        self.release.notified().await;
        Ok(self.documents.lookup(&tree.path))
    }
}

/// One callback invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub kind: EventKind,
    pub path: PathBuf,
    pub event: usize,
    pub value: CodeStyleValue<bool>,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
    fn record(&self, kind: EventKind, event: &Event, value: &CodeStyleValue<bool>) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(Call {
                kind,
                path: event.tree().path.clone(),
                event: event.address(),
                value: value.clone(),
            });
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.calls().len()
    }

    pub fn count_for(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.path == Path::new(path))
            .count()
    }
}

pub const BRACES_KEY: &str = "style_prefer_braces";

/// Registers one callback for every event kind
pub struct PreferBraces {
    option: StyleOption<bool>,
    pub recorder: Recorder,
}

impl Default for PreferBraces {
    fn default() -> Self {
        Self {
            option: StyleOption::new(BRACES_KEY, true, Severity::Silent),
            recorder: Recorder::default(),
        }
    }
}

impl StyleCheck for PreferBraces {
    type Context = Host;
    type Value = bool;

    fn id(&self) -> &str {
        "STYLE0011"
    }

    fn title(&self) -> &str {
        "Add braces"
    }

    fn message_format(&self) -> &str {
        "Add braces to '{0}' statement"
    }

    fn category(&self) -> AnalyzerCategory {
        AnalyzerCategory::SyntaxTree
    }

    fn open_file_only(&self, workspace: &Workspace) -> bool {
        !workspace.full_solution_analysis
    }

    fn option(&self) -> &StyleOption<bool> {
        &self.option
    }

    fn register(&self, dispatcher: &mut OptionGatedDispatcher<'_, Self>) {
        let recorder = self.recorder.clone();
        dispatcher.register_code_block_action(move |event, value| {
            recorder.record(EventKind::CodeBlock, event, value)
        });

        let recorder = self.recorder.clone();
        dispatcher.register_semantic_model_action(move |event, value| {
            recorder.record(EventKind::SemanticModel, event, value)
        });

        let recorder = self.recorder.clone();
        dispatcher.register_syntax_tree_action(move |event, value| {
            recorder.record(EventKind::SyntaxTree, event, value)
        });

        let recorder = self.recorder.clone();
        dispatcher.register_operation_action(
            move |event, value| {
                recorder.record(
                    EventKind::Operation(OperationKind::Invocation),
                    event,
                    value,
                )
            },
            vec![OperationKind::Invocation],
        );

        let recorder = self.recorder.clone();
        dispatcher.register_syntax_node_action(
            move |event, value| {
                recorder.record(EventKind::SyntaxNode(SyntaxKind::IfStatement), event, value)
            },
            vec![SyntaxKind::IfStatement, SyntaxKind::ForStatement],
        );
    }
}

pub const NAMING_KEY: &str = "style_field_prefix";

/// Non-configurable semantic check with a string-valued option
pub struct FieldPrefix {
    option: StyleOption<String>,
    pub seen: Arc<Mutex<Vec<String>>>,
}

impl Default for FieldPrefix {
    fn default() -> Self {
        Self {
            option: StyleOption::new(NAMING_KEY, "_".to_string(), Severity::Suggestion),
            seen: Arc::default(),
        }
    }
}

impl StyleCheck for FieldPrefix {
    type Context = Host;
    type Value = String;

    fn id(&self) -> &str {
        "STYLE0040"
    }

    fn title(&self) -> &str {
        "Prefix private fields"
    }

    fn message_format(&self) -> &str {
        "Field '{0}' should start with '{1}'"
    }

    fn is_configurable(&self) -> bool {
        false
    }

    fn category(&self) -> AnalyzerCategory {
        AnalyzerCategory::SemanticDocument
    }

    fn option(&self) -> &StyleOption<String> {
        &self.option
    }

    fn register(&self, dispatcher: &mut OptionGatedDispatcher<'_, Self>) {
        let seen = Arc::clone(&self.seen);
        dispatcher.register_semantic_model_action(move |_, value| {
            if let Ok(mut seen) = seen.lock() {
                seen.push(value.value.clone());
            }
        });
    }
}

/// Second check claiming PreferBraces' id
#[derive(Default)]
pub struct BracesAgain(PreferBraces);

impl StyleCheck for BracesAgain {
    type Context = Host;
    type Value = bool;

    fn id(&self) -> &str {
        self.0.id()
    }

    fn title(&self) -> &str {
        self.0.title()
    }

    fn message_format(&self) -> &str {
        self.0.message_format()
    }

    fn category(&self) -> AnalyzerCategory {
        self.0.category()
    }

    fn option(&self) -> &StyleOption<bool> {
        self.0.option()
    }

    fn register(&self, _dispatcher: &mut OptionGatedDispatcher<'_, Self>) {}
}
