//! Analyzer registry
//!
//! Collects style check types, instantiates one analyzer per check with the
//! configured overrides applied, and drives their initialization against a
//! host context.

use crate::analyzer::{AnalyzerError, DiagnosticAnalyzer, DiagnosticDescriptor, StyleCheckAnalyzer};
use crate::check::StyleCheck;
use crate::config::AnalyzerConfig;
use crate::context::AnalysisContext;
use std::collections::HashSet;
use thiserror::Error;

/// Error building analyzers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate diagnostic id: {0}")]
    DuplicateId(String),
}

type AnalyzerFactory<C> = Box<dyn Fn(&AnalyzerConfig) -> Box<dyn DiagnosticAnalyzer<C>> + Send + Sync>;

/// Catalog of style checks for one host
pub struct AnalyzerRegistry<C: AnalysisContext + 'static> {
    factories: Vec<AnalyzerFactory<C>>,
    config: AnalyzerConfig,
}

impl<C: AnalysisContext + 'static> AnalyzerRegistry<C> {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            config: AnalyzerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Register a style check type
    pub fn register<S>(&mut self) -> &mut Self
    where
        S: StyleCheck<Context = C>,
    {
        self.factories.push(Box::new(|config: &AnalyzerConfig| {
            let analyzer = StyleCheckAnalyzer::<S>::new().with_config(config);
            Box::new(analyzer) as Box<dyn DiagnosticAnalyzer<C>>
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate every registered check
    pub fn build(&self) -> Result<Analyzers<C>, RegistryError> {
        let mut seen = HashSet::new();
        let mut analyzers = Vec::with_capacity(self.factories.len());

        for factory in &self.factories {
            let analyzer = factory(&self.config);
            if !seen.insert(analyzer.id().to_string()) {
                return Err(RegistryError::DuplicateId(analyzer.id().to_string()));
            }
            analyzers.push(analyzer);
        }

        log::debug!("built {} analyzer(s)", analyzers.len());
        Ok(Analyzers { analyzers })
    }
}

impl<C: AnalysisContext + 'static> Default for AnalyzerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantiated analyzers, in registration order
pub struct Analyzers<C: AnalysisContext + 'static> {
    analyzers: Vec<Box<dyn DiagnosticAnalyzer<C>>>,
}

impl<C: AnalysisContext + 'static> Analyzers<C> {
    /// Initialize every analyzer against `context`
    pub fn initialize_all(&self, context: &mut C) -> Result<(), AnalyzerError> {
        for analyzer in &self.analyzers {
            analyzer.initialize(context)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&dyn DiagnosticAnalyzer<C>> {
        self.analyzers
            .iter()
            .find(|a| a.id() == id)
            .map(|a| &**a)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.id()).collect()
    }

    pub fn descriptors(&self) -> Vec<&DiagnosticDescriptor> {
        self.analyzers.iter().map(|a| a.descriptor()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DiagnosticAnalyzer<C>> {
        self.analyzers.iter().map(|a| &**a)
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}
