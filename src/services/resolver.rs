use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::ResolutionState;
use crate::domain::ports::ConfigSource;
use crate::infrastructure::sources::DefaultsSource;
use crate::services::{ResolvedConfig, SchemaRegistry, SourceLoader, Validator};

/// Drives one resolution: load, interpolate, validate, freeze.
///
/// The schema's defaults are always included as the lowest-precedence source.
/// A resolver runs once; to reload, build a new one.
pub struct ConfigResolver {
    schema: Arc<SchemaRegistry>,
    sources: Vec<Box<dyn ConfigSource>>,
    state: ResolutionState,
}

impl ConfigResolver {
    pub fn new(schema: SchemaRegistry) -> Self {
        Self::with_schema(Arc::new(schema))
    }

    pub fn with_schema(schema: Arc<SchemaRegistry>) -> Self {
        let defaults: Box<dyn ConfigSource> = Box::new(DefaultsSource::new(Arc::clone(&schema)));
        Self {
            schema,
            sources: vec![defaults],
            state: ResolutionState::Unloaded,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    pub const fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn schema(&self) -> &Arc<SchemaRegistry> {
        &self.schema
    }

    fn transition(&mut self, next: ResolutionState) -> ConfigResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(ConfigError::InvalidStateTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }

    /// Run the pipeline. Ends in `Ready` with the snapshot, or in `Failed`.
    #[instrument(skip(self), fields(sources = self.sources.len()))]
    pub fn resolve(&mut self) -> ConfigResult<ResolvedConfig> {
        self.transition(ResolutionState::Loading)?;

        let raw = match SourceLoader::new(Arc::clone(&self.schema)).load(&self.sources) {
            Ok(raw) => raw,
            Err(err) => return Err(self.fail(err)),
        };

        self.transition(ResolutionState::Validating)?;

        match Validator::new().validate(&raw, &self.schema) {
            Ok(config) => {
                self.transition(ResolutionState::Ready)?;
                info!(keys = config.len(), "configuration resolved");
                Ok(config)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: ConfigError) -> ConfigError {
        self.state = ResolutionState::Failed;
        error!(key = err.key().unwrap_or("-"), error = %err, "configuration resolution failed");
        err
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("state", &self.state)
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
