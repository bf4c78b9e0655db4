//! Root chain over a top-level entity

use super::{ChainState, Mode, ValidationChain};
use crate::config::ChainConfig;
use crate::engine::ChainAggregator;
use crate::foundation::{ChainResult, ConstructionError};
use std::sync::Arc;

/// A validation chain over a top-level entity.
///
/// # Examples
///
/// ```rust
/// use fluentval_validator::prelude::*;
///
/// struct Login {
///     user: String,
///     password: String,
/// }
///
/// let login = Login { user: "ada".into(), password: String::new() };
///
/// let err = Chain::of_immediate(&login)
///     .not_empty(|l: &Login| &l.user)
///     .and_then(|c| c.not_empty_with(|l: &Login| &l.password, "password required"))
///     .unwrap_err();
///
/// assert_eq!(err.messages(), Some(&["password required".to_owned()][..]));
/// ```
pub struct Chain<'a, E: ?Sized> {
    state: ChainState<'a, E>,
}

impl<'a, E: ?Sized> Chain<'a, E> {
    /// Creates a chain with the default configuration.
    pub fn new(entity: &'a E, mode: Mode) -> Self {
        Self::build(entity, mode, ChainConfig::default())
    }

    /// Creates a chain in immediate mode.
    pub fn of_immediate(entity: &'a E) -> Self {
        Self::new(entity, Mode::Immediate)
    }

    /// Creates a chain in deferred mode.
    pub fn of_lazy(entity: &'a E) -> Self {
        Self::new(entity, Mode::Deferred)
    }

    /// Creates a chain over an entity that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NullEntity`] if `entity` is `None`.
    pub fn try_of(entity: Option<&'a E>, mode: Mode) -> Result<Self, ConstructionError> {
        entity
            .map(|entity| Self::new(entity, mode))
            .ok_or(ConstructionError::NullEntity)
    }

    /// Creates a chain with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfig`] if the configuration has
    /// a blank message or an empty separator.
    pub fn with_config(
        entity: &'a E,
        mode: Mode,
        config: ChainConfig,
    ) -> Result<Self, ConstructionError> {
        config.validate()?;
        Ok(Self::build(entity, mode, config))
    }

    fn build(entity: &'a E, mode: Mode, config: ChainConfig) -> Self {
        tracing::trace!(?mode, "validation chain created");
        Self {
            state: ChainState::new(entity, mode, 0, Arc::new(config)),
        }
    }
}

impl<'a, E: ?Sized + 'a> ValidationChain<'a> for Chain<'a, E> {
    type Entity = E;

    fn state(&self) -> &ChainState<'a, E> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ChainState<'a, E> {
        &mut self.state
    }

    fn drain_lineage(&mut self, aggregator: &mut ChainAggregator) {
        aggregator.absorb(self.state.drain());
    }

    /// In deferred mode, evaluates the queue and raises; in immediate mode
    /// there is nothing left to evaluate.
    fn complete(&mut self) -> ChainResult<()> {
        if self.state.mode().is_immediate() {
            return Ok(());
        }
        let mut aggregator = ChainAggregator::new();
        self.drain_lineage(&mut aggregator);
        aggregator.finish(self.state.config())
    }
}

impl<E: ?Sized> std::fmt::Debug for Chain<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("state", &self.state).finish()
    }
}
