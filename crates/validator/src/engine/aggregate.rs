//! Failure aggregation across chain levels
//!
//! Every chain level keeps a [`FailureState`] plus two buffers: the default
//! texts its failed rules triggered, and the custom messages in evaluation
//! order. When an evaluation point is reached those buffers are moved out as a
//! [`LevelReport`] and folded into a [`ChainAggregator`], ancestor-most level
//! first. The aggregator merges the level states and decides from the merged
//! state whether to raise and which buffers to surface.
//!
//! The surfaced message list is:
//!
//! 1. every distinct default text, in first-trigger order,
//! 2. every custom message, in evaluation order, duplicates included.

use crate::config::ChainConfig;
use crate::foundation::ChainResult;
use indexmap::IndexSet;
use smallvec::SmallVec;
use std::borrow::Cow;

use super::FailureMessage;

// ============================================================================
// FAILURE STATE
// ============================================================================

/// What kinds of failure a chain level has recorded since its last drain.
///
/// Transitions are monotonic until the level is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FailureState {
    /// Nothing failed.
    #[default]
    NoFailure,
    /// Only failures without a custom message.
    DefaultOnly,
    /// Only failures with a custom message.
    HasCustomMessages,
    /// Both kinds.
    Both,
}

impl FailureState {
    /// Records a failure that surfaces a default text.
    #[must_use]
    pub fn with_default(self) -> Self {
        match self {
            Self::NoFailure | Self::DefaultOnly => Self::DefaultOnly,
            Self::HasCustomMessages | Self::Both => Self::Both,
        }
    }

    /// Records a failure that surfaces a custom message.
    #[must_use]
    pub fn with_custom(self) -> Self {
        match self {
            Self::NoFailure | Self::HasCustomMessages => Self::HasCustomMessages,
            Self::DefaultOnly | Self::Both => Self::Both,
        }
    }

    /// Combines the failures recorded by two levels.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let merged = if other.has_default() {
            self.with_default()
        } else {
            self
        };
        if other.has_custom() {
            merged.with_custom()
        } else {
            merged
        }
    }

    /// Returns true if any failure was recorded.
    #[must_use]
    pub fn is_failure(self) -> bool {
        self != Self::NoFailure
    }

    /// Returns true if a default text was triggered.
    #[must_use]
    pub fn has_default(self) -> bool {
        matches!(self, Self::DefaultOnly | Self::Both)
    }

    /// Returns true if a custom message was recorded.
    #[must_use]
    pub fn has_custom(self) -> bool {
        matches!(self, Self::HasCustomMessages | Self::Both)
    }
}

// ============================================================================
// LEVEL REPORT
// ============================================================================

/// Failures recorded by one chain level, moved out at an evaluation point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelReport {
    depth: usize,
    evaluated: usize,
    state: FailureState,
    defaults: IndexSet<Cow<'static, str>>,
    custom: SmallVec<[String; 4]>,
}

impl LevelReport {
    /// Creates an empty report for the level at `depth` (root is 0).
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    /// Records one failed rule.
    pub fn record(&mut self, message: FailureMessage) {
        match message {
            FailureMessage::Custom(text) => {
                self.state = self.state.with_custom();
                self.custom.push(text);
            }
            FailureMessage::Default(text) => {
                self.state = self.state.with_default();
                self.defaults.insert(text);
            }
        }
    }

    /// Counts one executed rule, passed or failed.
    pub fn count_evaluated(&mut self) {
        self.evaluated += 1;
    }

    /// Depth of the level (root is 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of rules executed into this report.
    #[must_use]
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Failure state of the level.
    #[must_use]
    pub fn state(&self) -> FailureState {
        self.state
    }

    /// Distinct default texts, in first-trigger order.
    pub fn default_messages(&self) -> impl Iterator<Item = &str> {
        self.defaults.iter().map(|text| &**text)
    }

    /// Custom messages, in evaluation order.
    #[must_use]
    pub fn custom_messages(&self) -> &[String] {
        &self.custom
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.state.is_failure()
    }
}

// ============================================================================
// AGGREGATOR
// ============================================================================

/// Folds level reports into the surfaced message list.
#[derive(Debug, Default)]
pub struct ChainAggregator {
    levels: usize,
    evaluated: usize,
    state: FailureState,
    defaults: IndexSet<Cow<'static, str>>,
    custom: Vec<String>,
}

impl ChainAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one level in. Call ancestor-most level first.
    pub fn absorb(&mut self, report: LevelReport) {
        self.levels += 1;
        self.evaluated += report.evaluated;
        self.state = self.state.merge(report.state);
        self.defaults.extend(report.defaults);
        self.custom.extend(report.custom);
    }

    /// Returns true if any absorbed level recorded a failure.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.state.is_failure()
    }

    /// Failure state across every absorbed level.
    #[must_use]
    pub fn state(&self) -> FailureState {
        self.state
    }

    /// Number of levels absorbed.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Surfaced messages: distinct defaults first, then custom messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        let defaults = self.defaults.into_iter().map(Cow::into_owned);
        match self.state {
            FailureState::NoFailure => Vec::new(),
            FailureState::DefaultOnly => defaults.collect(),
            FailureState::HasCustomMessages => self.custom,
            FailureState::Both => defaults.chain(self.custom).collect(),
        }
    }

    /// Raises through `config` if anything failed.
    pub fn finish(self, config: &ChainConfig) -> ChainResult<()> {
        let (levels, evaluated, state) = (self.levels, self.evaluated, self.state);
        if !state.is_failure() {
            tracing::trace!(levels, evaluated, "validation chain passed");
            return Ok(());
        }

        let messages = self.into_messages();
        tracing::debug!(
            levels,
            evaluated,
            ?state,
            failures = messages.len(),
            "validation chain failed"
        );
        Err(config.raise(messages))
    }
}

// ============================================================================
// TESTS
// ============================================================================
