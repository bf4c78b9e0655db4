//! Per-level chain state

use super::Mode;
use crate::config::ChainConfig;
use crate::engine::{ChainAggregator, LevelReport, PendingRule, RuleExecutor, RuleOutcome};
use crate::foundation::ChainResult;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Queue of rules waiting for an evaluation point.
pub type PendingQueue<'a> = VecDeque<Box<dyn PendingRule + 'a>>;

/// State owned by exactly one chain level.
///
/// Holds the entity, the mode, the pending queue and the failures recorded
/// since the last drain. Failures live in a [`LevelReport`] that is moved out
/// as a whole when the level is drained.
pub struct ChainState<'a, E: ?Sized> {
    entity: &'a E,
    mode: Mode,
    pending: PendingQueue<'a>,
    report: LevelReport,
    config: Arc<ChainConfig>,
}

impl<'a, E: ?Sized> ChainState<'a, E> {
    /// Creates the state of the level at `depth`.
    pub fn new(entity: &'a E, mode: Mode, depth: usize, config: Arc<ChainConfig>) -> Self {
        Self {
            entity,
            mode,
            pending: VecDeque::new(),
            report: LevelReport::new(depth),
            config,
        }
    }

    /// Returns the entity under validation.
    #[inline]
    pub fn entity(&self) -> &'a E {
        self.entity
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Depth of the level (root is 0).
    #[inline]
    pub fn depth(&self) -> usize {
        self.report.depth()
    }

    /// Number of rules waiting for an evaluation point.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Shared handle to the configuration, handed to nested chains.
    #[inline]
    pub fn config_handle(&self) -> Arc<ChainConfig> {
        Arc::clone(&self.config)
    }

    /// Mutable configuration; copies it first if another chain shares it.
    pub fn config_mut(&mut self) -> &mut ChainConfig {
        Arc::make_mut(&mut self.config)
    }

    /// Replaces the configuration of this level only.
    pub fn replace_config(&mut self, config: ChainConfig) {
        self.config = Arc::new(config);
    }

    /// Appends a rule to the queue.
    pub fn push(&mut self, rule: Box<dyn PendingRule + 'a>) {
        self.pending.push_back(rule);
    }

    /// Moves every pending rule out, leaving the queue empty.
    pub fn take_pending(&mut self) -> PendingQueue<'a> {
        std::mem::take(&mut self.pending)
    }

    /// Appends rules to the end of the queue, keeping their order.
    pub fn append_pending(&mut self, mut rules: PendingQueue<'a>) {
        self.pending.append(&mut rules);
    }

    /// Executes every pending rule in registration order.
    ///
    /// The queue is empty afterwards. Returns the number of rules executed.
    pub fn evaluate_pending(&mut self) -> usize {
        let count = self.pending.len();
        if count == 0 {
            return 0;
        }
        tracing::debug!(depth = self.depth(), rules = count, "evaluating pending rules");

        while let Some(rule) = self.pending.pop_front() {
            let outcome = RuleExecutor::execute(rule);
            tracing::trace!(depth = self.depth(), passed = outcome.passed(), "rule evaluated");
            self.report.count_evaluated();
            if let RuleOutcome::Failed(message) = outcome {
                self.report.record(message);
            }
        }
        count
    }

    /// Evaluates the queue and moves the recorded failures out.
    ///
    /// The level is clean afterwards.
    pub fn drain(&mut self) -> LevelReport {
        self.evaluate_pending();
        let depth = self.depth();
        std::mem::replace(&mut self.report, LevelReport::new(depth))
    }

    /// Drains this level alone and raises if anything failed.
    pub fn drain_and_raise(&mut self) -> ChainResult<()> {
        let mut aggregator = ChainAggregator::new();
        aggregator.absorb(self.drain());
        aggregator.finish(&self.config)
    }
}

impl<E: ?Sized> fmt::Debug for ChainState<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainState")
            .field("mode", &self.mode)
            .field("depth", &self.depth())
            .field("pending", &self.pending.len())
            .field("failure", &self.report.state())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
