//! Rule evaluation engine
//!
//! - [`entry`] - queued rules and the type-erased [`PendingRule`] seam
//! - [`executor`] - evaluates one rule into a [`RuleOutcome`]
//! - [`aggregate`] - folds per-level failures into the surfaced messages

pub mod aggregate;
pub mod entry;
pub mod executor;

pub use aggregate::{ChainAggregator, FailureState, LevelReport};
pub use entry::{PendingRule, RuleEntry};
pub use executor::{FailureMessage, RuleExecutor, RuleOutcome};
