//! Rule executor: evaluates one queued rule

use super::entry::PendingRule;
use crate::config::NO_RESULT_MESSAGE;
use std::borrow::Cow;

/// The message of a failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureMessage {
    /// The caller supplied this message. Never deduplicated.
    Custom(String),
    /// No custom message: the rule-level or chain-level default applies.
    /// Deduplicated across chain levels.
    Default(Cow<'static, str>),
}

impl FailureMessage {
    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Custom(message) => message,
            Self::Default(message) => message,
        }
    }

    /// Returns true for a default message.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

/// The result of executing one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule function passed.
    Passed,
    /// The rule function failed or returned no result.
    Failed(FailureMessage),
}

impl RuleOutcome {
    /// Returns true if the rule passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the effective failure message, if the rule failed.
    #[must_use]
    pub fn message(&self) -> Option<&FailureMessage> {
        match self {
            Self::Passed => None,
            Self::Failed(message) => Some(message),
        }
    }
}

/// Evaluates queued rules.
///
/// A panic raised by a rule function is not caught here.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExecutor;

impl RuleExecutor {
    /// Executes `rule` and consumes it.
    ///
    /// Taking the rule by value is what makes every entry single-use.
    pub fn execute(rule: Box<dyn PendingRule + '_>) -> RuleOutcome {
        match rule.verdict() {
            Some(true) => RuleOutcome::Passed,
            Some(false) => RuleOutcome::Failed(match rule.custom_message() {
                Some(message) => FailureMessage::Custom(message.to_owned()),
                None => FailureMessage::Default(rule.default_message().clone()),
            }),
            None => RuleOutcome::Failed(FailureMessage::Custom(NO_RESULT_MESSAGE.to_owned())),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
