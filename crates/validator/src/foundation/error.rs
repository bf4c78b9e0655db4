//! Error types raised at the boundary of a validation chain
//!
//! Three kinds of failure leave a chain:
//!
//! - [`ConstructionError`] - a contract violation at the call that built
//!   something (null entity, null nested value, unusable configuration).
//!   Always raised synchronously, never deferred.
//! - [`ValidationFailure`] - one or more rules failed at an evaluation point.
//!   Carries every surfaced message, already deduplicated and ordered.
//! - [`ChainError::Custom`] - the same failure, converted by a caller-supplied
//!   error factory (see [`ChainConfig::with_error_factory`](crate::config::ChainConfig::with_error_factory)).
//!
//! A predicate that panics is a defect in rule logic, not a failed rule: the
//! panic unwinds through the chain untouched.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// CONSTRUCTION ERROR
// ============================================================================

/// A contract violation detected while building a chain or its configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConstructionError {
    /// The entity handed to a chain entry point was absent.
    #[error("entity must not be null")]
    NullEntity,

    /// The value selected by a descend accessor was absent.
    #[error("nested value must not be null")]
    NullNestedValue,

    /// A configuration could not be parsed or holds a blank value.
    #[error("invalid chain configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl ConstructionError {
    /// Creates an `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// The aggregated outcome of an evaluation point where at least one rule failed.
///
/// Messages are stored in the order they are surfaced: deduplicated default
/// messages first (ancestor-most level first), then custom messages in
/// evaluation order. `Display` renders them joined by the separator.
///
/// # Examples
///
/// ```rust
/// use fluentval_validator::foundation::ValidationFailure;
///
/// let failure = ValidationFailure::new(vec!["must not be empty".into(), "list required".into()], ",");
/// assert_eq!(failure.to_string(), "must not be empty,list required");
/// assert_eq!(failure.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    messages: Vec<String>,
    separator: Cow<'static, str>,
}

impl ValidationFailure {
    /// Creates a failure from already-ordered messages.
    pub fn new(messages: Vec<String>, separator: impl Into<Cow<'static, str>>) -> Self {
        Self {
            messages,
            separator: separator.into(),
        }
    }

    /// Returns the surfaced messages in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns the number of surfaced messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no message was surfaced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the separator used to join messages.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the messages joined by the separator.
    #[must_use]
    pub fn joined(&self) -> String {
        self.messages.join(&self.separator)
    }

    /// Returns true if `message` was surfaced at least once.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    /// Consumes the failure and returns its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// Renders the failure as a JSON value.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.joined(),
            "messages": self.messages,
        })
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.separator)?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

// ============================================================================
// CHAIN ERROR
// ============================================================================

/// The error returned by every fallible chain call.
///
/// A registration or mode switch that fails consumes its chain. A failed
/// `complete` leaves the chain in place with its drained queues empty.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ChainError {
    /// The chain, a nested chain or its configuration could not be built.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// At least one rule failed at an evaluation point.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// A failure converted by a caller-supplied error factory.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ChainError {
    /// Returns true if this is a construction error.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }

    /// Returns true if this is a rule failure (built-in or factory-made).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Custom(_))
    }

    /// Returns the built-in failure, if this is one.
    #[must_use]
    pub fn as_failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns the surfaced messages of a built-in failure.
    #[must_use]
    pub fn messages(&self) -> Option<&[String]> {
        self.as_failure().map(ValidationFailure::messages)
    }

    /// Returns the joined message of a built-in failure.
    ///
    /// For the other variants this is their `Display` text: a factory-made
    /// error renders however its type chooses, which need not be the joined
    /// message it was built from.
    #[must_use]
    pub fn joined_message(&self) -> String {
        match self {
            Self::Validation(failure) => failure.joined(),
            other => other.to_string(),
        }
    }

    /// Downcasts a factory-made error to its concrete type.
    #[must_use]
    pub fn downcast_custom<T>(&self) -> Option<&T>
    where
        T: std::error::Error + 'static,
    {
        match self {
            Self::Custom(error) => error.downcast_ref::<T>(),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
