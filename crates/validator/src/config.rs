//! Chain configuration
//!
//! A [`ChainConfig`] decides how failures are worded and raised:
//!
//! - the separator used to join surfaced messages (default `","`),
//! - the chain default message, used by a failing rule that has no custom
//!   message and no rule-level default (default `"validation failed"`),
//! - the rule-level defaults of the built-in `not_empty` and `empty` rules,
//! - the chain default rule applied by `check`, which is `not_empty` unless
//!   replaced,
//! - an optional error factory that turns the joined message into the
//!   caller's own error type.
//!
//! Each chain holds its configuration behind an `Arc`. A nested chain
//! inherits its parent's configuration when it is created; overriding it on
//! one chain never affects another.
//!
//! # Examples
//!
//! ```rust
//! use fluentval_validator::config::ChainConfig;
//!
//! let config = ChainConfig::from_json(r#"{ "separator": "; ", "default_message": "invalid" }"#).unwrap();
//! assert_eq!(config.separator(), "; ");
//! assert_eq!(config.default_message(), "invalid");
//! assert_eq!(config.not_empty_message(), "must not be empty");
//! ```

use crate::foundation::{ChainError, ConstructionError, Emptiness, ValidationFailure};
use crate::rules::RuleVerdict;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Default separator between surfaced messages.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Default chain message.
pub const DEFAULT_MESSAGE: &str = "validation failed";

/// Default message of the built-in `not_empty` rule.
pub const NOT_EMPTY_MESSAGE: &str = "must not be empty";

/// Default message of the built-in `empty` rule.
pub const EMPTY_MESSAGE: &str = "must be empty";

/// Message used when a rule function returns no result.
pub const NO_RESULT_MESSAGE: &str = "rule function returned no result";

/// Builds the caller's error from the joined failure message.
pub type ErrorFactory =
    Arc<dyn Fn(String) -> Box<dyn std::error::Error + Send + Sync + 'static> + Send + Sync>;

/// Predicate of the chain default rule.
pub type DefaultPredicate = Arc<dyn Fn(&dyn Emptiness) -> Option<bool> + Send + Sync>;

// ============================================================================
// CHAIN CONFIG
// ============================================================================

/// Wording and error policy of a chain.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    separator: Cow<'static, str>,
    default_message: Cow<'static, str>,
    not_empty_message: Cow<'static, str>,
    empty_message: Cow<'static, str>,
    #[serde(skip)]
    default_predicate: Option<DefaultPredicate>,
    #[serde(skip)]
    error_factory: Option<ErrorFactory>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            separator: Cow::Borrowed(DEFAULT_SEPARATOR),
            default_message: Cow::Borrowed(DEFAULT_MESSAGE),
            not_empty_message: Cow::Borrowed(NOT_EMPTY_MESSAGE),
            empty_message: Cow::Borrowed(EMPTY_MESSAGE),
            default_predicate: None,
            error_factory: None,
        }
    }
}

impl ChainConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// Missing keys keep their defaults; unknown keys, blank messages and a
    /// blank separator are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConstructionError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConstructionError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that no message and no separator is blank.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        // A whitespace separator such as " " is allowed.
        if self.separator.is_empty() {
            return Err(ConstructionError::invalid_config(
                "separator must not be empty",
            ));
        }
        let messages = [
            ("default_message", &self.default_message),
            ("not_empty_message", &self.not_empty_message),
            ("empty_message", &self.empty_message),
        ];
        for (name, value) in messages {
            if value.trim().is_empty() {
                return Err(ConstructionError::invalid_config(format!(
                    "{name} must not be blank"
                )));
            }
        }
        Ok(())
    }

    /// Sets the separator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the chain default message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.default_message = message.into();
        self
    }

    /// Sets the default message of the built-in `not_empty` rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_not_empty_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.not_empty_message = message.into();
        self
    }

    /// Sets the default message of the built-in `empty` rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_empty_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Replaces the chain default rule and the chain default message together.
    ///
    /// The predicate sees the checked field through [`Emptiness`]. Rules
    /// registered with `valid` keep their own predicate.
    ///
    /// ```rust
    /// use fluentval_validator::config::ChainConfig;
    /// use fluentval_validator::foundation::Emptiness;
    ///
    /// let config = ChainConfig::new()
    ///     .with_default_rule(|value| value.is_empty_value(), "must be left blank");
    /// assert!(config.has_default_rule());
    /// assert_eq!(config.default_message(), "must be left blank");
    /// ```
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default_rule<F, R>(
        mut self,
        predicate: F,
        message: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        F: Fn(&dyn Emptiness) -> R + Send + Sync + 'static,
        R: RuleVerdict,
    {
        self.default_predicate = Some(Arc::new(move |value: &dyn Emptiness| {
            predicate(value).into_verdict()
        }));
        self.default_message = message.into();
        self
    }

    /// Restores `not_empty` as the chain default rule. The default message
    /// is left as is.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_default_rule(mut self) -> Self {
        self.default_predicate = None;
        self
    }

    /// Sets the error factory.
    ///
    /// The factory receives the joined message. Its signature is the whole
    /// contract: a factory that does not take a `String` or does not return
    /// an error is rejected by the compiler.
    ///
    /// ```rust
    /// use fluentval_validator::config::ChainConfig;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// #[error("bad request: {0}")]
    /// struct BadRequest(String);
    ///
    /// let config = ChainConfig::new().with_error_factory(BadRequest);
    /// assert!(config.has_error_factory());
    /// ```
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_factory<F, E>(mut self, factory: F) -> Self
    where
        F: Fn(String) -> E + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.error_factory = Some(Arc::new(
            move |message: String| -> Box<dyn std::error::Error + Send + Sync + 'static> {
                Box::new(factory(message))
            },
        ));
        self
    }

    /// Removes the error factory; failures are raised as [`ValidationFailure`].
    #[must_use = "builder methods must be chained or built"]
    pub fn without_error_factory(mut self) -> Self {
        self.error_factory = None;
        self
    }

    /// Returns the separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the chain default message.
    #[must_use]
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Returns the default message of the built-in `not_empty` rule.
    #[must_use]
    pub fn not_empty_message(&self) -> &str {
        &self.not_empty_message
    }

    /// Returns the default message of the built-in `empty` rule.
    #[must_use]
    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    /// Returns true if the chain default rule was replaced.
    #[must_use]
    pub fn has_default_rule(&self) -> bool {
        self.default_predicate.is_some()
    }

    /// Returns the replaced chain default rule, if any.
    #[must_use]
    pub fn default_predicate(&self) -> Option<&DefaultPredicate> {
        self.default_predicate.as_ref()
    }

    /// Returns true if an error factory is installed.
    #[must_use]
    pub fn has_error_factory(&self) -> bool {
        self.error_factory.is_some()
    }

    pub(crate) fn default_message_cow(&self) -> Cow<'static, str> {
        self.default_message.clone()
    }

    pub(crate) fn not_empty_message_cow(&self) -> Cow<'static, str> {
        self.not_empty_message.clone()
    }

    pub(crate) fn empty_message_cow(&self) -> Cow<'static, str> {
        self.empty_message.clone()
    }

    /// Builds the error raised for the given surfaced messages.
    pub(crate) fn raise(&self, messages: Vec<String>) -> ChainError {
        let failure = ValidationFailure::new(messages, self.separator.clone());
        match &self.error_factory {
            Some(factory) => ChainError::Custom(factory(failure.joined())),
            None => ChainError::Validation(failure),
        }
    }
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("separator", &self.separator)
            .field("default_message", &self.default_message)
            .field("not_empty_message", &self.not_empty_message)
            .field("empty_message", &self.empty_message)
            .field(
                "default_rule",
                &self.default_predicate.as_ref().map(|_| "<function>"),
            )
            .field("error_factory", &self.error_factory.as_ref().map(|_| "<function>"))
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
