//! Fluent validation chains
//!
//! A chain binds one entity and registers rules against fields of it. Rules
//! run either at registration ([`Mode::Immediate`]) or at the next evaluation
//! point ([`Mode::Deferred`]). An evaluation point is [`complete`], a switch to
//! immediate mode, or a registration while immediate.
//!
//! - [`Chain`] - validates a top-level entity
//! - [`NestedChain`] - validates a sub-entity reached with [`descend`] and
//!   returns to its parent with [`NestedChain::ascend`]
//!
//! Both implement [`ValidationChain`], which carries every fluent operation.
//!
//! [`complete`]: ValidationChain::complete
//! [`descend`]: ValidationChain::descend
//!
//! # Examples
//!
//! ```rust
//! use fluentval_validator::prelude::*;
//!
//! struct User {
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! let user = User { name: "ada".into(), email: None };
//!
//! let err = Chain::of_lazy(&user)
//!     .not_empty(|u: &User| &u.name)
//!     .and_then(|c| c.not_empty_with(|u: &User| &u.email, "email required"))
//!     .and_then(|mut c| c.complete())
//!     .unwrap_err();
//!
//! assert_eq!(err.to_string(), "email required");
//! ```

mod nested;
mod root;
mod state;

pub use nested::NestedChain;
pub use root::Chain;
pub use state::{ChainState, PendingQueue};

use crate::config::ChainConfig;
use crate::engine::{ChainAggregator, RuleEntry};
use crate::foundation::{ChainResult, ConstructionError, Emptiness};
use crate::rules::{self, RuleVerdict};
use std::borrow::Cow;

// ============================================================================
// MODE
// ============================================================================

/// When registered rules are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Every registration evaluates the queue and raises on failure.
    #[default]
    Immediate,
    /// Rules wait for the next evaluation point.
    Deferred,
}

impl Mode {
    #[inline]
    #[must_use]
    pub fn is_deferred(self) -> bool {
        self == Self::Deferred
    }

    #[inline]
    #[must_use]
    pub fn is_immediate(self) -> bool {
        self == Self::Immediate
    }
}

// ============================================================================
// VALIDATION CHAIN
// ============================================================================

/// Fluent operations shared by root and nested chains.
///
/// Registration methods take the chain by value and hand it back, so calls
/// compose with `?` or [`Result::and_then`]. In immediate mode a
/// registration that fails returns the error instead of the chain.
///
/// Accessors are plain closures over the entity: `|user: &User| &user.name`.
/// Deferred rules read the field when they are evaluated, not when they are
/// registered.
pub trait ValidationChain<'a>: Sized {
    /// The entity type this chain validates.
    type Entity: ?Sized + 'a;

    /// Per-level state. Used by the provided methods.
    #[doc(hidden)]
    fn state(&self) -> &ChainState<'a, Self::Entity>;

    #[doc(hidden)]
    fn state_mut(&mut self) -> &mut ChainState<'a, Self::Entity>;

    /// Evaluates every level from the root down to this one and folds the
    /// results into `aggregator`, ancestor-most first.
    #[doc(hidden)]
    fn drain_lineage(&mut self, aggregator: &mut ChainAggregator);

    /// Evaluation point: runs whatever is still pending and raises the
    /// aggregated failure, if any.
    ///
    /// Drained queues stay empty, so calling `complete` again after an error
    /// only reports rules registered since.
    fn complete(&mut self) -> ChainResult<()>;

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Returns the entity under validation.
    fn entity(&self) -> &'a Self::Entity {
        self.state().entity()
    }

    fn mode(&self) -> Mode {
        self.state().mode()
    }

    /// Nesting depth: 0 for a root chain.
    fn depth(&self) -> usize {
        self.state().depth()
    }

    /// Number of rules registered on this level and not yet evaluated.
    fn pending(&self) -> usize {
        self.state().pending_len()
    }

    fn config<'s>(&'s self) -> &'s ChainConfig
    where
        'a: 's,
    {
        self.state().config()
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Registers `predicate` over the field read by `accessor`.
    ///
    /// A failure without a custom message surfaces the chain default message.
    /// A blank `message` counts as none.
    fn register_rule<V, A, P, R>(
        self,
        accessor: A,
        predicate: P,
        message: Option<&str>,
    ) -> ChainResult<Self>
    where
        V: ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
        P: Fn(&V) -> R + 'a,
        R: RuleVerdict,
    {
        let default = self.config().default_message_cow();
        self.enqueue(accessor, predicate, message, default)
    }

    /// Queues one rule with an explicit default text, then evaluates if
    /// immediate.
    #[doc(hidden)]
    fn enqueue<V, A, P, R>(
        mut self,
        accessor: A,
        predicate: P,
        message: Option<&str>,
        default: Cow<'static, str>,
    ) -> ChainResult<Self>
    where
        V: ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
        P: Fn(&V) -> R + 'a,
        R: RuleVerdict,
    {
        let entry = RuleEntry::new(
            self.entity(),
            accessor,
            move |value: &V| predicate(value).into_verdict(),
            message,
            default,
        );
        self.state_mut().push(Box::new(entry));
        if self.mode().is_immediate() {
            self.state_mut().drain_and_raise()?;
        }
        Ok(self)
    }

    /// The field must not be empty (see [`Emptiness`]).
    ///
    /// Fails with the configured not-empty message.
    fn not_empty<V, A>(self, accessor: A) -> ChainResult<Self>
    where
        V: Emptiness + ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
    {
        let default = self.config().not_empty_message_cow();
        self.enqueue(accessor, rules::not_empty::<V>, None, default)
    }

    /// The field must not be empty; fails with `message`.
    fn not_empty_with<V, A>(self, accessor: A, message: &str) -> ChainResult<Self>
    where
        V: Emptiness + ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
    {
        let default = self.config().not_empty_message_cow();
        self.enqueue(accessor, rules::not_empty::<V>, Some(message), default)
    }

    /// The field must be empty.
    ///
    /// Fails with the configured empty message.
    fn empty<V, A>(self, accessor: A) -> ChainResult<Self>
    where
        V: Emptiness + ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
    {
        let default = self.config().empty_message_cow();
        self.enqueue(accessor, rules::must_be_empty::<V>, None, default)
    }

    /// The field must be empty; fails with `message`.
    fn empty_with<V, A>(self, accessor: A, message: &str) -> ChainResult<Self>
    where
        V: Emptiness + ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
    {
        let default = self.config().empty_message_cow();
        self.enqueue(accessor, rules::must_be_empty::<V>, Some(message), default)
    }

    /// The field must satisfy the chain default rule; fails with the chain
    /// default message.
    ///
    /// The default rule is `not_empty` until replaced with
    /// [`default_rule`](Self::default_rule).
    fn check<V, A>(self, accessor: A) -> ChainResult<Self>
    where
        V: Emptiness + ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
    {
        self.register_default_rule(accessor, None)
    }

    /// The field must satisfy the chain default rule; fails with `message`.
    fn check_with<V, A>(self, accessor: A, message: &str) -> ChainResult<Self>
    where
        V: Emptiness + ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
    {
        self.register_default_rule(accessor, Some(message))
    }

    /// Registers the chain default rule as it stands now.
    #[doc(hidden)]
    fn register_default_rule<V, A>(self, accessor: A, message: Option<&str>) -> ChainResult<Self>
    where
        V: Emptiness + ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
    {
        match self.config().default_predicate().cloned() {
            Some(predicate) => {
                self.register_rule(accessor, move |value: &V| predicate(&value), message)
            }
            None => self.register_rule(accessor, rules::not_empty::<V>, message),
        }
    }

    /// The field must satisfy `predicate`; fails with the chain default
    /// message.
    fn valid<V, A, P, R>(self, accessor: A, predicate: P) -> ChainResult<Self>
    where
        V: ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
        P: Fn(&V) -> R + 'a,
        R: RuleVerdict,
    {
        self.register_rule(accessor, predicate, None)
    }

    /// The field must satisfy `predicate`; fails with `message`.
    fn valid_with<V, A, P, R>(self, accessor: A, predicate: P, message: &str) -> ChainResult<Self>
    where
        V: ?Sized + 'a,
        A: Fn(&Self::Entity) -> &V + 'a,
        P: Fn(&V) -> R + 'a,
        R: RuleVerdict,
    {
        self.register_rule(accessor, predicate, Some(message))
    }

    // ------------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------------

    /// Switches to deferred mode. Pending rules stay pending.
    #[must_use = "builder methods must be chained or built"]
    fn lazy(mut self) -> Self {
        self.state_mut().set_mode(Mode::Deferred);
        self
    }

    /// Evaluates this level's pending rules, then switches to immediate mode.
    ///
    /// The switch only happens if nothing failed.
    fn immediate(mut self) -> ChainResult<Self> {
        self.state_mut().drain_and_raise()?;
        self.state_mut().set_mode(Mode::Immediate);
        Ok(self)
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Installs an error factory on this chain.
    ///
    /// Failures then surface as [`ChainError::Custom`] holding whatever the
    /// factory built from the joined message.
    ///
    /// [`ChainError::Custom`]: crate::foundation::ChainError::Custom
    #[must_use = "builder methods must be chained or built"]
    fn error_factory<F, X>(mut self, factory: F) -> Self
    where
        F: Fn(String) -> X + Send + Sync + 'static,
        X: std::error::Error + Send + Sync + 'static,
    {
        let config = self.state_mut().config_mut();
        *config = config.clone().with_error_factory(factory);
        self
    }

    /// Overrides the chain default message for rules registered from now on.
    fn default_message(mut self, message: &str) -> ChainResult<Self> {
        if message.trim().is_empty() {
            return Err(
                ConstructionError::invalid_config("default_message must not be blank").into(),
            );
        }
        let config = self.state_mut().config_mut();
        *config = config.clone().with_default_message(message.to_owned());
        Ok(self)
    }

    /// Replaces the chain default rule and the chain default message for
    /// rules registered from now on.
    ///
    /// The predicate sees the field through [`Emptiness`]. It only affects
    /// [`check`](Self::check) and [`check_with`](Self::check_with).
    fn default_rule<F, R>(mut self, predicate: F, message: &str) -> ChainResult<Self>
    where
        F: Fn(&dyn Emptiness) -> R + Send + Sync + 'static,
        R: RuleVerdict,
    {
        if message.trim().is_empty() {
            return Err(
                ConstructionError::invalid_config("default rule message must not be blank").into(),
            );
        }
        let config = self.state_mut().config_mut();
        *config = config.clone().with_default_rule(predicate, message.to_owned());
        Ok(self)
    }

    /// Replaces the configuration of this chain.
    ///
    /// Already registered rules keep the default texts they were registered
    /// with.
    fn configure(mut self, config: ChainConfig) -> ChainResult<Self> {
        config.validate()?;
        self.state_mut().replace_config(config);
        Ok(self)
    }

    // ------------------------------------------------------------------------
    // Nesting
    // ------------------------------------------------------------------------

    /// Opens a nested chain over a sub-entity.
    ///
    /// The nested chain inherits this chain's mode and configuration. A
    /// `None` sub-entity is an error in both modes.
    fn descend<S, F>(self, accessor: F) -> ChainResult<NestedChain<'a, Self, S>>
    where
        S: ?Sized + 'a,
        F: FnOnce(&'a Self::Entity) -> Option<&'a S>,
    {
        match accessor(self.entity()) {
            Some(sub_entity) => Ok(NestedChain::new(self, sub_entity)),
            None => {
                tracing::debug!(depth = self.depth(), "nested value is absent");
                Err(ConstructionError::NullNestedValue.into())
            }
        }
    }

    /// Opens a nested chain over a sub-entity that is always present.
    fn descend_into<S, F>(self, accessor: F) -> NestedChain<'a, Self, S>
    where
        S: ?Sized + 'a,
        F: FnOnce(&'a Self::Entity) -> &'a S,
    {
        let sub_entity = accessor(self.entity());
        NestedChain::new(self, sub_entity)
    }
}
