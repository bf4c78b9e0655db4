//! # fluentval-validator
//!
//! Fluent validation chains over an entity and its nested sub-entities.
//!
//! ## Quick Start
//!
//! ```rust
//! use fluentval_validator::prelude::*;
//!
//! struct Customer {
//!     name: String,
//!     phone: String,
//! }
//!
//! let customer = Customer { name: "Grace".into(), phone: "555-0100".into() };
//!
//! let result = Chain::of_lazy(&customer)
//!     .not_empty(|c: &Customer| &c.name)
//!     .and_then(|c| c.valid_with(|c: &Customer| c.phone.as_str(), numeric, "phone must be digits"))
//!     .and_then(|mut c| c.complete());
//!
//! assert_eq!(result.unwrap_err().to_string(), "phone must be digits");
//! ```
//!
//! ## Modes
//!
//! - **Immediate**: each registration evaluates the rule and returns the
//!   error at once.
//! - **Deferred**: rules queue up until [`complete`](chain::ValidationChain::complete)
//!   or a switch to immediate mode; all failures are then raised together.
//!
//! ## Messages
//!
//! A failed rule surfaces its custom message, or a default text when it has
//! none. Default texts are deduplicated across the whole chain and listed
//! first; custom messages follow in evaluation order. The joined message uses
//! the configured separator (`","` by default).
//!
//! ## Nesting
//!
//! [`descend`](chain::ValidationChain::descend) opens a [`NestedChain`](chain::NestedChain)
//! over a sub-entity; [`ascend`](chain::NestedChain::ascend) returns the
//! parent with its concrete type. Completing a nested chain over a deferred
//! parent evaluates the parent's lineage too.

// ChainError carries a ValidationFailure inline; boxing it would add an
// allocation to every failed chain.
#![allow(clippy::result_large_err)]

pub mod chain;
pub mod config;
pub mod engine;
pub mod foundation;
pub mod prelude;
pub mod rules;
