//! Prelude module for convenient imports.
//!
//! Provides a single `use fluentval_validator::prelude::*;` import that brings
//! in the chain types, the [`ValidationChain`] trait and the rule functions.
//!
//! # Examples
//!
//! ```rust
//! use fluentval_validator::prelude::*;
//!
//! let tags: Vec<String> = Vec::new();
//! let err = Chain::of_immediate(&tags)
//!     .not_empty(|t: &Vec<String>| t)
//!     .unwrap_err();
//! assert!(err.is_validation());
//! ```

// ============================================================================
// CHAINS
// ============================================================================

pub use crate::chain::{Chain, Mode, NestedChain, ValidationChain};

// ============================================================================
// CONFIGURATION AND ERRORS
// ============================================================================

pub use crate::config::ChainConfig;
pub use crate::foundation::{
    ChainError, ChainResult, ConstructionError, Emptiness, ValidationFailure,
};

// ============================================================================
// RULES
// ============================================================================

pub use crate::rules::{RuleVerdict, matches_pattern, must_be_empty, not_empty, numeric};
