//! Foundation types shared by every chain
//!
//! - **Errors**: [`ChainError`], [`ConstructionError`], [`ValidationFailure`]
//! - **Emptiness**: the [`Emptiness`] trait the built-in rules test against
//!
//! # Examples
//!
//! ```rust
//! use fluentval_validator::foundation::{Emptiness, ValidationFailure};
//!
//! assert!(Some("  ").is_empty_value());
//!
//! let failure = ValidationFailure::new(vec!["id required".into()], ",");
//! assert_eq!(failure.to_string(), "id required");
//! ```

pub mod emptiness;
pub mod error;

pub use emptiness::Emptiness;
pub use error::{ChainError, ConstructionError, ValidationFailure};

/// A chain result: the chain itself on success, a [`ChainError`] otherwise.
pub type ChainResult<T> = Result<T, ChainError>;
