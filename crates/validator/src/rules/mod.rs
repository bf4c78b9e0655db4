//! Rule functions: predicates over a single field value
//!
//! A rule function is any `Fn(&V) -> R` where `R` is a [`RuleVerdict`]:
//! `bool`, or `Option<bool>` when the rule may have no result. A `None`
//! verdict is a failure, never a pass.
//!
//! # Built-in rules
//!
//! - [`not_empty`] - fails on absent values, blank strings, empty collections
//!   and empty maps (see [`Emptiness`])
//! - [`must_be_empty`] - the logical negation of [`not_empty`]
//! - [`numeric`] - non-empty string of ASCII digits
//! - [`matches_pattern`] - string matching a regular expression
//!
//! # Examples
//!
//! ```rust
//! use fluentval_validator::rules::{must_be_empty, not_empty, RuleVerdict};
//!
//! assert!(not_empty("hello"));
//! assert!(!not_empty(&None::<u32>));
//! assert!(must_be_empty(&Vec::<u8>::new()));
//!
//! assert_eq!(true.into_verdict(), Some(true));
//! assert_eq!(None::<bool>.into_verdict(), None);
//! ```

mod string;

pub use string::{PatternRule, matches_pattern, numeric};

use crate::foundation::Emptiness;

// ============================================================================
// VERDICT
// ============================================================================

/// The result of a rule function.
///
/// `Some(true)` passes, `Some(false)` fails, `None` means the rule produced
/// no result and is treated as a failure.
pub trait RuleVerdict {
    /// Normalises the result to `Option<bool>`.
    fn into_verdict(self) -> Option<bool>;
}

impl RuleVerdict for bool {
    #[inline]
    fn into_verdict(self) -> Option<bool> {
        Some(self)
    }
}

impl RuleVerdict for Option<bool> {
    #[inline]
    fn into_verdict(self) -> Option<bool> {
        self
    }
}

// ============================================================================
// BUILT-IN RULES
// ============================================================================

/// Passes when the value is not empty.
///
/// `0`, `false` and every other present scalar pass.
#[inline]
pub fn not_empty<V>(value: &V) -> bool
where
    V: Emptiness + ?Sized,
{
    !value.is_empty_value()
}

/// Passes when the value is empty. Logical negation of [`not_empty`].
#[inline]
pub fn must_be_empty<V>(value: &V) -> bool
where
    V: Emptiness + ?Sized,
{
    !not_empty(value)
}

// ============================================================================
// TESTS
// ============================================================================
