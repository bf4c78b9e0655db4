//! The `Emptiness` trait behind the built-in `not_empty` / `empty` rules
//!
//! A field value is *empty* when it is:
//!
//! - absent (`None`, JSON `null`),
//! - a string made only of whitespace,
//! - a sequence or set with no element,
//! - a map with no entry.
//!
//! Every other value, including `0`, `false` and `'\0'`, is not empty.
//! Caller types that are never empty can opt in with [`never_empty!`](crate::never_empty).

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// CORE TRAIT
// ============================================================================

/// Types whose values can be tested for emptiness.
///
/// # Examples
///
/// ```rust
/// use fluentval_validator::foundation::Emptiness;
///
/// assert!("   ".is_empty_value());
/// assert!(None::<String>.is_empty_value());
/// assert!(Vec::<u8>::new().is_empty_value());
/// assert!(!0_i32.is_empty_value());
/// assert!(!false.is_empty_value());
/// ```
pub trait Emptiness {
    /// Returns true if the value counts as empty.
    fn is_empty_value(&self) -> bool;
}

// ============================================================================
// STRINGS
// ============================================================================

impl Emptiness for str {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Emptiness for String {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.as_str().is_empty_value()
    }
}

// ============================================================================
// ABSENCE AND INDIRECTION
// ============================================================================

impl<T: Emptiness> Emptiness for Option<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        match self {
            Some(value) => value.is_empty_value(),
            None => true,
        }
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &T {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Box<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Rc<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Arc<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<B> Emptiness for Cow<'_, B>
where
    B: Emptiness + ToOwned + ?Sized,
{
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

// ============================================================================
// SEQUENCES, SETS AND MAPS
// ============================================================================

impl<T> Emptiness for [T] {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Emptiness for [T; N] {
    #[inline]
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

macro_rules! impl_by_is_empty {
    ($( [$($generics:tt)*] $ty:ty ),+ $(,)?) => {
        $(
            impl<$($generics)*> Emptiness for $ty {
                #[inline]
                fn is_empty_value(&self) -> bool {
                    self.is_empty()
                }
            }
        )+
    };
}

impl_by_is_empty! {
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BTreeSet<T>,
    [K, V] BTreeMap<K, V>,
    [T, S] HashSet<T, S>,
    [K, V, S] HashMap<K, V, S>,
    [T, S] IndexSet<T, S>,
    [K, V, S] IndexMap<K, V, S>,
    [A: smallvec::Array] SmallVec<A>,
}

// ============================================================================
// JSON
// ============================================================================

impl Emptiness for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        use serde_json::Value;

        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty_value(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}

// ============================================================================
// SCALARS
// ============================================================================

/// Implements [`Emptiness`] for types whose values are never empty.
///
/// Scalars are covered already; use this for your own structs so they can be
/// checked with `not_empty` / `empty` (typically through an `Option`).
///
/// ```rust
/// use fluentval_validator::foundation::Emptiness;
///
/// struct Address {
///     city: String,
/// }
///
/// fluentval_validator::never_empty!(Address);
///
/// let address = Some(Address { city: "Oslo".into() });
/// assert!(!address.is_empty_value());
/// assert!(None::<Address>.is_empty_value());
/// ```
#[macro_export]
macro_rules! never_empty {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::foundation::Emptiness for $ty {
                #[inline]
                fn is_empty_value(&self) -> bool {
                    false
                }
            }
        )+
    };
}

never_empty!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

// ============================================================================
// TESTS
// ============================================================================
