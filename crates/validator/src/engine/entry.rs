//! Rule entries: one entity, one accessor, one rule function, one message
//!
//! A [`RuleEntry`] is created when a registration call runs and is consumed
//! exactly once by the [`RuleExecutor`](super::RuleExecutor). Chains keep
//! entries type-erased as `Box<dyn PendingRule + 'a>` so that rules over
//! different field types share one queue.

use std::borrow::Cow;
use std::marker::PhantomData;

// ============================================================================
// PENDING RULE
// ============================================================================

/// A queued rule, erased over its entity and field types.
pub trait PendingRule {
    /// Reads the field through the accessor and applies the rule function.
    ///
    /// `None` means the rule function returned no result.
    fn verdict(&self) -> Option<bool>;

    /// Returns the caller-supplied message, if any (never blank).
    fn custom_message(&self) -> Option<&str>;

    /// Returns the message used when the rule fails without a custom message.
    fn default_message(&self) -> &Cow<'static, str>;
}

// ============================================================================
// RULE ENTRY
// ============================================================================

/// A rule bound to one entity.
///
/// # Type Parameters
///
/// * `E` - The entity type
/// * `V` - The field type (can be `?Sized`)
/// * `A` - The accessor function type (`Fn(&E) -> &V`)
/// * `P` - The rule function type (`Fn(&V) -> Option<bool>`)
pub struct RuleEntry<'a, E, V, A, P>
where
    E: ?Sized,
    V: ?Sized,
{
    entity: &'a E,
    accessor: A,
    predicate: P,
    message: Option<String>,
    default_message: Cow<'static, str>,
    _field: PhantomData<fn(&V)>,
}

impl<'a, E, V, A, P> RuleEntry<'a, E, V, A, P>
where
    E: ?Sized,
    V: ?Sized,
    A: Fn(&E) -> &V,
    P: Fn(&V) -> Option<bool>,
{
    /// Creates an entry. A blank `message` counts as no custom message.
    pub fn new(
        entity: &'a E,
        accessor: A,
        predicate: P,
        message: Option<&str>,
        default_message: Cow<'static, str>,
    ) -> Self {
        Self {
            entity,
            accessor,
            predicate,
            message: message
                .filter(|m| !m.trim().is_empty())
                .map(str::to_owned),
            default_message,
            _field: PhantomData,
        }
    }

    /// Reads the field from the bound entity.
    pub fn field_value(&self) -> &'a V {
        (self.accessor)(self.entity)
    }
}

impl<E, V, A, P> PendingRule for RuleEntry<'_, E, V, A, P>
where
    E: ?Sized,
    V: ?Sized,
    A: Fn(&E) -> &V,
    P: Fn(&V) -> Option<bool>,
{
    fn verdict(&self) -> Option<bool> {
        (self.predicate)(self.field_value())
    }

    fn custom_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn default_message(&self) -> &Cow<'static, str> {
        &self.default_message
    }
}

impl<E, V, A, P> std::fmt::Debug for RuleEntry<'_, E, V, A, P>
where
    E: ?Sized,
    V: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEntry")
            .field("accessor", &"<function>")
            .field("predicate", &"<function>")
            .field("message", &self.message)
            .field("default_message", &self.default_message)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Account {
        name: String,
        tags: Vec<String>,
    }

    fn account() -> Account {
        Account {
            name: "ada".into(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_field_value_reads_through_accessor() {
        let account = account();
        let entry = RuleEntry::new(
            &account,
            |a: &Account| a.name.as_str(),
            |v: &str| Some(!v.is_empty()),
            None,
            Cow::Borrowed("default"),
        );
        assert_eq!(entry.field_value(), "ada");
        assert_eq!(entry.verdict(), Some(true));
    }

    #[test]
    fn test_blank_message_is_no_message() {
        let account = account();
        let entry = RuleEntry::new(
            &account,
            |a: &Account| &a.tags,
            |v: &Vec<String>| Some(!v.is_empty()),
            Some("   "),
            Cow::Borrowed("default"),
        );
        assert_eq!(entry.custom_message(), None);
        assert_eq!(entry.default_message(), "default");
        assert_eq!(entry.verdict(), Some(false));
    }

    #[test]
    fn test_custom_message_kept() {
        let account = account();
        let entry = RuleEntry::new(
            &account,
            |a: &Account| &a.tags,
            |_: &Vec<String>| None,
            Some("tags required"),
            Cow::Borrowed("default"),
        );
        assert_eq!(entry.custom_message(), Some("tags required"));
        assert_eq!(entry.verdict(), None);
        assert!(format!("{entry:?}").contains("tags required"));
    }
}
