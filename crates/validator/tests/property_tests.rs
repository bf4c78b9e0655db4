//! Property-based tests for fluentval-validator.

use fluentval_validator::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

/// One field per generated rule; `None` entries are "absent".
#[derive(Debug, Clone)]
struct Row {
    cells: Vec<Option<String>>,
}

/// Registers one not-empty rule per cell. Cells with `Some(label)` in
/// `labels` get a custom message.
fn register_all<'a>(
    row: &'a Row,
    labels: &'a [Option<String>],
    mode: Mode,
) -> ChainResult<Chain<'a, Row>> {
    let mut chain = Chain::new(row, mode);
    for (index, label) in labels.iter().enumerate() {
        chain = match label {
            Some(text) => chain.not_empty_with(move |r: &Row| &r.cells[index], text)?,
            None => chain.not_empty(move |r: &Row| &r.cells[index])?,
        };
    }
    Ok(chain)
}

fn row_strategy() -> impl Strategy<Value = (Row, Vec<Option<String>>)> {
    prop::collection::vec(
        (
            prop::option::of("[a-z ]{0,3}"),
            prop::option::of("[a-c]{1,2}"),
        ),
        0..12,
    )
    .prop_map(|pairs| {
        let (cells, labels): (Vec<Option<String>>, Vec<Option<String>>) =
            pairs.into_iter().unzip();
        (Row { cells }, labels)
    })
}

fn expected_messages(row: &Row, labels: &[Option<String>]) -> Vec<String> {
    let mut defaults = Vec::new();
    let mut custom = Vec::new();
    for (cell, label) in row.cells.iter().zip(labels) {
        if not_empty(cell) {
            continue;
        }
        match label {
            Some(text) => custom.push(text.clone()),
            None if defaults.is_empty() => defaults.push("must not be empty".to_owned()),
            None => {}
        }
    }
    defaults.extend(custom);
    defaults
}

// ============================================================================
// AGGREGATION
// ============================================================================

proptest! {
    #[test]
    fn deferred_messages_are_defaults_then_customs((row, labels) in row_strategy()) {
        let expected = expected_messages(&row, &labels);
        let result = register_all(&row, &labels, Mode::Deferred)
            .and_then(|mut chain| chain.complete());

        match result {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(err) => prop_assert_eq!(err.messages().unwrap(), &expected[..]),
        }
    }

    #[test]
    fn default_messages_appear_at_most_once((row, labels) in row_strategy()) {
        if let Err(err) = register_all(&row, &labels, Mode::Deferred)
            .and_then(|mut chain| chain.complete())
        {
            let defaults = err
                .messages()
                .unwrap()
                .iter()
                .filter(|m| m.as_str() == "must not be empty")
                .count();
            prop_assert!(defaults <= 1);
        }
    }

    #[test]
    fn custom_message_count_matches_failures((row, labels) in row_strategy()) {
        let failing_custom = row
            .cells
            .iter()
            .zip(&labels)
            .filter(|(cell, label)| label.is_some() && !not_empty(*cell))
            .count();
        let surfaced = match register_all(&row, &labels, Mode::Deferred)
            .and_then(|mut chain| chain.complete())
        {
            Ok(()) => 0,
            Err(err) => err
                .messages()
                .unwrap()
                .iter()
                .filter(|m| m.as_str() != "must not be empty")
                .count(),
        };
        prop_assert_eq!(surfaced, failing_custom);
    }
}

// ============================================================================
// MODES
// ============================================================================

proptest! {
    #[test]
    fn immediate_and_deferred_agree_on_validity((row, labels) in row_strategy()) {
        let deferred_ok = register_all(&row, &labels, Mode::Deferred)
            .and_then(|mut chain| chain.complete())
            .is_ok();
        let immediate_ok = register_all(&row, &labels, Mode::Immediate)
            .and_then(|mut chain| chain.complete())
            .is_ok();
        prop_assert_eq!(deferred_ok, immediate_ok);
    }

    #[test]
    fn immediate_reports_first_failing_rule((row, labels) in row_strategy()) {
        let first = row
            .cells
            .iter()
            .zip(&labels)
            .find(|(cell, _)| !not_empty(*cell))
            .map(|(_, label)| label.clone().unwrap_or_else(|| "must not be empty".to_owned()));

        match register_all(&row, &labels, Mode::Immediate) {
            Ok(_) => prop_assert!(first.is_none()),
            Err(err) => prop_assert_eq!(Some(err.to_string()), first),
        }
    }

    #[test]
    fn descend_ascend_preserves_pending((row, labels) in row_strategy()) {
        let chain = register_all(&row, &labels, Mode::Deferred).unwrap();
        let before = chain.pending();
        let chain = chain.descend_into(|r| &r.cells).ascend().unwrap();
        prop_assert_eq!(chain.pending(), before);
        prop_assert_eq!(chain.mode(), Mode::Deferred);
    }
}

// ============================================================================
// EMPTINESS
// ============================================================================

proptest! {
    #[test]
    fn whitespace_strings_are_empty(s in "[ \t\n]{0,8}") {
        prop_assert!(!not_empty(s.as_str()));
        prop_assert!(must_be_empty(&Some(s)));
    }

    #[test]
    fn strings_with_visible_char_are_not_empty(s in "[ ]{0,3}[a-z][ ]{0,3}") {
        prop_assert!(not_empty(s.as_str()));
    }

    #[test]
    fn integers_are_never_empty(n in any::<i64>()) {
        prop_assert!(not_empty(&n));
    }

    #[test]
    fn collections_are_empty_iff_no_elements(v in prop::collection::vec(any::<u8>(), 0..4)) {
        let set: HashSet<u8> = v.iter().copied().collect();
        prop_assert_eq!(not_empty(&v), !v.is_empty());
        prop_assert_eq!(not_empty(&set), !set.is_empty());
    }
}
