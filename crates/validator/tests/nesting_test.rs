//! Nested chains: descend, ascend, lineage evaluation and mode interplay.

use fluentval_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[derive(Debug, Default)]
struct Item {
    sku: String,
    quantity: u32,
}

#[derive(Debug, Default)]
struct Customer {
    name: String,
    email: Option<String>,
}

#[derive(Debug, Default)]
struct Order {
    reference: String,
    customer: Option<Customer>,
    items: Vec<Item>,
}

fn valid_order() -> Order {
    Order {
        reference: "ORD-1".into(),
        customer: Some(Customer {
            name: "Lin".into(),
            email: Some("lin@example.com".into()),
        }),
        items: vec![Item {
            sku: "SKU-1".into(),
            quantity: 2,
        }],
    }
}

// ============================================================================
// DESCEND
// ============================================================================

#[rstest]
#[case::immediate(Mode::Immediate)]
#[case::deferred(Mode::Deferred)]
fn descend_into_absent_value_fails(#[case] mode: Mode) {
    let order = Order::default();
    let err = Chain::new(&order, mode)
        .descend(|o| o.customer.as_ref())
        .unwrap_err();

    assert!(err.is_construction());
    assert_eq!(err.to_string(), "nested value must not be null");
}

#[rstest]
#[case::immediate(Mode::Immediate)]
#[case::deferred(Mode::Deferred)]
fn descend_inherits_mode(#[case] mode: Mode) {
    let order = valid_order();
    let nested = Chain::new(&order, mode)
        .descend(|o| o.customer.as_ref())
        .unwrap();
    assert_eq!(nested.mode(), mode);
    assert_eq!(nested.depth(), 1);
}

#[test]
fn descend_into_slice_element() {
    let order = valid_order();
    let nested = Chain::of_lazy(&order)
        .descend(|o| o.items.first())
        .and_then(|c| c.valid_with(|i: &Item| &i.quantity, |q: &u32| *q > 0, "quantity"))
        .unwrap();
    assert_eq!(nested.entity().sku, "SKU-1");
    assert_eq!(nested.pending(), 1);
}

// ============================================================================
// ROUND TRIP
// ============================================================================

#[test]
fn descend_then_ascend_returns_same_parent_state() {
    let order = Order::default();
    let root = Chain::of_lazy(&order)
        .not_empty(|o: &Order| &o.reference)
        .unwrap();
    assert_eq!(root.pending(), 1);

    let root = root.descend_into(|o| &o.items).ascend().unwrap();
    assert_eq!(root.pending(), 1);
    assert_eq!(root.mode(), Mode::Deferred);
    assert_eq!(root.depth(), 0);
}

#[test]
fn three_levels_round_trip() {
    let order = valid_order();
    let root = Chain::of_lazy(&order)
        .descend(|o| o.customer.as_ref())
        .and_then(|c| c.descend(|c| c.email.as_ref()))
        .and_then(|c| c.not_empty(|e: &String| e))
        .and_then(|c| {
            assert_eq!(c.depth(), 2);
            c.ascend()
        })
        .and_then(|c| c.ascend())
        .unwrap();

    assert_eq!(root.pending(), 1);
}

// ============================================================================
// COMPLETE ON A NESTED CHAIN
// ============================================================================

#[test]
fn nested_complete_with_clean_deferred_lineage() {
    let order = valid_order();
    let mut nested = Chain::of_lazy(&order)
        .not_empty(|o: &Order| &o.reference)
        .and_then(|c| c.descend(|o| o.customer.as_ref()))
        .and_then(|c| c.not_empty(|c: &Customer| &c.name))
        .unwrap();

    assert!(nested.complete().is_ok());
    assert_eq!(nested.pending(), 0);
    assert_eq!(nested.parent().pending(), 0);
}

#[test]
fn nested_complete_aggregates_parent_then_self() {
    let order = Order {
        customer: Some(Customer::default()),
        ..Order::default()
    };
    let err = Chain::of_lazy(&order)
        .not_empty_with(|o: &Order| &o.reference, "reference required")
        .and_then(|c| c.not_empty(|o: &Order| &o.items))
        .and_then(|c| c.descend(|o| o.customer.as_ref()))
        .and_then(|c| c.not_empty_with(|c: &Customer| &c.name, "name required"))
        .and_then(|c| c.not_empty(|c: &Customer| &c.email))
        .and_then(|mut c| c.complete())
        .unwrap_err();

    assert_eq!(
        err.messages().unwrap(),
        ["must not be empty", "reference required", "name required"]
    );
}

#[test]
fn nested_complete_walks_every_deferred_ancestor() {
    let order = Order {
        customer: Some(Customer {
            name: String::new(),
            email: Some(String::new()),
        }),
        ..Order::default()
    };
    let err = Chain::of_lazy(&order)
        .not_empty_with(|o: &Order| &o.reference, "root")
        .and_then(|c| c.descend(|o| o.customer.as_ref()))
        .and_then(|c| c.not_empty_with(|c: &Customer| &c.name, "middle"))
        .and_then(|c| c.descend(|c| c.email.as_ref()))
        .and_then(|c| c.not_empty_with(|e: &String| e, "leaf"))
        .and_then(|mut c| c.complete())
        .unwrap_err();

    assert_eq!(err.to_string(), "root,middle,leaf");
}

#[test]
fn nested_complete_skips_grandparent_when_parent_is_immediate() {
    let order = Order {
        customer: Some(Customer {
            name: "Lin".into(),
            email: Some(String::new()),
        }),
        ..Order::default()
    };
    let mut leaf = Chain::of_lazy(&order)
        .not_empty_with(|o: &Order| &o.reference, "root")
        .and_then(|c| c.descend(|o| o.customer.as_ref()))
        .and_then(|c| c.immediate())
        .and_then(|c| c.descend(|c| c.email.as_ref()))
        .map(|c| c.lazy())
        .and_then(|c| c.not_empty_with(|e: &String| e, "leaf"))
        .unwrap();

    let err = leaf.complete().unwrap_err();
    assert_eq!(err.to_string(), "leaf");
    assert_eq!(leaf.parent().parent().pending(), 1);
}

#[test]
fn nested_immediate_under_deferred_parent_drains_parent() {
    let order = Order {
        customer: Some(Customer {
            name: "Lin".into(),
            email: None,
        }),
        ..Order::default()
    };
    let mut nested = Chain::of_lazy(&order)
        .not_empty_with(|o: &Order| &o.reference, "reference required")
        .and_then(|c| c.descend(|o| o.customer.as_ref()))
        .and_then(|c| c.immediate())
        .and_then(|c| c.not_empty(|c: &Customer| &c.name))
        .unwrap();

    let err = nested.complete().unwrap_err();
    assert_eq!(err.to_string(), "reference required");
    assert_eq!(nested.parent().pending(), 0);
}

#[test]
fn nested_immediate_registration_fails_at_once() {
    let order = Order {
        customer: Some(Customer::default()),
        ..valid_order()
    };
    let err = Chain::of_immediate(&order)
        .descend(|o| o.customer.as_ref())
        .and_then(|c| c.not_empty_with(|c: &Customer| &c.name, "name required"))
        .unwrap_err();
    assert_eq!(err.to_string(), "name required");
}

// ============================================================================
// ASCEND
// ============================================================================

#[test]
fn ascend_moves_pending_rules_to_the_end_of_the_parent_queue() {
    let order = Order {
        customer: Some(Customer::default()),
        ..Order::default()
    };
    let mut root = Chain::of_lazy(&order)
        .not_empty_with(|o: &Order| &o.reference, "reference")
        .and_then(|c| c.descend(|o| o.customer.as_ref()))
        .and_then(|c| c.not_empty_with(|c: &Customer| &c.name, "name"))
        .and_then(|c| c.ascend())
        .and_then(|c| c.not_empty_with(|o: &Order| &o.items, "items"))
        .unwrap();

    assert_eq!(root.pending(), 3);
    let err = root.complete().unwrap_err();
    assert_eq!(err.to_string(), "reference,name,items");
}

#[test]
fn ascend_to_immediate_parent_evaluates_transferred_rules() {
    let order = Order {
        customer: Some(Customer::default()),
        ..valid_order()
    };
    let err = Chain::of_immediate(&order)
        .descend(|o| o.customer.as_ref())
        .map(|c| c.lazy())
        .and_then(|c| c.not_empty(|c: &Customer| &c.email))
        .and_then(|c| c.ascend())
        .unwrap_err();
    assert_eq!(err.to_string(), "must not be empty");
}

#[test]
fn nested_default_message_override_stays_local() {
    let order = Order {
        customer: Some(Customer::default()),
        ..Order::default()
    };
    let err = Chain::of_lazy(&order)
        .check(|o: &Order| &o.reference)
        .and_then(|c| c.descend(|o| o.customer.as_ref()))
        .and_then(|c| c.default_message("customer invalid"))
        .and_then(|c| c.check(|c: &Customer| &c.name))
        .and_then(|c| c.ascend())
        .and_then(|c| c.check(|o: &Order| &o.items))
        .and_then(|mut c| c.complete())
        .unwrap_err();

    assert_eq!(
        err.messages().unwrap(),
        ["validation failed", "customer invalid"]
    );
}
