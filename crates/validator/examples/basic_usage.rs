//! Basic usage example for fluentval-validator
//!
//! Run with `RUST_LOG=fluentval_validator=trace` to see chain evaluation.

use fluentval_validator::prelude::*;
use tracing_subscriber::EnvFilter;

struct Address {
    street: String,
    zip: String,
}

struct Customer {
    id: Option<u64>,
    name: String,
    phones: Vec<String>,
    address: Option<Address>,
}

fn validate(customer: &Customer) -> ChainResult<()> {
    Chain::of_lazy(customer)
        .not_empty_with(|c: &Customer| &c.id, "id required")
        .and_then(|c| c.not_empty(|c: &Customer| &c.name))
        .and_then(|c| c.not_empty_with(|c: &Customer| &c.phones, "at least one phone"))
        .and_then(|c| c.descend(|c| c.address.as_ref()))
        .and_then(|c| c.not_empty(|a: &Address| &a.street))
        .and_then(|c| c.valid_with(|a: &Address| a.zip.as_str(), numeric, "zip must be digits"))
        .and_then(|mut c| c.complete())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let good = Customer {
        id: Some(1),
        name: "Ada".into(),
        phones: vec!["5550100".into()],
        address: Some(Address {
            street: "1 Analytical Way".into(),
            zip: "12345".into(),
        }),
    };
    match validate(&good) {
        Ok(()) => println!("✓ customer {} is valid", good.name),
        Err(e) => println!("✗ unexpected error: {e}"),
    }

    let bad = Customer {
        id: None,
        name: String::new(),
        phones: Vec::new(),
        address: Some(Address {
            street: " ".into(),
            zip: "AB-1".into(),
        }),
    };
    match validate(&bad) {
        Ok(()) => println!("✓ customer is valid"),
        Err(e) => {
            println!("✗ customer is invalid: {e}");
            if let Some(messages) = e.messages() {
                for message in messages {
                    println!("  - {message}");
                }
            }
        }
    }

    let missing = Customer {
        address: None,
        ..bad
    };
    if let Err(e) = validate(&missing) {
        println!("✗ construction failed: {e} (construction error: {})", e.is_construction());
    }
}
