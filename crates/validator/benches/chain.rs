//! Benchmarks for chain registration, evaluation and aggregation

use criterion::{Criterion, criterion_group, criterion_main};
use fluentval_validator::prelude::*;
use std::hint::black_box;

struct Address {
    city: String,
    zip: String,
}

struct Account {
    id: Option<u64>,
    name: String,
    tags: Vec<String>,
    address: Option<Address>,
}

fn valid_account() -> Account {
    Account {
        id: Some(42),
        name: "bench".into(),
        tags: vec!["a".into()],
        address: Some(Address {
            city: "Oslo".into(),
            zip: "0150".into(),
        }),
    }
}

fn invalid_account() -> Account {
    Account {
        id: None,
        name: String::new(),
        tags: Vec::new(),
        address: Some(Address {
            city: String::new(),
            zip: "x".into(),
        }),
    }
}

fn run(account: &Account, mode: Mode) -> ChainResult<()> {
    Chain::new(account, mode)
        .not_empty(|a: &Account| &a.id)
        .and_then(|c| c.not_empty_with(|a: &Account| &a.name, "name required"))
        .and_then(|c| c.not_empty(|a: &Account| &a.tags))
        .and_then(|c| c.descend(|a| a.address.as_ref()))
        .and_then(|c| c.not_empty(|a: &Address| &a.city))
        .and_then(|c| c.valid_with(|a: &Address| a.zip.as_str(), numeric, "zip must be digits"))
        .and_then(|mut c| c.complete())
}

// ============================================================================
// Passing chains
// ============================================================================

fn bench_passing(c: &mut Criterion) {
    let account = valid_account();

    c.bench_function("chain_immediate_pass", |b| {
        b.iter(|| black_box(run(black_box(&account), Mode::Immediate)))
    });

    c.bench_function("chain_deferred_pass", |b| {
        b.iter(|| black_box(run(black_box(&account), Mode::Deferred)))
    });
}

// ============================================================================
// Failing chains (aggregation and dedup)
// ============================================================================

fn bench_failing(c: &mut Criterion) {
    let account = invalid_account();

    c.bench_function("chain_immediate_first_failure", |b| {
        b.iter(|| black_box(run(black_box(&account), Mode::Immediate)))
    });

    c.bench_function("chain_deferred_aggregate", |b| {
        b.iter(|| black_box(run(black_box(&account), Mode::Deferred)))
    });
}

criterion_group!(benches, bench_passing, bench_failing);
criterion_main!(benches);
