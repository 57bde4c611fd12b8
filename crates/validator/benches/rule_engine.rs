// Rule engine throughput benchmarks.
//
// Measures traversal overhead over a mid-sized order document with
// synchronous built-in rules only.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use ruleshape_validator::prelude::*;
use serde_json::{Value, json};

fn order_rules() -> RuleTree {
    rule_tree! {
        "customer" => rule_tree! {
            "name" => rules![required(), max_length(64)],
            "email" => rules![required(), email()],
        },
        "lines" => ArrayRule::new()
            .with_array_rules([array_min_len(1).into(), sum_between(0.0, 1.0e6).of_field("price").into()])
            .with_element_rule(rule_tree! {
                "sku" => rules![required(), matches_regex("^[A-Z]{3}-[0-9]{4}$").unwrap()],
                "qty" => rules![is_number(), min(1.0)],
                "price" => rules![is_number(), min(0.0)],
            }),
    }
}

fn order(lines: usize) -> Value {
    let lines: Vec<Value> = (0..lines)
        .map(|i| json!({"sku": format!("ABC-{:04}", i % 10_000), "qty": (i % 5) as u64, "price": 9.5}))
        .collect();
    json!({
        "customer": {"name": "Ada Lovelace", "email": "ada@example.com"},
        "lines": lines,
    })
}

fn sync_validate(c: &mut Criterion) {
    let rules = order_rules();
    let small = order(10);
    let large = order(1_000);

    c.bench_function("validate_10_lines", |b| {
        b.iter(|| validate(black_box(&small), &rules).unwrap());
    });
    c.bench_function("validate_1000_lines", |b| {
        b.iter(|| validate(black_box(&large), &rules).unwrap());
    });
    c.bench_function("validate_field_customer", |b| {
        b.iter(|| validate_field("customer", black_box(&large), &rules).unwrap());
    });
}

fn async_validate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("failed to build runtime");
    let rules = order_rules();
    let large = order(1_000);

    c.bench_function("validate_async_1000_lines", |b| {
        b.iter(|| rt.block_on(validate_async(black_box(&large), &rules)).unwrap());
    });
}

fn schema_compile(c: &mut Criterion) {
    let registry = RuleRegistry::with_builtins();
    let document = json!({
        "customer": {"name": ["required", {"rule": "max_length", "max": 64}], "email": ["required", "email"]},
        "lines": {
            "arrayRules": [{"rule": "array_min_len", "min": 1}],
            "arrayElementRule": {"qty": ["is_number", {"rule": "min", "min": 1}]}
        }
    });

    c.bench_function("schema_compile", |b| {
        b.iter(|| registry.compile(black_box(&document)).unwrap());
    });
}

criterion_group!(benches, sync_validate, async_validate, schema_compile);
criterion_main!(benches);
