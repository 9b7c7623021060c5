//! Benchmarks for filter set resolution and schema derivation.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use prax_filtering::catalog::{Field, LookupRegistry, Model, ModelCatalog, ScalarType};
use prax_filtering::filters::{FieldSelection, FilterExpression, FilterSet};
use prax_filtering::{FilteringOptionsSchema, JsonSchema};
use serde_json::json;
use std::hint::black_box;

const SCALARS: [ScalarType; 5] = [
    ScalarType::String,
    ScalarType::Int,
    ScalarType::DateTime,
    ScalarType::Boolean,
    ScalarType::Uuid,
];

/// Create a model with `count` fields cycling through common scalar types.
fn create_model(count: usize) -> Model {
    (0..count).fold(Model::new("Wide"), |model, i| {
        let field = Field::new(format!("field_{i}"), SCALARS[i % SCALARS.len()]);
        model.field(if i % 2 == 0 { field.optional() } else { field })
    })
}

fn create_filterset(model: &Model, registry: &LookupRegistry) -> FilterSet {
    let catalog = ModelCatalog::new(model, registry).unwrap();
    FilterSet::builder(&catalog)
        .fields(FieldSelection::All)
        .build()
        .unwrap()
}

/// Create a balanced `and`/`or` tree of clauses.
fn create_nested_expression(depth: usize) -> FilterExpression {
    if depth == 0 {
        return FilterExpression::clause("field_1", "gte", json!("10"));
    }
    let children = [
        create_nested_expression(depth - 1),
        FilterExpression::not(create_nested_expression(depth - 1)),
    ];
    if depth % 2 == 0 {
        FilterExpression::and(children)
    } else {
        FilterExpression::or(children)
    }
}

fn bench_filterset_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("filterset_resolution");
    let registry = LookupRegistry::new();

    for count in [5, 20, 100] {
        let model = create_model(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("derive_all", count), &model, |b, model| {
            b.iter(|| black_box(create_filterset(model, &registry)))
        });
    }

    group.finish();
}

fn bench_schema_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_derivation");
    let registry = LookupRegistry::new();

    for count in [5, 20, 100] {
        let model = create_model(count);
        let set = create_filterset(&model, &registry);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("json_schema", count), &set, |b, set| {
            b.iter(|| black_box(JsonSchema::new(set)))
        });
        group.bench_with_input(BenchmarkId::new("options", count), &set, |b, set| {
            b.iter(|| black_box(FilteringOptionsSchema::new(set)))
        });
        group.bench_with_input(BenchmarkId::new("json_schema_text", count), &set, |b, set| {
            b.iter(|| black_box(JsonSchema::new(set).to_json().unwrap()))
        });
    }

    group.finish();
}

fn bench_expression_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_validation");
    let registry = LookupRegistry::new();
    let model = create_model(20);
    let set = create_filterset(&model, &registry);
    let schema = JsonSchema::new(&set);

    for depth in [1, 4, 8] {
        let expr = create_nested_expression(depth);
        let document = expr.to_value();

        group.bench_with_input(BenchmarkId::new("filterset", depth), &expr, |b, expr| {
            b.iter(|| black_box(set.validate(expr)))
        });
        group.bench_with_input(BenchmarkId::new("json_schema", depth), &document, |b, doc| {
            b.iter(|| black_box(schema.validate_document(doc)))
        });
        group.bench_with_input(BenchmarkId::new("parse", depth), &document, |b, doc| {
            b.iter(|| black_box(FilterExpression::from_value(doc.clone())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_filterset_resolution,
    bench_schema_derivation,
    bench_expression_validation,
);
criterion_main!(benches);
