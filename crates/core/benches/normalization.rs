use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fdnorm_core::{AttributeSet, Relation};

/// Build a relation over `width` attributes `x0..` with a chain of
/// dependencies `x{i}, x{i+1} -> x{i+2}` and every `stride`-th attribute
/// determining its predecessor.
fn build_relation(width: usize, stride: usize) -> Relation {
    let name = |i: usize| format!("x{i}");
    let attributes: AttributeSet = (0..width).map(name).collect();

    let mut dependencies = Vec::new();
    for i in 0..width.saturating_sub(2) {
        dependencies.push((
            AttributeSet::from([name(i), name(i + 1)]),
            AttributeSet::from([name(i + 2)]),
        ));
    }
    for i in (stride..width).step_by(stride) {
        dependencies.push((
            AttributeSet::from([name(i)]),
            AttributeSet::from([name(i - 1)]),
        ));
    }

    Relation::with_dependencies("R", attributes, dependencies)
}

fn bench_normalization(c: &mut Criterion) {
    let small = build_relation(6, 3);
    let medium = build_relation(10, 3);
    let large = build_relation(14, 4);

    for relation in [&small, &medium, &large] {
        assert!(
            !relation.candidate_keys().is_empty(),
            "benchmark relations must have candidate keys",
        );
    }

    let mut group = c.benchmark_group("normalization");

    for (size, relation) in [("small", &small), ("medium", &medium), ("large", &large)] {
        group.bench_function(format!("candidate_keys_{size}"), |b| {
            b.iter(|| black_box(relation).candidate_keys());
        });
        group.bench_function(format!("minimal_cover_{size}"), |b| {
            b.iter(|| black_box(relation).minimal_cover());
        });
        group.bench_function(format!("decompose_preserving_{size}"), |b| {
            b.iter(|| black_box(relation).decompose_preserving());
        });
        group.bench_function(format!("decompose_not_preserving_{size}"), |b| {
            b.iter(|| black_box(relation).decompose_not_preserving());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalization);
criterion_main!(benches);
