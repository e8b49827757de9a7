use criterion::{criterion_group, criterion_main, Criterion};
use funcstructs::{
    EndofunctionStructures, FixedContentNecklaces, FixedLengthPartitions, TreeEnumerator,
};

fn bench_trees(c: &mut Criterion) {
    let trees = TreeEnumerator::new(14).unwrap();
    c.bench_function("trees_on_14_nodes", |b| b.iter(|| trees.iter().count()));
}

fn bench_partitions(c: &mut Criterion) {
    let parts = FixedLengthPartitions::new(60, 12);
    c.bench_function("partitions_60_into_12", |b| b.iter(|| parts.iter().count()));
}

fn bench_necklaces(c: &mut Criterion) {
    let necks = FixedContentNecklaces::from_multiplicities(&[6, 6, 6]).unwrap();
    c.bench_function("necklaces_content_6_6_6", |b| b.iter(|| necks.iter().count()));
}

fn bench_structures(c: &mut Criterion) {
    let structs = EndofunctionStructures::new(9);
    c.bench_function("structures_on_9_nodes", |b| b.iter(|| structs.iter().count()));
}

criterion_group!(
    benches,
    bench_trees,
    bench_partitions,
    bench_necklaces,
    bench_structures
);
criterion_main!(benches);
