//! Criterion benchmarks for the intrusive pairing heap
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench pairing_bench
//! ```
//!
//! Records are allocated once per size outside the timed loop; every
//! iteration builds a fresh heap over them and empties it again, so the
//! numbers cover only link rewiring and comparisons.

use std::cell::Cell;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use intrusive_pairing_heap::{pairing_adapter, PairingHeap, PairingLink};

struct Node {
    key: Cell<u64>,
    link: PairingLink,
}

pairing_adapter!(NodeAdapter = Node { link });

type NodeLess = fn(&Node, &Node, &()) -> bool;

fn node_less(a: &Node, b: &Node, _: &()) -> bool {
    a.key.get() < b.key.get()
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 16
    }
}

fn nodes(n: usize, seed: u64) -> Vec<Node> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| Node {
            key: Cell::new(rng.next() % 1_000_000 + 1_000_000),
            link: PairingLink::new(),
        })
        .collect()
}

fn bench_insert_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_pop");
    for exp in [8u32, 12, 16] {
        let n = 1usize << exp;
        let recs = nodes(n, 0x1234);
        group.bench_with_input(BenchmarkId::from_parameter(format!("2^{exp}")), &recs, |b, recs| {
            b.iter(|| {
                let mut heap = PairingHeap::<NodeAdapter, NodeLess>::new(node_less);
                for r in recs {
                    heap.insert(r, &()).unwrap();
                }
                while let Some(r) = heap.pop(&()) {
                    black_box(r.key.get());
                }
            });
        });
    }
    group.finish();
}

fn bench_decrease(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_then_pop");
    for exp in [8u32, 12, 16] {
        let n = 1usize << exp;
        let recs = nodes(n, 0x9876);
        group.bench_with_input(BenchmarkId::from_parameter(format!("2^{exp}")), &recs, |b, recs| {
            let mut rng = Lcg::new(7);
            b.iter(|| {
                let mut heap = PairingHeap::<NodeAdapter, NodeLess>::new(node_less);
                for r in recs {
                    r.key.set(rng.next() % 1_000_000 + 1_000_000);
                    heap.insert(r, &()).unwrap();
                }
                for r in recs.iter().step_by(2) {
                    r.key.set(r.key.get() - rng.next() % 1_000_000);
                    unsafe { heap.decrease(r, &()).unwrap() };
                }
                while let Some(r) = heap.pop(&()) {
                    black_box(r.key.get());
                }
            });
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_chunks");
    let recs = nodes(1 << 14, 0x4242);
    group.bench_function("2^14/64", |b| {
        b.iter(|| {
            let mut total = PairingHeap::<NodeAdapter, NodeLess>::new(node_less);
            for chunk in recs.chunks(64) {
                let mut part = PairingHeap::<NodeAdapter, NodeLess>::new(node_less);
                for r in chunk {
                    part.insert(r, &()).unwrap();
                }
                total.merge(&mut part, &());
            }
            black_box(total.len());
            total.clear();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_insert_pop, bench_decrease, bench_merge);
criterion_main!(benches);
