//! Fibonacci heap benchmarks
//!
//! Measures the individual heap operations and a Dijkstra workload on a
//! synthetic sparse graph, where decrease_key dominates.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_perf
//!
//! # Only the shortest-path workload
//! cargo bench --bench heap_perf -- 'dijkstra/'
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_fibonacci_heap::fibonacci::FibonacciHeap;
use rust_fibonacci_heap::pathfinding::{dijkstra, NodeIndex, PriorityCost, SearchNode};
use std::collections::HashSet;
use std::hint::black_box;
use std::sync::Arc;

const SIZES: [usize; 3] = [1 << 10, 1 << 14, 1 << 17];

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

fn random_priorities(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next() % 1_000_000).collect()
}

// ============================================================================
// Heap operations
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &SIZES {
        let priorities = random_priorities(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &priorities, |b, ps| {
            b.iter(|| {
                let mut heap = FibonacciHeap::with_capacity(ps.len());
                for (i, &p) in ps.iter().enumerate() {
                    heap.insert(p, i);
                }
                black_box(heap.len())
            })
        });
    }
    group.finish();
}

fn bench_extract_min(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_min");
    for &n in &SIZES {
        let priorities = random_priorities(n, 2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &priorities, |b, ps| {
            b.iter_batched(
                || ps.iter().enumerate().map(|(i, &p)| (p, i)).collect::<FibonacciHeap<_, _>>(),
                |mut heap| {
                    while let Ok(entry) = heap.extract_min() {
                        black_box(entry);
                    }
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for &n in &SIZES {
        let priorities = random_priorities(n, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), &priorities, |b, ps| {
            b.iter_batched(
                || {
                    let mut heap = FibonacciHeap::with_capacity(ps.len() + 1);
                    let handles: Vec<_> = ps
                        .iter()
                        .enumerate()
                        .map(|(i, &p)| heap.insert(p + 1_000_000, i))
                        .collect();
                    // Link into trees so decreases actually cut
                    heap.insert(0, usize::MAX);
                    let _ = heap.extract_min();
                    (heap, handles)
                },
                |(mut heap, handles)| {
                    for (handle, &p) in handles.iter().zip(ps) {
                        let _ = heap.decrease_key(handle, p);
                    }
                    black_box(heap.len())
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &n in &SIZES {
        let left = random_priorities(n, 4);
        let right = random_priorities(n, 5);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(left, right),
            |b, (l, r)| {
                b.iter_batched(
                    || {
                        let left: FibonacciHeap<(), u64> = l.iter().map(|&p| (p, ())).collect();
                        let right: FibonacciHeap<(), u64> = r.iter().map(|&p| (p, ())).collect();
                        (left, right)
                    },
                    |(mut left, right)| {
                        left.merge(right);
                        black_box(left.len())
                    },
                    criterion::BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

// ============================================================================
// Dijkstra on a synthetic sparse graph
// ============================================================================

struct SparseGraph {
    adjacency: Vec<Vec<(u32, u32)>>,
}

impl SparseGraph {
    fn synthetic(num_nodes: usize, avg_degree: usize, seed: u64) -> Self {
        let mut adjacency = vec![Vec::new(); num_nodes];
        let mut rng = Lcg::new(seed);
        let mut edge_set = HashSet::new();

        for (node, edges) in adjacency.iter_mut().enumerate() {
            let degree = avg_degree + (rng.next() % 3) as usize;
            for _ in 0..degree {
                let target = rng.next() as usize % num_nodes;
                if target != node && edge_set.insert((node, target)) {
                    let weight = (rng.next() % 100 + 1) as u32;
                    edges.push((target as u32, weight));
                }
            }
        }

        SparseGraph { adjacency }
    }
}

#[derive(Clone)]
struct GraphNode {
    id: u32,
    goal: u32,
    graph: Arc<SparseGraph>,
}

impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GraphNode {}

impl std::hash::Hash for GraphNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl SearchNode for GraphNode {
    type Cost = u32;

    fn successors(&self) -> Vec<(Self, u32)> {
        self.graph.adjacency[self.id as usize]
            .iter()
            .map(|&(to, weight)| {
                (
                    GraphNode {
                        id: to,
                        goal: self.goal,
                        graph: Arc::clone(&self.graph),
                    },
                    weight,
                )
            })
            .collect()
    }

    fn is_goal(&self) -> bool {
        self.id == self.goal
    }
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    group.sample_size(20);

    for &n in &[1usize << 10, 1 << 14] {
        let graph = Arc::new(SparseGraph::synthetic(n, 4, 42));
        let mut rng = Lcg::new(7);
        let queries: Vec<(u32, u32)> = (0..8)
            .map(|_| ((rng.next() % n as u64) as u32, (rng.next() % n as u64) as u32))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &queries, |b, qs| {
            b.iter(|| {
                let mut total = 0u64;
                for &(source, target) in qs {
                    let start = GraphNode {
                        id: source,
                        goal: target,
                        graph: Arc::clone(&graph),
                    };
                    if let Some((_, cost)) =
                        dijkstra::<_, FibonacciHeap<NodeIndex, PriorityCost<u32>>>(&start)
                    {
                        total += cost as u64;
                    }
                }
                black_box(total)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_extract_min,
    bench_decrease_key,
    bench_merge,
    bench_dijkstra
);
criterion_main!(benches);
