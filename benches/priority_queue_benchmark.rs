use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use trellis::PriorityQueue;

fn keys(n: u64) -> Vec<u64> {
    // Cheap deterministic scramble with plenty of duplicate priorities.
    (0..n).map(|i| i.wrapping_mul(2_654_435_761) % (n / 4 + 1)).collect()
}

fn bench_priority_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_queue");

    for size in [1_000u64, 10_000] {
        let input = keys(size);

        group.bench_with_input(BenchmarkId::new("std_binary_heap_push_pop", size), &input, |b, input| {
            b.iter(|| {
                // (priority, sequence) mirrors the stable ordering.
                let mut heap = BinaryHeap::with_capacity(input.len());
                for (seq, &k) in input.iter().enumerate() {
                    heap.push(Reverse((k, seq)));
                }
                while let Some(x) = heap.pop() {
                    black_box(x);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("priority_queue_enqueue_dequeue", size), &input, |b, input| {
            b.iter(|| {
                let mut queue = PriorityQueue::with_capacity(input.len());
                for &k in input {
                    queue.enqueue(k, k);
                }
                while let Some(x) = queue.try_dequeue() {
                    black_box(x);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("priority_queue_iter", size), &input, |b, input| {
            let queue: PriorityQueue<u64, u64> = input.iter().map(|&k| (k, k)).collect();
            b.iter(|| black_box(queue.iter().sum::<u64>()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_priority_queue);
criterion_main!(benches);
