use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use cyclic_queue::{Queue, QueueContext};

// Deterministic xorshift so every run sorts the same payloads.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn random_queue(rng: &mut XorShift, len: usize) -> Queue {
    let mut queue = Queue::new();
    for _ in 0..len {
        queue.push_back(&format!("{:016x}", rng.next()));
    }
    queue
}

fn sorted_queue(rng: &mut XorShift, len: usize) -> Queue {
    let mut queue = random_queue(rng, len);
    queue.sort(false);
    queue
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for &len in &[100usize, 1_000, 10_000] {
        group.bench_function(format!("random/{}", len), |b| {
            let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
            b.iter_batched(
                || random_queue(&mut rng, len),
                |mut queue| queue.sort(false),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("sorted/{}", len), |b| {
            let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
            b.iter_batched(
                || sorted_queue(&mut rng, len),
                |mut queue| queue.sort(false),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &k in &[2u32, 8, 32] {
        group.bench_function(format!("{}x1000", k), |b| {
            let mut rng = XorShift(0x2545_f491_4f6c_dd1d);
            b.iter_batched(
                || {
                    let mut context = QueueContext::new();
                    for id in 0..k {
                        context.push(id, sorted_queue(&mut rng, 1_000));
                    }
                    context
                },
                |mut context| context.merge(false),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_reverse(c: &mut Criterion) {
    c.bench_function("reverse/10000", |b| {
        let mut rng = XorShift(0xdead_beef_cafe_f00d);
        let mut queue = random_queue(&mut rng, 10_000);
        b.iter(|| queue.reverse());
    });
}

criterion_group!(benches, bench_sort, bench_merge, bench_reverse);
criterion_main!(benches);
