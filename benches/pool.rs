use criterion::*;
use std::hint::black_box;

use ecs_runtime::{Allocator, Poolable, RecyclingPool};

struct Body {
    slot: usize,
    x: f32,
    y: f32,
}

impl Poolable for Body {
    fn slot_index(&self) -> usize {
        self.slot
    }

    fn set_slot_index(&mut self, index: usize) {
        self.slot = index;
    }

    fn reinitialize(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}

fn body_allocator() -> Allocator<Body> {
    Box::new(|| {
        Some(Body {
            slot: usize::MAX,
            x: 0.0,
            y: 0.0,
        })
    })
}

fn pool_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool");

    group.bench_function("acquire_release_reclaim_1024", |b| {
        let pool = RecyclingPool::new(1024, 256, true, body_allocator()).unwrap();
        // Warm every slot so the loop measures recycling, not allocation.
        let warm: Vec<_> = (0..1024).map(|_| pool.acquire().unwrap()).collect();
        for item in warm {
            pool.release(item);
        }
        pool.reclaim();

        b.iter(|| {
            let items: Vec<_> = (0..1024).map(|_| pool.acquire().unwrap()).collect();
            for item in items {
                pool.release(item);
            }
            pool.reclaim();
            black_box(pool.live_count())
        });
    });

    group.bench_function("acquire_with_growth", |b| {
        b.iter_batched(
            || RecyclingPool::new(16, 16, true, body_allocator()).unwrap(),
            |pool| {
                let items: Vec<_> = (0..512).map(|_| pool.acquire().unwrap()).collect();
                black_box(items.len())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, pool_benchmark);
criterion_main!(benches);
