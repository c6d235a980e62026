use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rayon::prelude::*;

use ecs_runtime::{Allocator, Poolable, RecyclingPool};

struct Packet {
    slot: usize,
    generation: u64,
}

impl Poolable for Packet {
    fn slot_index(&self) -> usize {
        self.slot
    }

    fn set_slot_index(&mut self, index: usize) {
        self.slot = index;
    }

    fn reinitialize(&mut self) {
        self.generation += 1;
    }
}

fn packet_allocator(counter: &Arc<AtomicUsize>) -> Allocator<Packet> {
    let allocations = Arc::clone(counter);
    Box::new(move || {
        allocations.fetch_add(1, Ordering::SeqCst);
        Some(Packet {
            slot: usize::MAX,
            generation: 0,
        })
    })
}

#[test]
fn parallel_acquire_release_round_trip_drains_to_zero() {
    let allocations = Arc::new(AtomicUsize::new(0));
    let pool = Arc::new(RecyclingPool::new(4, 8, true, packet_allocator(&allocations)).unwrap());

    // Worker threads check instances out and back in; each handle is
    // released exactly once, so reclaim sees a consistent pending batch.
    (0..64u32).into_par_iter().for_each(|_| {
        for _ in 0..16 {
            let item = pool.acquire().unwrap();
            pool.release(item);
        }
    });

    assert_eq!(pool.live_count(), pool.pending_count());
    pool.reclaim();
    assert_eq!(pool.live_count(), 0);
    assert_eq!(pool.pending_count(), 0);
    assert_eq!(pool.free_count(), pool.len());
}

#[test]
fn parallel_holders_keep_consistent_slot_indices() {
    let allocations = Arc::new(AtomicUsize::new(0));
    let pool = Arc::new(RecyclingPool::new(2, 4, true, packet_allocator(&allocations)).unwrap());
    let held = Arc::new(Mutex::new(Vec::new()));

    (0..32u32).into_par_iter().for_each(|_| {
        let item = pool.acquire().unwrap();
        held.lock().unwrap().push(item);
    });

    assert_eq!(pool.live_count(), 32);
    let base = pool.free_count();
    for active_index in 0..pool.live_count() {
        let item = pool.item_at(active_index).unwrap();
        assert_eq!(item.lock().unwrap().slot_index(), base + active_index);
    }

    let items = std::mem::take(&mut *held.lock().unwrap());
    for item in items {
        pool.release(item);
    }
    pool.reclaim();
    assert_eq!(pool.live_count(), 0);

    // A fresh wave reuses the recycled instances instead of allocating.
    let before = allocations.load(Ordering::SeqCst);
    (0..32u32).into_par_iter().for_each(|_| {
        let item = pool.acquire().unwrap();
        pool.release(item);
    });
    pool.reclaim();
    assert_eq!(allocations.load(Ordering::SeqCst), before);
}
