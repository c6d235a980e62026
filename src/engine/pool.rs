//! Recycling pool for poolable component instances.
//!
//! This module implements [`RecyclingPool<T>`], a growable array-backed pool
//! that hands out reusable typed instances without per-frame allocation
//! churn. The backing array is partitioned into an **invalid region** (slots
//! `[0, invalid_count)`, free for reuse) and a **valid region**
//! (`[invalid_count, len)`, currently checked out), so distinguishing a live
//! instance from a free one is a single index comparison.
//!
//! ## Lifecycle
//!
//! * Slots are created empty and lazily filled by the allocator callback on
//!   first use.
//! * `acquire` hands out the instance at the new region boundary, running its
//!   [`Poolable::reinitialize`] hook.
//! * `release` only records the instance in a pending-return buffer; the slot
//!   is *not* reusable yet.
//! * `reclaim` swaps every pending instance down to the boundary, runs its
//!   [`Poolable::cleanup`] hook, and folds the slot back into the invalid
//!   region. Instances are never destroyed, only cleaned and recycled.
//!
//! The two-phase return avoids mutating the pool structure between an
//! in-flight `acquire` on one worker thread and `release` calls on others:
//! all structural movement happens in the owner-driven `reclaim` pass.
//!
//! ## Concurrency model
//!
//! Every operation runs under one coarse `Mutex` scoped to the pool, so
//! `acquire`, `release`, `reclaim`, `live_count`, and indexed access are
//! serialized against each other. Lock hold time is O(1) amortized; a resize
//! is O(current size) and a `reclaim` is O(pending returns). Nothing blocks
//! on I/O and nothing suspends while holding the lock.
//!
//! `reclaim` is an explicit scheduling obligation: the owner must invoke it
//! on a regular cadence (typically once per processing cycle, see the
//! dispatcher) or returned instances never become reusable.
//!
//! ## Invariants
//!
//! * `0 <= invalid_count <= slots.len()`.
//! * Every slot in the valid region is occupied.
//! * For any occupied slot, the instance's stored slot index equals its array
//!   index, except during the in-place swap inside `reclaim`.
//! * An instance is live (owned by a caller) iff its slot index is
//!   `>= invalid_count` and it is not in the pending-return buffer.

use std::any::type_name;
use std::sync::{Arc, Mutex};

use log::{debug, trace};

use crate::engine::error::{
    ActiveIndexError, AllocationFailedError, PoolConfigError, PoolError, PoolExhaustedError,
    PoolResult,
};

/// Capability contract for instances managed by a [`RecyclingPool`].
///
/// ## Ownership
/// The slot index is owned by the pool: it is assigned on `acquire`, updated
/// during resize and reclaim swaps, and must never be mutated by the
/// instance itself.
pub trait Poolable: Send {
    /// Returns the slot index the pool last assigned to this instance.
    fn slot_index(&self) -> usize;

    /// Stores the pool-assigned slot index. Called only by the pool.
    fn set_slot_index(&mut self, index: usize);

    /// Re-initialization hook, invoked each time the instance is acquired.
    fn reinitialize(&mut self) {}

    /// Cleanup hook, invoked when the instance is reclaimed into the free
    /// region. Should reset the instance to a reusable default state.
    fn cleanup(&mut self) {}
}

/// Shared handle to a pooled instance.
///
/// The pool's backing array and the caller hold the *same* handle, which is
/// what allows the pool to renumber a checked-out instance during a resize
/// and to perform the two-sided index swap during `reclaim`.
pub type PoolItem<T> = Arc<Mutex<T>>;

/// Allocator callback used to lazily fill empty slots.
///
/// Returning `None` is an allocator contract violation reported by `acquire`
/// as [`AllocationFailedError`]; the pool is left unmodified.
pub type Allocator<T> = Box<dyn Fn() -> Option<T> + Send + Sync>;

/// Interior pool state guarded by the pool's single coarse lock.
struct PoolState<T> {
    /// Backing array: `[0, invalid_count)` free, `[invalid_count, len)` live.
    slots: Vec<Option<PoolItem<T>>>,

    /// Number of free slots at the low end of the backing array.
    invalid_count: usize,

    /// Instances returned since the last reclaim pass.
    pending_returns: Vec<PoolItem<T>>,
}

/// Growable, concurrency-safe pool of reusable `T` instances.
///
/// ## Role
/// High-frequency component creation and destruction in a simulation loop is
/// served from recycled instances instead of the allocator. Storage only
/// grows (by `resize_increment`, when permitted), never shrinks.
///
/// ## Errors
/// * Construction fails with [`PoolConfigError`] for zero sizes.
/// * `acquire` fails with [`PoolExhaustedError`] when full and fixed-size,
///   or [`AllocationFailedError`] when the allocator produces nothing; in
///   both cases pool state is unmodified.
/// * `item_at` fails with [`ActiveIndexError`] outside `[0, live_count)`.
pub struct RecyclingPool<T: Poolable> {
    state: Mutex<PoolState<T>>,
    allocator: Allocator<T>,
    resize_increment: usize,
    allow_resize: bool,
    element_type: &'static str,
}

impl<T: Poolable> RecyclingPool<T> {
    /// Creates a pool with `initial_size` empty slots.
    ///
    /// ## Semantics
    /// All slots start empty and free (`invalid_count == initial_size`);
    /// instances are allocated lazily on first acquire of each slot.
    ///
    /// ## Errors
    /// Returns [`PoolConfigError`] if `initial_size < 1` or
    /// `resize_increment < 1`. No partial pool is created.
    pub fn new(
        initial_size: usize,
        resize_increment: usize,
        allow_resize: bool,
        allocator: Allocator<T>,
    ) -> PoolResult<Self> {
        if initial_size < 1 || resize_increment < 1 {
            return Err(PoolConfigError {
                initial_size,
                resize_increment,
            }
            .into());
        }

        let mut slots = Vec::with_capacity(initial_size);
        slots.resize_with(initial_size, || None);

        Ok(Self {
            state: Mutex::new(PoolState {
                slots,
                invalid_count: initial_size,
                pending_returns: Vec::new(),
            }),
            allocator,
            resize_increment,
            allow_resize,
            element_type: type_name::<T>(),
        })
    }

    /// Checks out an instance from the pool.
    ///
    /// ## Semantics
    /// * If no free slot remains and resizing is allowed, grows the backing
    ///   array by `resize_increment` first (live instances shift to the high
    ///   end and are renumbered).
    /// * Claims the slot at the new region boundary, lazily allocating into
    ///   it if empty.
    /// * Assigns the slot index and runs the instance's `reinitialize` hook.
    ///
    /// The whole operation is atomic with respect to other pool calls.
    ///
    /// ## Errors
    /// * [`PoolExhaustedError`] — pool full and `allow_resize` is false;
    ///   retryable after `release` + `reclaim`.
    /// * [`AllocationFailedError`] — the allocator returned `None`; the
    ///   failed slot remains empty and the free region is restored.
    pub fn acquire(&self) -> PoolResult<PoolItem<T>> {
        let mut state = self.state.lock().unwrap();

        if state.invalid_count == 0 {
            if !self.allow_resize {
                return Err(PoolExhaustedError {
                    capacity: state.slots.len(),
                }
                .into());
            }
            self.grow(&mut state);
        }

        state.invalid_count -= 1;
        let slot = state.invalid_count;

        let item = if let Some(existing) = &state.slots[slot] {
            Arc::clone(existing)
        } else {
            let Some(instance) = (self.allocator)() else {
                state.invalid_count += 1;
                return Err(AllocationFailedError {
                    element_type: self.element_type,
                }
                .into());
            };
            let handle = Arc::new(Mutex::new(instance));
            state.slots[slot] = Some(Arc::clone(&handle));
            handle
        };

        {
            let mut instance = item.lock().unwrap();
            instance.set_slot_index(slot);
            instance.reinitialize();
        }

        Ok(item)
    }

    /// Marks an instance as returned.
    ///
    /// ## Semantics
    /// The instance is appended to the pending-return buffer; its slot stays
    /// in the valid region and is **not** reusable until the next `reclaim`.
    pub fn release(&self, item: PoolItem<T>) {
        let mut state = self.state.lock().unwrap();
        state.pending_returns.push(item);
    }

    /// Folds all pending returns back into the free region.
    ///
    /// ## Semantics
    /// For every pending instance: if its slot is not already at the region
    /// boundary, swap it with the boundary instance (both instances' stored
    /// slot indices are updated), run its `cleanup` hook, and extend the
    /// invalid region over it. Clears the pending buffer.
    ///
    /// ## Scheduling
    /// Must be invoked by the owner on a regular cadence; nothing calls it
    /// automatically.
    pub fn reclaim(&self) {
        let mut state = self.state.lock().unwrap();
        if state.pending_returns.is_empty() {
            return;
        }

        let pending = std::mem::take(&mut state.pending_returns);
        let reclaimed = pending.len();

        for item in pending {
            let slot = item.lock().unwrap().slot_index();
            let boundary = state.invalid_count;

            if slot != boundary {
                state.slots.swap(slot, boundary);
                if let Some(displaced) = &state.slots[slot] {
                    displaced.lock().unwrap().set_slot_index(slot);
                }
                item.lock().unwrap().set_slot_index(boundary);
            }

            item.lock().unwrap().cleanup();
            state.invalid_count += 1;
        }

        trace!(
            "pool<{}> reclaimed {} instance(s), {} free of {}",
            self.element_type,
            reclaimed,
            state.invalid_count,
            state.slots.len()
        );
    }

    /// Returns the number of live (checked-out) instances.
    pub fn live_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.slots.len() - state.invalid_count
    }

    /// Returns the total number of slots in the backing array.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().slots.len()
    }

    /// Returns `true` if no instance is currently live.
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Returns the number of free slots at the low end of the array.
    pub fn free_count(&self) -> usize {
        self.state.lock().unwrap().invalid_count
    }

    /// Returns the number of instances awaiting the next `reclaim`.
    pub fn pending_count(&self) -> usize {
        self.state.lock().unwrap().pending_returns.len()
    }

    /// Returns the live instance at `active_index`, counted from the start
    /// of the valid region.
    ///
    /// ## Errors
    /// [`ActiveIndexError`] if `active_index >= live_count`. No mutation
    /// occurs on failure.
    ///
    /// ## Panics
    /// Panics if the valid region contains an empty slot; that is pool
    /// corruption, not a recoverable condition.
    pub fn item_at(&self, active_index: usize) -> PoolResult<PoolItem<T>> {
        let state = self.state.lock().unwrap();
        let live = state.slots.len() - state.invalid_count;
        if active_index >= live {
            return Err(PoolError::OutOfRange(ActiveIndexError {
                index: active_index,
                live_count: live,
            }));
        }

        let slot = state.invalid_count + active_index;
        match &state.slots[slot] {
            Some(item) => Ok(Arc::clone(item)),
            None => panic!(
                "pool<{}> corruption detected: empty slot {} inside valid region",
                self.element_type, slot
            ),
        }
    }

    /// Grows the backing array by `resize_increment`.
    ///
    /// New free slots are prepended at the invalid end; every occupied slot
    /// shifts to the high end and its instance is renumbered so the stored
    /// slot index keeps matching the true array position.
    fn grow(&self, state: &mut PoolState<T>) {
        let increment = self.resize_increment;
        let old_len = state.slots.len();

        let mut slots: Vec<Option<PoolItem<T>>> = Vec::with_capacity(old_len + increment);
        slots.resize_with(increment, || None);
        slots.append(&mut state.slots);
        state.slots = slots;
        state.invalid_count += increment;

        for (index, slot) in state.slots.iter().enumerate().skip(increment) {
            if let Some(item) = slot {
                item.lock().unwrap().set_slot_index(index);
            }
        }

        debug!(
            "pool<{}> grew from {} to {} slots",
            self.element_type,
            old_len,
            old_len + increment
        );
    }
}

/// Type-erased maintenance handle for the per-cycle reclaim cadence.
///
/// Implemented by every [`RecyclingPool`] so a driver can hold heterogeneous
/// pools and discharge the reclaim obligation without knowing element types.
pub trait PoolMaintenance: Send + Sync {
    /// Runs one reclaim pass.
    fn reclaim(&self);

    /// Number of live instances, for diagnostics.
    fn live_count(&self) -> usize;
}

impl<T: Poolable> PoolMaintenance for RecyclingPool<T> {
    fn reclaim(&self) {
        RecyclingPool::reclaim(self);
    }

    fn live_count(&self) -> usize {
        RecyclingPool::live_count(self)
    }
}
