//! # ECS Runtime
//!
//! Recycling and dispatch backbone for an entity-component-system runtime:
//! reusable typed instances without per-frame allocation churn, and
//! per-unit activation tracking that moves entities in and out of each
//! processing unit's active working set as their composition changes.
//!
//! ## Design Goals
//! - Grow-only pooled storage with O(1) live/free classification
//! - Bitmask membership tests, with bit indices allocated per world
//! - Explicit shared context instead of process-wide singletons
//! - Safe, explicit error surfaces at every fallible boundary
//!
//! The two cores are independent: [`RecyclingPool`] has no dependency on
//! [`ActivationEngine`]; the [`Dispatcher`] wires both into one per-cycle
//! driver.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod engine;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

// Core identifiers and membership bitsets

pub use engine::types::{
    EntityId,
    SystemBit,
    SystemBits,
    SystemId,
    SYSTEM_CAP,
};

// Recycling pool

pub use engine::pool::{
    Allocator,
    PoolItem,
    PoolMaintenance,
    Poolable,
    RecyclingPool,
};

pub use engine::error::{
    ActiveIndexError,
    AllocationFailedError,
    PoolConfigError,
    PoolError,
    PoolExhaustedError,
    PoolResult,
};

// World context

pub use engine::world::World;
pub use engine::labels::LabelTable;

// Activation

pub use engine::activation::{
    ActivationEngine,
    ActiveOrdering,
    ActiveSet,
};

pub use engine::systems::{
    FnInterest,
    Interest,
    UnitBehavior,
};

pub use engine::dispatcher::Dispatcher;
