//! Error types for pool construction, acquisition, and indexed access.
//!
//! This module declares focused, composable error types used across the
//! recycling pool. Each error carries enough context to make failures
//! actionable while remaining small and cheap to pass around or convert into
//! the aggregate [`PoolError`].
//!
//! ## Goals
//! * **Specificity:** Each error type models a single failure mode (invalid
//!   construction arguments, exhausted capacity, an allocator that produced
//!   nothing, out-of-range indexed access).
//! * **Ergonomics:** All errors implement [`std::error::Error`] and
//!   [`fmt::Display`], and provide `From<T>` conversions into [`PoolError`].
//! * **Actionability:** Structured fields (requested vs. available capacity,
//!   offending indices, the element type name) make logs useful without
//!   reproducing the issue.
//!
//! ## Typical flow
//! Pool operations return `Result<_, PoolError>` (aliased as [`PoolResult`]).
//! Callers match on the variant for control flow — a [`PoolExhaustedError`]
//! from a fixed-size pool is retryable after capacity is freed, the others
//! indicate configuration or contract bugs.
//!
//! ## Display vs. Debug
//! * [`fmt::Display`] is optimized for operator logs (short, imperative
//!   phrasing).
//! * [`fmt::Debug`] (derived) retains full structure for diagnostics.
//!
//! Invariant violations that indicate caller bugs — an unknown entity handed
//! to an activation transition — are *not* modeled here; those are fatal
//! assertions, not recoverable values.

use std::fmt;

/// Convenience alias for pool operation results.
pub type PoolResult<T> = Result<T, PoolError>;

/// Returned when a pool is constructed with invalid sizing arguments.
///
/// Both `initial_size` and `resize_increment` must be at least one; a pool
/// that can never hold or grow by an instance is a configuration bug.
///
/// ### Fields
/// * `initial_size` — The requested starting slot count.
/// * `resize_increment` — The requested growth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfigError {
    /// Requested starting slot count.
    pub initial_size: usize,

    /// Requested growth step.
    pub resize_increment: usize,
}

impl fmt::Display for PoolConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid pool configuration (initial_size {}, resize_increment {}; both must be >= 1)",
            self.initial_size, self.resize_increment
        )
    }
}

impl std::error::Error for PoolConfigError {}

/// Returned when `acquire` finds no free slot and resizing is disallowed.
///
/// The pool is left unmodified; the call may be retried once capacity has
/// been freed through `release` followed by `reclaim`.
///
/// ### Fields
/// * `capacity` — Total slot count of the exhausted pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolExhaustedError {
    /// Total slot count of the exhausted pool.
    pub capacity: usize,
}

impl fmt::Display for PoolExhaustedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pool exhausted ({} slots live, resizing disallowed)",
            self.capacity
        )
    }
}

impl std::error::Error for PoolExhaustedError {}

/// Returned when the allocator callback produced no instance.
///
/// The slot the pool attempted to fill remains empty and the pool state is
/// rolled back, so a later `acquire` with a repaired allocator can succeed.
///
/// ### Fields
/// * `element_type` — Name of the pooled element type, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationFailedError {
    /// Name of the pooled element type.
    pub element_type: &'static str,
}

impl fmt::Display for AllocationFailedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "allocator returned no instance for element type {}",
            self.element_type
        )
    }
}

impl std::error::Error for AllocationFailedError {}

/// Returned when an indexed access lies outside `[0, live_count)`.
///
/// ### Fields
/// * `index` — The requested index into the valid region.
/// * `live_count` — Number of live instances at the time of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveIndexError {
    /// Offending index into the valid region.
    pub index: usize,

    /// Number of live instances at the time of the call.
    pub live_count: usize,
}

impl fmt::Display for ActiveIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active index {} out of range ({} live instances)",
            self.index, self.live_count
        )
    }
}

impl std::error::Error for ActiveIndexError {}

/// Aggregate error for recycling pool operations.
///
/// Wraps the precise low-level failures so callers can write `?` and still
/// return a single, expressive type. `From<T>` conversions are implemented
/// for every constituent error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Construction arguments were invalid; no pool was created.
    Config(PoolConfigError),

    /// No free slot remained and the pool may not grow.
    Exhausted(PoolExhaustedError),

    /// The allocator callback violated its contract.
    AllocationFailed(AllocationFailedError),

    /// An indexed access was outside the valid region.
    OutOfRange(ActiveIndexError),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Config(e) => write!(f, "{e}"),
            PoolError::Exhausted(e) => write!(f, "{e}"),
            PoolError::AllocationFailed(e) => write!(f, "{e}"),
            PoolError::OutOfRange(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PoolError {}

impl From<PoolConfigError> for PoolError {
    fn from(e: PoolConfigError) -> Self {
        PoolError::Config(e)
    }
}

impl From<PoolExhaustedError> for PoolError {
    fn from(e: PoolExhaustedError) -> Self {
        PoolError::Exhausted(e)
    }
}

impl From<AllocationFailedError> for PoolError {
    fn from(e: AllocationFailedError) -> Self {
        PoolError::AllocationFailed(e)
    }
}

impl From<ActiveIndexError> for PoolError {
    fn from(e: ActiveIndexError) -> Self {
        PoolError::OutOfRange(e)
    }
}
