//! # Engine Module
//!
//! Internal runtime implementation.
//!
//! This module contains the core building blocks:
//! - Identifier types and membership bitsets
//! - The recycling pool
//! - The shared world context and label lookup
//! - Activation engines and unit behavior hooks
//! - The per-cycle dispatcher
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod types;
pub mod error;
pub mod pool;
pub mod labels;
pub mod world;
pub mod systems;
pub mod activation;
pub mod dispatcher;
