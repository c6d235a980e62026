//! Per-cycle driver for activation engines and pool maintenance.
//!
//! The dispatcher owns every registered [`ActivationEngine`] and a set of
//! type-erased pool handles. It is the synchronization point of the runtime:
//!
//! * structural entity changes are broadcast to every engine, in
//!   registration order, on the calling thread — which is what serializes
//!   composition-change notifications as the engines require;
//! * [`Dispatcher::tick`] runs every engine's processing pass and then
//!   discharges the reclaim obligation of each registered pool, once per
//!   cycle.

use std::sync::Arc;

use log::debug;

use crate::engine::activation::ActivationEngine;
use crate::engine::pool::PoolMaintenance;
use crate::engine::types::{EntityId, SystemId};
use crate::engine::world::World;

/// Driver coordinating engines and pools for one world.
#[derive(Default)]
pub struct Dispatcher {
    engines: Vec<ActivationEngine>,
    pools: Vec<Arc<dyn PoolMaintenance>>,
}

impl Dispatcher {
    /// Creates a dispatcher with no engines or pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an engine; broadcasts and ticks reach it from now on.
    pub fn register_engine(&mut self, engine: ActivationEngine) -> SystemId {
        let id = engine.id();
        debug!("registered unit {} ({})", engine.name(), id);
        self.engines.push(engine);
        id
    }

    /// Registers a pool for the per-tick reclaim pass.
    pub fn register_pool(&mut self, pool: Arc<dyn PoolMaintenance>) {
        self.pools.push(pool);
    }

    /// Returns the engine registered under `id`, if any.
    pub fn engine(&self, id: SystemId) -> Option<&ActivationEngine> {
        self.engines.iter().find(|engine| engine.id() == id)
    }

    /// Mutable access to the engine registered under `id`, if any.
    pub fn engine_mut(&mut self, id: SystemId) -> Option<&mut ActivationEngine> {
        self.engines.iter_mut().find(|engine| engine.id() == id)
    }

    /// Number of registered engines.
    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    /// Notifies every engine that an entity's composition changed.
    ///
    /// Call after any change that can alter interest: component add or
    /// remove, or a flip of the entity's enabled flag.
    pub fn composition_changed(&mut self, world: &mut World, entity: EntityId) {
        for engine in &mut self.engines {
            engine.on_composition_changed(world, entity);
        }
    }

    /// Withdraws the entity from every engine, then drops its world record.
    pub fn destroy_entity(&mut self, world: &mut World, entity: EntityId) {
        for engine in &mut self.engines {
            engine.entity_destroyed(world, entity);
        }
        world.destroy_entity(entity);
    }

    /// Runs one processing cycle: every engine's pass, then one reclaim
    /// pass over every registered pool.
    pub fn tick(&mut self, world: &mut World) {
        for engine in &mut self.engines {
            engine.process(world);
        }
        for pool in &self.pools {
            pool.reclaim();
        }
    }
}
