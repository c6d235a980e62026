//! Per-unit activation state machine and active-set bookkeeping.
//!
//! Each processing unit owns an [`ActivationEngine`]: given an entity's
//! membership bitmask and the unit's interest predicate, it decides whether
//! to add, remove, enable, or disable that entity in the unit's active
//! working set, firing lifecycle hooks along the way.
//!
//! ## State machine
//!
//! Every (unit, entity) pair is in exactly one of three states:
//!
//! - **absent** — the unit's bit is clear and the entity is not in the
//!   active set;
//! - **active** — the bit is set, the entity is enabled, and it is in the
//!   active set;
//! - **inactive** — the bit is set but the entity is disabled, so it is not
//!   in the active set.
//!
//! [`ActivationEngine::on_composition_changed`] drives all transitions. The
//! four branches are evaluated in a fixed precedence order: membership
//! change first, then same-call enable/disable. Reordering changes which
//! hooks fire when interest and the enabled flag change in the same
//! notification, so do not collapse the chain into a "simpler" equivalent.
//!
//! ## Threading
//!
//! The engine is not internally thread-safe. Composition-change
//! notifications for one unit must be serialized by the driver; the
//! dispatcher does this by running everything on the calling thread.

use std::collections::HashSet;

use log::trace;

use crate::engine::systems::{Interest, UnitBehavior};
use crate::engine::types::{EntityId, SystemBit, SystemId};
use crate::engine::world::World;

/// Iteration-order configuration for an active set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveOrdering {
    /// Snapshots iterate in insertion order.
    Insertion,

    /// Snapshot order is unspecified.
    Unordered,
}

/// The set of entities a unit currently iterates over each cycle.
///
/// ## Invariants
/// * An entity appears at most once.
/// * Under [`ActiveOrdering::Insertion`], the order vector and the member
///   set hold exactly the same ids.
pub struct ActiveSet {
    ordering: ActiveOrdering,
    members: HashSet<EntityId>,
    order: Vec<EntityId>,
}

impl ActiveSet {
    fn new(ordering: ActiveOrdering) -> Self {
        Self {
            ordering,
            members: HashSet::new(),
            order: Vec::new(),
        }
    }

    /// Returns `true` if `entity` is in the set.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.members.contains(&entity)
    }

    /// Number of entities in the set.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Inserts an entity; returns `false` if it was already present.
    fn insert(&mut self, entity: EntityId) -> bool {
        if !self.members.insert(entity) {
            return false;
        }
        if self.ordering == ActiveOrdering::Insertion {
            self.order.push(entity);
        }
        true
    }

    /// Removes an entity; returns `false` if it was not present.
    fn remove(&mut self, entity: EntityId) -> bool {
        if !self.members.remove(&entity) {
            return false;
        }
        if self.ordering == ActiveOrdering::Insertion {
            self.order.retain(|&member| member != entity);
        }
        true
    }

    /// Copies the current membership for iteration.
    ///
    /// Under [`ActiveOrdering::Insertion`] the snapshot preserves insertion
    /// order; otherwise the order is unspecified.
    pub fn snapshot(&self) -> Vec<EntityId> {
        match self.ordering {
            ActiveOrdering::Insertion => self.order.clone(),
            ActiveOrdering::Unordered => self.members.iter().copied().collect(),
        }
    }
}

/// Activation logic for one processing unit.
///
/// Owns the unit's allocated bit, its enabled flag, its active set, the
/// interest predicate, and the unit's behavior hooks.
pub struct ActivationEngine {
    id: SystemId,
    name: &'static str,
    bit: SystemBit,
    enabled: bool,
    interest: Box<dyn Interest>,
    behavior: Box<dyn UnitBehavior>,
    active: ActiveSet,
}

impl ActivationEngine {
    /// Creates an engine for one unit, allocating its bit from the world.
    pub fn new(
        id: SystemId,
        name: &'static str,
        world: &mut World,
        ordering: ActiveOrdering,
        interest: Box<dyn Interest>,
        behavior: Box<dyn UnitBehavior>,
    ) -> Self {
        let bit = world.allocate_system_bit();
        Self {
            id,
            name,
            bit,
            enabled: true,
            interest,
            behavior,
            active: ActiveSet::new(ordering),
        }
    }

    /// Returns the unit's identifier.
    pub fn id(&self) -> SystemId {
        self.id
    }

    /// Returns the unit's human-readable name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the unit's allocated membership bit.
    pub fn bit(&self) -> SystemBit {
        self.bit
    }

    /// Returns the unit's own enabled flag (distinct from any entity's).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the unit's own enabled flag.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Read access to the unit's active set.
    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Re-evaluates one entity after its composition changed.
    ///
    /// ## Transitions
    /// Exactly one branch applies per call, in this precedence order:
    ///
    /// 1. interested and not yet a member — set the unit's bit, enable the
    ///    entity if its flag allows, then fire `on_added`;
    /// 2. no longer interested but still a member — disable if active,
    ///    clear the bit, fire `on_removed`;
    /// 3. interested, member, entity enabled — enable (idempotent);
    /// 4. interested, member, entity disabled — disable (idempotent).
    ///
    /// ## Panics
    /// Panics if `entity` is unknown or destroyed; notifying a transition
    /// with a dead entity is a caller bug upstream.
    pub fn on_composition_changed(&mut self, world: &mut World, entity: EntityId) {
        assert!(
            world.is_alive(entity),
            "composition change for unknown or destroyed entity {entity}"
        );

        let interested = self.interest.matches(world, entity);
        let member = world.bits(entity).has(self.bit);
        let entity_enabled = world.enabled(entity);

        if interested && !member {
            trace!("unit {} adds entity {}", self.name, entity);
            world.add_bit(entity, self.bit);
            if entity_enabled {
                self.enable_entity(world, entity);
            }
            self.behavior.on_added(world, entity);
        } else if !interested && member {
            trace!("unit {} removes entity {}", self.name, entity);
            if self.active.contains(entity) {
                self.disable_entity(world, entity);
            }
            world.remove_bit(entity, self.bit);
            self.behavior.on_removed(world, entity);
        } else if interested && entity_enabled {
            self.enable_entity(world, entity);
        } else if interested && !entity_enabled {
            self.disable_entity(world, entity);
        }
    }

    /// Withdraws a member entity ahead of its external destruction.
    ///
    /// Behaves as the membership-loss branch of the transition function:
    /// disable if active, clear the bit, fire `on_removed`. Must run before
    /// the world drops the entity's record so hooks still observe it.
    ///
    /// ## Panics
    /// Panics if `entity` is unknown or already destroyed.
    pub fn entity_destroyed(&mut self, world: &mut World, entity: EntityId) {
        assert!(
            world.is_alive(entity),
            "destruction notice for unknown or destroyed entity {entity}"
        );

        if !world.bits(entity).has(self.bit) {
            return;
        }

        if self.active.contains(entity) {
            self.disable_entity(world, entity);
        }
        world.remove_bit(entity, self.bit);
        self.behavior.on_removed(world, entity);
    }

    /// Runs one processing pass over a snapshot of the active set.
    ///
    /// No-op unless the behavior's `should_process` guard (defaulting to
    /// the unit's own enabled flag) returns `true`. Otherwise: `begin`
    /// hook, per-entity work over the snapshot, `end` hook.
    pub fn process(&mut self, world: &mut World) {
        if !self.behavior.should_process(self.enabled) {
            return;
        }

        self.behavior.begin(world);
        let snapshot = self.active.snapshot();
        self.behavior.process_entities(world, &snapshot);
        self.behavior.end(world);
    }

    /// Idempotent insertion into the active set.
    fn enable_entity(&mut self, world: &mut World, entity: EntityId) {
        if self.active.insert(entity) {
            self.behavior.on_enabled(world, entity);
        }
    }

    /// Idempotent removal from the active set.
    fn disable_entity(&mut self, world: &mut World, entity: EntityId) {
        if self.active.remove(entity) {
            self.behavior.on_disabled(world, entity);
        }
    }
}
