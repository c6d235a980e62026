//! Shared world context: entity records and central bit allocation.
//!
//! The world is created once per simulation and passed by reference to every
//! processing unit. It replaces process-wide singletons: all shared state —
//! entity membership bitmasks, enabled flags, the next system bit, label
//! lookups — has the world's lifetime and nothing else's.
//!
//! ## Accessor surface
//!
//! Entity bitmasks are mutated only through `add_bit` / `remove_bit`, read
//! through `bits` / `enabled`. Accessors taking an [`EntityId`] treat an
//! unknown or destroyed entity as a fatal caller bug and panic; stale-handle
//! tolerance is deliberately not offered at this layer.

use std::collections::HashMap;

use crate::engine::labels::LabelTable;
use crate::engine::types::{EntityId, SystemBit, SystemBits, SYSTEM_CAP};

/// Per-entity bookkeeping owned by the world.
struct EntityRecord {
    /// Which processing units currently claim this entity.
    bits: SystemBits,

    /// Whether the entity participates in active sets at all.
    enabled: bool,
}

/// Per-simulation shared context.
///
/// ## Invariants
/// * Entity ids are unique for the lifetime of the world and never reused.
/// * System bits are allocated sequentially up to [`SYSTEM_CAP`] and never
///   reused.
pub struct World {
    entities: HashMap<EntityId, EntityRecord>,
    next_entity: EntityId,
    next_bit: u16,
    labels: LabelTable,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            next_entity: 0,
            next_bit: 0,
            labels: LabelTable::new(),
        }
    }

    /// Allocates a fresh, enabled entity with an empty membership mask.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.next_entity;
        self.next_entity += 1;
        self.entities.insert(
            id,
            EntityRecord {
                bits: SystemBits::default(),
                enabled: true,
            },
        );
        id
    }

    /// Removes an entity's record and any labels pointing at it.
    ///
    /// Returns `false` if the entity was already gone. Activation engines
    /// must be notified *before* the record is dropped; the dispatcher's
    /// `destroy_entity` handles that ordering.
    pub fn destroy_entity(&mut self, entity: EntityId) -> bool {
        if self.entities.remove(&entity).is_none() {
            return false;
        }
        self.labels.remove_entity(entity);
        true
    }

    /// Returns `true` if the entity currently exists.
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn record(&self, entity: EntityId) -> &EntityRecord {
        self.entities
            .get(&entity)
            .unwrap_or_else(|| panic!("unknown or destroyed entity {entity}"))
    }

    fn record_mut(&mut self, entity: EntityId) -> &mut EntityRecord {
        self.entities
            .get_mut(&entity)
            .unwrap_or_else(|| panic!("unknown or destroyed entity {entity}"))
    }

    /// Returns a copy of the entity's membership mask.
    ///
    /// ## Panics
    /// Panics if the entity does not exist.
    pub fn bits(&self, entity: EntityId) -> SystemBits {
        self.record(entity).bits
    }

    /// Sets a unit's bit on the entity's mask. Write side of the accessor
    /// surface; only activation engines call this.
    ///
    /// ## Panics
    /// Panics if the entity does not exist.
    pub fn add_bit(&mut self, entity: EntityId, bit: SystemBit) {
        self.record_mut(entity).bits.set(bit);
    }

    /// Clears a unit's bit from the entity's mask.
    ///
    /// ## Panics
    /// Panics if the entity does not exist.
    pub fn remove_bit(&mut self, entity: EntityId, bit: SystemBit) {
        self.record_mut(entity).bits.clear(bit);
    }

    /// Returns the entity's enabled flag.
    ///
    /// ## Panics
    /// Panics if the entity does not exist.
    pub fn enabled(&self, entity: EntityId) -> bool {
        self.record(entity).enabled
    }

    /// Sets the entity's enabled flag.
    ///
    /// Changing the flag does not by itself touch any active set: the driver
    /// must follow up with a composition-change notification so each engine
    /// re-evaluates the entity.
    ///
    /// ## Panics
    /// Panics if the entity does not exist.
    pub fn set_enabled(&mut self, entity: EntityId, enabled: bool) {
        self.record_mut(entity).enabled = enabled;
    }

    /// Allocates the next processing-unit bit.
    ///
    /// ## Panics
    /// Panics once [`SYSTEM_CAP`] units have been registered.
    pub fn allocate_system_bit(&mut self) -> SystemBit {
        let bit = self.next_bit;
        assert!(
            (bit as usize) < SYSTEM_CAP,
            "exceeded configured processing-unit capacity"
        );
        self.next_bit = bit.wrapping_add(1);
        SystemBit(bit)
    }

    /// Binds a label to an entity; a later binding of the same label wins.
    ///
    /// ## Panics
    /// Panics if the entity does not exist.
    pub fn set_label(&mut self, label: &str, entity: EntityId) {
        assert!(
            self.is_alive(entity),
            "cannot label unknown or destroyed entity {entity}"
        );
        self.labels.bind(label, entity);
    }

    /// Looks up the entity bound to `label`, if any.
    pub fn lookup_label(&self, label: &str) -> Option<EntityId> {
        self.labels.lookup(label)
    }

    /// Removes a label binding. Returns `true` if the label was bound.
    pub fn clear_label(&mut self, label: &str) -> bool {
        self.labels.unbind(label)
    }
}
