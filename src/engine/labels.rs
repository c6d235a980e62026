//! Label-to-entity lookup table.
//!
//! Simple dictionary bookkeeping around the core: labels are unique keys,
//! binding an already-used label rebinds it, and destroying an entity drops
//! every label that pointed at it.

use std::collections::HashMap;

use crate::engine::types::EntityId;

/// Forward label lookup owned by the world.
#[derive(Default)]
pub struct LabelTable {
    by_label: HashMap<String, EntityId>,
}

impl LabelTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `label` to `entity`, replacing any previous binding.
    pub fn bind(&mut self, label: &str, entity: EntityId) {
        self.by_label.insert(label.to_owned(), entity);
    }

    /// Removes the binding for `label`. Returns `true` if one existed.
    pub fn unbind(&mut self, label: &str) -> bool {
        self.by_label.remove(label).is_some()
    }

    /// Returns the entity bound to `label`, if any.
    pub fn lookup(&self, label: &str) -> Option<EntityId> {
        self.by_label.get(label).copied()
    }

    /// Drops every label bound to `entity`.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.by_label.retain(|_, bound| *bound != entity);
    }

    /// Number of bound labels.
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Returns `true` if no label is bound.
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}
