//! Processing-unit behavior and interest abstractions.
//!
//! This module defines the two seams a concrete processing unit plugs into:
//!
//! - [`Interest`] — the external "aspect" predicate deciding whether a unit
//!   cares about an entity's current composition. Its internal structure
//!   (AND/OR/exclusion groups) is the predicate author's business; the
//!   engine only consumes the boolean.
//! - [`UnitBehavior`] — the lifecycle-hook capability interface
//!   (`on_added`, `on_removed`, `on_enabled`, `on_disabled`, `begin`,
//!   `end`, `process_entities`, `should_process`), all defaulting to
//!   no-ops so a unit overrides only what it needs.
//!
//! Hooks are called synchronously and in-line by the activation engine's
//! transitions; they must not re-enter the engine that invoked them.
//!
//! ## Function-backed predicates
//!
//! [`FnInterest`] wraps a closure as an [`Interest`], the preferred form for
//! simple membership tests that don't warrant a named type.

use crate::engine::types::EntityId;
use crate::engine::world::World;

/// Boolean test over an entity's current composition.
///
/// Must behave as a pure function of the entity's state: the engine assumes
/// no side effects and may evaluate it on every composition change.
pub trait Interest {
    /// Returns `true` if the unit wants to process `entity`.
    fn matches(&self, world: &World, entity: EntityId) -> bool;
}

/// An [`Interest`] backed by a function or closure.
pub struct FnInterest<F>
where
    F: Fn(&World, EntityId) -> bool,
{
    f: F,
}

impl<F> FnInterest<F>
where
    F: Fn(&World, EntityId) -> bool,
{
    /// Wraps a closure as an interest predicate.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Interest for FnInterest<F>
where
    F: Fn(&World, EntityId) -> bool,
{
    fn matches(&self, world: &World, entity: EntityId) -> bool {
        (self.f)(world, entity)
    }
}

/// Lifecycle hooks and per-entity work of one processing unit.
///
/// Every method has a no-op default; a concrete unit overrides the hooks it
/// cares about. All hooks run synchronously on the driving thread.
#[allow(unused_variables)]
pub trait UnitBehavior {
    /// Fired after the unit's bit is set on a newly matching entity.
    fn on_added(&mut self, world: &mut World, entity: EntityId) {}

    /// Fired after the unit's bit is cleared from a departing entity.
    fn on_removed(&mut self, world: &mut World, entity: EntityId) {}

    /// Fired when an entity enters the unit's active set.
    fn on_enabled(&mut self, world: &mut World, entity: EntityId) {}

    /// Fired when an entity leaves the unit's active set.
    fn on_disabled(&mut self, world: &mut World, entity: EntityId) {}

    /// Runs before the per-entity work of one processing pass.
    fn begin(&mut self, world: &mut World) {}

    /// Runs after the per-entity work of one processing pass.
    fn end(&mut self, world: &mut World) {}

    /// Per-entity work over a snapshot of the active set.
    fn process_entities(&mut self, world: &mut World, entities: &[EntityId]) {}

    /// Gate for a processing pass; defaults to the unit's own enabled flag.
    fn should_process(&self, unit_enabled: bool) -> bool {
        unit_enabled
    }
}
