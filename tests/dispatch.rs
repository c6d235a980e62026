use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use ecs_runtime::{
    ActivationEngine, ActiveOrdering, Allocator, Dispatcher, EntityId, FnInterest, Poolable,
    RecyclingPool, UnitBehavior, World,
};

type ComponentSet = Rc<RefCell<HashSet<EntityId>>>;

struct CountingUnit {
    processed: Rc<RefCell<usize>>,
}

impl UnitBehavior for CountingUnit {
    fn process_entities(&mut self, _world: &mut World, entities: &[EntityId]) {
        *self.processed.borrow_mut() += entities.len();
    }
}

fn make_engine(
    id: u16,
    name: &'static str,
    world: &mut World,
    components: &ComponentSet,
    processed: &Rc<RefCell<usize>>,
) -> ActivationEngine {
    let set = Rc::clone(components);
    ActivationEngine::new(
        id,
        name,
        world,
        ActiveOrdering::Insertion,
        Box::new(FnInterest::new(move |_world, entity| {
            set.borrow().contains(&entity)
        })),
        Box::new(CountingUnit {
            processed: Rc::clone(processed),
        }),
    )
}

struct Scratch {
    slot: usize,
}

impl Poolable for Scratch {
    fn slot_index(&self) -> usize {
        self.slot
    }

    fn set_slot_index(&mut self, index: usize) {
        self.slot = index;
    }
}

fn scratch_allocator() -> Allocator<Scratch> {
    Box::new(|| Some(Scratch { slot: usize::MAX }))
}

#[test]
fn broadcast_reaches_exactly_the_interested_units() {
    let mut world = World::new();
    let mut dispatcher = Dispatcher::new();

    let positions: ComponentSet = Rc::new(RefCell::new(HashSet::new()));
    let velocities: ComponentSet = Rc::new(RefCell::new(HashSet::new()));
    let processed_a = Rc::new(RefCell::new(0));
    let processed_b = Rc::new(RefCell::new(0));

    let movement = dispatcher.register_engine(make_engine(
        1, "movement", &mut world, &positions, &processed_a,
    ));
    let physics = dispatcher.register_engine(make_engine(
        2, "physics", &mut world, &velocities, &processed_b,
    ));
    assert_eq!(dispatcher.engine_count(), 2);

    let entity = world.create_entity();
    positions.borrow_mut().insert(entity);
    dispatcher.composition_changed(&mut world, entity);

    let movement_engine = dispatcher.engine(movement).unwrap();
    let physics_engine = dispatcher.engine(physics).unwrap();
    assert!(movement_engine.active().contains(entity));
    assert!(!physics_engine.active().contains(entity));

    // Gaining the second component pulls the entity into the second unit.
    velocities.borrow_mut().insert(entity);
    dispatcher.composition_changed(&mut world, entity);
    assert!(dispatcher.engine(physics).unwrap().active().contains(entity));
}

#[test]
fn tick_processes_active_entities() {
    let mut world = World::new();
    let mut dispatcher = Dispatcher::new();

    let positions: ComponentSet = Rc::new(RefCell::new(HashSet::new()));
    let processed = Rc::new(RefCell::new(0));
    let movement =
        dispatcher.register_engine(make_engine(1, "movement", &mut world, &positions, &processed));

    let first = world.create_entity();
    let second = world.create_entity();
    for entity in [first, second] {
        positions.borrow_mut().insert(entity);
        dispatcher.composition_changed(&mut world, entity);
    }

    dispatcher.tick(&mut world);
    assert_eq!(*processed.borrow(), 2);

    // A toggled-off unit is skipped by the tick.
    dispatcher.engine_mut(movement).unwrap().toggle();
    dispatcher.tick(&mut world);
    assert_eq!(*processed.borrow(), 2);
}

#[test]
fn tick_discharges_the_pool_reclaim_cadence() {
    let mut world = World::new();
    let mut dispatcher = Dispatcher::new();

    let pool = Arc::new(RecyclingPool::new(4, 2, true, scratch_allocator()).unwrap());
    dispatcher.register_pool(pool.clone());

    let item = pool.acquire().unwrap();
    pool.release(item);
    assert_eq!(pool.pending_count(), 1);
    assert_eq!(pool.live_count(), 1);

    dispatcher.tick(&mut world);
    assert_eq!(pool.pending_count(), 0);
    assert_eq!(pool.live_count(), 0);
}

#[test]
fn destroy_entity_withdraws_from_units_and_world() {
    let mut world = World::new();
    let mut dispatcher = Dispatcher::new();

    let positions: ComponentSet = Rc::new(RefCell::new(HashSet::new()));
    let processed = Rc::new(RefCell::new(0));
    let movement =
        dispatcher.register_engine(make_engine(1, "movement", &mut world, &positions, &processed));

    let entity = world.create_entity();
    world.set_label("player", entity);
    positions.borrow_mut().insert(entity);
    dispatcher.composition_changed(&mut world, entity);
    assert_eq!(world.lookup_label("player"), Some(entity));

    dispatcher.destroy_entity(&mut world, entity);

    assert!(!world.is_alive(entity));
    assert!(dispatcher.engine(movement).unwrap().active().is_empty());
    assert_eq!(world.lookup_label("player"), None);
}

#[test]
fn labels_rebind_and_clear() {
    let mut world = World::new();
    let first = world.create_entity();
    let second = world.create_entity();

    world.set_label("boss", first);
    world.set_label("boss", second);
    assert_eq!(world.lookup_label("boss"), Some(second));

    assert!(world.clear_label("boss"));
    assert!(!world.clear_label("boss"));
    assert_eq!(world.lookup_label("boss"), None);
}
