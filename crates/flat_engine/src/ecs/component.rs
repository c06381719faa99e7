//! Component trait and the update context handed to its hooks

use std::any::Any;

use crate::ecs::entity::{EntityBuilder, EntityId, EntityRecord, EntityState};
use crate::physics::PhysicsSystem;

/// Behavior attached to an entity
///
/// Hooks default to no-ops. `init` runs once at the flush that makes the
/// owning entity live, `update` every frame while the entity is active, and
/// `removed` when the entity is taken out of the live set, including on a
/// clear.
pub trait Component: 'static {
    /// Called once at the flush that activates the owning entity
    fn init(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        let _ = (state, ctx);
    }

    /// Called every update while the owning entity is active
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        let _ = (state, ctx);
    }

    /// Called when the owning entity is removed
    fn removed(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        let _ = (state, ctx);
    }

    /// Downcast support for typed component lookup
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support for typed component lookup
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Services available to component and entity logic hooks
///
/// Carries the physics system and the frame delta, plus queued access to
/// entity creation and removal. Queued requests take effect at the next
/// flush, never during the running pass.
pub struct UpdateContext<'a> {
    /// Physics system driving the simulation
    pub physics: &'a mut PhysicsSystem,
    /// Frame delta in seconds
    pub dt: f32,
    spawns: &'a mut Vec<EntityRecord>,
    despawns: &'a mut Vec<EntityId>,
    next_id: &'a mut EntityId,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(
        physics: &'a mut PhysicsSystem,
        dt: f32,
        spawns: &'a mut Vec<EntityRecord>,
        despawns: &'a mut Vec<EntityId>,
        next_id: &'a mut EntityId,
    ) -> Self {
        Self {
            physics,
            dt,
            spawns,
            despawns,
            next_id,
        }
    }

    /// Queue an entity for spawning at the next flush
    ///
    /// The returned id is assigned immediately and stays valid for the
    /// entity's whole lifetime.
    pub fn spawn(&mut self, builder: EntityBuilder) -> EntityId {
        let id = *self.next_id;
        *self.next_id += 1;
        self.spawns.push(builder.into_record(id));
        id
    }

    /// Queue an entity for removal at the next flush
    pub fn despawn(&mut self, id: EntityId) {
        self.despawns.push(id);
    }
}
