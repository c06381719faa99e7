//! Entity identity, transform state, and the spawn builder

use crate::ecs::component::{Component, UpdateContext};
use crate::foundation::math::Vec2;

/// Identifier of a spawned entity
///
/// Ids count up from 1 and are never reused, so a held id of a despawned
/// entity keeps resolving to nothing instead of aliasing a newer one. Zero
/// is never assigned.
pub type EntityId = u32;

/// Shared per-entity state every component can read and write
#[derive(Debug, Clone, Copy)]
pub struct EntityState {
    /// The entity's id
    pub id: EntityId,
    /// World position
    pub position: Vec2,
    /// World scale
    pub scale: Vec2,
    /// Orientation in radians
    pub rotation: f32,
    /// Inactive entities keep their state but are skipped by the update pass
    pub active: bool,
}

/// Per-entity behavior that runs after all of the entity's components
///
/// Hooks default to no-ops.
pub trait EntityLogic: 'static {
    /// Called once at the flush that activates the entity
    fn init(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        let _ = (state, ctx);
    }

    /// Called every update while the entity is active
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        let _ = (state, ctx);
    }
}

/// A spawned entity as stored by the scheduler
pub(crate) struct EntityRecord {
    pub(crate) state: EntityState,
    pub(crate) components: Vec<Box<dyn Component>>,
    pub(crate) logic: Option<Box<dyn EntityLogic>>,
}

/// Describes an entity to spawn
///
/// Components run in the order they were attached.
#[must_use]
pub struct EntityBuilder {
    position: Vec2,
    scale: Vec2,
    rotation: f32,
    active: bool,
    components: Vec<Box<dyn Component>>,
    logic: Option<Box<dyn EntityLogic>>,
}

impl EntityBuilder {
    /// Start an entity at the origin with unit scale
    pub fn new() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            active: true,
            components: Vec::new(),
            logic: None,
        }
    }

    /// Set the spawn position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the spawn scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Set the spawn orientation in radians
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Spawn the entity inactive; it can be activated through its state
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Attach a component
    pub fn with_component(mut self, component: impl Component) -> Self {
        self.components.push(Box::new(component));
        self
    }

    /// Attach the entity's logic
    pub fn with_logic(mut self, logic: impl EntityLogic) -> Self {
        self.logic = Some(Box::new(logic));
        self
    }

    pub(crate) fn into_record(self, id: EntityId) -> EntityRecord {
        EntityRecord {
            state: EntityState {
                id,
                position: self.position,
                scale: self.scale,
                rotation: self.rotation,
                active: self.active,
            },
            components: self.components,
            logic: self.logic,
        }
    }
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = EntityBuilder::new().into_record(1);
        assert_eq!(record.state.id, 1);
        assert_eq!(record.state.position, Vec2::zeros());
        assert_eq!(record.state.scale, Vec2::new(1.0, 1.0));
        assert_eq!(record.state.rotation, 0.0);
        assert!(record.state.active);
        assert!(record.components.is_empty());
        assert!(record.logic.is_none());
    }

    #[test]
    fn test_builder_applies_transform() {
        let record = EntityBuilder::new()
            .with_position(Vec2::new(3.0, 4.0))
            .with_scale(Vec2::new(2.0, 0.5))
            .with_rotation(1.5)
            .inactive()
            .into_record(7);
        assert_eq!(record.state.position, Vec2::new(3.0, 4.0));
        assert_eq!(record.state.scale, Vec2::new(2.0, 0.5));
        assert_eq!(record.state.rotation, 1.5);
        assert!(!record.state.active);
    }
}
