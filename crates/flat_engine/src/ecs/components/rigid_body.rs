//! Physics binding component
//!
//! Owns one body in the physics system for the lifetime of the entity. The
//! body is created when the entity activates and removed with it, and the
//! entity transform follows the body every frame.

use std::any::Any;

use crate::ecs::component::{Component, UpdateContext};
use crate::ecs::entity::EntityState;
use crate::foundation::math::Vec2;
use crate::physics::{BodyHandle, BodyType};

/// Binds the owning entity to a simulated body
///
/// A mass of exactly zero makes the body static; any other mass makes it
/// dynamic. The body takes the entity's transform at activation and drives
/// the entity's position and rotation afterwards, while scale keeps flowing
/// from the entity to the body.
#[derive(Debug, Clone, Copy)]
pub struct RigidBody {
    /// Mass forwarded to the body at activation
    pub mass: f32,
    /// Restitution forwarded to the body at activation
    pub bounciness: f32,
    handle: Option<BodyHandle>,
}

impl RigidBody {
    /// Create a binding with the given mass
    #[must_use]
    pub fn new(mass: f32) -> Self {
        Self {
            mass,
            bounciness: 0.0,
            handle: None,
        }
    }

    /// Set the restitution forwarded to the body
    #[must_use]
    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.bounciness = bounciness;
        self
    }

    /// Handle of the owned body once the entity is active
    #[must_use]
    pub fn handle(&self) -> Option<BodyHandle> {
        self.handle
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Component for RigidBody {
    #[allow(clippy::float_cmp)]
    fn init(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        let handle = ctx.physics.add_body();
        if let Some(body) = ctx.physics.body_mut(handle) {
            body.mass = self.mass;
            body.drag = Vec2::new(1.0, 1.0);
            body.bounciness = self.bounciness;
            body.body_type = if self.mass == 0.0 {
                BodyType::Static
            } else {
                BodyType::Dynamic
            };
            body.position = state.position;
            body.rotation = state.rotation;
            body.scale = state.scale;
            body.entity = Some(state.id);
        }
        self.handle = Some(handle);
    }

    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        if let Some(handle) = self.handle {
            if let Some(body) = ctx.physics.body_mut(handle) {
                state.position = body.position;
                state.rotation = body.rotation;
                body.scale = state.scale;
            }
        }
    }

    fn removed(&mut self, _state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        if let Some(handle) = self.handle.take() {
            ctx.physics.remove_body(handle);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{EntityBuilder, EntitySystem};
    use crate::physics::PhysicsSystem;

    fn spawn_with_body(
        physics: &mut PhysicsSystem,
        entities: &mut EntitySystem,
        rigid_body: RigidBody,
    ) -> (u32, BodyHandle) {
        let id = entities.spawn(
            EntityBuilder::new()
                .with_position(Vec2::new(3.0, 4.0))
                .with_scale(Vec2::new(2.0, 2.0))
                .with_rotation(0.5)
                .with_component(rigid_body),
        );
        entities.update(physics, 0.0);
        let handle = entities
            .get_component::<RigidBody>(id)
            .unwrap()
            .handle()
            .unwrap();
        (id, handle)
    }

    #[test]
    fn test_activation_creates_a_configured_body() {
        let mut physics = PhysicsSystem::new();
        let mut entities = EntitySystem::new();
        let (id, handle) = spawn_with_body(&mut physics, &mut entities, RigidBody::new(2.0));

        let body = physics.body(handle).unwrap();
        assert_eq!(body.mass, 2.0);
        assert_eq!(body.drag, Vec2::new(1.0, 1.0));
        assert_eq!(body.bounciness, 0.0);
        assert_eq!(body.body_type, BodyType::Dynamic);
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert_eq!(body.scale, Vec2::new(2.0, 2.0));
        assert_eq!(body.rotation, 0.5);
        assert_eq!(body.entity, Some(id));
    }

    #[test]
    fn test_zero_mass_creates_a_static_body() {
        let mut physics = PhysicsSystem::new();
        let mut entities = EntitySystem::new();
        let (_, handle) = spawn_with_body(&mut physics, &mut entities, RigidBody::new(0.0));

        assert_eq!(physics.body(handle).unwrap().body_type, BodyType::Static);
    }

    #[test]
    fn test_bounciness_is_forwarded() {
        let mut physics = PhysicsSystem::new();
        let mut entities = EntitySystem::new();
        let (_, handle) = spawn_with_body(
            &mut physics,
            &mut entities,
            RigidBody::new(1.0).with_bounciness(0.8),
        );

        assert_eq!(physics.body(handle).unwrap().bounciness, 0.8);
    }

    #[test]
    fn test_body_drives_position_and_entity_drives_scale() {
        let mut physics = PhysicsSystem::new();
        let mut entities = EntitySystem::new();
        let (id, handle) = spawn_with_body(&mut physics, &mut entities, RigidBody::new(2.0));

        // Simulate the body having moved, and the game having rescaled
        let body = physics.body_mut(handle).unwrap();
        body.position = Vec2::new(7.0, 8.0);
        body.rotation = 0.3;
        entities.state_mut(id).unwrap().scale = Vec2::new(3.0, 1.0);

        entities.update(&mut physics, 0.1);
        let state = entities.state(id).unwrap();
        assert_eq!(state.position, Vec2::new(7.0, 8.0));
        assert_eq!(state.rotation, 0.3);
        assert_eq!(physics.body(handle).unwrap().scale, Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_despawn_frees_the_body() {
        let mut physics = PhysicsSystem::new();
        let mut entities = EntitySystem::new();
        let (id, handle) = spawn_with_body(&mut physics, &mut entities, RigidBody::new(2.0));
        assert_eq!(physics.body_count(), 1);

        entities.despawn(id);
        entities.update(&mut physics, 0.0);

        // The slot stays but the body is gone
        assert_eq!(physics.body_count(), 1);
        assert!(physics.body(handle).is_none());
    }

    #[test]
    fn test_clear_frees_all_bodies() {
        let mut physics = PhysicsSystem::new();
        let mut entities = EntitySystem::new();
        let (_, handle_a) = spawn_with_body(&mut physics, &mut entities, RigidBody::new(2.0));
        let (_, handle_b) = spawn_with_body(&mut physics, &mut entities, RigidBody::new(0.0));

        entities.clear(&mut physics);
        assert!(physics.body(handle_a).is_none());
        assert!(physics.body(handle_b).is_none());
    }
}
