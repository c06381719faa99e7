//! Kinematic movement component
//!
//! For entities that move but are not physics driven, such as visual debris
//! or pickups.

use std::any::Any;

use crate::ecs::component::{Component, UpdateContext};
use crate::ecs::entity::EntityState;
use crate::foundation::math::Vec2;

/// Moves the entity by a constant linear and angular velocity
///
/// Rotation accumulates across frames.
#[derive(Debug, Clone, Copy)]
pub struct Velocity {
    /// Linear velocity in units per second
    pub velocity: Vec2,
    /// Angular velocity in radians per second
    pub angular: f32,
}

impl Velocity {
    /// Create a velocity component
    #[must_use]
    pub fn new(velocity: Vec2, angular: f32) -> Self {
        Self { velocity, angular }
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::new(Vec2::zeros(), 0.0)
    }
}

impl Component for Velocity {
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        state.position += self.velocity * ctx.dt;
        state.rotation += self.angular * ctx.dt;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
