//! Lifetime component
//!
//! Tracks a countdown and queues the owning entity for despawning once it
//! runs out.

use std::any::Any;

use crate::ecs::component::{Component, UpdateContext};
use crate::ecs::entity::EntityState;

/// Despawns the owning entity after a duration
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    /// Remaining time in seconds
    pub time_left: f32,
}

impl Lifetime {
    /// Create a lifetime of `time` seconds
    #[must_use]
    pub fn new(time: f32) -> Self {
        Self { time_left: time }
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Component for Lifetime {
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        self.time_left -= ctx.dt;
        if self.time_left <= 0.0 {
            ctx.despawn(state.id);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
