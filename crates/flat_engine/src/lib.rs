//! # Flat Engine
//!
//! A modular 2D game engine core written in Rust.
//!
//! ## Features
//!
//! - **Rigid Body Physics**: Box collision detection with impulse response
//! - **Broad Phase Partitioning**: Static uniform grid with an exhaustive fallback
//! - **ECS Architecture**: Deferred spawn/despawn entity scheduling
//! - **Data Driven**: TOML/RON configuration for the simulation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flat_engine::prelude::*;
//!
//! fn main() {
//!     let mut physics = PhysicsSystem::new();
//!
//!     let handle = physics.add_body();
//!     if let Some(body) = physics.body_mut(handle) {
//!         body.body_type = BodyType::Dynamic;
//!         body.gravity = Vec2::new(0.0, -10.0);
//!     }
//!
//!     // 60 frames of simulation, four sub steps each
//!     for _ in 0..60 {
//!         physics.update(1.0 / 60.0, 4);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PhysicsConfig},
        ecs::{
            components::{Lifetime, RigidBody, Velocity},
            Component, EntityBuilder, EntityId, EntityLogic, EntityState, EntitySystem,
            UpdateContext,
        },
        foundation::{
            math::Vec2,
            time::{IntervalTicker, Timer},
        },
        physics::{
            Body, BodyHandle, BodyType, BoxShape, BroadPhase, EulerSolver,
            ExhaustiveBroadPhase, Manifold, ManifoldPoint, PhysicsSystem, Shape,
            StaticGridBroadPhase,
        },
    };
}
