//! Rigid body physics: bodies, shapes, broad phase, solver, orchestration
//!
//! The pipeline runs once per frame in fixed sub steps: classify and
//! integrate every live body, enumerate candidate pairs through the broad
//! phase, confirm contacts with the narrow-phase shape tests, then resolve
//! and report them.

pub mod body;
pub mod broad_phase;
pub mod shape;
pub mod solver;
pub mod system;

pub use body::{Body, BodyArena, BodyHandle, BodyType, CollisionCallback};
pub use broad_phase::{BroadPhase, ExhaustiveBroadPhase, StaticGridBroadPhase};
pub use shape::{BoxShape, Manifold, ManifoldPoint, Shape, ShapeType};
pub use solver::{EulerSolver, Solver};
pub use system::PhysicsSystem;
