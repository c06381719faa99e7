//! Engine components
//!
//! Components shipped with the engine: physics binding, plain kinematic
//! movement, and timed despawning.

pub mod lifetime;
pub mod movement;
pub mod rigid_body;

pub use lifetime::Lifetime;
pub use movement::Velocity;
pub use rigid_body::RigidBody;
