//! Entity-Component-System implementation
//!
//! Entities carry a shared transform plus an ordered list of components and
//! optional per-entity logic. Spawning and despawning are queued and applied
//! at the start of the next update, so gameplay code may request structural
//! changes at any point without invalidating the running pass.

pub mod component;
pub mod components;
pub mod entity;
pub mod entity_system;

pub use component::{Component, UpdateContext};
pub use entity::{EntityBuilder, EntityId, EntityLogic, EntityState};
pub use entity_system::EntitySystem;
