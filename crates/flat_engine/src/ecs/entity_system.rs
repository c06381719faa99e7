//! Deferred entity scheduling
//!
//! Entities live in a dense vector with an id-to-index map for lookup.
//! Structural changes are queued: a flush at the start of every update
//! applies removals first and spawns second, then the active entities run
//! their components in attach order followed by their entity logic.

use std::collections::HashMap;

use crate::ecs::component::{Component, UpdateContext};
use crate::ecs::entity::{EntityBuilder, EntityId, EntityRecord, EntityState};
use crate::physics::PhysicsSystem;

/// Owner and scheduler of all spawned entities
///
/// The physics system is passed into [`EntitySystem::update`] per call, so
/// component hooks can create and remove bodies without the two systems
/// holding references to each other.
pub struct EntitySystem {
    next_id: EntityId,
    entities: Vec<EntityRecord>,
    index_of: HashMap<EntityId, usize>,
    pending_spawns: Vec<EntityRecord>,
    pending_despawns: Vec<EntityId>,
}

impl Default for EntitySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl EntitySystem {
    /// Create an empty entity system
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1, // 0 is never assigned
            entities: Vec::new(),
            index_of: HashMap::new(),
            pending_spawns: Vec::new(),
            pending_despawns: Vec::new(),
        }
    }

    /// Queue an entity for spawning at the next update
    ///
    /// The id is assigned immediately; the entity becomes active, and its
    /// init hooks run, at the flush.
    pub fn spawn(&mut self, builder: EntityBuilder) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending_spawns.push(builder.into_record(id));
        log::trace!("queued entity {id} for spawn");
        id
    }

    /// Queue an entity for removal at the next update
    ///
    /// Unknown and already-removed ids are ignored. Despawning an entity
    /// that is still waiting to spawn cancels the spawn.
    pub fn despawn(&mut self, id: EntityId) {
        self.pending_despawns.push(id);
    }

    /// Apply queued changes, then run one update pass over active entities
    pub fn update(&mut self, physics: &mut PhysicsSystem, dt: f32) {
        self.flush(physics, dt);

        let mut ctx = UpdateContext::new(
            physics,
            dt,
            &mut self.pending_spawns,
            &mut self.pending_despawns,
            &mut self.next_id,
        );
        for index in 0..self.entities.len() {
            let entity = &mut self.entities[index];
            if !entity.state.active {
                continue;
            }
            for component in &mut entity.components {
                component.update(&mut entity.state, &mut ctx);
            }
            if let Some(logic) = &mut entity.logic {
                logic.update(&mut entity.state, &mut ctx);
            }
        }
    }

    /// Removals first, so an entity despawned and replaced in the same
    /// frame never exists twice during the flush
    fn flush(&mut self, physics: &mut PhysicsSystem, dt: f32) {
        let despawns = std::mem::take(&mut self.pending_despawns);
        for id in despawns {
            if let Some(index) = self.index_of.remove(&id) {
                let mut entity = self.entities.swap_remove(index);
                if index < self.entities.len() {
                    let moved = self.entities[index].state.id;
                    self.index_of.insert(moved, index);
                }

                let mut ctx = UpdateContext::new(
                    &mut *physics,
                    dt,
                    &mut self.pending_spawns,
                    &mut self.pending_despawns,
                    &mut self.next_id,
                );
                for component in &mut entity.components {
                    component.removed(&mut entity.state, &mut ctx);
                }
            } else {
                // The id may still be waiting in the spawn queue
                self.pending_spawns.retain(|entity| entity.state.id != id);
            }
        }

        // Spawns queued by removed hooks are included here; spawns queued by
        // init hooks below wait for the next flush
        let spawns = std::mem::take(&mut self.pending_spawns);
        for mut entity in spawns {
            let index = self.entities.len();
            self.index_of.insert(entity.state.id, index);

            let mut ctx = UpdateContext::new(
                &mut *physics,
                dt,
                &mut self.pending_spawns,
                &mut self.pending_despawns,
                &mut self.next_id,
            );
            for component in &mut entity.components {
                component.init(&mut entity.state, &mut ctx);
            }
            if let Some(logic) = &mut entity.logic {
                logic.init(&mut entity.state, &mut ctx);
            }

            self.entities.push(entity);
        }
    }

    /// Remove every entity immediately, firing removed hooks
    ///
    /// Pending spawns are dropped without ever running their init hooks.
    pub fn clear(&mut self, physics: &mut PhysicsSystem) {
        log::debug!("clearing {} entities", self.entities.len());
        let entities = std::mem::take(&mut self.entities);
        self.index_of.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();

        for mut entity in entities {
            let mut ctx = UpdateContext::new(
                &mut *physics,
                0.0,
                &mut self.pending_spawns,
                &mut self.pending_despawns,
                &mut self.next_id,
            );
            for component in &mut entity.components {
                component.removed(&mut entity.state, &mut ctx);
            }
        }
    }

    /// Number of live entities; queued spawns are not counted
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entities are live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether `id` refers to a live entity
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of.contains_key(&id)
    }

    /// Shared state of a live entity
    #[must_use]
    pub fn state(&self, id: EntityId) -> Option<&EntityState> {
        let index = *self.index_of.get(&id)?;
        Some(&self.entities[index].state)
    }

    /// Mutable shared state of a live entity
    pub fn state_mut(&mut self, id: EntityId) -> Option<&mut EntityState> {
        let index = *self.index_of.get(&id)?;
        Some(&mut self.entities[index].state)
    }

    /// First component of type `T` on a live entity
    #[must_use]
    pub fn get_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        let index = *self.index_of.get(&id)?;
        self.entities[index]
            .components
            .iter()
            .find_map(|component| component.as_any().downcast_ref::<T>())
    }

    /// Mutable first component of type `T` on a live entity
    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        let index = *self.index_of.get(&id)?;
        self.entities[index]
            .components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// Ids of all live entities, in storage order
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|entity| entity.state.id)
    }
}
