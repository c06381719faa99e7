//! Rigid body state and the body registry
//!
//! Bodies are stored in a generational arena and addressed through
//! [`BodyHandle`] values. Handles stay valid across registry growth and
//! resolve to `None` once the slot is emptied or the registry is cleared,
//! which replaces the raw-pointer registry the design originally called for.

use std::fmt;
use std::sync::Arc;

use crate::ecs::EntityId;
use crate::foundation::math::Vec2;
use crate::physics::shape::{BoxShape, ManifoldPoint, Shape};

/// Collision callback attached to a body
///
/// Invoked once per detected contact with the other body and this side's
/// contact point. Structural changes (spawning, despawning) cannot be made
/// from inside the callback; route them through the entity system's pending
/// queues instead.
pub type CollisionCallback = Box<dyn FnMut(&mut Body, &ManifoldPoint)>;

/// Simulation role of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Immovable; velocity is zeroed every step
    Static,
    /// Fully simulated: forces, integration, and collision response
    Dynamic,
    /// Moves by its velocity and reports contacts but is never pushed apart
    Collider,
}

/// Physical state of one simulated body
pub struct Body {
    /// Simulation role
    pub body_type: BodyType,
    /// World position
    pub position: Vec2,
    /// Scale applied to the attached shape's extents
    pub scale: Vec2,
    /// Orientation in radians
    pub rotation: f32,
    /// Linear velocity
    pub velocity: Vec2,
    /// Angular velocity in radians per second
    pub angular_velocity: f32,
    /// Force accumulated for the current step; cleared after integration
    pub force: Vec2,
    /// Per-axis drag coefficients
    pub drag: Vec2,
    /// Restitution in [0, 1]
    pub bounciness: f32,
    /// Per-body gravity, applied as acceleration each step
    pub gravity: Vec2,
    /// Mass; must be positive for dynamic bodies (not enforced)
    pub mass: f32,
    /// Slot index in the owning registry; reset to 0 on removal
    pub index: u32,
    /// Owning entity, if the body was created by a binding component
    pub entity: Option<EntityId>,
    /// Collision geometry, shared between bodies
    pub shape: Arc<dyn Shape>,
    /// Invoked for every detected contact involving this body
    pub on_collide: Option<CollisionCallback>,
}

impl Body {
    /// Create a body with the given shape and default state
    #[must_use]
    pub fn new(shape: Arc<dyn Shape>) -> Self {
        Self {
            body_type: BodyType::Static,
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
            force: Vec2::zeros(),
            drag: Vec2::zeros(),
            bounciness: 0.0,
            gravity: Vec2::zeros(),
            mass: 1.0,
            index: 0,
            entity: None,
            shape,
            on_collide: None,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Arc::new(BoxShape::default()))
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("body_type", &self.body_type)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("mass", &self.mass)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Stable reference to a body slot
///
/// Carries the slot index and the registry generation the slot was created
/// under; a handle from before a registry clear never aliases a new body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle {
    /// Slot index in the registry
    pub index: u32,
    /// Registry generation the slot belongs to
    pub generation: u32,
}

struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Append-only generational storage for bodies
///
/// Removal empties a slot without compacting, so `len` includes holes and a
/// body's `index` never moves. Clearing bumps the generation, invalidating
/// every outstanding handle at once.
#[derive(Default)]
pub struct BodyArena {
    slots: Vec<Slot>,
    generation: u32,
}

impl BodyArena {
    /// Create an empty arena
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: 0,
        }
    }

    /// Append a body, assigning it the next slot index
    pub fn add(&mut self, mut body: Body) -> BodyHandle {
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        body.index = index;
        self.slots.push(Slot {
            generation: self.generation,
            body: Some(body),
        });
        BodyHandle {
            index,
            generation: self.generation,
        }
    }

    /// Take the body out of its slot, leaving a hole
    ///
    /// Returns `None` for stale handles and repeated removals. The slot
    /// count is unchanged.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.take()
    }

    /// Drop every body and invalidate all outstanding handles
    pub fn clear(&mut self) {
        self.slots.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of slots, holes included
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena holds no slots at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolve a handle to a body
    #[must_use]
    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    /// Resolve a handle to a mutable body
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    /// Bounds-checked access by slot index; holes read as `None`
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Body> {
        self.slots.get(index)?.body.as_ref()
    }

    /// Bounds-checked mutable access by slot index
    pub fn get_by_index_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.slots.get_mut(index)?.body.as_mut()
    }

    /// Handle for the body occupying `index`, if the slot is live
    #[must_use]
    pub fn handle_at(&self, index: usize) -> Option<BodyHandle> {
        let slot = self.slots.get(index)?;
        slot.body.as_ref()?;
        Some(BodyHandle {
            index: u32::try_from(index).ok()?,
            generation: slot.generation,
        })
    }

    /// Disjoint mutable access to two distinct bodies
    pub fn get_pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut Body, &mut Body)> {
        let ia = a.index as usize;
        let ib = b.index as usize;
        if ia == ib || ia >= self.slots.len() || ib >= self.slots.len() {
            return None;
        }

        let (first, second, flipped) = if ia < ib { (ia, ib, false) } else { (ib, ia, true) };
        let (head, tail) = self.slots.split_at_mut(second);
        let slot_a = &mut head[first];
        let slot_b = &mut tail[0];

        let (slot_a, slot_b) = if flipped { (slot_b, slot_a) } else { (slot_a, slot_b) };
        if slot_a.generation != a.generation || slot_b.generation != b.generation {
            return None;
        }
        match (slot_a.body.as_mut(), slot_b.body.as_mut()) {
            (Some(body_a), Some(body_b)) => Some((body_a, body_b)),
            _ => None,
        }
    }

    /// Iterate live bodies with their handles, skipping holes
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let body = slot.body.as_ref()?;
            Some((
                BodyHandle {
                    index: u32::try_from(index).ok()?,
                    generation: slot.generation,
                },
                body,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_get_returns_same_body() {
        let mut arena = BodyArena::new();
        let body = Body {
            mass: 7.5,
            ..Body::default()
        };
        let handle = arena.add(body);

        assert_eq!(arena.get(handle).unwrap().mass, 7.5);
        assert_eq!(arena.get_by_index(handle.index as usize).unwrap().mass, 7.5);
    }

    #[test]
    fn test_indices_are_assigned_in_order() {
        let mut arena = BodyArena::new();
        let a = arena.add(Body::default());
        let b = arena.add(Body::default());
        assert_eq!(a.index, 0);
        assert_eq!(b.index, 1);
        assert_eq!(arena.get(b).unwrap().index, 1);
    }

    #[test]
    fn test_remove_leaves_hole_and_keeps_count() {
        let mut arena = BodyArena::new();
        let a = arena.add(Body::default());
        let _b = arena.add(Body::default());

        assert!(arena.remove(a).is_some());
        assert_eq!(arena.len(), 2); // Slot is not compacted away
        assert!(arena.get(a).is_none());
        assert!(arena.get_by_index(0).is_none());
        assert!(arena.get_by_index(1).is_some());

        // Repeated removal is a no-op
        assert!(arena.remove(a).is_none());

        // New bodies keep appending past the hole
        let c = arena.add(Body::default());
        assert_eq!(c.index, 2);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_clear_invalidates_outstanding_handles() {
        let mut arena = BodyArena::new();
        let stale = arena.add(Body::default());
        arena.clear();
        let fresh = arena.add(Body::default());

        assert_eq!(fresh.index, stale.index);
        assert!(arena.get(stale).is_none());
        assert!(arena.get(fresh).is_some());
    }

    #[test]
    fn test_pair_access_is_disjoint() {
        let mut arena = BodyArena::new();
        let a = arena.add(Body::default());
        let b = arena.add(Body::default());

        let (body_a, body_b) = arena.get_pair_mut(a, b).unwrap();
        body_a.mass = 1.0;
        body_b.mass = 2.0;
        assert_eq!(arena.get(a).unwrap().mass, 1.0);
        assert_eq!(arena.get(b).unwrap().mass, 2.0);

        // Order of the handles does not matter
        let (body_b, body_a) = arena.get_pair_mut(b, a).unwrap();
        body_b.mass = 3.0;
        body_a.mass = 4.0;
        assert_eq!(arena.get(b).unwrap().mass, 3.0);
        assert_eq!(arena.get(a).unwrap().mass, 4.0);

        assert!(arena.get_pair_mut(a, a).is_none());
    }

    #[test]
    fn test_iter_skips_holes() {
        let mut arena = BodyArena::new();
        let _a = arena.add(Body::default());
        let b = arena.add(Body::default());
        let _c = arena.add(Body::default());
        arena.remove(b);

        let indices: Vec<u32> = arena.iter().map(|(handle, _)| handle.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
