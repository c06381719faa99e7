//! Physics pipeline orchestration
//!
//! [`PhysicsSystem`] owns the body registry, a broad phase, and a solver,
//! and drives them through fixed sub steps. Within one step every live body
//! is reclassified and integrated, candidate pairs are gathered from the
//! broad phase, and each confirmed contact is resolved and reported through
//! the bodies' collision callbacks.

use std::sync::Arc;

use crate::config::PhysicsConfig;
use crate::foundation::math::Vec2;
use crate::physics::body::{Body, BodyArena, BodyHandle, BodyType};
use crate::physics::broad_phase::{BroadPhase, StaticGridBroadPhase};
use crate::physics::shape::{BoxShape, Manifold, Shape};
use crate::physics::solver::{EulerSolver, Solver};

/// Owner of the simulation state and the per-step collision pipeline
///
/// The broad phase and solver are swappable strategies; the registry is
/// handed to them per call rather than shared, so either can be replaced
/// without touching stored bodies.
pub struct PhysicsSystem {
    bodies: BodyArena,
    broad_phase: Box<dyn BroadPhase>,
    solver: Box<dyn Solver>,
    default_shape: Arc<dyn Shape>,
    // Reused across steps so candidate gathering does not allocate per frame
    pair_buffer: Vec<(BodyHandle, BodyHandle)>,
}

impl PhysicsSystem {
    /// Create a system with a 50x50 grid of 2x2 cells, the Euler solver,
    /// and a unit box as the default shape
    #[must_use]
    pub fn new() -> Self {
        Self {
            bodies: BodyArena::new(),
            broad_phase: Box::new(StaticGridBroadPhase::new(Vec2::new(2.0, 2.0), 50, 50)),
            solver: Box::new(EulerSolver::new()),
            default_shape: BoxShape::shared_default(),
            pair_buffer: Vec::new(),
        }
    }

    /// Create a system whose grid dimensions come from `config`
    #[must_use]
    pub fn from_config(config: &PhysicsConfig) -> Self {
        log::debug!(
            "physics grid: {}x{} cells of {}x{}",
            config.cell_count_x,
            config.cell_count_y,
            config.cell_size.x,
            config.cell_size.y
        );
        Self::new().with_broad_phase(Box::new(StaticGridBroadPhase::new(
            config.cell_size,
            config.cell_count_x,
            config.cell_count_y,
        )))
    }

    /// Replace the broad phase strategy
    #[must_use]
    pub fn with_broad_phase(mut self, broad_phase: Box<dyn BroadPhase>) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    /// Replace the solver strategy
    #[must_use]
    pub fn with_solver(mut self, solver: Box<dyn Solver>) -> Self {
        self.solver = solver;
        self
    }

    /// Replace the shape given to bodies created by [`PhysicsSystem::add_body`]
    #[must_use]
    pub fn with_default_shape(mut self, shape: Arc<dyn Shape>) -> Self {
        self.default_shape = shape;
        self
    }

    /// Advance the simulation by `dt`, split evenly into `sub_steps` steps
    ///
    /// Zero sub steps advances nothing.
    pub fn update(&mut self, dt: f32, sub_steps: u32) {
        if sub_steps == 0 {
            return;
        }
        let sub_dt = dt / sub_steps as f32;
        for _ in 0..sub_steps {
            self.step(sub_dt);
        }
    }

    /// One fixed step of the pipeline
    fn step(&mut self, dt: f32) {
        // Classification happens before integration, so pairing always uses
        // positions from the start of the step
        for index in 0..self.bodies.len() {
            if let Some(handle) = self.bodies.handle_at(index) {
                if let Some(body) = self.bodies.get_mut(handle) {
                    self.broad_phase.update_body(handle, body.position);
                    self.solver.pre_update(body, dt);
                }
            }
        }

        self.pair_buffer.clear();
        {
            let Self {
                broad_phase,
                bodies,
                pair_buffer,
                ..
            } = self;
            broad_phase.each(bodies, &mut |a, b| pair_buffer.push((a, b)));
        }

        // Pairs straddling two grid cells appear twice in the buffer and are
        // processed twice, matching the broad phase contract
        let pairs = std::mem::take(&mut self.pair_buffer);
        for &(handle_a, handle_b) in &pairs {
            self.collide_pair(handle_a, handle_b);
        }
        self.pair_buffer = pairs;

        for index in 0..self.bodies.len() {
            if let Some(body) = self.bodies.get_by_index_mut(index) {
                self.solver.post_update(body, dt);
            }
        }
    }

    /// Narrow-phase check one candidate pair, then resolve and report it
    fn collide_pair(&mut self, handle_a: BodyHandle, handle_b: BodyHandle) {
        let mut manifold = Manifold::default();
        let hit = match (self.bodies.get(handle_a), self.bodies.get(handle_b)) {
            (Some(body_a), Some(body_b)) => {
                body_a
                    .shape
                    .check(body_a, body_b, body_b.shape.as_ref(), &mut manifold)
            }
            _ => false,
        };
        if !hit {
            return;
        }

        manifold.a.body = handle_a;
        manifold.b.body = handle_b;

        if let Some((body_a, body_b)) = self.bodies.get_pair_mut(handle_a, handle_b) {
            if body_a.body_type != BodyType::Collider && body_b.body_type != BodyType::Collider {
                self.solver.resolve(&manifold, body_a, body_b);
            }

            // Each callback receives the other body and its own contact
            // point. Taking the callback out for the call keeps the body
            // borrowable by the callback itself.
            if let Some(mut callback) = body_a.on_collide.take() {
                callback(body_b, &manifold.a);
                body_a.on_collide = Some(callback);
            }
            if let Some(mut callback) = body_b.on_collide.take() {
                callback(body_a, &manifold.b);
                body_b.on_collide = Some(callback);
            }
        }
    }

    /// Create a body with default state and the system's default shape
    pub fn add_body(&mut self) -> BodyHandle {
        let handle = self.bodies.add(Body::new(Arc::clone(&self.default_shape)));
        log::trace!("added body {}", handle.index);
        handle
    }

    /// Remove a body, returning it with its registry index reset
    ///
    /// The slot is left empty and the registry does not shrink. Stale
    /// handles and repeated removals return `None`.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        // The spatial classification still references the slot, so it is
        // cleaned up before the slot is emptied
        if self.bodies.get(handle).is_none() {
            return None;
        }
        self.broad_phase.remove_body(handle);
        let mut body = self.bodies.remove(handle)?;
        body.index = 0;
        log::trace!("removed body {}", handle.index);
        Some(body)
    }

    /// Drop every body and all spatial classification state
    ///
    /// Every outstanding handle becomes stale.
    pub fn clear_bodies(&mut self) {
        log::debug!("clearing {} body slots", self.bodies.len());
        self.broad_phase.clear_bodies();
        self.bodies.clear();
    }

    /// Number of registry slots, holes from removals included
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Body occupying slot `index`, or `None` for holes
    #[must_use]
    pub fn get_body(&self, index: usize) -> Option<&Body> {
        self.bodies.get_by_index(index)
    }

    /// Mutable body at slot `index`, or `None` for holes
    pub fn get_body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_by_index_mut(index)
    }

    /// Resolve a handle to its body
    #[must_use]
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    /// Resolve a handle to its mutable body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    /// Resolve two distinct handles to their bodies at once
    pub fn body_pair_mut(
        &mut self,
        first: BodyHandle,
        second: BodyHandle,
    ) -> Option<(&mut Body, &mut Body)> {
        self.bodies.get_pair_mut(first, second)
    }

    /// The body registry
    #[must_use]
    pub fn bodies(&self) -> &BodyArena {
        &self.bodies
    }

    /// The active broad phase strategy
    #[must_use]
    pub fn broad_phase(&self) -> &dyn BroadPhase {
        self.broad_phase.as_ref()
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}
