//! Motion integration and contact resolution

use crate::foundation::math::Vec2;
use crate::physics::body::{Body, BodyType};
use crate::physics::shape::Manifold;

/// Integration and contact response strategy
///
/// `pre_update` advances one body by one sub step, `resolve` responds to one
/// confirmed contact, and `post_update` is an empty hook by default.
pub trait Solver {
    /// Integrate forces, velocity, and position for one body
    fn pre_update(&self, body: &mut Body, dt: f32);

    /// Apply positional correction and velocity response for one contact
    fn resolve(&self, manifold: &Manifold, a: &mut Body, b: &mut Body);

    /// Per-body hook after resolution; does nothing unless overridden
    fn post_update(&self, body: &mut Body, dt: f32) {
        let _ = (body, dt);
    }
}

/// Explicit Euler integrator with mass-weighted penetration correction
///
/// Forces act as accelerations; mass participates only in distributing the
/// correction between two dynamic bodies.
#[derive(Debug, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create the Euler solver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn pre_update(&self, body: &mut Body, dt: f32) {
        body.force -= body.velocity.component_mul(&body.drag);
        body.force += body.gravity;

        if body.body_type == BodyType::Dynamic || body.body_type == BodyType::Collider {
            if body.body_type == BodyType::Dynamic {
                body.velocity += body.force * dt;
            }
            body.position += body.velocity * dt;
            // Orientation tracks this step's angular motion; it does not
            // accumulate across steps
            body.rotation = body.angular_velocity * dt;
        } else {
            body.velocity = Vec2::zeros();
        }

        body.force = Vec2::zeros();
    }

    fn resolve(&self, manifold: &Manifold, a: &mut Body, b: &mut Body) {
        let (factor_a, factor_b) = if a.body_type == BodyType::Static {
            if b.body_type == BodyType::Static {
                (0.0, 0.0)
            } else {
                (0.0, 1.0)
            }
        } else if b.body_type == BodyType::Static {
            (1.0, 0.0)
        } else {
            let total_mass = a.mass + b.mass;
            (b.mass / total_mass, a.mass / total_mass)
        };

        // Each side takes its factor of the full depth along its own normal
        a.position += manifold.a.normal * manifold.a.penetration * factor_a;
        b.position += manifold.b.normal * manifold.b.penetration * factor_b;

        let relative_velocity = a.velocity - b.velocity;
        let normal_velocity = -manifold.a.normal.dot(&relative_velocity);
        if normal_velocity > 0.0 {
            a.velocity += manifold.a.normal * normal_velocity * (1.0 + a.bounciness) * factor_a;
            b.velocity += manifold.b.normal * normal_velocity * (1.0 + b.bounciness) * factor_b;
        }
    }
}
