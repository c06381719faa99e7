//! Collision shapes and contact manifolds
//!
//! Shapes are attached to bodies through shared `Arc` references and tested
//! pairwise during the narrow phase. Only the box variant carries an
//! implementation; every other pairing reports no collision.

use std::any::Any;
use std::sync::Arc;

use crate::foundation::math::Vec2;
use crate::physics::body::{Body, BodyHandle};

/// Geometric variant of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// Dimensionless point (no collision test implemented)
    Point,
    /// Axis-aligned box
    Box,
    /// Circle (no collision test implemented)
    Circle,
    /// Convex polygon (no collision test implemented)
    Polygon,
}

/// One side of a contact between two bodies
///
/// `normal` points along this side's separation direction and `offset` is the
/// contact offset from this body's center. `body` identifies this side's own
/// body and is stamped by the physics system once a test reports contact.
#[derive(Debug, Clone, Copy)]
pub struct ManifoldPoint {
    /// Handle of this side's body
    pub body: BodyHandle,
    /// Contact offset from the body center along the separation axis
    pub offset: Vec2,
    /// Unit separation normal for this side
    pub normal: Vec2,
    /// Overlap depth along the separation axis
    pub penetration: f32,
}

impl Default for ManifoldPoint {
    fn default() -> Self {
        Self {
            body: BodyHandle::default(),
            offset: Vec2::zeros(),
            normal: Vec2::new(1.0, 0.0),
            penetration: 0.0,
        }
    }
}

/// Symmetric contact result for a confirmed body pair
///
/// Both sides report the same penetration depth; the normals are exact
/// negations of one another. Manifolds are produced transiently per step and
/// never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manifold {
    /// First body's side of the contact
    pub a: ManifoldPoint,
    /// Second body's side of the contact
    pub b: ManifoldPoint,
}

/// Collision predicate attached to a body
///
/// The default `check` reports no collision, which is the behavior of every
/// unimplemented shape pairing.
pub trait Shape {
    /// Geometric variant tag, used to select the pairwise test
    fn shape_type(&self) -> ShapeType;

    /// Offset of the shape from the owning body's position
    fn center_offset(&self) -> Vec2 {
        Vec2::zeros()
    }

    /// Test this shape (on `body`) against `other_shape` (on `other_body`)
    ///
    /// Returns true and fills the manifold geometry iff the shapes overlap.
    fn check(
        &self,
        body: &Body,
        other_body: &Body,
        other_shape: &dyn Shape,
        manifold: &mut Manifold,
    ) -> bool {
        let _ = (body, other_body, other_shape, manifold);
        false
    }

    /// Downcast support for type-specific pairwise tests
    fn as_any(&self) -> &dyn Any;
}

/// Axis-aligned box shape
///
/// The effective bounds of a box on a body are
/// `body.position + offset ± half_size.component_mul(body.scale)`.
#[derive(Debug, Clone)]
pub struct BoxShape {
    /// Half extents before the body scale is applied
    pub half_size: Vec2,
    /// Offset of the box center from the body position
    pub offset: Vec2,
}

impl BoxShape {
    /// Create a box with the given half extents
    #[must_use]
    pub fn new(half_size: Vec2) -> Self {
        Self {
            half_size,
            offset: Vec2::zeros(),
        }
    }

    /// Set the offset of the box center from the body position
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Shared default unit box
    #[must_use]
    pub fn shared_default() -> Arc<dyn Shape> {
        Arc::new(Self::default())
    }
}

impl Default for BoxShape {
    fn default() -> Self {
        Self::new(Vec2::new(0.5, 0.5))
    }
}

impl Shape for BoxShape {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Box
    }

    fn center_offset(&self) -> Vec2 {
        self.offset
    }

    fn check(
        &self,
        body: &Body,
        other_body: &Body,
        other_shape: &dyn Shape,
        manifold: &mut Manifold,
    ) -> bool {
        if other_shape.shape_type() == ShapeType::Box {
            if let Some(other_box) = other_shape.as_any().downcast_ref::<Self>() {
                return check_box_box(self, body, other_box, other_body, manifold);
            }
        }
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Box versus box overlap test
///
/// Computes the four edge overlap candidates; contact holds iff all four are
/// strictly positive. The smallest candidate selects the separation axis,
/// ties broken by check order (right, left, top, bottom) on exact equality.
#[allow(clippy::float_cmp)]
fn check_box_box(
    box_a: &BoxShape,
    body_a: &Body,
    box_b: &BoxShape,
    body_b: &Body,
    manifold: &mut Manifold,
) -> bool {
    let center_a = body_a.position + box_a.offset;
    let center_b = body_b.position + box_b.offset;
    let half_a = box_a.half_size.component_mul(&body_a.scale);
    let half_b = box_b.half_size.component_mul(&body_b.scale);

    let right = center_a.x + half_a.x - (center_b.x - half_b.x);
    let left = center_b.x + half_b.x - (center_a.x - half_a.x);
    let top = center_a.y + half_a.y - (center_b.y - half_b.y);
    let bottom = center_b.y + half_b.y - (center_a.y - half_a.y);

    if right > 0.0 && left > 0.0 && top > 0.0 && bottom > 0.0 {
        let penetration = right.min(left).min(top).min(bottom);

        let (normal, dist_a, dist_b) = if penetration == right {
            (Vec2::new(-1.0, 0.0), half_a.x, half_b.x)
        } else if penetration == left {
            (Vec2::new(1.0, 0.0), half_a.x, half_b.x)
        } else if penetration == top {
            (Vec2::new(0.0, -1.0), half_a.y, half_b.y)
        } else {
            (Vec2::new(0.0, 1.0), half_a.y, half_b.y)
        };

        manifold.a.offset = normal * dist_a;
        manifold.a.normal = normal;
        manifold.a.penetration = penetration;

        manifold.b.offset = -normal * dist_b;
        manifold.b.normal = -normal;
        manifold.b.penetration = penetration;

        return true;
    }
    false
}
