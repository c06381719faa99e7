//! Math utilities and types
//!
//! Provides the fundamental math types for 2D simulation and game logic.

pub use nalgebra::{Matrix2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2x2 matrix type
pub type Mat2 = Matrix2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_component_mul() {
        let a = Vec2::new(2.0, 3.0);
        let b = Vec2::new(4.0, 0.5);
        let c = a.component_mul(&b);
        assert_eq!(c, Vec2::new(8.0, 1.5));
    }
}
