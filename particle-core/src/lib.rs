//! Point particles bouncing inside a fixed rectangle.
//!
//! [`ParticleBox`] owns the particle state and advances it one tick at a
//! time. Everything that draws the particles lives outside this crate and
//! only reads the state between ticks.

mod bounds;
mod error;
pub mod init;
mod particle;
mod particle_box;

pub use bounds::Bounds;
pub use error::ParticleError;
pub use particle::{particles_from_rows, Particle};
pub use particle_box::{BoxConfig, ParticleBox, DEFAULT_MAX_VELOCITY, DEFAULT_SIZE};

/// A 2D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        (*self - *other).magnitude()
    }

    /// Clamp each component from above. Components below `max` are left alone.
    pub fn min_components(&self, max: f64) -> Self {
        Self {
            x: self.x.min(max),
            y: self.y.min(max),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2d_new() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
    }

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(Vector2D::zero().distance(&v), 5.0);
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vector2D::new(4.0, 6.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vector2D::new(2.0, 2.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vector2D::new(2.0, 4.0));

        let mut acc = v1;
        acc += v2;
        assert_eq!(acc, sum);
    }

    #[test]
    fn test_min_components_is_upper_bound_only() {
        let v = Vector2D::new(100.0, -100.0).min_components(8.0);
        assert_eq!(v.x, 8.0);
        assert_eq!(v.y, -100.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Vector2D::new(1.0, -1.0).is_finite());
        assert!(!Vector2D::new(f64::NAN, 0.0).is_finite());
        assert!(!Vector2D::new(0.0, f64::INFINITY).is_finite());
    }
}
