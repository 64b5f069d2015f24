use crate::{ParticleError, Vector2D};

/// The fixed rectangle particles are confined to, `[xmin, xmax, ymin, ymax]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Bounds {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// A box centred on the origin, `[-h, h, -h, h]`.
    pub fn square(half_extent: f64) -> Self {
        Self::new(-half_extent, half_extent, -half_extent, half_extent)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.xmin, self.xmax, self.ymin, self.ymax]
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether `point` lies in the closed box shrunk by `inset` on every side.
    pub fn contains(&self, point: Vector2D, inset: f64) -> bool {
        point.x >= self.xmin + inset
            && point.x <= self.xmax - inset
            && point.y >= self.ymin + inset
            && point.y <= self.ymax - inset
    }

    /// Checks the bounds are usable for particles of radius `size`.
    pub(crate) fn validate(&self, size: f64) -> Result<(), ParticleError> {
        let finite = self.as_array().iter().all(|v| v.is_finite());
        if !finite || self.xmin >= self.xmax || self.ymin >= self.ymax {
            return Err(ParticleError::InvalidBounds {
                xmin: self.xmin,
                xmax: self.xmax,
                ymin: self.ymin,
                ymax: self.ymax,
            });
        }

        if self.width() < 2.0 * size || self.height() < 2.0 * size {
            return Err(ParticleError::BoundsTooSmall {
                width: self.width(),
                height: self.height(),
                size,
            });
        }

        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::square(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_bounds() {
        let b = Bounds::square(2.9);
        assert_eq!(b.as_array(), [-2.9, 2.9, -2.9, 2.9]);
        assert_eq!(b.width(), 5.8);
        assert_eq!(b.height(), 5.8);
    }

    #[test]
    fn test_contains_respects_inset() {
        let b = Bounds::square(1.0);
        assert!(b.contains(Vector2D::new(0.9, -0.9), 0.1));
        assert!(!b.contains(Vector2D::new(0.95, 0.0), 0.1));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let b = Bounds::new(1.0, -1.0, -1.0, 1.0);
        assert!(matches!(
            b.validate(0.0),
            Err(ParticleError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_bounds() {
        let b = Bounds::new(-1.0, f64::INFINITY, -1.0, 1.0);
        assert!(matches!(
            b.validate(0.0),
            Err(ParticleError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_box_smaller_than_particle() {
        let b = Bounds::new(-1.0, 1.0, -0.05, 0.05);
        assert!(matches!(
            b.validate(0.1),
            Err(ParticleError::BoundsTooSmall { .. })
        ));
        assert!(b.validate(0.05).is_ok());
    }
}
