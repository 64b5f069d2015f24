use crate::{ParticleError, Vector2D};

/// A single particle: one row of the state array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Index of the particle this one steers toward, if steering is enabled.
    pub target: Option<usize>,
}

impl Particle {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            target: None,
        }
    }

    pub fn with_target(position: Vector2D, velocity: Vector2D, target: usize) -> Self {
        Self {
            position,
            velocity,
            target: Some(target),
        }
    }

    /// Parses `[x, y, vx, vy]` or `[x, y, vx, vy, target_id]`.
    ///
    /// `index` is only used to label errors.
    pub fn from_row(index: usize, row: &[f64]) -> Result<Self, ParticleError> {
        let (x, y, vx, vy) = match *row {
            [x, y, vx, vy] | [x, y, vx, vy, _] => (x, y, vx, vy),
            _ => {
                return Err(ParticleError::RowWidth {
                    row: index,
                    width: row.len(),
                })
            }
        };

        let position = Vector2D::new(x, y);
        let velocity = Vector2D::new(vx, vy);
        if !position.is_finite() || !velocity.is_finite() {
            return Err(ParticleError::NonFinite { index });
        }

        let target = match row.get(4) {
            Some(&value) => {
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
                    return Err(ParticleError::InvalidTarget { index, value });
                }
                Some(value as usize)
            }
            None => None,
        };

        Ok(Self {
            position,
            velocity,
            target,
        })
    }

    /// The row layout accepted by [`Particle::from_row`].
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = vec![
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
        ];
        if let Some(target) = self.target {
            row.push(target as f64);
        }
        row
    }
}

/// Converts an N×K array (K = 4 or 5) into particles.
///
/// All rows must share the width of the first row.
pub fn particles_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Particle>, ParticleError> {
    let expected = match rows.first() {
        Some(first) => first.as_ref().len(),
        None => return Err(ParticleError::Empty),
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row = row.as_ref();
            if row.len() != expected && index > 0 {
                return Err(ParticleError::RaggedRows {
                    row: index,
                    width: row.len(),
                    expected,
                });
            }
            Particle::from_row(index, row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_basic() {
        let p = Particle::from_row(0, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(p.position, Vector2D::new(1.0, 2.0));
        assert_eq!(p.velocity, Vector2D::new(3.0, 4.0));
        assert_eq!(p.target, None);
    }

    #[test]
    fn test_from_row_with_target() {
        let p = Particle::from_row(0, &[0.0, 0.0, 0.0, 0.0, 3.0]).unwrap();
        assert_eq!(p.target, Some(3));
        assert_eq!(p.to_row(), vec![0.0, 0.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_from_row_rejects_wrong_width() {
        let err = Particle::from_row(2, &[0.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(err, ParticleError::RowWidth { row: 2, width: 3 });
    }

    #[test]
    fn test_from_row_rejects_nan() {
        let err = Particle::from_row(1, &[0.0, f64::NAN, 0.0, 0.0]).unwrap_err();
        assert_eq!(err, ParticleError::NonFinite { index: 1 });
    }

    #[test]
    fn test_from_row_rejects_fractional_target() {
        let err = Particle::from_row(0, &[0.0, 0.0, 0.0, 0.0, 1.5]).unwrap_err();
        assert!(matches!(err, ParticleError::InvalidTarget { index: 0, .. }));

        let err = Particle::from_row(0, &[0.0, 0.0, 0.0, 0.0, -1.0]).unwrap_err();
        assert!(matches!(err, ParticleError::InvalidTarget { .. }));
    }

    #[test]
    fn test_particles_from_rows_rejects_ragged() {
        let rows = vec![vec![0.0; 4], vec![0.0; 5]];
        let err = particles_from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            ParticleError::RaggedRows {
                row: 1,
                width: 5,
                expected: 4
            }
        );
    }

    #[test]
    fn test_particles_from_rows_empty() {
        let rows: Vec<[f64; 4]> = Vec::new();
        assert_eq!(particles_from_rows(&rows), Err(ParticleError::Empty));
    }

    #[test]
    fn test_particles_from_rows_fixed_arrays() {
        let rows = [[1.0, 0.0, 0.0, -1.0], [-0.5, 0.5, 0.5, 0.5]];
        let particles = particles_from_rows(&rows).unwrap();
        assert_eq!(particles.len(), 2);
        assert_eq!(particles[1].velocity, Vector2D::new(0.5, 0.5));
    }
}
