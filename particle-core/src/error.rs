//! Error types for particle box construction and stepping.

use thiserror::Error;

/// Errors raised while building or advancing a [`ParticleBox`](crate::ParticleBox).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParticleError {
    /// No particles were supplied.
    #[error("particle set is empty")]
    Empty,

    /// Particle radius is negative or not finite.
    #[error("invalid particle size: {0}")]
    InvalidSize(f64),

    /// Velocity cap is NaN or infinite.
    #[error("invalid max velocity: {0}")]
    InvalidMaxVelocity(f64),

    /// Bounds are not finite or min is not below max.
    #[error("invalid bounds [{xmin}, {xmax}, {ymin}, {ymax}]")]
    InvalidBounds {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    },

    /// The box inset by `size` on every side has no interior.
    #[error("bounds {width}x{height} cannot hold particles of size {size}")]
    BoundsTooSmall { width: f64, height: f64, size: f64 },

    /// A state row has neither 4 nor 5 columns.
    #[error("row {row} has {width} columns, expected 4 or 5")]
    RowWidth { row: usize, width: usize },

    /// Rows disagree on their column count.
    #[error("row {row} has {width} columns but row 0 has {expected}")]
    RaggedRows {
        row: usize,
        width: usize,
        expected: usize,
    },

    /// A position or velocity component is NaN or infinite.
    #[error("particle {index} has a non-finite value")]
    NonFinite { index: usize },

    /// A target id column is not a non-negative integer.
    #[error("particle {index} has invalid target id {value}")]
    InvalidTarget { index: usize, value: f64 },

    /// A target id does not name a particle in the box.
    #[error("particle {index} targets {target} but only {count} particles exist")]
    TargetOutOfRange {
        index: usize,
        target: usize,
        count: usize,
    },

    /// Some particles carry a target and others do not.
    #[error("particle {index} disagrees with particle 0 on having a target")]
    MixedTargets { index: usize },

    /// `dt` passed to `advance` is not a positive finite number.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
}
