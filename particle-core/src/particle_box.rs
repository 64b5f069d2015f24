use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::init::default_state;
use crate::{particles_from_rows, Bounds, Particle, ParticleError, Vector2D};

/// Default particle radius.
pub const DEFAULT_SIZE: f64 = 0.04;

/// Upper bound applied to each velocity component after steering.
pub const DEFAULT_MAX_VELOCITY: f64 = 8.0;

/// Geometry and limits for a [`ParticleBox`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConfig {
    /// Particle radius, used as the collision margin on every wall.
    pub size: f64,
    pub bounds: Bounds,
    /// Only applied in the targeting variant.
    pub max_velocity: f64,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            bounds: Bounds::default(),
            max_velocity: DEFAULT_MAX_VELOCITY,
        }
    }
}

/// A fixed set of particles confined to a rectangle.
///
/// The box keeps the initial condition untouched and mutates a working copy
/// on every [`advance`](ParticleBox::advance). When the particles carry
/// target ids, each step also pulls every particle toward its target using
/// noise drawn from `R`.
#[derive(Debug, Clone)]
pub struct ParticleBox<R = StdRng> {
    init_state: Vec<Particle>,
    state: Vec<Particle>,
    size: f64,
    bounds: Bounds,
    max_velocity: f64,
    time_elapsed: f64,
    targeting: bool,
    rng: R,
}

impl ParticleBox<StdRng> {
    /// Builds a box whose steering noise is seeded from OS entropy.
    pub fn new(init: Vec<Particle>, config: BoxConfig) -> Result<Self, ParticleError> {
        Self::with_rng(init, config, StdRng::from_entropy())
    }

    /// Builds a box from an N×4 or N×5 array.
    pub fn from_rows<Row: AsRef<[f64]>>(
        rows: &[Row],
        config: BoxConfig,
    ) -> Result<Self, ParticleError> {
        Self::new(particles_from_rows(rows)?, config)
    }
}

impl Default for ParticleBox<StdRng> {
    /// Three particles in a `[-2, 2, -2, 2]` box.
    fn default() -> Self {
        ParticleBox::assemble(default_state(), BoxConfig::default(), false, StdRng::from_entropy())
    }
}

impl<R> ParticleBox<R> {
    /// Builds a box that draws steering noise from `rng`.
    ///
    /// Either every particle has a target or none does. Nothing is built if
    /// any part of the input is invalid.
    pub fn with_rng(init: Vec<Particle>, config: BoxConfig, rng: R) -> Result<Self, ParticleError> {
        if init.is_empty() {
            return Err(ParticleError::Empty);
        }
        if !config.size.is_finite() || config.size < 0.0 {
            return Err(ParticleError::InvalidSize(config.size));
        }
        if !config.max_velocity.is_finite() {
            return Err(ParticleError::InvalidMaxVelocity(config.max_velocity));
        }
        config.bounds.validate(config.size)?;

        let count = init.len();
        let targeting = init[0].target.is_some();
        for (index, particle) in init.iter().enumerate() {
            if !particle.position.is_finite() || !particle.velocity.is_finite() {
                return Err(ParticleError::NonFinite { index });
            }
            match particle.target {
                Some(target) if target >= count => {
                    return Err(ParticleError::TargetOutOfRange {
                        index,
                        target,
                        count,
                    })
                }
                Some(_) if !targeting => return Err(ParticleError::MixedTargets { index }),
                None if targeting => return Err(ParticleError::MixedTargets { index }),
                _ => {}
            }
        }

        log::debug!(
            "particle box: {} particles, bounds {:?}, size {}, targeting {}",
            count,
            config.bounds.as_array(),
            config.size,
            targeting
        );

        Ok(Self::assemble(init, config, targeting, rng))
    }

    fn assemble(init: Vec<Particle>, config: BoxConfig, targeting: bool, rng: R) -> Self {
        Self {
            state: init.clone(),
            init_state: init,
            size: config.size,
            bounds: config.bounds,
            max_velocity: config.max_velocity,
            time_elapsed: 0.0,
            targeting,
            rng,
        }
    }

    /// The working state as of the last completed step.
    pub fn state(&self) -> &[Particle] {
        &self.state
    }

    /// The state the box was built from.
    pub fn initial_state(&self) -> &[Particle] {
        &self.init_state
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector2D> + '_ {
        self.state.iter().map(|p| p.position)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn is_targeting(&self) -> bool {
        self.targeting
    }

    /// Target id of every particle, or `None` when steering is off.
    pub fn targets(&self) -> Option<Vec<usize>> {
        if !self.targeting {
            return None;
        }
        self.state.iter().map(|p| p.target).collect()
    }

    /// The working state as an N×K array.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.state.iter().map(Particle::to_row).collect()
    }
}

impl<R: Rng> ParticleBox<R> {
    /// Steps the simulation forward by `dt` seconds.
    ///
    /// Positions are integrated with explicit Euler, then particles are
    /// visited in index order. For each one the steering pull is applied
    /// (targeting only) and the walls are resolved. A particle therefore
    /// sees the already-resolved position of any target with a lower index.
    /// With targeting on, no velocity component ends a step above
    /// `max_velocity`; there is no lower bound.
    ///
    /// `dt` must be positive and finite; otherwise the state is untouched.
    pub fn advance(&mut self, dt: f64) -> Result<(), ParticleError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ParticleError::InvalidTimeStep(dt));
        }

        self.time_elapsed += dt;

        for particle in self.state.iter_mut() {
            particle.position += particle.velocity * dt;
        }

        for index in 0..self.state.len() {
            if self.targeting {
                self.steer(index);
            }
            let particle = &mut self.state[index];
            resolve_walls(particle, &self.bounds, self.size);
            if self.targeting {
                // A reflected negative component can exceed the cap again.
                particle.velocity = particle.velocity.min_components(self.max_velocity);
            }
        }

        Ok(())
    }

    fn steer(&mut self, index: usize) {
        let Some(target) = self.state[index].target else {
            return;
        };
        let target_position = self.state[target].position;
        let noise_x: f64 = self.rng.gen();
        let noise_y: f64 = self.rng.gen();

        let particle = &mut self.state[index];
        let pull = target_position - particle.position;
        particle.velocity += Vector2D::new(pull.x * noise_x, pull.y * noise_y);
        // Upper bound only; large negative components pass through unchanged.
        particle.velocity = particle.velocity.min_components(self.max_velocity);
    }
}

/// Clamps a particle into the inset box and reflects the velocity on any
/// axis where a wall was crossed.
fn resolve_walls(particle: &mut Particle, bounds: &Bounds, size: f64) {
    // Crossing flags must come from the unclamped position.
    let crossed_x1 = particle.position.x < bounds.xmin + size;
    let crossed_x2 = particle.position.x > bounds.xmax - size;
    let crossed_y1 = particle.position.y < bounds.ymin + size;
    let crossed_y2 = particle.position.y > bounds.ymax - size;

    if crossed_x1 {
        particle.position.x = bounds.xmin + size;
    }
    if crossed_x2 {
        particle.position.x = bounds.xmax - size;
    }
    if crossed_y1 {
        particle.position.y = bounds.ymin + size;
    }
    if crossed_y2 {
        particle.position.y = bounds.ymax - size;
    }

    if crossed_x1 || crossed_x2 {
        particle.velocity.x = -particle.velocity.x;
    }
    if crossed_y1 || crossed_y2 {
        particle.velocity.y = -particle.velocity.y;
    }
}
