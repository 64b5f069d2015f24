//! Initial conditions for a [`ParticleBox`](crate::ParticleBox).
//!
//! Every random helper takes the generator explicitly so callers can pin a
//! seed for reproducible runs.

use rand::Rng;

use crate::{Particle, ParticleError, Vector2D};

/// Default multiplier applied to random positions.
pub const DEFAULT_SPREAD: f64 = 3.9;

/// The fixed three-particle configuration used when no state is given.
pub fn default_state() -> Vec<Particle> {
    vec![
        Particle::new(Vector2D::new(1.0, 0.0), Vector2D::new(0.0, -1.0)),
        Particle::new(Vector2D::new(-0.5, 0.5), Vector2D::new(0.5, 0.5)),
        Particle::new(Vector2D::new(-0.5, -0.5), Vector2D::new(-0.5, 0.5)),
    ]
}

/// `count` particles with every attribute drawn from `[-0.5, 0.5)`, positions
/// then scaled by `spread`.
pub fn random_state<R: Rng>(
    count: usize,
    spread: f64,
    rng: &mut R,
) -> Result<Vec<Particle>, ParticleError> {
    if count == 0 {
        return Err(ParticleError::Empty);
    }

    let particles = (0..count)
        .map(|_| {
            let position = Vector2D::new(
                -0.5 + rng.gen::<f64>(),
                -0.5 + rng.gen::<f64>(),
            ) * spread;
            let velocity = Vector2D::new(-0.5 + rng.gen::<f64>(), -0.5 + rng.gen::<f64>());
            Particle::new(position, velocity)
        })
        .collect();

    Ok(particles)
}

/// Builds a follow chain over `count` particles.
///
/// Ids are drawn at random without replacement and each drawn particle
/// targets the next one drawn; the last one drawn targets the first. The
/// result is a single cycle, so every id is targeted exactly once.
pub fn chain_targets<R: Rng>(
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, ParticleError> {
    if count == 0 {
        return Err(ParticleError::Empty);
    }

    let mut unused: Vec<usize> = (0..count).collect();
    let mut order = Vec::with_capacity(count);
    while !unused.is_empty() {
        let pick = rng.gen_range(0..unused.len());
        order.push(unused.swap_remove(pick));
    }

    let mut targets = vec![0; count];
    for (k, &id) in order.iter().enumerate() {
        targets[id] = order[(k + 1) % count];
    }

    Ok(targets)
}

/// [`random_state`] with a follow chain from [`chain_targets`].
pub fn random_targeting_state<R: Rng>(
    count: usize,
    spread: f64,
    rng: &mut R,
) -> Result<Vec<Particle>, ParticleError> {
    let mut particles = random_state(count, spread, rng)?;
    let targets = chain_targets(count, rng)?;

    for (index, (particle, target)) in particles.iter_mut().zip(targets).enumerate() {
        log::info!("particle {} targets {}", index, target);
        particle.target = Some(target);
    }

    Ok(particles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_state_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        let particles = random_state(50, DEFAULT_SPREAD, &mut rng).unwrap();

        assert_eq!(particles.len(), 50);
        for p in &particles {
            assert!(p.position.x >= -1.95 && p.position.x <= 1.95);
            assert!(p.position.y >= -1.95 && p.position.y <= 1.95);
            assert!(p.velocity.x >= -0.5 && p.velocity.x < 0.5);
            assert!(p.velocity.y >= -0.5 && p.velocity.y < 0.5);
            assert_eq!(p.target, None);
        }
    }

    #[test]
    fn test_random_state_is_reproducible() {
        let a = random_state(10, 1.0, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = random_state(10, 1.0, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_state_rejects_zero_count() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_state(0, 1.0, &mut rng), Err(ParticleError::Empty));
        assert_eq!(chain_targets(0, &mut rng), Err(ParticleError::Empty));
    }

    #[test]
    fn test_chain_targets_is_single_cycle() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [1, 2, 3, 17, 50] {
            let targets = chain_targets(count, &mut rng).unwrap();

            let mut seen = vec![false; count];
            for &t in &targets {
                assert!(!seen[t], "target {} referenced twice", t);
                seen[t] = true;
            }

            // Following targets from 0 visits every particle before returning.
            let mut current = 0;
            for step in 1..=count {
                current = targets[current];
                if current == 0 {
                    assert_eq!(step, count);
                }
            }
            assert_eq!(current, 0);
        }
    }

    #[test]
    fn test_single_particle_targets_itself() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(chain_targets(1, &mut rng).unwrap(), vec![0]);
    }

    #[test]
    fn test_random_targeting_state_assigns_targets() {
        let mut rng = StdRng::seed_from_u64(3);
        let particles = random_targeting_state(8, DEFAULT_SPREAD, &mut rng).unwrap();
        assert!(particles.iter().all(|p| p.target.is_some_and(|t| t < 8)));
    }
}
