use anyhow::{Context, Result};
use particle_core::init::{random_state, random_targeting_state};
use particle_core::{Bounds, BoxConfig, ParticleBox};
use particle_shared::{FrameSnapshot, Outline, Position, SimulationSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

use crate::render::FrameSink;

/// The simulation context owned by the tick loop.
pub struct Simulation {
    particles: ParticleBox<StdRng>,
    dt: f64,
    frame: u64,
}

impl Simulation {
    pub fn new(particles: ParticleBox<StdRng>, dt: f64) -> Self {
        Self {
            particles,
            dt,
            frame: 0,
        }
    }

    /// Builds a random initial condition from `settings`.
    pub fn from_settings(settings: &SimulationSettings) -> Result<Self> {
        settings
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid simulation settings")?;

        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let init = if settings.targeting {
            random_targeting_state(settings.particle_count, settings.spread, &mut rng)
        } else {
            random_state(settings.particle_count, settings.spread, &mut rng)
        };
        let init = init.context("Failed to generate initial state")?;

        let config = BoxConfig {
            size: settings.size,
            bounds: Bounds::square(settings.half_extent),
            max_velocity: settings.max_velocity,
        };
        let particles =
            ParticleBox::with_rng(init, config, rng).context("Failed to build particle box")?;

        Ok(Self::new(particles, settings.frame_interval))
    }

    /// Advances one tick and returns a snapshot of the result.
    pub fn tick(&mut self) -> Result<FrameSnapshot> {
        self.particles
            .advance(self.dt)
            .with_context(|| format!("Failed to advance frame {}", self.frame + 1))?;
        self.frame += 1;
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let bounds = self.particles.bounds();
        FrameSnapshot {
            frame: self.frame,
            time_elapsed: self.particles.time_elapsed(),
            size: self.particles.size(),
            outline: Outline {
                xmin: bounds.xmin,
                xmax: bounds.xmax,
                ymin: bounds.ymin,
                ymax: bounds.ymax,
            },
            positions: self
                .particles
                .positions()
                .map(|p| Position::new(p.x, p.y))
                .collect(),
        }
    }

    pub fn particles(&self) -> &ParticleBox<StdRng> {
        &self.particles
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// Wall-clock time per tick for a `frame_interval` given in seconds.
pub fn pacing_interval(frame_interval: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(frame_interval)
        .with_context(|| format!("Frame interval {}s cannot be used for pacing", frame_interval))
}

/// Runs a [`Simulation`] for a fixed number of frames, handing each tick to a sink.
pub struct Driver<S: FrameSink> {
    simulation: Simulation,
    sink: S,
    frames: u64,
    pacing: Option<Duration>,
}

impl<S: FrameSink> Driver<S> {
    pub fn new(simulation: Simulation, sink: S, frames: u64) -> Self {
        Self {
            simulation,
            sink,
            frames,
            pacing: None,
        }
    }

    /// Sleep between ticks so each one takes at least `interval`.
    pub fn with_pacing(mut self, interval: Duration) -> Self {
        self.pacing = Some(interval);
        self
    }

    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "Starting tick loop: {} particles, {} frames",
            self.simulation.particles().len(),
            self.frames
        );

        let mut frame_count = 0;
        let mut last_fps_time = Instant::now();

        for _ in 0..self.frames {
            let tick_start = Instant::now();

            // The step has fully completed before the sink sees it.
            let snapshot = self.simulation.tick()?;
            self.sink
                .render(&snapshot)
                .with_context(|| format!("Failed to render frame {}", snapshot.frame))?;

            frame_count += 1;
            if last_fps_time.elapsed().as_secs() >= 1 {
                let fps = frame_count as f64 / last_fps_time.elapsed().as_secs_f64();
                log::debug!("FPS: {:.1}", fps);
                frame_count = 0;
                last_fps_time = Instant::now();
            }

            if let Some(interval) = self.pacing {
                let elapsed = tick_start.elapsed();
                if elapsed < interval {
                    std::thread::sleep(interval - elapsed);
                }
            }
        }

        self.sink.finish().context("Failed to finish rendering")?;

        log::info!(
            "Finished after {} frames ({:.2}s simulated)",
            self.simulation.frame(),
            self.simulation.particles().time_elapsed()
        );
        Ok(())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
