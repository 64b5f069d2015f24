use serde::{Deserialize, Serialize};

/// A particle position in simulation coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The box edge a renderer draws around the particles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Outline {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Outline {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// Everything a renderer needs to draw one tick.
///
/// Snapshots are owned copies; the live state keeps changing after the
/// snapshot is taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub time_elapsed: f64,
    /// Particle radius
    pub size: f64,
    pub outline: Outline,
    pub positions: Vec<Position>,
}

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub particle_count: usize,
    /// Half the side length of the square box centred on the origin.
    pub half_extent: f64,
    /// Particle radius
    pub size: f64,
    /// Seconds per tick, used both as `dt` and as the display interval.
    pub frame_interval: f64,
    pub frames: u64,
    /// Multiplier on random initial positions.
    pub spread: f64,
    pub targeting: bool,
    pub max_velocity: f64,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            particle_count: 50,
            half_extent: 2.0,
            size: 0.04,
            frame_interval: 1.0 / 30.0,
            frames: 600,
            spread: 3.9,
            targeting: false,
            max_velocity: 8.0,
            seed: Some(5),
        }
    }
}

impl SimulationSettings {
    /// Defaults for the follow-chain variant: a larger box and a fresh seed
    /// every run.
    pub fn targeting_preset() -> Self {
        Self {
            half_extent: 2.9,
            targeting: true,
            seed: None,
            ..Self::default()
        }
    }

    /// Returns a description of the first invalid field, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.particle_count == 0 {
            return Err("particle_count must be at least 1".to_string());
        }
        if !(self.frame_interval.is_finite() && self.frame_interval > 0.0) {
            return Err(format!(
                "frame_interval must be positive, got {}",
                self.frame_interval
            ));
        }
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(format!(
                "half_extent must be positive, got {}",
                self.half_extent
            ));
        }
        if !(self.size.is_finite() && self.size >= 0.0) {
            return Err(format!("size must be non-negative, got {}", self.size));
        }
        if !self.max_velocity.is_finite() {
            return Err(format!(
                "max_velocity must be finite, got {}",
                self.max_velocity
            ));
        }
        if !self.spread.is_finite() {
            return Err(format!("spread must be finite, got {}", self.spread));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.particle_count, 50);
        assert_eq!(settings.half_extent, 2.0);
        assert_eq!(settings.frames, 600);
        assert_eq!(settings.seed, Some(5));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_targeting_preset() {
        let settings = SimulationSettings::targeting_preset();
        assert!(settings.targeting);
        assert_eq!(settings.half_extent, 2.9);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.size, 0.04);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = SimulationSettings::from_json(r#"{"particle_count": 3, "frames": 10}"#)
            .unwrap();
        assert_eq!(settings.particle_count, 3);
        assert_eq!(settings.frames, 10);
        assert_eq!(settings.size, 0.04);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = SimulationSettings::default();
        settings.particle_count = 0;
        assert!(settings.validate().is_err());

        let mut settings = SimulationSettings::default();
        settings.frame_interval = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = SimulationSettings::default();
        settings.size = -1.0;
        assert!(settings.validate().is_err());

        let mut settings = SimulationSettings::default();
        settings.max_velocity = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = FrameSnapshot {
            frame: 1,
            time_elapsed: 0.5,
            size: 0.04,
            outline: Outline {
                xmin: -2.0,
                xmax: 2.0,
                ymin: -2.0,
                ymax: 2.0,
            },
            positions: vec![Position::new(0.25, -1.0)],
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["frame"], 1);
        assert_eq!(value["outline"]["xmax"], 2.0);
        assert_eq!(value["positions"][0]["y"], -1.0);
        assert_eq!(snapshot.outline.width(), 4.0);
    }
}
