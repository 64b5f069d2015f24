use anyhow::{Context, Result};
use particle_shared::SimulationSettings;
use std::path::Path;

/// Values given on the command line. Each one replaces the loaded setting.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub particle_count: Option<usize>,
    pub half_extent: Option<f64>,
    pub size: Option<f64>,
    pub frames: Option<u64>,
    pub frame_interval: Option<f64>,
    pub seed: Option<u64>,
    pub spread: Option<f64>,
}

pub fn load_settings_file(path: &Path) -> Result<SimulationSettings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    SimulationSettings::from_json(&json)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}

/// Layers settings: file or preset, then the targeting switch, then overrides.
pub fn resolve_settings(
    file: Option<&Path>,
    targeting: bool,
    overrides: &SettingsOverrides,
) -> Result<SimulationSettings> {
    let mut settings = match file {
        Some(path) => load_settings_file(path)?,
        None if targeting => SimulationSettings::targeting_preset(),
        None => SimulationSettings::default(),
    };

    if targeting {
        settings.targeting = true;
    }
    if let Some(count) = overrides.particle_count {
        settings.particle_count = count;
    }
    if let Some(half_extent) = overrides.half_extent {
        settings.half_extent = half_extent;
    }
    if let Some(size) = overrides.size {
        settings.size = size;
    }
    if let Some(frames) = overrides.frames {
        settings.frames = frames;
    }
    if let Some(interval) = overrides.frame_interval {
        settings.frame_interval = interval;
    }
    if let Some(seed) = overrides.seed {
        settings.seed = Some(seed);
    }
    if let Some(spread) = overrides.spread {
        settings.spread = spread;
    }

    if let Err(reason) = settings.validate() {
        anyhow::bail!("Invalid settings: {}", reason);
    }

    Ok(settings)
}
