//! Tick loop and renderers for the particle box simulation.

pub mod render;
pub mod settings;
pub mod simulation;

pub use render::{FrameSink, JsonLinesSink, NullSink, TerminalRenderer};
pub use settings::{load_settings_file, resolve_settings, SettingsOverrides};
pub use simulation::{pacing_interval, Driver, Simulation};
