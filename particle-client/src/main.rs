use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use particle_client::{
    pacing_interval, resolve_settings, Driver, FrameSink, JsonLinesSink, NullSink,
    SettingsOverrides, Simulation, TerminalRenderer,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Display {
    /// ASCII animation in the terminal
    Terminal,
    /// One JSON snapshot per line on stdout
    Json,
    /// No output
    None,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Particles bouncing inside a box", long_about = None)]
struct Args {
    /// Steer every particle toward another one in a follow chain
    #[arg(short, long)]
    targeting: bool,

    /// JSON settings file; the flags below override its values
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of particles
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Half the side length of the box
    #[arg(long)]
    half_extent: Option<f64>,

    /// Particle radius
    #[arg(long)]
    size: Option<f64>,

    /// Number of frames before exiting
    #[arg(short, long)]
    frames: Option<u64>,

    /// Seconds per frame
    #[arg(short, long)]
    interval: Option<f64>,

    /// Seed for the initial condition and steering noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Multiplier on random initial positions
    #[arg(long)]
    spread: Option<f64>,

    #[arg(long, value_enum, default_value_t = Display::Terminal)]
    display: Display,

    /// Run as fast as possible instead of one frame per interval
    #[arg(long)]
    no_pacing: bool,

    /// Terminal canvas width in characters
    #[arg(long, default_value_t = 64)]
    columns: usize,

    /// Terminal canvas height in characters
    #[arg(long, default_value_t = 32)]
    rows: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let overrides = SettingsOverrides {
        particle_count: args.count,
        half_extent: args.half_extent,
        size: args.size,
        frames: args.frames,
        frame_interval: args.interval,
        seed: args.seed,
        spread: args.spread,
    };
    let settings = resolve_settings(args.settings.as_deref(), args.targeting, &overrides)?;

    log::info!("Particle box starting...");
    log::info!(
        "Particles: {}, box: ±{}, size: {}, targeting: {}",
        settings.particle_count,
        settings.half_extent,
        settings.size,
        settings.targeting
    );

    let simulation = Simulation::from_settings(&settings).context("Failed to initialize simulation")?;

    let sink: Box<dyn FrameSink> = match args.display {
        Display::Terminal => Box::new(TerminalRenderer::new(
            std::io::stdout(),
            args.columns,
            args.rows,
        )),
        Display::Json => Box::new(JsonLinesSink::new(std::io::stdout())),
        Display::None => Box::new(NullSink::default()),
    };

    let mut driver = Driver::new(simulation, sink, settings.frames);
    if !args.no_pacing {
        driver = driver.with_pacing(pacing_interval(settings.frame_interval)?);
    }

    driver.run().context("Simulation error")?;

    Ok(())
}
