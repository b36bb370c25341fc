//! Space Invader entry point
//!
//! Runs the game against the headless host: an autopilot clicks Play and
//! flies the ship, and the outcome of each run is logged. Set `RUST_LOG=info`
//! to follow along.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use space_invader::platform::{self, FramePacer, HeadlessPlatform};
use space_invader::{App, AssetTable, Settings};

#[derive(Parser)]
#[command(name = "space-invader")]
#[command(about = "Wave-based space shooter (headless autopilot demo)")]
struct Args {
    /// JSON settings file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed of the first run; later runs use seed + 1, seed + 2, ...
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many frames (0 = no limit)
    #[arg(short, long, default_value_t = 36_000)]
    frames: u64,

    /// Stop after this many finished runs (0 = no limit)
    #[arg(short, long, default_value_t = 1)]
    runs: u32,

    /// Pace frames at the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Keep spawning waves past the final level
    #[arg(long)]
    endless: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if args.endless {
        settings.final_level = None;
    }

    let pacer = args
        .realtime
        .then(|| FramePacer::new(settings.ticks_per_second));
    let mut app = App::new(settings, AssetTable::procedural(), args.seed)
        .context("initializing game")?;
    let mut host = HeadlessPlatform::new(
        (args.frames > 0).then_some(args.frames),
        (args.runs > 0).then_some(args.runs),
    );

    log::info!(
        "Space Invader starting (seed {}, up to {} frames, {} runs)",
        args.seed,
        args.frames,
        args.runs
    );
    let frames = platform::run(&mut app, &mut host, pacer)?;

    for event in app.take_events() {
        log::debug!("{:?}", event);
    }
    match app.hud() {
        Some(hud) => log::info!(
            "Stopped mid-run: {}",
            serde_json::to_string(&hud).context("serializing HUD")?
        ),
        None => log::info!("Finished {} runs", app.runs_finished()),
    }
    log::info!("Ran {} frames", frames);

    Ok(())
}
