//! Space Monkey entry point
//!
//! Headless demo: runs the scene in idle mode for a fixed span of simulated
//! time and prints a JSON summary of every run.

use std::path::PathBuf;

use clap::Parser;

use space_monkey::consts::SIM_DT;
use space_monkey::fx::LogSink;
use space_monkey::sim::GamePhase;
use space_monkey::{Scene, Settings, Tuning};

#[derive(Parser)]
#[command(name = "space-monkey")]
#[command(about = "Run Space Monkey in idle mode and print run summaries as JSON")]
struct Args {
    /// Simulated seconds to run
    #[arg(default_value_t = 120.0)]
    seconds: f32,

    /// Tuning overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Player settings (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed (defaults to the system clock)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load_or_default)
        .unwrap_or_default();
    let settings = args
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Running {:.1}s of idle play with seed {}", args.seconds, seed);

    let mut scene = Scene::new(tuning, settings, LogSink, seed);
    scene.set_idle_mode(true);

    let frames = (args.seconds.max(0.0) / SIM_DT).ceil() as u64;
    let mut summaries = Vec::new();
    for _ in 0..frames {
        scene.update(SIM_DT);
        if scene.state().phase() == GamePhase::GameOver {
            summaries.push(scene.summary());
            scene.restart();
        }
    }
    summaries.push(scene.summary());

    match serde_json::to_string_pretty(&summaries) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize summary: {}", err),
    }
}
