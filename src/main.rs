use anyhow::{Context, Result};
use clap::Parser;
use myrmex_lib::model::data::AgentState;
use myrmex_lib::model::config::AppConfig;
use myrmex_lib::model::metrics::{self, BITES, FOOD_REPLACED, RETURNED, SPAWNED};
use myrmex_lib::model::world::World;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless colony foraging simulation", long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// RNG seed, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks per frame, overriding the config file
    #[arg(long)]
    speed: Option<u32>,

    /// Write the final world snapshot as JSON to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    metrics::init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(speed) = args.speed {
        config.simulation_speed = speed;
    }

    let mut world = World::new(config)?;
    tracing::info!(ticks = args.ticks, "Running headless simulation");

    while world.tick < args.ticks {
        let remaining = args.ticks - world.tick;
        if remaining < u64::from(world.config.simulation_speed) {
            world.run(remaining);
        } else if world.update() == 0 {
            tracing::warn!("Simulation is paused in the config; stopping");
            break;
        }
    }

    let snapshot = world.snapshot();
    tracing::info!(
        tick = world.tick,
        agents = world.agent_count(),
        returning = snapshot.count_in(AgentState::Returning),
        markers = world.marker_count(),
        spawned = world.metrics.counter(SPAWNED),
        returned = world.metrics.counter(RETURNED),
        bites = world.metrics.counter(BITES),
        food_replaced = world.metrics.counter(FOOD_REPLACED),
        elapsed_ms = world.metrics.elapsed().as_millis() as u64,
        "Headless simulation finished"
    );

    if let Some(path) = &args.snapshot {
        let file = File::create(path)
            .with_context(|| format!("Failed to create snapshot file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &snapshot)
            .context("Failed to write snapshot")?;
        tracing::info!(path = %path.display(), "Snapshot written");
    }

    Ok(())
}
