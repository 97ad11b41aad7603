//! Generates a square of plats around the origin and reports what was built.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pc_plats::{CityGenerator, WorldSettings};

mod report;
mod worker;

use self::worker::{ChunkTask, ChunkWorker};

#[derive(Parser)]
#[command(name = "plat_city", about = "Deterministic procedural city generator")]
struct Args {
    /// A RON file with the world settings. Missing fields keep their default value.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The world seed. Overrides the seed of the configuration file.
    ///
    /// When neither is provided, a seed is picked at random.
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many plats to generate in each direction around the origin.
    #[arg(short, long, default_value_t = 4)]
    radius: i32,

    /// The number of worker threads. Defaults to the available parallelism.
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => WorldSettings::load(path)
            .with_context(|| format!("failed to load settings from `{}`", path.display()))?,
        None => WorldSettings {
            seed: pc_rng::system::entropy(),
            ..WorldSettings::default()
        },
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    anyhow::ensure!(args.radius >= 0, "radius must not be negative");

    log::info!("generating with seed {}", settings.seed);
    let generator = Arc::new(CityGenerator::new(settings).context("invalid world settings")?);

    let worker_count = match args.workers {
        Some(n) => n.max(1),
        None => std::thread::available_parallelism().map_or(1, |n| n.get()),
    };
    let pool = pc_workers::start((0..worker_count).map(|_| ChunkWorker::new(generator.clone())))
        .context("failed to start the worker threads")?;
    log::debug!("started {} workers", pool.worker_count());

    let r = args.radius;
    let tasks: Vec<(ChunkTask, i32)> = (-r..=r)
        .flat_map(|x| (-r..=r).map(move |z| ChunkTask { x, z }))
        .map(|task| {
            // Plats near the origin first.
            let priority = -(task.x.abs() + task.z.abs());
            (task, priority)
        })
        .collect();
    let expected = tasks.len();
    pool.submit_batch(tasks);

    let mut results = Vec::with_capacity(expected);
    while results.len() < expected {
        results.extend(pool.wait_results(expected - results.len()));
    }
    pool.join();

    let mut report = report::Report::default();
    for result in results {
        let plat = result
            .outcome
            .with_context(|| format!("failed to produce plat {:?}", result.pos))?;
        report.add(plat);
    }

    report::log_map(generator.map(), r);
    report.log_summary();

    Ok(())
}
