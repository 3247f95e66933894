/// Demo: hammer one shared gate with concurrent workers and report the
/// admission spacing GCRA produced.
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use rand::Rng;
use tokio::task::JoinSet;
use tracing::info;

use callgate::observability::metrics;
use callgate::{AsyncRateLimiter, GateConfig};

#[derive(Parser)]
#[command(name = "demo-gate")]
#[command(about = "Issue gated calls from concurrent workers and report admission spacing")]
#[command(version = "0.1.0")]
struct Cli {
    /// Calls admitted per window
    #[arg(long, default_value_t = 5)]
    limit: u64,

    /// Window length in seconds
    #[arg(long, default_value_t = 1)]
    seconds: u64,

    /// Total gated calls to issue
    #[arg(long, default_value_t = 20)]
    calls: usize,

    /// Concurrent workers sharing the gate
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Load limit/seconds from a JSON or TOML file instead of the flags
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    callgate::logging::init_logging();
    metrics::init_metrics();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GateConfig::from_file(path)
            .with_context(|| format!("loading gate config from {}", path.display()))?,
        None => GateConfig::new(cli.limit, cli.seconds)?,
    };
    info!(limit = config.limit, seconds = config.seconds, "gate configured");

    let limiter = AsyncRateLimiter::from_config(config);
    let started = Instant::now();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let mut set = JoinSet::new();
    for worker in 0..cli.workers.max(1) {
        let limiter = limiter.clone();
        let tx = tx.clone();
        // spread the remainder across the first workers
        let calls = cli.calls / cli.workers.max(1)
            + usize::from(worker < cli.calls % cli.workers.max(1));
        set.spawn(async move {
            for _ in 0..calls {
                let jitter = rand::thread_rng().gen_range(0..10u64);
                tokio::time::sleep(Duration::from_millis(jitter)).await;
                let admitted_at = limiter.call(async { Instant::now() }).await;
                let _ = tx.send(admitted_at);
            }
        });
    }
    drop(tx);
    while set.join_next().await.is_some() {}

    let mut admissions = Vec::new();
    while let Ok(at) = rx.try_recv() {
        admissions.push(at);
    }
    admissions.sort();

    println!("\n📊 Gate results:");
    println!("   Calls admitted: {}", admissions.len());
    println!("   Elapsed: {:.3}s", started.elapsed().as_secs_f64());
    println!("   Interval: {:.3}s", config.interval().as_secs_f64());

    let spacings: Vec<f64> = admissions
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).as_secs_f64())
        .collect();
    if !spacings.is_empty() {
        let min = spacings.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = spacings.iter().cloned().fold(0.0_f64, f64::max);
        println!("   Spacing min/max: {:.3}s / {:.3}s", min, max);
    }

    if let Some(report) = metrics::render() {
        println!("\n{}", report);
    }
    Ok(())
}
