//! Draft simulator CLI - batch runs of the team draft engine.
//!
//! Generates rosters, drafts them and reshuffles them the way a chat session
//! would, then reports how balanced and how varied the results were.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::Instant;

use clap::Parser;
use metrics::{build_roster_metrics, RosterMetrics, Summary};
use output::OutputWriter;
use simulator::Simulator;
use team_draft::NoveltyPolicy;
use tracing::{debug, info, warn};
use types::{Mode, OutputFormat};

#[derive(Parser)]
#[command(name = "draft-simulator")]
#[command(about = "Batch simulator for balanced three-team drafts")]
struct Args {
    /// Number of rosters to simulate
    #[arg(short, long, default_value = "100")]
    rosters: u64,

    /// Roster shape to generate
    #[arg(long, default_value = "rated")]
    mode: Mode,

    /// Reshuffles requested per roster
    #[arg(long, default_value = "5")]
    reshuffles: u32,

    /// Base seed; every roster and reshuffle derives its own seed from it
    #[arg(long)]
    seed: Option<u64>,

    /// Attempt budget per reshuffle
    #[arg(long, default_value = "80")]
    novelty_attempts: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(
        rosters = args.rosters,
        mode = ?args.mode,
        reshuffles = args.reshuffles,
        base_seed,
        "Starting draft simulator"
    );

    let simulator = Simulator::new(
        args.mode,
        args.reshuffles,
        NoveltyPolicy {
            max_attempts: args.novelty_attempts,
            ..NoveltyPolicy::default()
        },
    );
    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format)?;
    info!("Output file: {}", output_writer.path().display());

    let start = Instant::now();
    let mut results: Vec<RosterMetrics> = Vec::new();
    let mut errors = 0u64;

    for roster_no in 0..args.rosters {
        match simulator.run_roster(base_seed, roster_no) {
            Ok(run) => {
                let metrics = build_roster_metrics(&run);
                if let Err(e) = output_writer.write_roster(&metrics) {
                    warn!("Failed to write metrics for roster {}: {}", roster_no, e);
                }
                debug!(
                    roster_no,
                    best_spread = ?metrics.best_spread,
                    novel = metrics.novel_reshuffles,
                    "Roster simulated"
                );
                results.push(metrics);
            }
            Err(e) => {
                errors += 1;
                warn!("Roster {} failed: {}", roster_no, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let path = output_writer.finish()?;
    info!("Results written to: {}", path.display());

    print_summary(&Summary::from_metrics(&results), errors, elapsed, args.rosters);
    Ok(())
}

fn print_summary(summary: &Summary, errors: u64, elapsed: std::time::Duration, total: u64) {
    let fmt_points = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));

    println!("\n=== Simulation Summary ===");
    println!("Rosters completed: {}/{}", summary.rosters, total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);

    if summary.rosters == 0 {
        return;
    }

    println!("\n=== Balance ===");
    println!("Mean best spread:  {}", fmt_points(summary.mean_best_spread));
    println!("Mean naive spread: {}", fmt_points(summary.mean_naive_spread));
    println!("Worst spread seen: {}", fmt_points(summary.worst_spread));

    println!("\n=== Novelty ===");
    println!(
        "Novel reshuffles: {}/{} ({})",
        summary.novel_reshuffles,
        summary.total_reshuffles,
        summary
            .novelty_rate()
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}%"))
    );
}
