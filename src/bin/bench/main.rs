// Arena Rewards Invariant Sweep
// Monte Carlo over random requests, seedable PRNG, JSON report per run
//
// Usage:
//   cargo run --release --bin bench                      # All scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5          # Quick mode
//   cargo run --release --bin bench -- degenerate        # Filter by name, label or category
//   cargo run --release --bin bench -- --seed 42         # Custom base seed

mod monte_carlo;
mod report;
mod scenarios;

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;

use report::*;
use scenarios::*;

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "bench", about = "Invariant sweep for the rewards calculator")]
struct Cli {
    /// Runs per scenario
    #[arg(long, default_value_t = 30)]
    runs: usize,

    /// Base seed; run i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory for the JSON report
    #[arg(long, default_value = "benchmark-results")]
    out_dir: PathBuf,

    /// Only run scenarios whose name, label or category contains this
    filter: Option<String>,
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&f_lower)
                        || s.label.to_lowercase().contains(&f_lower)
                        || s.category.to_lowercase().contains(&f_lower)
                })
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        bail!("no scenarios match filter {:?}", cli.filter);
    }

    println!("\n  Arena Rewards Invariant Sweep v{}", env!("CARGO_PKG_VERSION"));
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!(
        "  {:<32} {:>5} {:>11} {:>11} {:>11} {:>6} {:>8}",
        "Scenario", "Pass%", "PoolErr", "SplitErr", "Undistrib", "Degen", "Time"
    );
    println!("  {}", "-".repeat(92));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::with_capacity(to_run.len());

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(scenario, cli.runs, cli.seed);
        let status = if report.failures.is_empty() { "PASS" } else { "FAIL" };

        println!(
            "  {:<32} {:>4}% {:>11.2e} {:>11.2e} {:>11.4} {:>6.1} {:>6.1}ms  {}",
            report.label,
            (report.pass_rate * 100.0) as u32,
            report.pool_error.max,
            report.max_split_error.max,
            report.undistributed.mean,
            report.degenerate_count.mean,
            report.elapsed_ms,
            status,
        );
        if !report.failures.is_empty() {
            println!("      failed seeds: {:?}", report.failures);
        }

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.failures.is_empty()).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(92));
    println!(
        "  Total: {}  Passed: {}  Failed: {}  Suite time: {:.2}s\n",
        total,
        passed,
        failed,
        suite_elapsed.as_secs_f64()
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_millis()
        .to_string();

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        base_seed: cli.seed,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        scenarios: mc_reports,
    };

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    let path = cli.out_dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
