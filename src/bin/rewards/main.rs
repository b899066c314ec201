//! Arena Rewards CLI
//!
//! Computes the reward allocation for a request file (or the calculator's
//! reference input) and prints it as a table or JSON.

mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use arena_rewards::conservation::audit;
use arena_rewards::payout::build_payouts;
use arena_rewards::report::report_rows;
use arena_rewards::{compute_checked, validate, CalculatorConfig, ComputeRequest};

/// Arena Rewards - node/validator reward allocation calculator
#[derive(Parser)]
#[command(name = "rewards")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Calculator config file (JSON); defaults apply when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the allocation for a request
    Compute {
        /// Request file (JSON); the reference input when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Refuse to compute when a tier's scores do not sum to 1
        #[arg(long)]
        strict: bool,

        /// Print the allocation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the pre-flight checks only
    Validate {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Fixed-point payout ledger
    Payout {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Decimal places (overrides the config)
        #[arg(short, long)]
        decimals: Option<u32>,

        #[arg(long)]
        json: bool,
    },

    /// Print the reference input as JSON
    Reference,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "arena_rewards=debug,rewards=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_request(config: &CalculatorConfig, input: Option<&Path>) -> Result<ComputeRequest> {
    match input {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let request = config
                .parse_request(&json)
                .with_context(|| format!("parsing {}", path.display()))?;
            info!(
                path = %path.display(),
                nodes = request.node_tier.len(),
                validators = request.validator_tier.len(),
                "loaded request"
            );
            Ok(request)
        }
        None => Ok(ComputeRequest::reference()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load_from(path).with_context(|| format!("loading {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    match cli.command {
        Commands::Compute { input, strict, json } => {
            config.strict_scores |= strict;
            let request = load_request(&config, input.as_deref())?;
            let allocation = compute_checked(&request, &config)?;
            let conservation = audit(&request, &allocation);
            if json {
                println!("{}", serde_json::to_string_pretty(&allocation)?);
            } else {
                output::print_allocation(&allocation, &report_rows(&request, &allocation), &conservation);
            }
        }
        Commands::Validate { input } => {
            let request = load_request(&config, input.as_deref())?;
            let report = validate(&request, &config);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_ok() {
                bail!("request failed validation");
            }
        }
        Commands::Payout { input, decimals, json } => {
            let request = load_request(&config, input.as_deref())?;
            let allocation = compute_checked(&request, &config)?;
            let ledger = build_payouts(&request, &allocation, decimals.unwrap_or(config.payout_decimals));
            ledger.verify()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ledger)?);
            } else {
                output::print_ledger(&ledger);
            }
        }
        Commands::Reference => {
            println!("{}", serde_json::to_string_pretty(&ComputeRequest::reference())?);
        }
    }

    Ok(())
}
