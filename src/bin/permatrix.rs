//! Command-line driver: generate rotation orbits for a list of matrix sizes
//! and print a summary for each.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use permatrix::batch::{self, OrderReport};
use permatrix::{MAX_KEYED_ORDER, Mode, OrbitRegistry, is_keyable};

const ORDER_HELP: &str = "\
Matrix size format:
  6        1 matrix:   6x6
  2,3,6    3 matrices: 2x2, 3x3, 6x6
  4-7      4 matrices: 4x4, 5x5, 6x6, 7x7
  2,4-7,9  6 matrices: 2x2, 4x4, 5x5, 6x6, 7x7, 9x9";

#[derive(Debug, Parser)]
#[command(
    name = "permatrix",
    version,
    about = "Count permutation matrices up to 90-degree rotation",
    after_help = ORDER_HELP
)]
struct Cli {
    /// Matrix sizes to generate
    #[arg(required = true, value_name = "SIZES")]
    orders: Vec<String>,

    /// Keep every permutation instead of one per rotation orbit
    #[arg(short, long)]
    full: bool,

    /// Also report how many representatives have sole or dispersed imprints
    #[arg(short, long)]
    imprint: bool,

    /// Log progress (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let parsed = batch::parse_orders(&cli.orders.join(","));
    for warning in &parsed.warnings {
        tracing::warn!("{warning}");
    }
    if parsed.ranges.is_empty() {
        Cli::command()
            .error(ErrorKind::InvalidValue, "no valid matrix size given")
            .exit();
    }
    if let Some(order) = parsed.orders().find(|&order| !is_keyable(order)) {
        Cli::command()
            .error(
                ErrorKind::ValueValidation,
                format!("matrix size {order} is outside the supported range 1..={MAX_KEYED_ORDER}"),
            )
            .exit();
    }

    let mode = if cli.full { Mode::Full } else { Mode::Unique };
    let started = Instant::now();
    for order in parsed.orders() {
        let registry = OrbitRegistry::generate(order, mode)
            .with_context(|| format!("generating {order}x{order} matrices"))?;
        print!("{}", OrderReport::from_registry(&registry, cli.imprint));
    }
    println!("Elapsed (milli-second): {}", started.elapsed().as_millis());
    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match verbose {
        _ if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("permatrix={level}")));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
