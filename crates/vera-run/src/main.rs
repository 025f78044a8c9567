use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    bins::{self, BinsArgs},
    plan::{self, PlanArgs},
    sweep::{self, SweepArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "vera-run",
    about = "Sweep the population synthesis simulator over galactic stellar mass"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate and plot every stellar mass bin for early- and late-type hosts.
    Sweep(SweepArgs),
    /// Print the derived per-bin masses without touching the filesystem.
    Bins(BinsArgs),
    /// Print every command a sweep would run, in order, without running it.
    Plan(PlanArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Sweep(args) => sweep::run(&args),
        Command::Bins(args) => bins::run(&args),
        Command::Plan(args) => plan::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
