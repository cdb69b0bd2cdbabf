//! CLI frontend for the Turnkeeper combat tracker.

mod commands;
mod console;
mod render;
mod roster;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tk",
    about = "Turnkeeper: initiative and turn tracking for tabletop combat",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive encounter
    Run {
        /// RNG seed for reproducible initiative rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON roster of characters to pick participants from
        #[arg(short, long)]
        roster: Option<PathBuf>,
    },

    /// List the characters in a roster file
    Roster {
        /// Path to the JSON roster
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run { seed, roster } => commands::run::run(seed, roster.as_deref()),
        Commands::Roster { file } => commands::roster::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
