//! CLI frontend for the Patina weathering and fluid generator engine.

mod commands;
mod telemetry;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "patina",
    about = "Patina: rusting iron and fluid generators on a block grid",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON scenario and report what changed
    Simulate {
        /// Scenario file
        scenario: PathBuf,

        /// Override the number of ticks to run
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Override the RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print every event
        #[arg(short, long)]
        verbose: bool,

        /// Print the event log as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Write the final world layout as JSON to this file
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Validate a JSON array of fluid generator records
    Check {
        /// Generator file
        file: PathBuf,
    },

    /// List the registered fluid generator kinds
    Generators,
}

fn main() {
    telemetry::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scenario,
            ticks,
            seed,
            verbose,
            json,
            save,
        } => commands::simulate::run(
            &scenario,
            commands::simulate::Overrides { ticks, seed },
            commands::simulate::Output {
                verbose,
                json,
                save,
            },
        ),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Generators => commands::generators::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
