//! revisit CLI: adaptive multiple-choice self-study on the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use revisit_core::Preset;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "revisit", version, about = "Adaptive multiple-choice review sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive quiz session
    Quiz {
        /// Path to a JSON question bank
        #[arg(long)]
        bank: PathBuf,

        /// Policy preset: classic, strict, paced, endless, drill
        #[arg(long)]
        preset: Option<Preset>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for the wrong-answer export
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Do not export wrong answers at session end
        #[arg(long)]
        no_export: bool,
    },

    /// Validate a question bank
    Validate {
        /// Path to a JSON question bank
        #[arg(long)]
        bank: PathBuf,
    },

    /// List the policy presets
    Presets,

    /// Create a starter config and sample question bank
    Init,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("revisit=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            bank,
            preset,
            config,
            seed,
            export_dir,
            no_export,
        } => commands::quiz::execute(bank, preset, config, seed, export_dir, no_export),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Presets => {
            commands::presets::execute();
            Ok(())
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
