//! Drape CLI — headless cloth simulation and scene validation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod report;

#[derive(Parser)]
#[command(name = "drape")]
#[command(version, about = "Drape — mass-spring cloth simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a scene file.
    Simulate {
        /// Path to scene config (TOML). Missing file means default scene.
        #[arg(short, long, default_value = "scene.toml")]
        config: PathBuf,

        /// Number of rendered frames to simulate.
        #[arg(short, long, default_value_t = 240)]
        frames: u32,

        /// Write one OBJ file per frame into this folder.
        #[arg(short, long)]
        export_dir: Option<PathBuf>,

        /// Delete existing files in the export folder first.
        #[arg(long, requires = "export_dir")]
        clear: bool,

        /// Write per-frame events as JSON lines to this file.
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Validate a scene file.
    Validate {
        /// Path to scene config (TOML).
        path: PathBuf,
    },

    /// Print the default scene as TOML.
    Defaults,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            frames,
            export_dir,
            clear,
            events,
        } => commands::simulate(&commands::SimulateArgs {
            config,
            frames,
            export_dir,
            clear,
            events,
        }),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Defaults => commands::defaults(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
