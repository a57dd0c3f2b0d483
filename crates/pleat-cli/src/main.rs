//! Pleat CLI — fold, drape, and inspect curtains.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pleat")]
#[command(version, about = "Pleat — curtain fold deformation and soft-body drape engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold a generated curtain panel with the analytic kernel.
    Fold {
        /// Number of frames to run at 60 fps.
        #[arg(short, long, default_value_t = 300)]
        frames: u32,

        /// Segments along each edge of the panel.
        #[arg(short, long, default_value_t = 16)]
        grid: usize,

        /// Path to curtain config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Write a snapshot of the final buffer here.
        #[arg(short, long)]
        snapshot: Option<String>,
    },

    /// Drape a generated curtain panel with the soft-body solver.
    Drape {
        /// Number of frames to run at 60 fps.
        #[arg(short, long, default_value_t = 300)]
        frames: u32,

        /// Segments along each edge of the panel.
        #[arg(short, long, default_value_t = 16)]
        grid: usize,

        /// Path to curtain config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Write a snapshot of the final buffer here.
        #[arg(short, long)]
        snapshot: Option<String>,
    },

    /// Inspect a curtain snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a curtain config or a mesh.
    Validate {
        /// Path to config (.toml) or mesh (.json).
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fold { frames, grid, config, snapshot } => {
            commands::fold(frames, grid, config.as_deref(), snapshot.as_deref())
        }
        Commands::Drape { frames, grid, config, snapshot } => {
            commands::drape(frames, grid, config.as_deref(), snapshot.as_deref())
        }
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
