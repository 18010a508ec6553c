use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use wallsync::{load_config, SyncOptions, SyncPipeline, SyncReport};

#[derive(Parser)]
#[command(
    name = "wallsync",
    version,
    about = "Reconcile the wallpaper directory, database and manifest"
)]
struct Cli {
    /// Path to the run configuration file
    #[arg(default_value = "wallsync.json")]
    config: PathBuf,

    /// Regenerate the manifest from the database even if the current one parses
    #[arg(long)]
    full_rebuild: bool,

    /// Generate the SQL script without inserting the new rows into the database
    #[arg(long)]
    script_only: bool,
}

fn init_logging() {
    if tracing_log::LogTracer::init().is_err() {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: &Cli) -> wallsync::Result<SyncReport> {
    let config = load_config(&cli.config)?;
    let options = SyncOptions {
        force_full_rebuild: cli.full_rebuild,
        apply_inserts: config.apply_inserts && !cli.script_only,
    };
    let pipeline = SyncPipeline::from_config(config)?;
    pipeline.run(&options)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Sync failed: {}", e);
            eprintln!("Sync failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
