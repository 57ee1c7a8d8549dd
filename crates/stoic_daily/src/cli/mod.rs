/// Clap argument definitions
mod args;

/// Config command handlers
mod config;

/// Template management
mod template;

/// `today` command
mod today;

/// Shared CLI utilities
mod util;

/// `watch` command (periodic refresh)
mod watch;

use clap::Parser;
use std::path::PathBuf;

use stoic_daily_core::config::Config;
use stoic_daily_core::fs::{AsyncFileSystem, RealFileSystem, SyncToAsyncFs};

/// Type alias for the async filesystem used throughout the CLI.
/// Wraps RealFileSystem with SyncToAsyncFs for use with async-first core APIs.
pub type AsyncFs = SyncToAsyncFs<RealFileSystem>;

/// Helper to run async operations in sync context
fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures_lite::future::block_on(f)
}

pub use args::Cli;
use args::Commands;

/// Main entry point for the CLI
pub fn run_cli() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    // Execute commands and track success
    let success = match cli.command {
        Commands::Init { vault, root_folder } => handle_init(config_path, vault, root_folder),

        Commands::Today { date, no_open } => today::handle_today(config_path, date, no_open),

        Commands::Watch { interval, no_open } => {
            watch::handle_watch(config_path, interval, no_open)
        }

        Commands::Config { command } => config::handle_config_command(command, config_path),

        Commands::Template { command } => template::handle_template_command(command, config_path),
    };

    if !success {
        std::process::exit(1);
    }
}

/// env_logger at warn by default, info with -v, debug with -vv; RUST_LOG wins
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Handle the init command
/// Returns true on success, false on error
fn handle_init(
    config_path: Option<&std::path::Path>,
    vault: Option<PathBuf>,
    root_folder: Option<String>,
) -> bool {
    let config = match Config::init(vault, root_folder, config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Error initializing config: {}", e);
            return false;
        }
    };

    let fs = SyncToAsyncFs::new(RealFileSystem);
    let root = config.root_dir();
    if let Err(e) = block_on(fs.create_dir_all(&root)) {
        eprintln!("✗ Error creating notes folder '{}': {}", root.display(), e);
        return false;
    }

    println!("✓ Initialized stoic-daily");
    if let Some(path) = util::config_file(config_path) {
        println!("  Config: {}", path.display());
    }
    println!("  Notes folder: {}", root.display());
    println!();
    println!("Run 'stoic-daily today' to create today's note.");
    true
}
