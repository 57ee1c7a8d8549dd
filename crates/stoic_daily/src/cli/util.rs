//! Shared utilities for CLI commands

use std::path::{Path, PathBuf};

use stoic_daily_core::clock::Clock;
use stoic_daily_core::config::Config;
use stoic_daily_core::error::Result;
use stoic_daily_core::fs::{RealFileSystem, SyncToAsyncFs};
use stoic_daily_core::journal::{DailyReport, StoicJournal};
use stoic_daily_core::materialize::Materialized;

use crate::cli::{AsyncFs, block_on};

/// Config file in use: the `--config` override or the default location
pub fn config_file(override_path: Option<&Path>) -> Option<PathBuf> {
    override_path.map(Path::to_path_buf).or_else(Config::config_path)
}

/// Load the config, falling back to defaults when no file exists
pub fn load_config(override_path: Option<&Path>) -> Option<Config> {
    let loaded = match override_path {
        Some(path) => Config::load_from_or_default_sync(RealFileSystem, path),
        None => Config::load(),
    };

    match loaded {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("✗ Error loading config: {}", e);
            eprintln!("  Fix the file or run 'stoic-daily init'");
            None
        }
    }
}

/// Persist the config where it was loaded from
pub fn save_config(config: &Config, override_path: Option<&Path>) -> Result<()> {
    match override_path {
        Some(path) => config.save_to_sync(RealFileSystem, path),
        None => config.save(),
    }
}

/// Build a journal over the real filesystem
pub fn build_journal<C: Clock>(config: &Config, clock: C) -> Result<StoicJournal<AsyncFs, C>> {
    block_on(StoicJournal::from_config(
        SyncToAsyncFs::new(RealFileSystem),
        config,
        clock,
    ))
}

/// Parse a yes/no style value
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "y" | "1" => Some(true),
        "false" | "off" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Print which period notes a run created
pub fn print_report(report: &DailyReport) {
    let created = [
        ("year", report.year),
        ("month", report.month),
        ("day", report.day),
    ];
    for (period, state) in created {
        if state == Materialized::Created {
            println!("✓ Created {} note for {}", period, report.key);
        }
    }
}
