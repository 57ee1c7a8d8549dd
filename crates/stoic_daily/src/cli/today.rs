//! `today` command: create the notes for a day and open the day note

use std::path::Path;

use stoic_daily_core::clock::{Clock, FixedClock, SystemClock};
use stoic_daily_core::config::Config;
use stoic_daily_core::date::parse_date;
use stoic_daily_core::journal::DailyRun;
use stoic_daily_core::workspace::Workspace;

use crate::cli::block_on;
use crate::cli::util::{build_journal, load_config, print_report};
use crate::editor::{EditorWorkspace, PrintWorkspace};

/// Handle the 'today' command
/// Returns true on success, false on error
pub fn handle_today(config_path: Option<&Path>, date: Option<String>, no_open: bool) -> bool {
    let Some(config) = load_config(config_path) else {
        return false;
    };

    let editor = EditorWorkspace::new(&config);
    let workspace: &dyn Workspace = if no_open { &PrintWorkspace } else { &editor };

    match date {
        Some(input) => match parse_date(&input) {
            // A fixed clock makes "today" the requested day
            Ok(day) => run(&config, FixedClock(day), workspace),
            Err(e) => {
                eprintln!("✗ {}", e);
                false
            }
        },
        None => run(&config, SystemClock, workspace),
    }
}

fn run<C: Clock>(config: &Config, clock: C, workspace: &dyn Workspace) -> bool {
    let journal = match build_journal(config, clock) {
        Ok(journal) => journal,
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    match block_on(journal.create_and_open_today(workspace)) {
        Ok(DailyRun::Completed(report)) => {
            print_report(&report);
            true
        }
        Ok(DailyRun::Busy) => {
            eprintln!("✗ Another run is in progress");
            false
        }
        Err(e) => {
            eprintln!("✗ Error creating today's note: {}", e);
            false
        }
    }
}
