//! Command-line argument structures and enums

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stoic-daily")]
#[command(version)]
#[command(about = "Daily, monthly and yearly journal notes with Stoic quotes and practices", long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize stoic-daily configuration and the notes folder
    Init {
        /// Vault directory that holds the notes folder (default: ~/notes)
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Name of the notes folder inside the vault (default: stoic-daily)
        #[arg(long)]
        root_folder: Option<String>,
    },

    /// Create today's notes and open the day note in your editor
    #[command(alias = "t")]
    Today {
        /// Day to create instead of today (e.g., "2024-01-15", "yesterday", "last friday")
        #[arg(short, long)]
        date: Option<String>,

        /// Only create the notes, print the day note path
        #[arg(long)]
        no_open: bool,
    },

    /// Keep today's notes present; press Enter to open today's note
    Watch {
        /// Seconds between checks (default: refresh_interval_secs from config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Never launch the editor, print note paths instead
        #[arg(long)]
        no_open: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Manage the day note template
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the full configuration
    Show,

    /// List the section toggles with their values
    Toggles,

    /// Turn a section on or off (e.g., `set show_quote false`)
    Set {
        /// Toggle name: show_quote, show_morning_note, show_evening_note, show_practice
        toggle: String,

        /// true/false (also on/off, yes/no)
        value: String,
    },

    /// Show or set how day notes are built
    Style {
        /// "sections" or "template" (omit to show the current style)
        style: Option<String>,
    },

    /// Print the config file path
    Path,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Print the day template (the built-in one if no file exists)
    Show,

    /// Write the built-in template to the template file, if it does not exist yet
    Init,

    /// Open the template file in your editor
    Edit,

    /// List the tokens a template can use
    Tokens,

    /// Render the template for a day without writing anything
    Render {
        /// Day to render (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
}
