#![doc = include_str!("../README.md")]

/// CLI module - command-line interface for stoic-daily
mod cli;

/// Editor module - opening notes in the user's editor
mod editor;

fn main() {
    cli::run_cli();
}
