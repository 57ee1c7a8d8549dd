#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Day body strategies (sections or template)
pub mod body;

/// Injectable "today"
pub mod clock;

/// Section composer and fixed month/year bodies
pub mod compose;

/// Configuration options
pub mod config;

/// Date keys and date parsing
pub mod date;

/// Error (common error types)
pub mod error;

/// Filesystem abstraction
pub mod fs;

/// Daily workflow (create and open today's note)
pub mod journal;

/// Where each period note lives
pub mod layout;

/// Quotes and practices
pub mod library;

/// Activation, manual trigger and periodic tick
pub mod lifecycle;

/// Idempotent note creation
pub mod materialize;

/// Uniform random selection
pub mod random;

/// `%TOKEN%` template expansion
pub mod template;

/// Notes and the view they open in
pub mod workspace;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::{Result, StoicError};
pub use journal::{DailyReport, DailyRun, StoicJournal};
pub use lifecycle::Lifecycle;
