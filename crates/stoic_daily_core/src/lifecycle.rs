//! When the journal runs.
//!
//! A host calls [`Lifecycle::activate`] once at startup,
//! [`Lifecycle::manual_trigger`] when the user asks for today's note, and
//! [`Lifecycle::tick`] on a timer. Ticks keep the notes current but only
//! open the day note when the day has changed since the last open.

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::fs::AsyncFileSystem;
use crate::journal::{DailyReport, DailyRun, StoicJournal};
use crate::workspace::Workspace;

/// How often a host should call [`Lifecycle::tick`] by default.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// What a periodic tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A different day note than last time; it was opened
    Opened(DailyReport),
    /// Same day note as the last one opened; nothing was opened
    Unchanged(DailyReport),
    /// A run was already in flight
    Busy,
}

/// Drives a [`StoicJournal`] from host events.
pub struct Lifecycle<FS, C = SystemClock> {
    journal: StoicJournal<FS, C>,
    refresh_interval: Duration,
    activated: AtomicBool,
    last_opened: Mutex<Option<PathBuf>>,
}

impl<FS: AsyncFileSystem, C: Clock> Lifecycle<FS, C> {
    /// Lifecycle around `journal`, ticking every [`DEFAULT_REFRESH_INTERVAL`].
    pub fn new(journal: StoicJournal<FS, C>) -> Self {
        Self {
            journal,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            activated: AtomicBool::new(false),
            last_opened: Mutex::new(None),
        }
    }

    /// Use a different tick interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Interval between ticks.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// The journal being driven.
    pub fn journal(&self) -> &StoicJournal<FS, C> {
        &self.journal
    }

    /// Startup: create and open today's note. Later calls do nothing and
    /// return `None`.
    pub async fn activate(&self, workspace: &dyn Workspace) -> Result<Option<DailyRun>> {
        if self.activated.swap(true, Ordering::AcqRel) {
            log::debug!("Already activated");
            return Ok(None);
        }
        log::info!("Activating, daily notes under {:?}", self.journal.layout().root());
        self.manual_trigger(workspace).await.map(Some)
    }

    /// User request: create and open today's note, even if it is already open.
    pub async fn manual_trigger(&self, workspace: &dyn Workspace) -> Result<DailyRun> {
        let run = self.journal.create_and_open_today(workspace).await?;
        if let DailyRun::Completed(report) = &run {
            self.remember(report);
        }
        Ok(run)
    }

    /// Timer: keep today's notes present and open the day note after a
    /// day rollover.
    pub async fn tick(&self, workspace: &dyn Workspace) -> Result<TickOutcome> {
        let report = match self.journal.ensure_today().await? {
            DailyRun::Completed(report) => report,
            DailyRun::Busy => return Ok(TickOutcome::Busy),
        };

        if self.is_last_opened(&report) {
            log::debug!("Tick: {} already open", report.note);
            return Ok(TickOutcome::Unchanged(report));
        }

        self.journal.open_note(workspace, &report.note).await?;
        self.remember(&report);
        log::info!("Opened {} for {}", report.note, report.key);
        Ok(TickOutcome::Opened(report))
    }

    fn is_last_opened(&self, report: &DailyReport) -> bool {
        let last = self.last_opened.lock().unwrap_or_else(|e| e.into_inner());
        last.as_deref() == Some(report.note.path())
    }

    fn remember(&self, report: &DailyReport) {
        let mut last = self.last_opened.lock().unwrap_or_else(|e| e.into_inner());
        *last = Some(report.note.path().to_path_buf());
    }
}
