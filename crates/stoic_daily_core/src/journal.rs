//! Create today's notes and open the day note.
//!
//! [`StoicJournal`] walks the period chain year -> month -> day through the
//! [`NoteMaterializer`], builds the day body only when the day note is
//! missing, and hands the result to a [`Workspace`]. At most one run is in
//! flight at a time; overlapping calls return [`DailyRun::Busy`].

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;

use crate::body::{BodyStyle, DayContext, NoteBodyBuilder};
use crate::clock::{Clock, SystemClock};
use crate::compose;
use crate::config::Config;
use crate::date::DateKey;
use crate::error::{Result, StoicError};
use crate::fs::AsyncFileSystem;
use crate::layout::{NoteLayout, NotePeriod};
use crate::library::Library;
use crate::materialize::{Materialized, NoteMaterializer};
use crate::random::RandomSelector;
use crate::workspace::{Note, Workspace};

/// What one run did to each period note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    /// The day the run was for
    pub key: DateKey,
    /// Year note outcome
    pub year: Materialized,
    /// Month note outcome
    pub month: Materialized,
    /// Day note outcome
    pub day: Materialized,
    /// The day note
    pub note: Note,
}

/// Outcome of a journal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyRun {
    /// The run finished
    Completed(DailyReport),
    /// Another run was in flight; nothing was touched
    Busy,
}

impl DailyRun {
    /// The report, unless the run was skipped.
    pub fn report(&self) -> Option<&DailyReport> {
        match self {
            DailyRun::Completed(report) => Some(report),
            DailyRun::Busy => None,
        }
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The daily note workflow over injected storage and clock.
pub struct StoicJournal<FS, C = SystemClock> {
    materializer: NoteMaterializer<FS>,
    layout: NoteLayout,
    clock: C,
    library: Library,
    selector: RandomSelector,
    builder: Box<dyn NoteBodyBuilder>,
    in_flight: AtomicBool,
}

impl<FS: AsyncFileSystem, C: Clock> StoicJournal<FS, C> {
    /// Journal writing under `layout` with the given body builder.
    pub fn new(
        fs: FS,
        layout: NoteLayout,
        clock: C,
        library: Library,
        builder: Box<dyn NoteBodyBuilder>,
    ) -> Self {
        Self {
            materializer: NoteMaterializer::new(fs, layout.root()),
            layout,
            clock,
            library,
            selector: RandomSelector::from_entropy(),
            builder,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Journal set up from `config`: layout, body style and library overrides.
    pub async fn from_config(fs: FS, config: &Config, clock: C) -> Result<Self> {
        let library = match &config.library_dir {
            Some(dir) => Library::load_with_overrides(&fs, dir).await?,
            None => Library::bundled()?,
        };
        Ok(Self::new(
            fs,
            config.layout(),
            clock,
            library,
            config.body_builder(),
        ))
    }

    /// Replace the random source (seeded selectors make output reproducible).
    pub fn with_selector(mut self, selector: RandomSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Where notes are written.
    pub fn layout(&self) -> &NoteLayout {
        &self.layout
    }

    /// Quotes and practices in use.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Style of the configured body builder.
    pub fn body_style(&self) -> BodyStyle {
        self.builder.kind()
    }

    /// Today according to the clock.
    pub fn today(&self) -> DateKey {
        DateKey::from(self.clock.today())
    }

    /// Whether a run is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Ensure today's notes exist, then open the day note.
    pub async fn create_and_open_today(&self, workspace: &dyn Workspace) -> Result<DailyRun> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            log::debug!("A daily run is already in flight, skipping");
            return Ok(DailyRun::Busy);
        };

        let report = self.materialize(self.today()).await?;
        self.open_note(workspace, &report.note).await?;
        Ok(DailyRun::Completed(report))
    }

    /// Ensure today's notes exist without opening anything.
    pub async fn ensure_today(&self) -> Result<DailyRun> {
        self.ensure_for_date(self.clock.today()).await
    }

    /// Ensure the notes for `date` exist without opening anything.
    pub async fn ensure_for_date(&self, date: NaiveDate) -> Result<DailyRun> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            log::debug!("A daily run is already in flight, skipping");
            return Ok(DailyRun::Busy);
        };

        Ok(DailyRun::Completed(self.materialize(DateKey::from(date)).await?))
    }

    /// Look `note` up by exact path and open it.
    pub async fn open_note(&self, workspace: &dyn Workspace, note: &Note) -> Result<()> {
        let found = self
            .materializer
            .find_by_path(note.path())
            .await?
            .ok_or_else(|| StoicError::NoteNotFound(note.path().to_path_buf()))?;
        workspace.open(&found)
    }

    async fn materialize(&self, key: DateKey) -> Result<DailyReport> {
        let year = self.layout.locate(NotePeriod::Year, &key);
        let year_state = self
            .materializer
            .ensure_period(&year, &compose::year_note_text())
            .await?;

        let month = self.layout.locate(NotePeriod::Month, &key);
        let month_state = self
            .materializer
            .ensure_period(&month, &compose::month_note_text(&key))
            .await?;

        let day = self.layout.locate(NotePeriod::Day, &key);
        let day_state = if self.materializer.is_present(&day.file).await {
            log::debug!("Day note {:?} exists, not building a body", day.file);
            Materialized::AlreadyPresent
        } else {
            let ctx = DayContext {
                fs: self.materializer.fs(),
                layout: &self.layout,
                key,
                library: &self.library,
                selector: &self.selector,
            };
            let body = self.builder.day_body(&ctx).await?;
            self.materializer.ensure_period(&day, &body).await?
        };

        Ok(DailyReport {
            key,
            year: year_state,
            month: month_state,
            day: day_state,
            note: Note::new(day.file),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::body::SectionBodyBuilder;
    use crate::clock::FixedClock;
    use crate::config::SectionToggles;
    use crate::fs::{BoxFuture, FileSystem, InMemoryFileSystem, SyncToAsyncFs, block_on_test};
    use crate::test_utils::{FailingFileSystem, RecordingWorkspace, small_library};

    type MemJournal = StoicJournal<SyncToAsyncFs<InMemoryFileSystem>, FixedClock>;

    const DAY: &str = "root/2024/March2024/20240307.md";
    const MONTH: &str = "root/2024/March2024/March2024.md";
    const YEAR: &str = "root/2024/2024.md";

    fn march_seventh() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn journal(fs: &InMemoryFileSystem) -> MemJournal {
        StoicJournal::new(
            SyncToAsyncFs::new(fs.clone()),
            NoteLayout::new("root"),
            FixedClock(march_seventh()),
            small_library(),
            Box::new(SectionBodyBuilder::new(SectionToggles::default())),
        )
        .with_selector(RandomSelector::seeded(9))
    }

    struct CountingBuilder(Arc<AtomicUsize>);

    impl NoteBodyBuilder for CountingBuilder {
        fn kind(&self) -> BodyStyle {
            BodyStyle::Sections
        }

        fn day_body<'a>(&'a self, _ctx: &'a DayContext<'a>) -> BoxFuture<'a, Result<String>> {
            Box::pin(async move {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok("counted".to_string())
            })
        }
    }

    #[test]
    fn test_creates_hierarchy_and_opens_day_note() {
        let fs = InMemoryFileSystem::new();
        let workspace = RecordingWorkspace::new();

        let run = block_on_test(journal(&fs).create_and_open_today(&workspace)).unwrap();
        let report = run.report().unwrap();

        assert_eq!(report.year, Materialized::Created);
        assert_eq!(report.month, Materialized::Created);
        assert_eq!(report.day, Materialized::Created);
        assert_eq!(workspace.opened(), vec![PathBuf::from(DAY)]);

        let day = fs.read_to_string(Path::new(DAY)).unwrap();
        assert!(day.starts_with("---\ntags: daily\n---\nMonth: [[March2024]]\n"));
        assert!(day.contains("> You have power over your mind.\n\\- Marcus Aurelius"));

        let month = fs.read_to_string(Path::new(MONTH)).unwrap();
        assert!(month.contains("Year: [[2024]]"));
        assert!(fs.exists(Path::new(YEAR)));
    }

    #[test]
    fn test_second_run_touches_nothing_but_opens_again() {
        let fs = InMemoryFileSystem::new();
        let workspace = RecordingWorkspace::new();
        let journal = journal(&fs);

        block_on_test(journal.create_and_open_today(&workspace)).unwrap();
        let before = fs.read_to_string(Path::new(DAY)).unwrap();
        let run = block_on_test(journal.create_and_open_today(&workspace)).unwrap();
        let report = run.report().unwrap();

        assert_eq!(report.year, Materialized::AlreadyPresent);
        assert_eq!(report.month, Materialized::AlreadyPresent);
        assert_eq!(report.day, Materialized::AlreadyPresent);
        assert_eq!(fs.read_to_string(Path::new(DAY)).unwrap(), before);
        assert_eq!(workspace.opened().len(), 2);
        assert_eq!(fs.file_count(), 3);
    }

    #[test]
    fn test_existing_day_note_skips_body_builder() {
        let fs = InMemoryFileSystem::new().with_file(DAY, "written by hand");
        let calls = Arc::new(AtomicUsize::new(0));
        let journal = StoicJournal::new(
            SyncToAsyncFs::new(fs.clone()),
            NoteLayout::new("root"),
            FixedClock(march_seventh()),
            small_library(),
            Box::new(CountingBuilder(calls.clone())),
        );

        let run = block_on_test(journal.ensure_today()).unwrap();

        assert_eq!(run.report().unwrap().day, Materialized::AlreadyPresent);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs.read_to_string(Path::new(DAY)).unwrap(), "written by hand");
        // The missing parents are still filled in
        assert!(fs.exists(Path::new(YEAR)));
        assert!(fs.exists(Path::new(MONTH)));
    }

    #[test]
    fn test_existing_year_note_is_kept() {
        let fs = InMemoryFileSystem::new().with_file(YEAR, "my year");
        let run = block_on_test(journal(&fs).ensure_today()).unwrap();
        let report = run.report().unwrap();

        assert_eq!(report.year, Materialized::AlreadyPresent);
        assert_eq!(report.month, Materialized::Created);
        assert_eq!(fs.read_to_string(Path::new(YEAR)).unwrap(), "my year");
    }

    #[test]
    fn test_ensure_for_date_backfills_without_opening() {
        let fs = InMemoryFileSystem::new();
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

        let run = block_on_test(journal(&fs).ensure_for_date(date)).unwrap();

        assert_eq!(
            run.report().unwrap().note.path(),
            Path::new("root/2023/December2023/20231231.md")
        );
        assert!(fs.exists(Path::new("root/2023/2023.md")));
    }

    #[test]
    fn test_busy_while_in_flight() {
        let fs = InMemoryFileSystem::new();
        let workspace = RecordingWorkspace::new();
        let journal = journal(&fs);

        let guard = InFlight::acquire(&journal.in_flight).unwrap();
        assert!(journal.is_busy());
        let run = block_on_test(journal.create_and_open_today(&workspace)).unwrap();
        drop(guard);

        assert_eq!(run, DailyRun::Busy);
        assert_eq!(fs.file_count(), 0);
        assert!(workspace.opened().is_empty());
        assert!(!journal.is_busy());
    }

    struct ReentrantWorkspace<'j> {
        journal: &'j MemJournal,
        nested: Mutex<Option<DailyRun>>,
    }

    impl Workspace for ReentrantWorkspace<'_> {
        fn open(&self, _note: &Note) -> Result<()> {
            let run = block_on_test(self.journal.ensure_today())?;
            *self.nested.lock().unwrap() = Some(run);
            Ok(())
        }
    }

    #[test]
    fn test_nested_invocation_is_busy() {
        let fs = InMemoryFileSystem::new();
        let journal = journal(&fs);
        let workspace = ReentrantWorkspace {
            journal: &journal,
            nested: Mutex::new(None),
        };

        let outer = block_on_test(journal.create_and_open_today(&workspace)).unwrap();

        assert!(matches!(outer, DailyRun::Completed(_)));
        assert_eq!(*workspace.nested.lock().unwrap(), Some(DailyRun::Busy));
        // The flag is released once the outer run returns
        assert!(matches!(
            block_on_test(journal.ensure_today()).unwrap(),
            DailyRun::Completed(_)
        ));
    }

    #[test]
    fn test_storage_failure_aborts_without_opening() {
        let fs = FailingFileSystem::failing_writes();
        let workspace = RecordingWorkspace::new();
        let journal = StoicJournal::new(
            SyncToAsyncFs::new(fs),
            NoteLayout::new("root"),
            FixedClock(march_seventh()),
            small_library(),
            Box::new(SectionBodyBuilder::default()),
        );

        let err = block_on_test(journal.create_and_open_today(&workspace)).unwrap_err();

        assert!(matches!(err, StoicError::FileWrite { .. }));
        assert!(workspace.opened().is_empty());
        assert!(!journal.is_busy());
    }

    #[test]
    fn test_template_style_from_config() {
        let fs = InMemoryFileSystem::new().with_file(
            "/vault/stoic-daily/TEMPLATE.md",
            "%MONTH_LINK%\n%PRACTICE%\n",
        );
        let mut config = Config::new(PathBuf::from("/vault"));
        config.body_style = BodyStyle::Template;

        let journal = block_on_test(StoicJournal::from_config(
            SyncToAsyncFs::new(fs.clone()),
            &config,
            FixedClock(march_seventh()),
        ))
        .unwrap();
        assert_eq!(journal.body_style(), BodyStyle::Template);

        block_on_test(journal.ensure_today()).unwrap();

        let day = fs
            .read_to_string(Path::new("/vault/stoic-daily/2024/March2024/20240307.md"))
            .unwrap();
        assert!(day.starts_with("Month: [[March2024]]\n# Today Practice\n> "));
    }
}
