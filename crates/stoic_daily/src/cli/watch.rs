//! `watch` command: keep today's notes present while running
//!
//! Opens today's note on start, checks again on every interval tick, and
//! opens today's note whenever Enter is pressed. Ctrl-C or `q` stops.
//!
//! Stdin is read on its own thread, one line per request. A line is only
//! requested once the previous one has been handled, so a manual open runs
//! the editor while nothing else reads the terminal. A tick that lands while
//! a read is waiting does not start the editor: it announces the new day
//! note and the next Enter opens it.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use stoic_daily_core::clock::{Clock, SystemClock};
use stoic_daily_core::error::Result;
use stoic_daily_core::fs::AsyncFileSystem;
use stoic_daily_core::journal::DailyRun;
use stoic_daily_core::lifecycle::{Lifecycle, TickOutcome};
use stoic_daily_core::workspace::{Note, Workspace};

use crate::cli::util::{build_journal, load_config, print_report};
use crate::editor::{EditorWorkspace, PrintWorkspace};

/// Handle the 'watch' command
/// Returns true on success, false on error
pub fn handle_watch(config_path: Option<&Path>, interval: Option<u64>, no_open: bool) -> bool {
    let Some(config) = load_config(config_path) else {
        return false;
    };

    let interval = interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| config.refresh_interval());

    let lifecycle = match build_journal(&config, SystemClock) {
        Ok(journal) => Lifecycle::new(journal).with_refresh_interval(interval),
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ Failed to start runtime: {}", e);
            return false;
        }
    };

    let editor = EditorWorkspace::new(&config);
    let workspace: &dyn Workspace = if no_open { &PrintWorkspace } else { &editor };

    let input = LineReader::spawn(io::BufReader::new(io::stdin()));
    runtime.block_on(watch_loop(&lifecycle, workspace, input));
    true
}

/// Lines from a blocking reader, read on a dedicated thread.
///
/// The thread reads nothing until [`LineReader::request`] is called, and
/// reads exactly one line per request.
struct LineReader {
    requests: Option<std_mpsc::Sender<()>>,
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
    waiting: bool,
}

impl LineReader {
    fn spawn<R: BufRead + Send + 'static>(mut reader: R) -> Self {
        let (request_tx, request_rx) = std_mpsc::channel::<()>();
        let (line_tx, line_rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            while request_rx.recv().is_ok() {
                let mut line = String::new();
                let read = match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => Ok(line),
                    Err(e) => Err(e),
                };
                let failed = read.is_err();
                if line_tx.send(read).is_err() || failed {
                    break;
                }
            }
            log::debug!("stdin reader finished");
        });

        Self {
            requests: Some(request_tx),
            lines: line_rx,
            waiting: false,
        }
    }

    /// Ask for the next line unless one is already being read.
    fn request(&mut self) {
        if self.waiting {
            return;
        }
        let sent = self
            .requests
            .as_ref()
            .is_some_and(|tx| tx.send(()).is_ok());
        if sent {
            self.waiting = true;
        } else {
            self.requests = None;
        }
    }

    /// A read is in progress on the reader thread.
    fn is_waiting(&self) -> bool {
        self.waiting
    }

    fn is_open(&self) -> bool {
        self.requests.is_some()
    }

    /// The requested line. `None` once the input has ended.
    async fn next(&mut self) -> Option<io::Result<String>> {
        let line = self.lines.recv().await;
        self.waiting = false;
        if !matches!(line, Some(Ok(_))) {
            self.requests = None;
        }
        line
    }
}

/// Stands in for the editor while stdin is being read.
struct AwaitEnter;

impl Workspace for AwaitEnter {
    fn open(&self, note: &Note) -> Result<()> {
        println!("New day: {} is ready. Press Enter to open it.", note);
        Ok(())
    }
}

/// Where a tick may open a note right now.
fn tick_workspace<'a>(input: &LineReader, workspace: &'a dyn Workspace) -> &'a dyn Workspace {
    if input.is_waiting() {
        &AwaitEnter
    } else {
        workspace
    }
}

async fn watch_loop<FS: AsyncFileSystem, C: Clock>(
    lifecycle: &Lifecycle<FS, C>,
    workspace: &dyn Workspace,
    mut input: LineReader,
) {
    match lifecycle.activate(workspace).await {
        Ok(Some(DailyRun::Completed(report))) => print_report(&report),
        Ok(_) => {}
        Err(e) => eprintln!("✗ {}", e),
    }

    println!(
        "Watching every {}s. Press Enter to open today's note, q or Ctrl-C to stop.",
        lifecycle.refresh_interval().as_secs()
    );

    let mut ticker = tokio::time::interval(lifecycle.refresh_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; activation already covered it
    ticker.tick().await;

    input.request();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match lifecycle.tick(tick_workspace(&input, workspace)).await {
                    Ok(TickOutcome::Opened(report)) => print_report(&report),
                    Ok(TickOutcome::Unchanged(_)) => {}
                    Ok(TickOutcome::Busy) => log::debug!("Tick skipped, a run is in flight"),
                    Err(e) => eprintln!("✗ {}", e),
                }
            }

            line = input.next(), if input.is_open() => {
                match line {
                    Some(Ok(text)) => match text.trim() {
                        "" | "o" | "open" => match lifecycle.manual_trigger(workspace).await {
                            Ok(DailyRun::Completed(report)) => print_report(&report),
                            Ok(DailyRun::Busy) => println!("Busy, try again"),
                            Err(e) => eprintln!("✗ {}", e),
                        },
                        "q" | "quit" => break,
                        other => println!("Unknown input '{}'. Enter opens today's note, q quits.", other),
                    },
                    Some(Err(e)) => log::warn!("Could not read stdin: {}", e),
                    None => log::debug!("stdin closed, only the timer remains"),
                }
                input.request();
            }

            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    log::info!("Stopped watching");
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use stoic_daily_core::body::SectionBodyBuilder;
    use stoic_daily_core::clock::ManualClock;
    use stoic_daily_core::date::parse_date;
    use stoic_daily_core::fs::{InMemoryFileSystem, SyncToAsyncFs};
    use stoic_daily_core::journal::StoicJournal;
    use stoic_daily_core::layout::NoteLayout;
    use stoic_daily_core::library::Library;

    use super::*;

    type TestLifecycle = Lifecycle<SyncToAsyncFs<InMemoryFileSystem>, Arc<ManualClock>>;

    #[derive(Default)]
    struct Opened(Mutex<Vec<PathBuf>>);

    impl Opened {
        fn paths(&self) -> Vec<PathBuf> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Workspace for Opened {
        fn open(&self, note: &Note) -> Result<()> {
            self.0.lock().unwrap().push(note.path().to_path_buf());
            Ok(())
        }
    }

    /// A reader whose reads block until the test ends
    struct Silent(std_mpsc::Receiver<()>);

    impl Read for Silent {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    fn lifecycle(clock: Arc<ManualClock>) -> TestLifecycle {
        let journal = StoicJournal::new(
            SyncToAsyncFs::new(InMemoryFileSystem::new()),
            NoteLayout::new("root"),
            clock,
            Library::bundled().unwrap(),
            Box::new(SectionBodyBuilder::default()),
        );
        Lifecycle::new(journal).with_refresh_interval(Duration::from_secs(3600))
    }

    fn feb_29_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(parse_date("2024-02-29").unwrap()))
    }

    #[tokio::test]
    async fn test_enter_opens_and_q_stops() {
        let workspace = Opened::default();
        let lifecycle = lifecycle(feb_29_clock());
        let input = LineReader::spawn(Cursor::new("\nq\nnever read\n"));

        watch_loop(&lifecycle, &workspace, input).await;

        // Once on start, once for the Enter
        let day = PathBuf::from("root/2024/February2024/20240229.md");
        assert_eq!(workspace.paths(), vec![day.clone(), day]);
    }

    #[tokio::test]
    async fn test_reader_waits_for_a_request() {
        let mut input = LineReader::spawn(Cursor::new("first\nsecond\n"));
        assert!(!input.is_waiting());

        input.request();
        input.request();
        assert!(input.is_waiting());
        assert_eq!(input.next().await.unwrap().unwrap(), "first\n");
        assert!(!input.is_waiting());

        input.request();
        assert_eq!(input.next().await.unwrap().unwrap(), "second\n");

        input.request();
        assert!(input.next().await.is_none());
        assert!(!input.is_open());
    }

    #[tokio::test]
    async fn test_rollover_during_pending_read_defers_the_editor() {
        let workspace = Opened::default();
        let clock = feb_29_clock();
        let lifecycle = lifecycle(clock.clone());
        let (_release, blocked) = std_mpsc::channel();
        let mut input = LineReader::spawn(io::BufReader::new(Silent(blocked)));

        lifecycle.activate(&workspace).await.unwrap();
        input.request();
        clock.advance_days(1);

        let outcome = lifecycle
            .tick(tick_workspace(&input, &workspace))
            .await
            .unwrap();

        assert!(matches!(outcome, TickOutcome::Opened(_)));
        assert_eq!(
            workspace.paths(),
            vec![PathBuf::from("root/2024/February2024/20240229.md")]
        );

        // Enter then opens the new day in the real workspace
        lifecycle.manual_trigger(&workspace).await.unwrap();
        assert_eq!(
            workspace.paths().last(),
            Some(&PathBuf::from("root/2024/March2024/20240301.md"))
        );
    }
}
