//! Watch mode for automatic rebuilds on file changes
//!
//! Provides file system watching with debouncing for the `bsbuild build --watch` command.

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::build::{BuildContext, StyleBuild, StyleBuildOutcome};
use crate::config::schema::WatchConfig;
use crate::palette::export_palette;
use crate::settings::SettingsStore;

/// Error during watch mode
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WatchError {
    /// Failed to initialize file watcher
    #[error("Failed to initialize file watcher: {0}")]
    WatcherInit(#[source] notify::Error),
    /// Failed to add watch path
    #[error("Failed to watch {}: {source}", path.display())]
    WatchPath {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    /// Channel receive error
    #[error("Watch channel error: {0}")]
    Channel(String),
    /// Source directory not found
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}

/// Options for watch mode
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Watch configuration (debounce, clear screen, palette)
    pub config: WatchConfig,
    /// Export theme.json after each successful rebuild
    pub palette: bool,
}

/// Result of a single build attempt
#[derive(Debug)]
pub struct WatchBuildResult {
    /// Style build outcome, or the error text
    pub outcome: Result<StyleBuildOutcome, String>,
    /// Palette export result, when one was attempted
    pub palette: Option<Result<PathBuf, String>>,
    /// Build duration
    pub duration: Duration,
}

impl WatchBuildResult {
    /// Check if the build and any palette export succeeded
    pub fn success(&self) -> bool {
        self.outcome.is_ok() && !matches!(self.palette, Some(Err(_)))
    }
}

/// Tracks whether the previous build failed, to report recovery
#[derive(Debug, Default)]
pub struct RecoveryTracker {
    failing: bool,
}

impl RecoveryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a build result, returns true when it fixed a previous failure
    pub fn update(&mut self, result: &WatchBuildResult) -> bool {
        let recovered = self.failing && result.success();
        self.failing = !result.success();
        recovered
    }

    pub fn is_failing(&self) -> bool {
        self.failing
    }
}

/// Clear the terminal screen
fn clear_screen() {
    // ANSI escape code to clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
}

/// Format duration for display
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Get current timestamp for logging
fn timestamp() -> String {
    use std::time::SystemTime;
    let now = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
    let secs = now.as_secs() % 86400; // seconds since midnight
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Directories to watch: the active SCSS tree, plus the template's when a
/// child theme builds on top of it.
pub fn watch_paths(context: &BuildContext) -> Vec<PathBuf> {
    let layout = context.layout();
    let mut paths = Vec::new();
    for path in layout.import_paths() {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Perform a single build iteration.
///
/// Runs the style build and, if requested and the build succeeded, the
/// palette export.
pub fn do_build(build: &StyleBuild, store: &mut dyn SettingsStore, palette: bool) -> WatchBuildResult {
    let start = Instant::now();
    let outcome = build.run(store).map_err(|e| e.to_string());

    let palette = match (&outcome, palette) {
        (Ok(_), true) => Some(
            export_palette(build.context().layout())
                .map(|export| export.path)
                .map_err(|e| e.to_string()),
        ),
        _ => None,
    };

    WatchBuildResult { outcome, palette, duration: start.elapsed() }
}

/// Watch for file changes and rebuild automatically.
///
/// The first build uses `context` as given. Rebuilds triggered by a change
/// are forced, since the signature only covers the top of the SCSS tree.
///
/// This function blocks and runs until interrupted (Ctrl+C).
pub fn watch_and_rebuild(
    context: BuildContext,
    store: &mut dyn SettingsStore,
    options: &WatchOptions,
) -> Result<(), WatchError> {
    let paths = watch_paths(&context);
    for path in &paths {
        if !path.is_dir() {
            return Err(WatchError::SourceNotFound(path.clone()));
        }
    }

    let (tx, rx) = channel();
    let debounce_duration = Duration::from_millis(options.config.debounce_ms as u64);
    let mut debouncer = new_debouncer(debounce_duration, tx).map_err(WatchError::WatcherInit)?;

    for path in &paths {
        debouncer
            .watcher()
            .watch(path, RecursiveMode::Recursive)
            .map_err(|source| WatchError::WatchPath { path: path.clone(), source })?;
        debug!(path = %path.display(), "watching");
    }

    let initial = StyleBuild::new(context.clone());
    let rebuild = StyleBuild::new(context.with_force(true));
    let mut tracker = RecoveryTracker::new();
    let watching = paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ");

    if options.config.clear_screen {
        clear_screen();
    }
    println!("[{}] Building...", timestamp());
    let result = do_build(&initial, store, options.palette);
    tracker.update(&result);
    print_build_result(&result, false);
    println!("[{}] Watching {} for changes...", timestamp(), watching);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant_changes: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        matches!(e.kind, DebouncedEventKind::Any) && is_relevant_file(&e.path)
                    })
                    .collect();

                if relevant_changes.is_empty() {
                    continue;
                }

                if options.config.clear_screen {
                    clear_screen();
                }
                for event in &relevant_changes {
                    if let Some(name) = event.path.file_name() {
                        println!("[{}] Changed: {}", timestamp(), name.to_string_lossy());
                    }
                }

                println!("[{}] Building...", timestamp());
                let result = do_build(&rebuild, store, options.palette);
                let recovered = tracker.update(&result);
                print_build_result(&result, recovered);
                println!("[{}] Watching {} for changes...", timestamp(), watching);
            }
            Ok(Err(error)) => {
                // Watch errors are not fatal
                warn!(?error, "watch error");
                eprintln!("[{}] Watch error: {:?}", timestamp(), error);
                eprintln!("[{}] Continuing to watch...", timestamp());
            }
            Err(e) => {
                return Err(WatchError::Channel(e.to_string()));
            }
        }
    }
}

/// Check if a file is relevant for rebuilding
fn is_relevant_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "scss" | "css")
    } else {
        false
    }
}

/// Print build result to console
fn print_build_result(result: &WatchBuildResult, recovered: bool) {
    if recovered {
        println!("[{}] Fixed: build succeeds again", timestamp());
    }

    match &result.outcome {
        Ok(outcome) => {
            println!(
                "[{}] Build complete ({}) - {}",
                timestamp(),
                format_duration(result.duration),
                outcome.summary()
            );
        }
        Err(error) => {
            println!("[{}] Build failed ({})", timestamp(), format_duration(result.duration));
            eprintln!("[{}] SCSS compiler error: {}", timestamp(), error);
        }
    }

    match &result.palette {
        Some(Ok(path)) => println!("[{}] Palette written to {}", timestamp(), path.display()),
        Some(Err(error)) => eprintln!("[{}] Palette error: {}", timestamp(), error),
        None => {}
    }
}
