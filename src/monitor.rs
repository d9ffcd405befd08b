use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::backend::PrintBackend;
use crate::config::{Reload, Settings, SettingsSource, constants};
use crate::dispatcher::{DispatchOutcome, Dispatcher};
use crate::error::Unavailable;
use crate::printer::PrinterResolver;
use crate::scanner;
use crate::shutdown::Shutdown;

/// Where the control loop currently is within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    ResolvingPrinter,
    CheckingFolder,
    Scanning,
    Dispatching,
    Sleeping,
    Stopped,
}

/// How a single cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No usable printer; nothing was scanned.
    PrinterUnavailable(Unavailable),
    /// The target folder could not be listed.
    FolderUnavailable(String),
    /// The scan found no matching files.
    Idle,
    /// Every matching file was handed to the printer.
    Dispatched { printed: usize, failed: usize },
    /// Shutdown was requested partway through dispatching.
    Interrupted { printed: usize, failed: usize },
}

/// Outcome of one cycle plus how long the loop should wait before the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle: u64,
    pub outcome: CycleOutcome,
    pub sleep: Duration,
}

/// The folder-watching print loop.
///
/// Owns everything that lives from process start to process stop: the
/// print backend, the settings source, the shutdown handle and the small
/// amount of state used to log transitions between cycles.
pub struct Monitor<B: PrintBackend> {
    backend: B,
    settings: SettingsSource,
    shutdown: Shutdown,
    previous_printer: Option<String>,
    previous_settings: Option<Settings>,
    previous_folder: Option<PathBuf>,
    cycle: u64,
    state: LoopState,
}

impl<B: PrintBackend> Monitor<B> {
    pub fn new(backend: B, settings: SettingsSource, shutdown: Shutdown) -> Self {
        Self {
            backend,
            settings,
            shutdown,
            previous_printer: None,
            previous_settings: None,
            previous_folder: None,
            cycle: 0,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of cycles started so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Printer used by the most recent successful resolution.
    pub fn previous_printer(&self) -> Option<&str> {
        self.previous_printer.as_deref()
    }

    /// Run cycles until shutdown is requested.
    pub fn run(&mut self) {
        info!(
            "Starting printer monitoring (settings: {})",
            self.settings.path().display()
        );

        while !self.shutdown.is_triggered() {
            let report = self.run_cycle();
            if matches!(report.outcome, CycleOutcome::Interrupted { .. }) {
                break;
            }

            self.state = LoopState::Sleeping;
            if self.shutdown.sleep(report.sleep) {
                break;
            }
        }

        self.state = LoopState::Stopped;
        info!("Shutdown requested. Printer monitoring stopped.");
    }

    /// Run one cycle without the trailing sleep.
    ///
    /// The returned report says how long [`Monitor::run`] would wait before
    /// the next cycle: the fixed backoff after a printer or folder problem,
    /// the configured scan interval otherwise.
    pub fn run_cycle(&mut self) -> CycleReport {
        self.cycle += 1;
        self.state = LoopState::Idle;
        debug!("Cycle {}: starting", self.cycle);

        let settings = self.reload_settings();
        let backoff = Duration::from_secs(constants::BACKOFF_SECONDS);
        let interval = Duration::from_secs(settings.scan_interval_seconds);

        self.state = LoopState::ResolvingPrinter;
        let printer = match PrinterResolver::new(&self.backend)
            .resolve(&settings, self.previous_printer.as_deref())
        {
            Ok(resolution) => {
                if resolution.changed {
                    if settings.use_default_printer {
                        info!("Using system default printer: {}", resolution.name);
                    } else {
                        info!("Using explicitly set printer: {}", resolution.name);
                    }
                }
                self.previous_printer = Some(resolution.name.clone());
                resolution.name
            }
            Err(e) => {
                error!(
                    "{}. Retrying in {} seconds...",
                    e,
                    constants::BACKOFF_SECONDS
                );
                return self.report(CycleOutcome::PrinterUnavailable(e), backoff);
            }
        };

        self.state = LoopState::CheckingFolder;
        let folder = settings.resolved_target_folder();
        if self.previous_folder.as_ref() != Some(&folder) {
            info!("Resolved target folder path: {}", folder.display());
            self.previous_folder = Some(folder.clone());
        }

        if let Err(e) = scanner::check_folder(&folder) {
            error!(
                "{}. Retrying in {} seconds...",
                e,
                constants::BACKOFF_SECONDS
            );
            return self.report(CycleOutcome::FolderUnavailable(e.to_string()), backoff);
        }

        self.state = LoopState::Scanning;
        info!(
            "Scanning {} (looking for {} keywords)",
            folder.display(),
            settings.keywords.len()
        );

        let candidates = match scanner::scan(&folder, &settings.keywords) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(
                    "{}. Retrying in {} seconds...",
                    e,
                    constants::BACKOFF_SECONDS
                );
                return self.report(CycleOutcome::FolderUnavailable(e.to_string()), backoff);
            }
        };

        if candidates.is_empty() {
            info!(
                "Cycle {}: no matching files. Sleeping for {} seconds before next scan.",
                self.cycle, settings.scan_interval_seconds
            );
            return self.report(CycleOutcome::Idle, interval);
        }

        self.state = LoopState::Dispatching;
        let dispatcher = Dispatcher::new(&self.backend);
        let pause = Duration::from_secs(settings.pause_after_print_seconds);
        let (mut printed, mut failed) = (0, 0);

        for candidate in &candidates {
            if self.shutdown.is_triggered() {
                return self.report(CycleOutcome::Interrupted { printed, failed }, interval);
            }

            info!(
                "Found matching file: {}. Sending to printer '{}'.",
                candidate.path.display(),
                printer
            );

            match dispatcher.dispatch(&printer, &candidate.path) {
                DispatchOutcome::Printed { removal } => {
                    printed += 1;
                    if removal.is_ok() {
                        info!("Successfully printed {}. File deleted.", candidate.name);
                    }
                    if !pause.is_zero() && self.shutdown.sleep(pause) {
                        return self
                            .report(CycleOutcome::Interrupted { printed, failed }, interval);
                    }
                }
                DispatchOutcome::Failed(reason) => {
                    failed += 1;
                    error!(
                        "Failed to print {} on '{}': {}",
                        candidate.name, printer, reason
                    );
                }
            }
        }

        debug!(
            "Cycle {} complete ({} printed, {} failed). Sleeping for {} seconds before next scan.",
            self.cycle, printed, failed, settings.scan_interval_seconds
        );
        self.report(CycleOutcome::Dispatched { printed, failed }, interval)
    }

    fn reload_settings(&mut self) -> Settings {
        let settings = match self.settings.reload() {
            Reload::Fresh(settings) => settings.clone(),
            Reload::Stale(settings, e) => {
                warn!("{}. Continuing with last good settings.", e);
                settings.clone()
            }
        };

        if self.previous_settings.as_ref() != Some(&settings) {
            info!("Settings loaded: {:?}", settings);
            self.previous_settings = Some(settings.clone());
        }

        settings
    }

    fn report(&self, outcome: CycleOutcome, sleep: Duration) -> CycleReport {
        CycleReport {
            cycle: self.cycle,
            outcome,
            sleep,
        }
    }
}
