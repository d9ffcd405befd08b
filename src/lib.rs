//! Folder Print - watch a folder and print the files that land in it.
//!
//! Every few seconds the monitor re-reads its settings, picks a printer,
//! lists the watched folder, and sends each file whose name contains one of
//! the configured keywords to CUPS. Files are deleted once the print job is
//! accepted.
//!
//! # Core Components
//!
//! * [`config`] - Settings file and environment configuration
//! * [`backend`] - Print subsystem interface and the CUPS implementation
//! * [`printer`] - Per-cycle printer selection and availability check
//! * [`scanner`] - Folder checks and keyword matching
//! * [`dispatcher`] - Print-then-delete for a single file
//! * [`monitor`] - The control loop
//! * [`shutdown`] - Interrupt handling and interruptible sleep
//! * [`logging`] - Console logger setup
//! * [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use folder_print::*;
//!
//! let app_config = AppConfig::from_env();
//! let settings = SettingsSource::open(&app_config.settings_path)?;
//! let shutdown = Shutdown::new();
//! shutdown.install_handler()?;
//!
//! Monitor::new(CupsBackend::default(), settings, shutdown).run();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod printer;
pub mod scanner;
pub mod shutdown;

// Re-export commonly used types for convenience
pub use backend::{CommandOutput, CupsBackend, PrintBackend};
pub use config::{AppConfig, LogFormat, Settings, SettingsSource};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{BackendError, ConfigError, FolderError, Unavailable};
pub use monitor::{CycleOutcome, CycleReport, LoopState, Monitor};
pub use printer::{PrinterResolver, Resolution};
pub use scanner::CandidateFile;
pub use shutdown::Shutdown;
