use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Process-level configuration loaded from environment variables.
///
/// Everything that can change while the monitor runs lives in the settings
/// file instead (see [`Settings`]). This struct only says where to find it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the JSON settings document.
    ///
    /// Environment variable: `PRINT_SETTINGS`
    pub settings_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PRINT_SETTINGS`: settings file path (default: "print_settings.json")
    pub fn from_env() -> Self {
        let settings_path = PathBuf::from(
            std::env::var(constants::SETTINGS_PATH_ENV)
                .unwrap_or_else(|_| constants::DEFAULT_SETTINGS_FILE.to_string()),
        );

        Self { settings_path }
    }
}

/// Line format used by the console logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `timestamp | LEVEL | target - message`
    Plain,
    /// Plain format with a glyph per level, as the monitor has always printed.
    #[default]
    Decorated,
}

/// Operator settings, re-read from disk at the start of every cycle.
///
/// Unknown fields are ignored so one file can be shared with other tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder to watch. A leading `~` is expanded to the home directory.
    pub target_folder: String,

    /// A file is printed when its name contains any of these
    /// (case-insensitive). An empty list prints nothing.
    pub keywords: Vec<String>,

    /// Ask CUPS for the system default instead of using `explicit_printer_name`.
    pub use_default_printer: bool,

    pub explicit_printer_name: Option<String>,

    /// Seconds to sleep between completed cycles. Must be at least 1.
    pub scan_interval_seconds: u64,

    /// Seconds to wait after each successful print before the next one.
    pub pause_after_print_seconds: u64,

    /// Console log format. Only read once, at startup.
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_folder: constants::DEFAULT_TARGET_FOLDER.to_string(),
            keywords: Vec::new(),
            use_default_printer: true,
            explicit_printer_name: None,
            scan_interval_seconds: constants::DEFAULT_SCAN_INTERVAL_SECONDS,
            pause_after_print_seconds: 0,
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Read and validate the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The contents are not valid JSON or a field has the wrong type
    /// - `scan_interval_seconds` is zero
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    /// Parse a settings document. `origin` is only used in error messages.
    pub fn parse(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "scan_interval_seconds",
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        Ok(())
    }

    /// The target folder with `~` expanded.
    pub fn resolved_target_folder(&self) -> PathBuf {
        expand_home(&self.target_folder)
    }
}

/// Expand a leading `~` or `~/` to the current user's home directory.
///
/// Paths without a leading tilde, or hosts without a home directory, are
/// returned unchanged.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Result of re-reading the settings file mid-run.
#[derive(Debug)]
pub enum Reload<'a> {
    /// The file loaded and validated.
    Fresh(&'a Settings),
    /// The file failed to load; the last good settings are returned.
    Stale(&'a Settings, ConfigError),
}

/// Settings file plus the last version of it that loaded successfully.
#[derive(Debug)]
pub struct SettingsSource {
    path: PathBuf,
    last_good: Settings,
}

impl SettingsSource {
    /// Load the settings for the first time.
    ///
    /// # Errors
    ///
    /// Any load failure here is returned; the monitor refuses to start
    /// without a valid settings file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let last_good = Settings::load(&path)?;
        Ok(Self { path, last_good })
    }

    /// Re-read the file, falling back to the last good settings on failure.
    pub fn reload(&mut self) -> Reload<'_> {
        match Settings::load(&self.path) {
            Ok(settings) => {
                self.last_good = settings;
                Reload::Fresh(&self.last_good)
            }
            Err(e) => Reload::Stale(&self.last_good, e),
        }
    }

    pub fn current(&self) -> &Settings {
        &self.last_good
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Application constants used throughout the system.
pub mod constants {
    /// Environment variable naming the settings file.
    pub const SETTINGS_PATH_ENV: &str = "PRINT_SETTINGS";

    /// Settings file used when `PRINT_SETTINGS` is unset.
    pub const DEFAULT_SETTINGS_FILE: &str = "print_settings.json";

    pub const DEFAULT_TARGET_FOLDER: &str = "~/Downloads";

    pub const DEFAULT_SCAN_INTERVAL_SECONDS: u64 = 3;

    /// Wait before retrying after the printer or folder was unavailable.
    pub const BACKOFF_SECONDS: u64 = 10;
}
