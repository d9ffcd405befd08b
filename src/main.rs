use anyhow::{Context, Result};
use log::info;

use folder_print::{AppConfig, CupsBackend, Monitor, SettingsSource, Shutdown, logging};

/// Folder Print - keyword-driven folder-to-printer daemon.
///
/// Watches a folder (by default `~/Downloads`) and prints every file whose
/// name contains one of the configured keywords, deleting it once CUPS
/// accepts the job. Runs until interrupted with Ctrl+C or SIGTERM.
///
/// # Environment Variables
///
/// * `PRINT_SETTINGS` - Settings file path (default: "print_settings.json")
/// * `RUST_LOG` - Log level (default: "info")
///
/// # Settings file
///
/// ```json
/// {
///   "target_folder": "~/Downloads",
///   "keywords": ["WorkConfirmation", "label_", "_shipper", "PackingList"],
///   "use_default_printer": true,
///   "explicit_printer_name": null,
///   "scan_interval_seconds": 3
/// }
/// ```
///
/// The file is re-read every cycle, so edits take effect without a restart.
/// A broken file at startup is fatal; a broken file later is reported and
/// the last good settings stay in use.
fn main() -> Result<()> {
    let app_config = AppConfig::from_env();

    let settings = SettingsSource::open(&app_config.settings_path).with_context(|| {
        format!(
            "Failed to load settings. Please check {}",
            app_config.settings_path.display()
        )
    })?;

    logging::init(settings.current().log_format).context("Failed to initialize logger")?;

    let shutdown = Shutdown::new();
    shutdown
        .install_handler()
        .context("Failed to install interrupt handler")?;

    info!("Folder Print starting...");

    let mut monitor = Monitor::new(CupsBackend::default(), settings, shutdown);
    monitor.run();

    Ok(())
}
