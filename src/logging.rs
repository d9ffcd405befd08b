use std::io::Write;

use log::{Level, LevelFilter, SetLoggerError};

use crate::config::LogFormat;

/// Install the process-wide console logger.
///
/// Logs go to stdout at info level unless `RUST_LOG` says otherwise. Call
/// once from `main` before the monitor starts.
///
/// # Errors
///
/// Returns an error if a logger was already installed.
pub fn init(format: LogFormat) -> Result<(), SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder
        .target(env_logger::Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_default_env();

    builder.format(move |buf, record| {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match format {
            LogFormat::Plain => writeln!(
                buf,
                "{} | {:<5} | {} - {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            ),
            LogFormat::Decorated => writeln!(
                buf,
                "{} | {:<5} | {} - {} {}",
                timestamp,
                record.level(),
                record.target(),
                glyph(record.level()),
                record.args()
            ),
        }
    });

    builder.try_init()
}

fn glyph(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "🖨",
        Level::Debug => "⏳",
        Level::Trace => "🔍",
    }
}
