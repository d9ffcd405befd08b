use std::path::Path;
use std::process::{Command, Output};

use log::debug;

use crate::error::BackendError;

/// Exit status and captured text of one print subsystem call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Best human-readable explanation of a failed call.
    ///
    /// Prefers stderr, then stdout, then the exit code.
    pub fn failure_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// The three print subsystem operations the monitor consumes.
///
/// The monitor only looks at [`CommandOutput::success`] and the captured
/// text; a non-zero status from any call means unavailable or failed.
pub trait PrintBackend {
    /// Ask for the host's default destination.
    fn default_printer(&self) -> Result<CommandOutput, BackendError>;

    /// Ask whether `printer` exists and accepts jobs.
    fn printer_status(&self, printer: &str) -> Result<CommandOutput, BackendError>;

    /// Submit `file` as a print job on `printer`.
    fn submit(&self, printer: &str, file: &Path) -> Result<CommandOutput, BackendError>;
}

impl<B: PrintBackend + ?Sized> PrintBackend for &B {
    fn default_printer(&self) -> Result<CommandOutput, BackendError> {
        (**self).default_printer()
    }

    fn printer_status(&self, printer: &str) -> Result<CommandOutput, BackendError> {
        (**self).printer_status(printer)
    }

    fn submit(&self, printer: &str, file: &Path) -> Result<CommandOutput, BackendError> {
        (**self).submit(printer, file)
    }
}

/// [`PrintBackend`] that shells out to the CUPS command line tools.
///
/// * default lookup: `lpstat -d`
/// * status check: `lpstat -p <printer>`
/// * submit: `lp -d <printer> <file>`
#[derive(Debug, Clone)]
pub struct CupsBackend {
    lpstat: String,
    lp: String,
}

impl Default for CupsBackend {
    fn default() -> Self {
        Self::new("lpstat", "lp")
    }
}

impl CupsBackend {
    /// Create a backend using the given program names or paths.
    pub fn new(lpstat: impl Into<String>, lp: impl Into<String>) -> Self {
        Self {
            lpstat: lpstat.into(),
            lp: lp.into(),
        }
    }

    fn run(&self, command: &mut Command, program: &str) -> Result<CommandOutput, BackendError> {
        debug!("Running {:?}", command);
        let output = command.output().map_err(|source| BackendError::Spawn {
            program: program.to_string(),
            source,
        })?;
        Ok(output.into())
    }
}

impl PrintBackend for CupsBackend {
    fn default_printer(&self) -> Result<CommandOutput, BackendError> {
        self.run(Command::new(&self.lpstat).arg("-d"), &self.lpstat)
    }

    fn printer_status(&self, printer: &str) -> Result<CommandOutput, BackendError> {
        self.run(
            Command::new(&self.lpstat).arg("-p").arg(printer),
            &self.lpstat,
        )
    }

    fn submit(&self, printer: &str, file: &Path) -> Result<CommandOutput, BackendError> {
        self.run(
            Command::new(&self.lp).arg("-d").arg(printer).arg(file),
            &self.lp,
        )
    }
}

/// Extract the printer name from `lpstat -d` output.
///
/// CUPS prints `system default destination: NAME`, or
/// `no system default destination` when none is set.
pub fn parse_default_destination(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| line.split_once(": ").map(|(_, name)| name.trim()))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
