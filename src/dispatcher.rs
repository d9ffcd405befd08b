use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use log::{error, info};

use crate::backend::PrintBackend;

/// What happened to one file handed to the print subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The job was accepted. `removal` reports whether the source file was
    /// deleted afterwards; a failed removal does not undo the print.
    Printed { removal: Result<(), String> },
    /// The job was not accepted and the file was left where it was.
    Failed(String),
}

impl DispatchOutcome {
    pub fn is_printed(&self) -> bool {
        matches!(self, DispatchOutcome::Printed { .. })
    }
}

/// Submits files to the print subsystem and removes them once printed.
pub struct Dispatcher<'a, B: PrintBackend> {
    backend: &'a B,
}

impl<'a, B: PrintBackend> Dispatcher<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Print `file` on `printer`, deleting it if the job is accepted.
    ///
    /// Never returns an error: every problem, including a panic inside the
    /// backend, becomes [`DispatchOutcome::Failed`] so the caller can move
    /// on to the next file.
    pub fn dispatch(&self, printer: &str, file: &Path) -> DispatchOutcome {
        if !file.exists() {
            return DispatchOutcome::Failed(format!(
                "{} no longer exists",
                file.display()
            ));
        }

        let submitted =
            panic::catch_unwind(AssertUnwindSafe(|| self.backend.submit(printer, file)));

        let output = match submitted {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return DispatchOutcome::Failed(e.to_string()),
            Err(payload) => {
                return DispatchOutcome::Failed(format!(
                    "print subsystem panicked: {}",
                    panic_message(payload.as_ref())
                ));
            }
        };

        if !output.success() {
            return DispatchOutcome::Failed(output.failure_text());
        }

        info!("Printed {} on '{}'. Deleting file.", file.display(), printer);

        let removal = fs::remove_file(file).map_err(|e| {
            error!(
                "Printed {} but failed to delete it: {}",
                file.display(),
                e
            );
            e.to_string()
        });

        DispatchOutcome::Printed { removal }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
