use log::debug;

use crate::backend::{PrintBackend, parse_default_destination};
use crate::config::Settings;
use crate::error::Unavailable;

/// Printer chosen for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    /// True when `name` differs from the previous cycle's printer.
    ///
    /// Only used for logging the transition.
    pub changed: bool,
}

/// Printer selection service.
///
/// Decides which printer the current cycle prints to and checks that the
/// print subsystem accepts jobs for it. Nothing is cached here; the caller
/// keeps the previous name.
pub struct PrinterResolver<'a, B: PrintBackend> {
    backend: &'a B,
}

impl<'a, B: PrintBackend> PrinterResolver<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Resolve the printer for this cycle.
    ///
    /// Uses the system default when `use_default_printer` is set, otherwise
    /// the explicit name from settings. Either way the printer must pass the
    /// status check.
    ///
    /// # Errors
    ///
    /// Returns [`Unavailable`] if:
    /// - The default lookup fails or names no printer
    /// - Explicit mode is selected with an empty name
    /// - The status check for the chosen printer fails
    pub fn resolve(
        &self,
        settings: &Settings,
        previous: Option<&str>,
    ) -> Result<Resolution, Unavailable> {
        let name = if settings.use_default_printer {
            self.default_printer()?
        } else {
            explicit_printer(settings)?
        };

        self.check_availability(&name)?;

        let changed = previous != Some(name.as_str());
        Ok(Resolution { name, changed })
    }

    /// Ask the print subsystem for the system default printer.
    pub fn default_printer(&self) -> Result<String, Unavailable> {
        let output = self
            .backend
            .default_printer()
            .map_err(|e| Unavailable::NoDefault {
                detail: e.to_string(),
            })?;

        if !output.success() {
            return Err(Unavailable::NoDefault {
                detail: output.failure_text(),
            });
        }

        parse_default_destination(&output.stdout).ok_or_else(|| Unavailable::NoDefault {
            detail: match output.stdout.trim() {
                "" => "default lookup returned no name".to_string(),
                text => text.to_string(),
            },
        })
    }

    /// Check that `printer` is known to the print subsystem.
    pub fn check_availability(&self, printer: &str) -> Result<(), Unavailable> {
        let not_ready = |detail: String| Unavailable::NotReady {
            printer: printer.to_string(),
            detail,
        };

        let output = self
            .backend
            .printer_status(printer)
            .map_err(|e| not_ready(e.to_string()))?;

        if !output.success() {
            return Err(not_ready(output.failure_text()));
        }

        debug!("Printer '{}' status: {}", printer, output.stdout.trim());
        Ok(())
    }
}

fn explicit_printer(settings: &Settings) -> Result<String, Unavailable> {
    settings
        .explicit_printer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or(Unavailable::ExplicitNameMissing)
}
