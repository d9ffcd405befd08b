#![allow(dead_code)]
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use folder_print::{BackendError, CommandOutput, PrintBackend};

/// In-memory stand-in for CUPS.
#[derive(Default)]
pub struct FakeBackend {
    /// `None` makes the default lookup fail.
    pub default: RefCell<Option<String>>,
    pub ready: RefCell<HashSet<String>>,
    pub reject_jobs: Cell<bool>,
    pub panic_on_submit: Cell<bool>,
    /// Delete the file while accepting the job, so the later removal fails.
    pub remove_on_submit: Cell<bool>,
    pub submitted: RefCell<Vec<(String, PathBuf)>>,
    pub status_queries: Cell<usize>,
}

impl FakeBackend {
    /// A backend whose default printer `name` is ready.
    pub fn with_default(name: &str) -> Self {
        let backend = Self::default();
        backend.set_default(Some(name));
        backend.set_ready(name, true);
        backend
    }

    pub fn set_default(&self, name: Option<&str>) {
        *self.default.borrow_mut() = name.map(str::to_string);
    }

    pub fn set_ready(&self, name: &str, ready: bool) {
        let mut set = self.ready.borrow_mut();
        if ready {
            set.insert(name.to_string());
        } else {
            set.remove(name);
        }
    }

    pub fn submitted_names(&self) -> Vec<String> {
        self.submitted
            .borrow()
            .iter()
            .map(|(_, path)| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }
}

fn ok(stdout: String) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout,
        stderr: String::new(),
    }
}

fn failed(stderr: String) -> CommandOutput {
    CommandOutput {
        code: Some(1),
        stdout: String::new(),
        stderr,
    }
}

impl PrintBackend for FakeBackend {
    fn default_printer(&self) -> Result<CommandOutput, BackendError> {
        Ok(match self.default.borrow().as_deref() {
            Some(name) => ok(format!("system default destination: {}\n", name)),
            None => failed("lpstat: No destinations added.\n".to_string()),
        })
    }

    fn printer_status(&self, printer: &str) -> Result<CommandOutput, BackendError> {
        self.status_queries.set(self.status_queries.get() + 1);
        Ok(if self.ready.borrow().contains(printer) {
            ok(format!("printer {} is idle.  enabled since today\n", printer))
        } else {
            failed(format!(
                "lpstat: Invalid destination name in list \"{}\".\n",
                printer
            ))
        })
    }

    fn submit(&self, printer: &str, file: &Path) -> Result<CommandOutput, BackendError> {
        self.submitted
            .borrow_mut()
            .push((printer.to_string(), file.to_path_buf()));
        if self.remove_on_submit.get() {
            std::fs::remove_file(file).unwrap();
        }
        if self.panic_on_submit.get() {
            panic!("lp exploded");
        }
        Ok(if self.reject_jobs.get() {
            failed("lp: Unable to print file: client-error-document-format-not-supported\n".to_string())
        } else {
            ok(format!("request id is {}-1 (1 file(s))\n", printer))
        })
    }
}

/// Create a small PDF-looking file at `dir/name` and return its path.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"%PDF-1.4\n").unwrap();
    path
}

/// Write a settings document and return its path.
pub fn write_settings(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("print_settings.json");
    fs::write(&path, json).unwrap();
    path
}
