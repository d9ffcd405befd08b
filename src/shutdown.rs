use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use log::info;

/// Cooperative stop flag shared between the signal handler and the loop.
///
/// Cloning yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger this handle on Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler is already installed for this process.
    pub fn install_handler(&self) -> Result<(), ctrlc::Error> {
        let handle = self.clone();
        ctrlc::set_handler(move || {
            info!("Received interrupt, initiating shutdown...");
            handle.trigger();
        })
    }

    /// Request shutdown and wake any sleeper.
    pub fn trigger(&self) {
        let mut stopped = self
            .inner
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        self.inner.wake.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self
            .inner
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `duration` or until shutdown is requested.
    ///
    /// Returns true if shutdown was requested.
    pub fn sleep(&self, duration: Duration) -> bool {
        let stopped = self
            .inner
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (stopped, _) = self
            .inner
            .wake
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }
}
