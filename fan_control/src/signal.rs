//! Interruptible sleep.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Default)]
struct Shared {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// One-shot stop flag that also wakes a sleeping loop.
///
/// Clones share the flag; the process interrupt handler holds one and the
/// loop another.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    shared: Arc<Shared>,
}

impl StopSignal {
    /// New, untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag and wake every waiter. Idempotent.
    pub fn trigger(&self) {
        let mut stopped = self.shared.stopped.lock();
        *stopped = true;
        self.shared.wake.notify_all();
    }

    /// Current flag value.
    pub fn is_triggered(&self) -> bool {
        *self.shared.stopped.lock()
    }

    /// Sleep for `timeout` unless triggered first.
    ///
    /// Returns `true` if the signal is set, without waiting out the rest of
    /// the timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut stopped = self.shared.stopped.lock();
        while !*stopped {
            if self
                .shared
                .wake
                .wait_until(&mut stopped, deadline)
                .timed_out()
            {
                break;
            }
        }
        *stopped
    }

    /// Route Ctrl-C and SIGTERM to this signal.
    ///
    /// # Errors
    /// Fails if a handler is already installed for the process.
    pub fn install_interrupt_handler(&self) -> Result<(), ctrlc::Error> {
        let signal = self.clone();
        ctrlc::set_handler(move || {
            info!("Received shutdown signal");
            signal.trigger();
        })
    }
}
