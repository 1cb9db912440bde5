//! Scoped ownership of the PWM output.
//!
//! [`ActuatorGuard`] is the only holder of the actuator once the loop has
//! started. Whatever ends the loop (interrupt, fault, early return, panic)
//! the output is driven to the shutdown speed and released exactly once:
//! explicitly through [`ActuatorGuard::failsafe`] or, failing that, from
//! `Drop`.

use fan_common::hal::driver::{FanActuator, HalError};
use fan_common::hal::types::DutyCycle;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Owns a started actuator and restores it to a safe state on exit.
pub struct ActuatorGuard<A: FanActuator> {
    actuator: A,
    shutdown_speed: DutyCycle,
    settle: Duration,
    released: bool,
}

impl<A: FanActuator> ActuatorGuard<A> {
    /// Start `actuator` and take ownership of it.
    ///
    /// If `start()` fails the actuator is released before the error is
    /// returned, so a partial claim is not left behind.
    ///
    /// # Errors
    /// The error from `start()`.
    pub fn engage(
        mut actuator: A,
        shutdown_speed: DutyCycle,
        settle: Duration,
    ) -> Result<Self, HalError> {
        if let Err(e) = actuator.start() {
            if let Err(release) = actuator.release() {
                warn!("Release after failed start also failed: {}", release);
            }
            return Err(e);
        }
        info!(
            "Actuator '{}' engaged (shutdown speed {})",
            actuator.name(),
            shutdown_speed
        );
        Ok(Self {
            actuator,
            shutdown_speed,
            settle,
            released: false,
        })
    }

    /// Apply `duty`.
    ///
    /// # Errors
    /// `HalError::ActuatorFault` if the write fails or the output has
    /// already been released.
    pub fn set(&mut self, duty: DutyCycle) -> Result<(), HalError> {
        if self.released {
            return Err(HalError::ActuatorFault(format!(
                "'{}' already released",
                self.actuator.name()
            )));
        }
        self.actuator.set_duty_cycle(duty)
    }

    /// Force the shutdown speed, wait the settle delay, release.
    ///
    /// Only the first call acts; later calls return `Ok(())`. The release
    /// is attempted even if forcing the speed failed; the first error is
    /// returned and any other is logged.
    ///
    /// # Errors
    /// The first failure among the forced write and the release.
    pub fn failsafe(&mut self) -> Result<(), HalError> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        info!("Forcing fan to {} before release", self.shutdown_speed);
        let forced = self.actuator.set_duty_cycle(self.shutdown_speed);
        match &forced {
            Ok(()) if !self.settle.is_zero() => {
                debug!("Settling for {:?}", self.settle);
                thread::sleep(self.settle);
            }
            Ok(()) => {}
            Err(e) => error!("Failed to force shutdown speed: {}", e),
        }

        let released = self.actuator.release();
        if let Err(e) = &released {
            error!("Failed to release actuator: {}", e);
        }
        forced.and(released)
    }

    /// `true` once [`failsafe`](Self::failsafe) has run.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Speed forced on exit.
    #[inline]
    pub fn shutdown_speed(&self) -> DutyCycle {
        self.shutdown_speed
    }
}

impl<A: FanActuator> Drop for ActuatorGuard<A> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        warn!("Actuator guard dropped without explicit shutdown");
        if let Err(e) = self.failsafe() {
            error!("Failsafe during drop failed: {}", e);
        }
    }
}
