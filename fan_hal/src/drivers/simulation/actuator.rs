//! Recording actuator.

use fan_common::hal::driver::{FanActuator, HalError};
use fan_common::hal::types::DutyCycle;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use super::plant::SimulatedPlant;

/// Everything a [`SimulatedActuator`] has been asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActuatorRecord {
    /// Number of `start()` calls.
    pub starts: u32,
    /// Every duty cycle applied, in order.
    pub commands: Vec<DutyCycle>,
    /// Number of `release()` calls.
    pub releases: u32,
}

/// Shared view of an actuator's record; stays readable after the actuator
/// has been moved into the control loop.
#[derive(Debug, Clone, Default)]
pub struct ActuatorLog {
    inner: Arc<Mutex<ActuatorRecord>>,
}

impl ActuatorLog {
    /// Snapshot of the record.
    pub fn snapshot(&self) -> ActuatorRecord {
        self.inner.lock().clone()
    }

    /// Every duty cycle applied so far.
    pub fn commands(&self) -> Vec<DutyCycle> {
        self.inner.lock().commands.clone()
    }

    /// Most recent duty cycle, if any.
    pub fn last_command(&self) -> Option<DutyCycle> {
        self.inner.lock().commands.last().copied()
    }

    /// Number of `release()` calls.
    pub fn releases(&self) -> u32 {
        self.inner.lock().releases
    }
}

/// Actuator that records commands and optionally drives a plant.
pub struct SimulatedActuator {
    log: ActuatorLog,
    plant: Option<SimulatedPlant>,
    fail_after: Option<usize>,
}

impl SimulatedActuator {
    /// Create a standalone recording actuator.
    pub fn new() -> Self {
        Self {
            log: ActuatorLog::default(),
            plant: None,
            fail_after: None,
        }
    }

    /// Create an actuator that feeds every command into `plant`.
    pub fn coupled(plant: SimulatedPlant) -> Self {
        Self {
            plant: Some(plant),
            ..Self::new()
        }
    }

    /// Fail every `set_duty_cycle` after the first `n` succeed.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Handle on the record of this actuator.
    pub fn log(&self) -> ActuatorLog {
        self.log.clone()
    }
}

impl Default for SimulatedActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl FanActuator for SimulatedActuator {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn start(&mut self) -> Result<(), HalError> {
        self.log.inner.lock().starts += 1;
        Ok(())
    }

    fn set_duty_cycle(&mut self, duty: DutyCycle) -> Result<(), HalError> {
        let mut record = self.log.inner.lock();
        if let Some(limit) = self.fail_after {
            if record.commands.len() >= limit {
                return Err(HalError::ActuatorFault(format!(
                    "simulated write failure after {limit} commands"
                )));
            }
        }
        record.commands.push(duty);
        drop(record);

        if let Some(plant) = &self.plant {
            plant.set_duty(duty);
        }
        debug!("Simulated duty cycle {}", duty);
        Ok(())
    }

    fn release(&mut self) -> Result<(), HalError> {
        self.log.inner.lock().releases += 1;
        Ok(())
    }
}
