//! Simulated temperature sources.

use fan_common::hal::driver::{HalError, TemperatureSensor};
use std::collections::VecDeque;
use tracing::debug;

use super::plant::SimulatedPlant;

/// Samples a [`SimulatedPlant`], advancing it one step per read.
pub struct PlantSensor {
    plant: SimulatedPlant,
}

impl PlantSensor {
    /// Create a sensor on `plant`.
    pub fn new(plant: SimulatedPlant) -> Self {
        Self { plant }
    }
}

impl TemperatureSensor for PlantSensor {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn read_celsius(&mut self) -> Result<f64, HalError> {
        let t = self.plant.step();
        debug!("Simulated plant at {:.2} °C", t);
        Ok(t)
    }
}

/// Replays a fixed sequence of readings, then reports the sensor as
/// unavailable.
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    script: VecDeque<Result<f64, HalError>>,
    reads: usize,
}

impl ScriptedSensor {
    /// Create a sensor that returns `readings` in order.
    pub fn new(readings: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: readings.into_iter().map(Ok).collect(),
            reads: 0,
        }
    }

    /// Append a failing read.
    pub fn then_fail(mut self, reason: &str) -> Self {
        self.script
            .push_back(Err(HalError::SensorUnavailable(reason.to_string())));
        self
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl TemperatureSensor for ScriptedSensor {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn read_celsius(&mut self) -> Result<f64, HalError> {
        self.reads += 1;
        self.script.pop_front().unwrap_or_else(|| {
            Err(HalError::SensorUnavailable(
                "scripted readings exhausted".to_string(),
            ))
        })
    }
}
