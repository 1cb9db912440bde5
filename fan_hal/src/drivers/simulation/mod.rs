//! Simulation backend.
//!
//! Provides software stand-ins for both external collaborators so the
//! controller can run on any machine:
//!
//! - [`SimulatedPlant`] - first-order thermal model shared by sensor and actuator
//! - [`PlantSensor`] - samples the plant, advancing it one step per read
//! - [`SimulatedActuator`] - records every command and feeds it to the plant
//! - [`ScriptedSensor`] - replays a fixed list of readings (tests)

mod actuator;
mod plant;
mod sensor;

pub use actuator::{ActuatorLog, ActuatorRecord, SimulatedActuator};
pub use plant::SimulatedPlant;
pub use sensor::{PlantSensor, ScriptedSensor};

use fan_common::config::FanConfig;
use fan_common::hal::driver::{FanDriver, HalError};
use tracing::info;

/// Registry name of this backend.
pub const DRIVER_NAME: &str = "simulation";

/// Build a plant-coupled sensor/actuator pair.
pub fn create_driver(config: &FanConfig) -> Result<FanDriver, HalError> {
    let plant = SimulatedPlant::new(config.simulation.clone());
    info!(
        "Simulated plant: ambient={:.1}°C, initial={:.1}°C",
        config.simulation.ambient_c, config.simulation.initial_c
    );

    Ok(FanDriver {
        sensor: Box::new(PlantSensor::new(plant.clone())),
        actuator: Box::new(SimulatedActuator::coupled(plant)),
    })
}
