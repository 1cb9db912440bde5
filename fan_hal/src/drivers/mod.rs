//! HAL driver implementations.
//!
//! - [`sysfs`] - Linux thermal zone + sysfs PWM (production)
//! - [`simulation`] - Thermal plant model for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement `TemperatureSensor` and `FanActuator` from `fan_common::hal::driver`
//! 3. Expose a `create_driver` factory and register it below

pub mod simulation;
pub mod sysfs;

use crate::driver_registry::DriverRegistry;

/// Register all built-in backends.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register(sysfs::DRIVER_NAME, sysfs::create_driver);
    registry.register(simulation::DRIVER_NAME, simulation::create_driver);
}
