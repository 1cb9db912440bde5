//! Driver registry for HAL backends.
//!
//! Provides a `DriverRegistry` struct for registering and retrieving
//! backend factories. Constructed at startup and passed by value; there is
//! no global state.

use fan_common::config::FanConfig;
use fan_common::hal::driver::{DriverFactory, FanActuator, FanDriver, HalError, TemperatureSensor};
use std::collections::HashMap;
use tracing::info;

use crate::drivers::register_all_drivers;

/// Registry of available HAL backends.
pub struct DriverRegistry {
    factories: HashMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in backend.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        register_all_drivers(&mut registry);
        registry
    }

    /// Register a backend factory.
    ///
    /// # Panics
    /// Panics if a backend with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a backend factory by name.
    pub fn get_factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Build a sensor/actuator pair by backend name.
    ///
    /// Nothing is acquired here; the caller claims the hardware through
    /// `FanActuator::start` and `TemperatureSensor::init`.
    ///
    /// # Errors
    /// Returns `HalError::DriverNotFound` if no backend with the given name
    /// is registered, or whatever the factory reports.
    pub fn create_driver(&self, name: &str, config: &FanConfig) -> Result<FanDriver, HalError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| HalError::DriverNotFound(name.to_string()))?;
        let driver = factory(config)?;
        info!(
            "Created driver '{}': sensor={}, actuator={}",
            name,
            driver.sensor.name(),
            driver.actuator.name()
        );
        Ok(driver)
    }

    /// List all registered backend names, sorted.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fan_common::hal::types::DutyCycle;

    struct TestSensor;

    impl TemperatureSensor for TestSensor {
        fn name(&self) -> &'static str {
            "test"
        }

        fn read_celsius(&mut self) -> Result<f64, HalError> {
            Ok(30.0)
        }
    }

    struct TestActuator;

    impl FanActuator for TestActuator {
        fn name(&self) -> &'static str {
            "test"
        }

        fn start(&mut self) -> Result<(), HalError> {
            Ok(())
        }

        fn set_duty_cycle(&mut self, _duty: DutyCycle) -> Result<(), HalError> {
            Ok(())
        }

        fn release(&mut self) -> Result<(), HalError> {
            Ok(())
        }
    }

    fn create_test_driver(_config: &FanConfig) -> Result<FanDriver, HalError> {
        Ok(FanDriver {
            sensor: Box::new(TestSensor),
            actuator: Box::new(TestActuator),
        })
    }

    #[test]
    fn registry_register_and_create() {
        let mut reg = DriverRegistry::new();
        reg.register("test_driver", create_test_driver);

        let driver = reg
            .create_driver("test_driver", &FanConfig::default())
            .expect("should create");
        assert_eq!(driver.sensor.name(), "test");
        assert_eq!(driver.actuator.name(), "test");
    }

    #[test]
    fn registry_driver_not_found() {
        let reg = DriverRegistry::new();
        let result = reg.create_driver("nonexistent", &FanConfig::default());
        assert!(matches!(result, Err(HalError::DriverNotFound(_))));
    }

    #[test]
    fn builtin_registry_lists_sysfs_and_simulation() {
        let reg = DriverRegistry::with_builtin_drivers();
        assert_eq!(reg.list_drivers(), vec!["simulation", "sysfs"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_panics() {
        let mut reg = DriverRegistry::new();
        reg.register("dup", create_test_driver);
        reg.register("dup", create_test_driver);
    }
}
