//! Integration test: readings through mapping, actuation and display.

use fan_common::hal::types::DutyCycle;
use fan_control::cycle::ShutdownCause;
use fan_hal::drivers::simulation::{ScriptedSensor, SimulatedActuator};

use super::{fast_config, rig};

fn pct(values: &[u8]) -> Vec<DutyCycle> {
    values.iter().map(|&v| DutyCycle::new(v).unwrap()).collect()
}

#[test]
fn readings_map_to_expected_speeds() {
    let config = fast_config(1);
    let sensor = ScriptedSensor::new([25.0, 75.0, 50.0, 90.0]);
    let rig = rig(&config, sensor, SimulatedActuator::new());

    let report = rig.runner.run();

    assert_eq!(report.ticks, 4);
    // Per tick, then the forced shutdown speed once the script runs dry.
    assert_eq!(rig.actuator.commands(), pct(&[0, 100, 50, 100, 100]));
    assert_eq!(rig.actuator.releases(), 1);
    assert!(matches!(report.cause, ShutdownCause::Fault(ref e) if e.is_sensor_failure()));
}

#[test]
fn display_shows_unclamped_temperature() {
    let config = fast_config(1);
    let sensor = ScriptedSensor::new([90.0]);
    let rig = rig(&config, sensor, SimulatedActuator::new());
    rig.runner.run();

    let text = rig.screen.text();
    assert!(text.contains("CPU Temperature:  90.0°C    |    Fan Speed: 100%"));
    assert!(text.contains("PWM FAN Control"));
    assert!(text.contains("90.0°C |"), "graph scale widens to the sample");
    assert!(!text.contains('\x1b'));
}

#[test]
fn fractional_mapping_truncates() {
    let config = fast_config(1);
    // 30.99 → 11.98 → 11; 74.99 → 99.98 → 99
    let sensor = ScriptedSensor::new([30.99, 74.99, 10.0]);
    let rig = rig(&config, sensor, SimulatedActuator::new());
    rig.runner.run();

    assert_eq!(rig.actuator.commands(), pct(&[11, 99, 0, 100]));
}

#[test]
fn first_frame_has_a_graph() {
    let config = fast_config(1);
    let rig = rig(&config, ScriptedSensor::new([40.0]), SimulatedActuator::new());
    rig.runner.run();

    let text = rig.screen.text();
    assert!(!text.contains("Collecting data for graph..."));
    assert!(text.contains("Legend"));
}

#[test]
fn headless_run_draws_nothing() {
    let mut config = fast_config(1);
    config.display.enabled = false;
    let rig = rig(&config, ScriptedSensor::new([40.0, 60.0]), SimulatedActuator::new());

    let report = rig.runner.run();

    assert_eq!(report.ticks, 2);
    assert!(rig.screen.text().is_empty());
    assert_eq!(rig.actuator.commands(), pct(&[30, 70, 100]));
}

#[test]
fn custom_band_and_shutdown_speed() {
    let mut config = fast_config(1);
    config.control.min_temp_c = 40.0;
    config.control.max_temp_c = 60.0;
    config.control.min_speed = 20;
    config.control.max_speed = 80;
    config.control.shutdown_speed = 90;
    let rig = rig(&config, ScriptedSensor::new([30.0, 50.0, 70.0]), SimulatedActuator::new());

    rig.runner.run();

    assert_eq!(rig.actuator.commands(), pct(&[20, 50, 80, 90]));
}
