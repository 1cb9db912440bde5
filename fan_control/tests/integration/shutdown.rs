//! Integration test: every exit path forces the fan up and releases it once.

use std::thread;
use std::time::{Duration, Instant};

use fan_common::hal::driver::{FanDriver, HalError};
use fan_common::hal::types::DutyCycle;
use fan_control::cycle::{CycleRunner, ShutdownCause};
use fan_control::error::ControlError;
use fan_control::signal::StopSignal;
use fan_control::terminal::Terminal;
use fan_hal::drivers::simulation::{ScriptedSensor, SimulatedActuator};
use fan_hal::drivers::sysfs::ThermalZoneSensor;

use super::{Screen, fast_config, rig};

// ── Helpers ─────────────────────────────────────────────────────────

fn endless(value: f64) -> ScriptedSensor {
    ScriptedSensor::new(std::iter::repeat_n(value, 10_000))
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn interrupt_mid_sleep_cleans_up_once() {
    // A period far longer than the test: only the signal can end the sleep.
    let config = fast_config(60_000);
    let rig = rig(&config, endless(50.0), SimulatedActuator::new());

    let remote = rig.stop.clone();
    let trigger = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        remote.trigger();
    });

    let started = Instant::now();
    let report = rig.runner.run();
    trigger.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(30));
    assert!(report.is_clean());
    assert_eq!(report.ticks, 1);

    let record = rig.actuator.snapshot();
    assert_eq!(record.starts, 1);
    assert_eq!(record.commands, vec![DutyCycle::new(50).unwrap(), DutyCycle::MAX]);
    assert_eq!(record.releases, 1);
    assert!(rig.screen.text().contains("Exiting. Setting fan to maximum speed."));
}

#[test]
fn interrupt_after_many_ticks_still_cleans_up_once() {
    let config = fast_config(1);
    let rig = rig(&config, endless(30.0), SimulatedActuator::new());

    let remote = rig.stop.clone();
    let trigger = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        remote.trigger();
    });
    let report = rig.runner.run();
    trigger.join().unwrap();

    let commands = rig.actuator.commands();
    assert_eq!(commands.len() as u64, report.ticks + 1);
    assert_eq!(commands.last(), Some(&DutyCycle::MAX));
    assert_eq!(commands.iter().filter(|&&d| d == DutyCycle::MAX).count(), 1);
    assert_eq!(rig.actuator.releases(), 1);
    assert!(report.into_result().is_ok());
}

#[test]
fn interrupt_before_first_tick() {
    let config = fast_config(1);
    let rig = rig(&config, endless(30.0), SimulatedActuator::new());
    rig.stop.trigger();

    let report = rig.runner.run();

    assert_eq!(report.ticks, 0);
    assert!(matches!(report.cause, ShutdownCause::UserInterrupt));
    assert_eq!(rig.actuator.commands(), vec![DutyCycle::MAX]);
    assert_eq!(rig.actuator.releases(), 1);
}

#[test]
fn sensor_failure_mid_run() {
    let config = fast_config(1);
    let sensor = ScriptedSensor::new([40.0, 45.0]).then_fail("thermal zone vanished");
    let rig = rig(&config, sensor, SimulatedActuator::new());

    let report = rig.runner.run();

    assert_eq!(report.ticks, 2);
    assert_eq!(rig.actuator.last_command(), Some(DutyCycle::MAX));
    assert_eq!(rig.actuator.releases(), 1);
    assert!(!rig.screen.text().contains("Exiting."));

    match report.into_result() {
        Err(ControlError::Hal(HalError::SensorUnavailable(reason))) => {
            assert_eq!(reason, "thermal zone vanished");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn actuator_failure_is_fatal_and_still_released() {
    let config = fast_config(1);
    let actuator = SimulatedActuator::new().failing_after(2);
    let rig = rig(&config, endless(60.0), actuator);

    let report = rig.runner.run();

    assert_eq!(report.ticks, 3);
    assert!(matches!(
        report.cause,
        ShutdownCause::Fault(ControlError::Hal(HalError::ActuatorFault(_)))
    ));
    // The forced write fails as well; it is reported, and release still runs.
    assert!(report.cleanup.is_err());
    assert_eq!(rig.actuator.releases(), 1);
}

#[test]
fn missing_sensor_at_startup_forces_the_fan_up() {
    let dir = tempfile::tempdir().unwrap();
    let actuator = SimulatedActuator::new();
    let log = actuator.log();
    let driver = FanDriver {
        sensor: Box::new(ThermalZoneSensor::new(dir.path().join("temp"))),
        actuator: Box::new(actuator),
    };

    let result = CycleRunner::new(
        &fast_config(1),
        driver,
        Terminal::new(Screen::default(), false),
        StopSignal::new(),
    );

    assert!(matches!(
        result,
        Err(ControlError::Hal(HalError::SensorUnavailable(_)))
    ));
    let record = log.snapshot();
    assert_eq!(record.starts, 1);
    assert_eq!(record.commands, vec![DutyCycle::MAX]);
    assert_eq!(record.releases, 1);
}

#[test]
fn dropped_runner_still_restores_the_fan() {
    let config = fast_config(1);
    let rig = rig(&config, endless(30.0), SimulatedActuator::new());
    drop(rig.runner);

    assert_eq!(rig.actuator.commands(), vec![DutyCycle::MAX]);
    assert_eq!(rig.actuator.releases(), 1);
}

#[test]
fn settle_delay_precedes_release() {
    let mut config = fast_config(1);
    config.control.settle_ms = 50;
    let rig = rig(&config, ScriptedSensor::new(Vec::new()), SimulatedActuator::new());

    let started = Instant::now();
    let report = rig.runner.run();

    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(report.ticks, 0);
    assert_eq!(rig.actuator.releases(), 1);
}
