//! Shared fixtures for the loop tests.

mod end_to_end;
mod shutdown;

use std::io::{self, Write};
use std::sync::Arc;

use fan_common::config::FanConfig;
use fan_common::hal::driver::{FanDriver, TemperatureSensor};
use fan_control::cycle::CycleRunner;
use fan_control::signal::StopSignal;
use fan_control::terminal::Terminal;
use fan_hal::drivers::simulation::{ActuatorLog, SimulatedActuator};
use parking_lot::Mutex;

/// Terminal sink whose contents stay readable after the runner consumed it.
#[derive(Debug, Clone, Default)]
pub struct Screen(Arc<Mutex<Vec<u8>>>);

impl Screen {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for Screen {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stock configuration with a short period, no settle delay and plain
/// output.
pub fn fast_config(interval_ms: u64) -> FanConfig {
    let mut config = FanConfig::default();
    config.control.interval_ms = interval_ms;
    config.control.settle_ms = 0;
    config.display.color = false;
    config
}

pub struct Rig {
    pub runner: CycleRunner<Screen>,
    pub actuator: ActuatorLog,
    pub screen: Screen,
    pub stop: StopSignal,
}

/// Runner wired to `sensor`, a recording actuator and a [`Screen`].
pub fn rig(
    config: &FanConfig,
    sensor: impl TemperatureSensor + 'static,
    actuator: SimulatedActuator,
) -> Rig {
    let log = actuator.log();
    let screen = Screen::default();
    let stop = StopSignal::new();
    let driver = FanDriver {
        sensor: Box::new(sensor),
        actuator: Box::new(actuator),
    };
    let runner = CycleRunner::new(
        config,
        driver,
        Terminal::new(screen.clone(), false),
        stop.clone(),
    )
    .unwrap();

    Rig {
        runner,
        actuator: log,
        screen,
        stop,
    }
}
