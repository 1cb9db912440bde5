//! Control loop.
//!
//! [`Controller`] is the per-tick logic: clamp, map, record, compose the
//! frame. It performs no I/O and never sleeps, so it can be driven directly
//! from tests and benches. [`CycleRunner`] wraps it with the sensor, the
//! guarded actuator, the terminal and the stop signal.

use std::io::Write;
use std::time::Duration;

use fan_common::config::{ControlConfig, DisplayConfig, FanConfig};
use fan_common::hal::driver::{FanActuator, FanDriver, HalError, TemperatureSensor};
use fan_common::hal::types::DutyCycle;
use tracing::{debug, error, info, warn};

use crate::error::ControlError;
use crate::history::HistoryBuffer;
use crate::mapping::SpeedCurve;
use crate::render::{Frame, FrameView, Palette, render_frame};
use crate::safety::ActuatorGuard;
use crate::signal::StopSignal;
use crate::state::{LoopEvent, LoopState, LoopStateMachine, TransitionResult};
use crate::terminal::Terminal;

// ─── Controller ─────────────────────────────────────────────────────

/// One tick's derived values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Sensor value as read; shown and recorded.
    pub raw_celsius: f64,
    /// Value clamped into the band; used for mapping only.
    pub clamped_celsius: f64,
    /// Commanded speed.
    pub speed: DutyCycle,
}

/// Result of [`Controller::tick`].
#[derive(Debug, Clone)]
pub struct TickOutput {
    /// Loop state after the tick.
    pub state: LoopState,
    /// Speed to send to the actuator; `None` once the loop has stopped.
    pub command: Option<DutyCycle>,
    /// Values behind `command`.
    pub reading: Option<Reading>,
    /// Screen to draw; `None` when the display is disabled or the loop has
    /// stopped.
    pub frame: Option<Frame>,
}

/// Pure per-tick state: curve, histories and lifecycle.
#[derive(Debug, Clone)]
pub struct Controller {
    curve: SpeedCurve,
    temperatures: HistoryBuffer<f64>,
    speeds: HistoryBuffer<DutyCycle>,
    display: bool,
    graph_height: usize,
    palette: Palette,
    machine: LoopStateMachine,
    ticks: u64,
}

impl Controller {
    /// Controller for the given band and display geometry.
    pub fn new(control: &ControlConfig, display: &DisplayConfig) -> Self {
        Self {
            curve: SpeedCurve::from_config(control),
            temperatures: HistoryBuffer::new(display.graph_width),
            speeds: HistoryBuffer::new(display.graph_width),
            display: display.enabled,
            graph_height: display.graph_height,
            palette: Palette::select(display.color),
            machine: LoopStateMachine::new(),
            ticks: 0,
        }
    }

    /// Shorthand for [`Controller::new`] on a full configuration.
    pub fn from_config(config: &FanConfig) -> Self {
        Self::new(&config.control, &config.display)
    }

    /// Derive the reading for `raw_celsius` without recording it.
    pub fn evaluate(&self, raw_celsius: f64) -> Reading {
        Reading {
            raw_celsius,
            clamped_celsius: self.curve.clamp(raw_celsius),
            speed: self.curve.speed_for(raw_celsius),
        }
    }

    /// Process one sample: derive the speed, append the raw temperature and
    /// the speed to the histories and compose the frame.
    ///
    /// Outside `Running` nothing is recorded and no command is issued.
    pub fn tick(&mut self, raw_celsius: f64) -> TickOutput {
        if !self.machine.is_running() {
            return TickOutput {
                state: self.machine.state(),
                command: None,
                reading: None,
                frame: None,
            };
        }

        let reading = self.evaluate(raw_celsius);
        self.temperatures.append(reading.raw_celsius);
        self.speeds.append(reading.speed);
        self.ticks += 1;

        let frame = self.display.then(|| {
            render_frame(&FrameView {
                raw_celsius: reading.raw_celsius,
                speed: reading.speed,
                temperatures: &self.temperatures,
                band: self.curve.temperature,
                graph_height: self.graph_height,
                palette: self.palette,
            })
        });

        TickOutput {
            state: self.machine.state(),
            command: Some(reading.speed),
            reading: Some(reading),
            frame,
        }
    }

    /// Forward a lifecycle event to the state machine.
    pub fn handle_event(&mut self, event: LoopEvent) -> TransitionResult {
        let result = self.machine.handle_event(event);
        match &result {
            TransitionResult::Ok(state) => debug!("Loop {:?} -> {:?}", event, state),
            TransitionResult::Rejected(reason) => debug!("Loop event {:?} ignored: {}", event, reason),
        }
        result
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> LoopState {
        self.machine.state()
    }

    /// Ticks processed while running.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Raw temperature history.
    pub fn temperatures(&self) -> &HistoryBuffer<f64> {
        &self.temperatures
    }

    /// Commanded speed history.
    pub fn speeds(&self) -> &HistoryBuffer<DutyCycle> {
        &self.speeds
    }
}

// ─── Runner ─────────────────────────────────────────────────────────

/// Why the loop stopped.
#[derive(Debug)]
pub enum ShutdownCause {
    /// Ctrl-C or SIGTERM; a normal exit.
    UserInterrupt,
    /// Sensor, actuator or terminal failure.
    Fault(ControlError),
}

/// Outcome of [`CycleRunner::run`].
#[derive(Debug)]
pub struct ShutdownReport {
    /// What ended the loop.
    pub cause: ShutdownCause,
    /// Ticks completed.
    pub ticks: u64,
    /// Result of forcing the shutdown speed and releasing the hardware.
    pub cleanup: Result<(), HalError>,
}

impl ShutdownReport {
    /// `true` for a user interrupt with a clean release.
    pub fn is_clean(&self) -> bool {
        matches!(self.cause, ShutdownCause::UserInterrupt) && self.cleanup.is_ok()
    }

    /// Collapse into the tick count or the error to exit with. A fault
    /// takes precedence over a cleanup failure.
    ///
    /// # Errors
    /// The fault that stopped the loop, else the cleanup failure.
    pub fn into_result(self) -> Result<u64, ControlError> {
        match self.cause {
            ShutdownCause::Fault(e) => Err(e),
            ShutdownCause::UserInterrupt => self
                .cleanup
                .map(|()| self.ticks)
                .map_err(ControlError::Cleanup),
        }
    }
}

/// Line printed when the user stops the loop.
pub fn shutdown_notice(speed: DutyCycle) -> String {
    if speed == DutyCycle::MAX {
        "\nExiting. Setting fan to maximum speed.".to_string()
    } else {
        format!("\nExiting. Setting fan to {speed}.")
    }
}

/// Drives a [`Controller`] against real collaborators until stopped.
pub struct CycleRunner<W: Write> {
    controller: Controller,
    sensor: Box<dyn TemperatureSensor>,
    guard: ActuatorGuard<Box<dyn FanActuator>>,
    terminal: Terminal<W>,
    stop: StopSignal,
    interval: Duration,
}

impl<W: Write> CycleRunner<W> {
    /// Claim the actuator, then open the sensor.
    ///
    /// The actuator comes first so that a sensor which cannot be opened
    /// still ends with the fan forced to the shutdown speed and released,
    /// like any other sensor failure.
    ///
    /// # Errors
    /// Actuator `start()` or sensor `init()` failure.
    pub fn new(
        config: &FanConfig,
        driver: FanDriver,
        terminal: Terminal<W>,
        stop: StopSignal,
    ) -> Result<Self, ControlError> {
        let FanDriver {
            mut sensor,
            actuator,
        } = driver;

        let shutdown_speed =
            DutyCycle::new(config.control.shutdown_speed).unwrap_or(DutyCycle::MAX);
        let mut guard =
            ActuatorGuard::engage(actuator, shutdown_speed, config.control.settle())?;

        if let Err(e) = sensor.init() {
            error!("Sensor '{}' failed to open: {}", sensor.name(), e);
            if let Err(cleanup) = guard.failsafe() {
                error!("Cleanup after sensor failure also failed: {}", cleanup);
            }
            return Err(e.into());
        }

        info!(
            "Loop ready: sensor '{}', band {:.1}..{:.1}°C, every {:?}",
            sensor.name(),
            config.control.min_temp_c,
            config.control.max_temp_c,
            config.control.interval()
        );

        Ok(Self {
            controller: Controller::from_config(config),
            sensor,
            guard,
            terminal,
            stop,
            interval: config.control.interval(),
        })
    }

    /// Tick until interrupted or a fault occurs, then force the shutdown
    /// speed and release the hardware. The release happens exactly once on
    /// every path.
    pub fn run(mut self) -> ShutdownReport {
        let cause = loop {
            if self.stop.is_triggered() {
                break ShutdownCause::UserInterrupt;
            }
            if let Err(e) = self.step() {
                error!("Control loop fault: {}", e);
                break ShutdownCause::Fault(e);
            }
            if self.stop.wait_timeout(self.interval) {
                break ShutdownCause::UserInterrupt;
            }
        };

        let event = match cause {
            ShutdownCause::UserInterrupt => LoopEvent::Interrupt,
            ShutdownCause::Fault(_) => LoopEvent::Fault,
        };
        self.controller.handle_event(event);

        if matches!(cause, ShutdownCause::UserInterrupt) {
            let notice = shutdown_notice(self.guard.shutdown_speed());
            info!("{}", notice.trim());
            if self.controller.display {
                if let Err(e) = self.terminal.notice(&notice) {
                    warn!("Could not print shutdown notice: {}", e);
                }
            }
        }

        let cleanup = self.guard.failsafe();
        self.sensor.shutdown();
        self.controller.handle_event(LoopEvent::CleanupComplete);

        let ticks = self.controller.ticks();
        info!("Loop terminated after {} ticks", ticks);
        ShutdownReport {
            cause,
            ticks,
            cleanup,
        }
    }

    /// Read, derive, actuate, draw.
    fn step(&mut self) -> Result<(), ControlError> {
        let raw = self.sensor.read_celsius()?;
        let out = self.controller.tick(raw);
        let (Some(command), Some(reading)) = (out.command, out.reading) else {
            return Ok(());
        };

        debug!(
            "raw={:.2}°C clamped={:.2}°C speed={}",
            reading.raw_celsius, reading.clamped_celsius, command
        );
        self.guard.set(command)?;

        match out.frame {
            Some(frame) => self.terminal.draw(&frame)?,
            None => info!(
                "Temp: {:.1}°C | Fan: {}",
                reading.raw_celsius, command
            ),
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
