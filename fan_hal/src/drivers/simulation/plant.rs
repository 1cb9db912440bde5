//! Thermal plant model.

use fan_common::hal::config::SimulationConfig;
use fan_common::hal::types::DutyCycle;
use parking_lot::Mutex;
use std::f64::consts::TAU;
use std::sync::Arc;

#[derive(Debug)]
struct PlantState {
    config: SimulationConfig,
    temperature_c: f64,
    duty: DutyCycle,
    step: u64,
}

/// Shared handle to a simulated heat source cooled by the fan.
///
/// Clones share the same state; the sensor and the actuator of the
/// simulation backend each hold one.
#[derive(Debug, Clone)]
pub struct SimulatedPlant {
    inner: Arc<Mutex<PlantState>>,
}

impl SimulatedPlant {
    /// Create a plant at `config.initial_c` with the fan stopped.
    pub fn new(config: SimulationConfig) -> Self {
        let temperature_c = config.initial_c;
        Self {
            inner: Arc::new(Mutex::new(PlantState {
                config,
                temperature_c,
                duty: DutyCycle::OFF,
                step: 0,
            })),
        }
    }

    /// Current temperature without advancing the model.
    pub fn temperature_c(&self) -> f64 {
        self.inner.lock().temperature_c
    }

    /// Duty cycle most recently applied.
    pub fn duty(&self) -> DutyCycle {
        self.inner.lock().duty
    }

    /// Apply a new duty cycle; takes effect from the next step.
    pub fn set_duty(&self, duty: DutyCycle) {
        self.inner.lock().duty = duty;
    }

    /// Advance the model by one step and return the new temperature.
    pub fn step(&self) -> f64 {
        let mut state = self.inner.lock();
        let cfg = &state.config;

        let phase = if cfg.load_period_steps == 0 {
            0.0
        } else {
            TAU * state.step as f64 / f64::from(cfg.load_period_steps)
        };
        let heat = cfg.heat_c + cfg.load_swing_c * phase.sin();
        let loss = (cfg.passive_loss + cfg.fan_loss * state.duty.fraction())
            * (state.temperature_c - cfg.ambient_c);

        state.temperature_c += heat - loss;
        state.step += 1;
        state.temperature_c
    }
}
