//! Sysfs PWM actuator.
//!
//! Layout driven (see `Documentation/ABI/testing/sysfs-class-pwm`):
//!
//! ```text
//! /sys/class/pwm/pwmchipN/export        write channel index to claim
//! /sys/class/pwm/pwmchipN/unexport      write channel index to release
//! /sys/class/pwm/pwmchipN/pwmM/period       [ns]
//! /sys/class/pwm/pwmchipN/pwmM/duty_cycle   [ns], must be <= period
//! /sys/class/pwm/pwmchipN/pwmM/enable       0 | 1
//! ```

use fan_common::hal::config::ActuatorConfig;
use fan_common::hal::driver::{FanActuator, HalError};
use fan_common::hal::types::DutyCycle;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long to wait for the kernel to create `pwmM/` after an export.
const EXPORT_TIMEOUT: Duration = Duration::from_millis(500);
const EXPORT_POLL: Duration = Duration::from_millis(10);

/// Fan output on one sysfs PWM channel.
///
/// `release()` unexports the channel only if `start()` exported it; a
/// channel that was already exported is left enabled at its last duty.
pub struct SysfsPwmActuator {
    chip_dir: PathBuf,
    channel: u32,
    period_ns: u64,
    exported_by_us: bool,
    started: bool,
}

impl SysfsPwmActuator {
    /// Create an actuator for the configured chip/channel. Nothing is
    /// touched until `start()`.
    pub fn new(config: &ActuatorConfig) -> Self {
        Self {
            chip_dir: config.chip_dir(),
            channel: config.channel,
            period_ns: config.period_ns(),
            exported_by_us: false,
            started: false,
        }
    }

    /// `.../pwmchipN/pwmM`
    pub fn channel_dir(&self) -> PathBuf {
        self.chip_dir.join(format!("pwm{}", self.channel))
    }

    /// Duty cycle converted to nanoseconds of the configured period.
    #[inline]
    pub fn duty_ns(&self, duty: DutyCycle) -> u64 {
        self.period_ns * u64::from(duty.percent()) / 100
    }

    fn export(&mut self) -> Result<(), HalError> {
        write_attr(&self.chip_dir.join("export"), self.channel).map_err(HalError::InitFailed)?;
        self.exported_by_us = true;
        debug!("Exported PWM channel {} on {}", self.channel, self.chip_dir.display());

        let channel_dir = self.channel_dir();
        let deadline = Instant::now() + EXPORT_TIMEOUT;
        while !channel_dir.join("duty_cycle").exists() {
            if Instant::now() >= deadline {
                return Err(HalError::InitFailed(format!(
                    "{} did not appear after export",
                    channel_dir.display()
                )));
            }
            thread::sleep(EXPORT_POLL);
        }
        Ok(())
    }
}

impl FanActuator for SysfsPwmActuator {
    fn name(&self) -> &'static str {
        "sysfs_pwm"
    }

    fn start(&mut self) -> Result<(), HalError> {
        if self.started {
            return Ok(());
        }
        if !self.chip_dir.is_dir() {
            return Err(HalError::InitFailed(format!(
                "PWM chip {} not found",
                self.chip_dir.display()
            )));
        }
        if !self.channel_dir().is_dir() {
            self.export()?;
        }

        let dir = self.channel_dir();
        // Duty first: the kernel rejects a period shorter than the current duty.
        write_attr(&dir.join("duty_cycle"), 0).map_err(HalError::InitFailed)?;
        write_attr(&dir.join("period"), self.period_ns).map_err(HalError::InitFailed)?;
        write_attr(&dir.join("enable"), 1).map_err(HalError::InitFailed)?;
        self.started = true;

        info!(
            "PWM started on {} (period={}ns)",
            dir.display(),
            self.period_ns
        );
        Ok(())
    }

    fn set_duty_cycle(&mut self, duty: DutyCycle) -> Result<(), HalError> {
        if !self.started {
            return Err(HalError::ActuatorFault(
                "PWM channel not started".to_string(),
            ));
        }
        let duty_ns = self.duty_ns(duty);
        write_attr(&self.channel_dir().join("duty_cycle"), duty_ns)
            .map_err(HalError::ActuatorFault)?;
        debug!("Duty cycle set to {} ({}ns)", duty, duty_ns);
        Ok(())
    }

    fn release(&mut self) -> Result<(), HalError> {
        // An export from a start() that failed half way is undone as well.
        let was_started = std::mem::take(&mut self.started);
        if std::mem::take(&mut self.exported_by_us) {
            write_attr(&self.chip_dir.join("unexport"), self.channel)
                .map_err(HalError::ActuatorFault)?;
            info!("PWM channel {} unexported", self.channel);
        } else if was_started {
            info!("PWM channel {} left enabled (not exported by us)", self.channel);
        }
        Ok(())
    }
}

fn write_attr(path: &Path, value: impl Display) -> Result<(), String> {
    fs::write(path, value.to_string()).map_err(|e| format!("{}: {}", path.display(), e))
}
