//! Kernel thermal zone sensor.

use fan_common::consts::MILLIDEGREES_PER_DEGREE;
use fan_common::hal::driver::{HalError, TemperatureSensor};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Temperature source backed by a file holding millidegrees Celsius.
///
/// The file is opened once by `init()` and re-read from offset 0 on every
/// sample, which is how sysfs attributes are meant to be polled.
pub struct ThermalZoneSensor {
    path: PathBuf,
    file: Option<File>,
    buf: String,
}

impl ThermalZoneSensor {
    /// Create a sensor for `path`. Nothing is opened until `init()`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
            buf: String::with_capacity(16),
        }
    }

    fn unavailable(&self, reason: impl std::fmt::Display) -> HalError {
        HalError::SensorUnavailable(format!("{}: {}", self.path.display(), reason))
    }
}

impl TemperatureSensor for ThermalZoneSensor {
    fn name(&self) -> &'static str {
        "thermal_zone"
    }

    fn init(&mut self) -> Result<(), HalError> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        self.file = Some(file);
        info!("Thermal zone opened: {}", self.path.display());
        Ok(())
    }

    fn read_celsius(&mut self) -> Result<f64, HalError> {
        if self.file.is_none() {
            self.init()?;
        }
        let Some(file) = self.file.as_mut() else {
            return Err(self.unavailable("not opened"));
        };

        self.buf.clear();
        let read = file
            .seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_string(&mut self.buf));
        if let Err(e) = read {
            return Err(self.unavailable(e));
        }

        let celsius = parse_millidegrees(&self.buf).map_err(|e| self.unavailable(e))?;
        debug!("Thermal zone read {:.3} °C", celsius);
        Ok(celsius)
    }

    fn shutdown(&mut self) {
        if self.file.take().is_some() {
            debug!("Thermal zone closed: {}", self.path.display());
        }
    }
}

/// Parse a thermal zone value (millidegrees Celsius) into degrees.
///
/// Surrounding whitespace is ignored. Non-finite values are rejected.
pub fn parse_millidegrees(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let millis: f64 = trimmed
        .parse()
        .map_err(|_| format!("'{trimmed}' is not a number"))?;
    if !millis.is_finite() {
        return Err(format!("'{trimmed}' is not a finite temperature"));
    }
    Ok(millis / MILLIDEGREES_PER_DEGREE)
}
