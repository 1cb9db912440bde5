//! # Fan Control Binary
//!
//! Reads the CPU temperature, drives a PWM fan proportionally and draws the
//! temperature history in the terminal until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! # Hardware (thermal_zone0 + pwmchip0/pwm0), stock settings
//! fan_control
//!
//! # No hardware: simulated thermal plant
//! fan_control -s
//!
//! # Overrides, logs only
//! fan_control --config /etc/fan_control.toml --interval-ms 2000 --headless -v
//! ```

#![deny(warnings)]

use clap::Parser;
use fan_common::config::{ConfigLoader, FanConfig, LogLevel};
use fan_control::cycle::CycleRunner;
use fan_control::signal::StopSignal;
use fan_control::terminal::Terminal;
use fan_hal::DriverRegistry;
use fan_hal::drivers::{simulation, sysfs};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Temperature-proportional PWM fan controller
#[derive(Parser, Debug)]
#[command(name = "fan_control")]
#[command(version)]
#[command(about = "Drive a PWM fan proportionally to the CPU temperature")]
#[command(long_about = None)]
struct Args {
    /// TOML configuration file; every field is optional
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend providing the sensor and the PWM output
    #[arg(short, long, default_value = sysfs::DRIVER_NAME)]
    driver: String,

    /// Use the simulation backend (overrides --driver)
    #[arg(short = 's', long)]
    simulate: bool,

    /// Thermal zone file (millidegrees Celsius)
    #[arg(long, value_name = "PATH")]
    sensor: Option<PathBuf>,

    /// Loop period in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Do not draw frames; log each tick instead
    #[arg(long)]
    headless: bool,

    /// Plain output without ANSI sequences
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("fan_control failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(&args);
    let level = config.as_ref().map(|c| c.log_level).unwrap_or_default();
    setup_tracing(&args, level);
    let config = config?;

    info!("fan_control v{} starting...", env!("CARGO_PKG_VERSION"));

    let driver_name = if args.simulate {
        info!("Simulation mode enabled");
        simulation::DRIVER_NAME
    } else {
        args.driver.as_str()
    };

    let registry = DriverRegistry::with_builtin_drivers();
    let driver = registry.create_driver(driver_name, &config)?;
    info!("Driver '{}' created: {:?}", driver_name, driver);

    let stop = StopSignal::new();
    stop.install_interrupt_handler()?;

    let terminal = Terminal::stdout();
    let runner = CycleRunner::new(&config, driver, terminal, stop)?;
    let ticks = runner.run().into_result()?;

    info!("fan_control shutdown complete ({} ticks)", ticks);
    Ok(())
}

/// File (if any) with CLI overrides applied, validated.
fn load_config(args: &Args) -> Result<FanConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => FanConfig::load(path)
            .map_err(|e| format!("{}: {}", path.display(), e))?,
        None => FanConfig::default(),
    };

    if let Some(path) = &args.sensor {
        config.sensor.path = path.clone();
    }
    if let Some(ms) = args.interval_ms {
        config.control.interval_ms = ms;
    }
    if args.headless {
        config.display.enabled = false;
    }
    if args.no_color {
        config.display.color = false;
    }
    if args.verbose {
        config.log_level = LogLevel::Debug;
    }

    config.validate()?;
    Ok(config)
}

/// Setup tracing subscriber on stderr so logs never mix with frames.
fn setup_tracing(args: &Args, level: LogLevel) {
    let level = if args.verbose { LogLevel::Debug } else { level };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
