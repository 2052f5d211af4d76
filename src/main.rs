//! ICM-20948 attitude streamer
//!
//! Reads the IMU over spidev, estimates roll/pitch/yaw per sample and
//! streams one JSON line per estimate over UDP (or to the log).
//!
//! Usage:
//!   attitude_stream [OPTIONS]
//!
//! Options:
//!   -c, --config <PATH>      Configuration file (default: config.json)
//!   --udp <ADDR>             Telemetry target, overrides the file
//!   --no-udp                 Log telemetry instead of sending it
//!   --log-level <LEVEL>      error, warn, info, debug or trace
//!
//! Type `end`, `quit` or `q` (or press Ctrl-C) to stop.

use std::env;
use std::path::PathBuf;
use std::process::{self, ExitCode};

use attitude_stream::communication::command::{spawn_command_sources, COMMAND_CHANNEL_CAPACITY};
use attitude_stream::communication::{DispatchReport, Dispatcher, LogSink, TelemetrySink, UdpTelemetry};
use attitude_stream::core::config::{AppConfig, DEFAULT_CONFIG_PATH};
use attitude_stream::core::{logging, StartupError};
use attitude_stream::devices::imu::icm20948::registers::ICM20948_WHO_AM_I_VALUE;
use attitude_stream::devices::imu::icm20948::Icm20948Driver;
use attitude_stream::platform::host::MonotonicClock;
use attitude_stream::subsystems::ahrs::{Imu, ImuPipeline};
use attitude_stream::{log_error, log_info, log_warn};
use tokio::sync::mpsc;

struct Args {
    config: Option<PathBuf>,
    udp: Option<String>,
    no_udp: bool,
    log_level: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        config: None,
        udp: None,
        no_udp: false,
        log_level: None,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                args.config = Some(PathBuf::from(string_arg(&raw, i, "config")));
            }
            "--udp" => {
                i += 1;
                args.udp = Some(string_arg(&raw, i, "udp"));
            }
            "--no-udp" => args.no_udp = true,
            "--log-level" => {
                i += 1;
                args.log_level = Some(string_arg(&raw, i, "log-level"));
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if args.no_udp && args.udp.is_some() {
        eprintln!("Error: --udp and --no-udp are mutually exclusive");
        process::exit(1);
    }

    args
}

fn string_arg(raw: &[String], i: usize, name: &str) -> String {
    match raw.get(i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: --{name} requires a value");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: attitude_stream [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -c, --config <PATH>   Configuration file (default: config.json)\n\
         \x20 --udp <ADDR>          Telemetry target, overrides the file\n\
         \x20 --no-udp              Log telemetry instead of sending it\n\
         \x20 --log-level <LEVEL>   error, warn, info, debug or trace (default: $ATTITUDE_LOG or info)\n\
         \x20 -h, --help            Show this help"
    );
}

/// Explicit paths must exist; a missing default file means built-in defaults
fn load_config(args: &Args) -> Result<AppConfig, StartupError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None if PathBuf::from(DEFAULT_CONFIG_PATH).exists() => AppConfig::load(DEFAULT_CONFIG_PATH)?,
        None => {
            log_info!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            AppConfig::default()
        }
    };

    if let Some(address) = &args.udp {
        config.udp.enabled = true;
        config.udp.address = address.clone();
    }
    if args.no_udp {
        config.udp.enabled = false;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<DispatchReport, StartupError> {
    let config = load_config(&args)?;
    let device = config.device_config();
    let accel = config.accel_config()?;
    let gyro = config.gyro_config()?;

    log_info!(
        "Opening ICM-20948 on /dev/spidev{}.{}",
        device.bus_number,
        device.chip_select
    );
    let mut driver = Icm20948Driver::open(device, accel, gyro)?;
    driver.init()?;

    let (name, id) = driver.identify()?;
    if id == ICM20948_WHO_AM_I_VALUE {
        log_info!("{} detected (WHO_AM_I {:#04x})", name, id);
    } else {
        log_warn!(
            "Unexpected WHO_AM_I {:#04x} (expected {:#04x} for {})",
            id,
            ICM20948_WHO_AM_I_VALUE,
            name
        );
    }

    let active = driver.device_config()?;
    if active.matches(&accel, &gyro) {
        log_info!(
            "Accelerometer ±{} g, gyroscope ±{} °/s",
            active.accel_range.full_scale_g(),
            active.gyro_range.full_scale_dps()
        );
    } else {
        log_warn!("Configuration readback differs from request: {:?}", active);
    }

    let sink: Box<dyn TelemetrySink> = match config.udp_target() {
        Some(address) => Box::new(UdpTelemetry::connect(address)?),
        None => Box::new(LogSink),
    };

    let imu = Imu::new(driver, MonotonicClock::new(), config.estimator_config());
    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let ctrl_c = spawn_command_sources(command_tx)?;
    let pipeline = ImuPipeline::spawn(imu, config.acquisition_config());

    let mut dispatcher = Dispatcher::new(sink);
    let result = dispatcher.run(pipeline, command_rx).await;
    ctrl_c.abort();
    Ok(result?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = parse_args();

    let level = logging::resolve_level(args.log_level.as_deref());
    if let Err(e) = logging::init(level).map_err(StartupError::from) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(report) => {
            log_info!(
                "Stopped: {} published, {} publish failures, {} read, {} reads dropped",
                report.published,
                report.publish_failures,
                report.acquisition.delivered,
                report.acquisition.dropped
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
