//! End-to-end: SPI bytes in, telemetry JSON out
//!
//! A scripted SPI device answers every sample burst with the same 12-byte
//! block: accelerometer (4096, 0, 16) counts, gyroscope at rest.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use attitude_stream::communication::{Command, Dispatcher, TelemetryError, TelemetrySink};
use attitude_stream::devices::imu::icm20948::registers::{ACCEL_XOUT_H, READ_FLAG};
use attitude_stream::devices::imu::icm20948::{
    AccelConfig, DeviceConfig, GyroConfig, Icm20948Driver,
};
use attitude_stream::platform::{PlatformError, SpiError, SpiInterface, TimerInterface};
use attitude_stream::subsystems::ahrs::{AcquisitionConfig, Imu, ImuPipeline, RotationSource};
use attitude_stream_core::ahrs::{accelerometer_to_roll_pitch, EstimatorConfig};
use attitude_stream_core::imu::{decode_block, scale};
use attitude_stream_core::traits::MockTime;
use tokio::sync::mpsc;

const BLOCK: [u8; 12] = [0x10, 0, 0, 0, 0, 0x10, 0, 0, 0, 0, 0, 0];

/// Expected pitch for the block: -atan2(4096, 16) in degrees
fn expected_pitch() -> f64 {
    -(4096.0f64).atan2(16.0).to_degrees()
}

#[derive(Default)]
struct ScriptedSpi;

impl SpiInterface for ScriptedSpi {
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), PlatformError> {
        if write.len() != read.len() {
            return Err(PlatformError::Spi(SpiError::LengthMismatch));
        }
        read.fill(0);
        if write[0] == ACCEL_XOUT_H.address() | READ_FLAG && read.len() == BLOCK.len() + 1 {
            read[1..].copy_from_slice(&BLOCK);
        }
        Ok(())
    }

    fn write(&mut self, _data: &[u8]) -> Result<(), PlatformError> {
        Ok(())
    }
}

struct NoDelay;

impl TimerInterface for NoDelay {
    fn delay_us(&mut self, _us: u32) -> Result<(), PlatformError> {
        Ok(())
    }

    fn delay_ms(&mut self, _ms: u32) -> Result<(), PlatformError> {
        Ok(())
    }

    fn now_us(&self) -> u64 {
        0
    }
}

fn make_imu() -> Imu<Icm20948Driver<ScriptedSpi, NoDelay>, MockTime> {
    let driver = Icm20948Driver::new(
        ScriptedSpi,
        NoDelay,
        DeviceConfig::default(),
        AccelConfig::default(),
        GyroConfig::default(),
    );
    Imu::new(driver, MockTime::new(), EstimatorConfig::default())
}

#[derive(Clone, Default)]
struct SharedSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl TelemetrySink for SharedSink {
    fn publish(&mut self, line: &str) -> Result<(), TelemetryError> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "shared".into()
    }
}

#[test]
fn block_decodes_to_tilt_at_unit_scale() {
    let (acc_raw, gyro_raw) = decode_block(&BLOCK);
    let acc = scale(acc_raw, 1.0);
    assert_eq!((acc.x, acc.y, acc.z), (4096.0, 0.0, 16.0));
    assert_eq!(gyro_raw, [0, 0, 0]);

    let (roll, pitch) = accelerometer_to_roll_pitch(&acc);
    assert_eq!(roll, 0.0);
    assert!((pitch - expected_pitch()).abs() < 1e-9);
    assert!(pitch < -89.0 && pitch > -90.0);
}

#[test]
fn driver_read_produces_same_tilt() {
    let mut imu = make_imu();
    imu.reset();
    let rotations = imu.read_rotations().unwrap();

    let acc = imu.device().accelerometer().data();
    assert_eq!((acc.x, acc.y, acc.z), (2.0, 0.0, 16.0 / 2048.0));
    assert_eq!(rotations.acc.roll, 0.0);
    assert!((rotations.acc.pitch - expected_pitch()).abs() < 1e-9);
    assert_eq!(rotations.rotations, rotations.acc);
    assert_eq!(rotations.gyro.roll, 0.0);
}

#[tokio::test]
async fn pipeline_streams_json_until_terminated() {
    let sink = SharedSink::default();
    let lines = sink.lines.clone();
    let pipeline = ImuPipeline::spawn(
        make_imu(),
        AcquisitionConfig {
            sample_rate_hz: Some(1000),
        },
    );
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = tx.send(Command::Terminate).await;
    });

    let mut dispatcher = Dispatcher::new(sink);
    let report = tokio::time::timeout(Duration::from_secs(3), dispatcher.run(pipeline, rx))
        .await
        .expect("dispatcher did not stop")
        .unwrap();

    let lines = lines.lock().unwrap();
    assert!(!lines.is_empty());
    assert_eq!(report.published as usize, lines.len());
    assert_eq!(report.acquisition.dropped, 0);

    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["roll"].as_f64(), Some(0.0));
    assert!(lines[0].contains("\"pitch\":-89.78,"));
    assert!(lines[0].contains("\"accYaw\":0.00,"));
    assert!(first["dT"].is_u64());
}
