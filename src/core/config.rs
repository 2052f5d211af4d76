//! Application configuration
//!
//! Loaded from a JSON file. Every field has a default, so an empty object
//! (or a partial file) is a valid configuration.
//!
//! ```json
//! {
//!   "devices": { "icm20948": { "busNumber": 0, "chipSelect": 0,
//!       "accelerometer": { "sensitivityLevel": 3, "lowPassFilter": 1, "sampleRateDivider": 0 },
//!       "gyroscope": { "fullScale": 3, "lowPassFilter": 1, "sampleRateDivider": 0 } } },
//!   "flight": { "accLowPassFilterCoefficient": 0.01, "imuDataPerSecond": 200 },
//!   "udp": { "enabled": true, "address": "127.0.0.1:6431" }
//! }
//! ```
//!
//! Range indices are validated when converted into driver configuration,
//! not while parsing.

use crate::devices::imu::icm20948::{
    AccelConfig, AccelDlpfConfig, AccelRange, DeviceConfig, GyroConfig, GyroDlpfConfig, GyroRange,
};
use crate::devices::traits::ConfigError;
use crate::subsystems::ahrs::AcquisitionConfig;
use attitude_stream_core::ahrs::EstimatorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Default telemetry target
pub const DEFAULT_UDP_ADDRESS: &str = "127.0.0.1:6431";

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub devices: DevicesConfig,
    pub flight: FlightConfig,
    pub udp: UdpConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevicesConfig {
    pub icm20948: Icm20948Settings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Icm20948Settings {
    pub bus_number: u8,
    pub chip_select: u8,
    pub accelerometer: AccelSettings,
    pub gyroscope: GyroSettings,
}

impl Default for Icm20948Settings {
    fn default() -> Self {
        let device = DeviceConfig::default();
        Self {
            bus_number: device.bus_number,
            chip_select: device.chip_select,
            accelerometer: AccelSettings::default(),
            gyroscope: GyroSettings::default(),
        }
    }
}

/// Accelerometer settings as written in the file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccelSettings {
    /// 0..=3 for ±2, ±4, ±8, ±16 g
    pub sensitivity_level: u8,
    /// ACCEL_DLPFCFG, 0..=7
    pub low_pass_filter: u8,
    pub sample_rate_divider: u16,
}

impl Default for AccelSettings {
    fn default() -> Self {
        Self {
            sensitivity_level: 3,
            low_pass_filter: 1,
            sample_rate_divider: 0,
        }
    }
}

/// Gyroscope settings as written in the file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GyroSettings {
    /// 0..=3 for ±250, ±500, ±1000, ±2000 °/s
    pub full_scale: u8,
    /// GYRO_DLPFCFG, 0..=7
    pub low_pass_filter: u8,
    pub sample_rate_divider: u8,
}

impl Default for GyroSettings {
    fn default() -> Self {
        Self {
            full_scale: 3,
            low_pass_filter: 1,
            sample_rate_divider: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightConfig {
    pub acc_low_pass_filter_coefficient: f64,
    /// Acquisition rate; 0 reads as fast as telemetry is consumed
    pub imu_data_per_second: u32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            acc_low_pass_filter_coefficient: EstimatorConfig::default()
                .acc_low_pass_filter_coefficient,
            imu_data_per_second: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UdpConfig {
    pub enabled: bool,
    pub address: String,
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            address: DEFAULT_UDP_ADDRESS.to_string(),
        }
    }
}

impl AppConfig {
    /// Read and parse `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn device_config(&self) -> DeviceConfig {
        let imu = &self.devices.icm20948;
        DeviceConfig {
            bus_number: imu.bus_number,
            chip_select: imu.chip_select,
            ..DeviceConfig::default()
        }
    }

    pub fn accel_config(&self) -> Result<AccelConfig, ConfigError> {
        let accel = &self.devices.icm20948.accelerometer;
        AccelConfig::new(
            AccelRange::try_from(accel.sensitivity_level)?,
            AccelDlpfConfig::try_from(accel.low_pass_filter)?,
            accel.sample_rate_divider,
        )
    }

    pub fn gyro_config(&self) -> Result<GyroConfig, ConfigError> {
        let gyro = &self.devices.icm20948.gyroscope;
        Ok(GyroConfig {
            range: GyroRange::try_from(gyro.full_scale)?,
            dlpf: GyroDlpfConfig::try_from(gyro.low_pass_filter)?,
            sample_rate_div: gyro.sample_rate_divider,
        })
    }

    pub fn estimator_config(&self) -> EstimatorConfig {
        EstimatorConfig {
            acc_low_pass_filter_coefficient: self.flight.acc_low_pass_filter_coefficient,
        }
    }

    pub fn acquisition_config(&self) -> AcquisitionConfig {
        AcquisitionConfig {
            sample_rate_hz: Some(self.flight.imu_data_per_second).filter(|&hz| hz > 0),
        }
    }

    /// Telemetry target, if UDP output is enabled
    pub fn udp_target(&self) -> Option<&str> {
        self.udp.enabled.then_some(self.udp.address.as_str())
    }
}
