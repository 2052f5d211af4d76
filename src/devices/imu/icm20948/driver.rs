//! ICM-20948 SPI Driver Implementation
//!
//! Blocking driver for the accelerometer and gyroscope of the ICM-20948.
//! Configuration registers live in Bank 2 and sample data in Bank 0; the
//! [`BankedBus`] switches banks only when the target register needs it.
//!
//! The driver is platform-agnostic: any [`SpiInterface`] and
//! [`TimerInterface`] pair works. On Linux, [`Icm20948Driver::open`] wires
//! up spidev and a sleeping timer.

use super::bus::BankedBus;
use super::config::{AccelConfig, ActiveConfig, DeviceConfig, GyroConfig};
use super::registers::{
    self, ACCEL_CONFIG, ACCEL_SMPLRT_DIV_1, ACCEL_SMPLRT_DIV_2, ACCEL_XOUT_H, GYRO_CONFIG_1,
    GYRO_SMPLRT_DIV, PWR_MGMT_1, WHO_AM_I,
};
use crate::devices::traits::{ImuError, ImuSensor};
use crate::platform::{SpiInterface, TimerInterface};
use attitude_stream_core::imu::{decode_block, AxisState, RAW_BLOCK_LEN};
use nalgebra::Vector3;

/// Device name reported by `identify`
pub const DEVICE_NAME: &str = "ICM-20948";

/// ICM-20948 SPI Driver
///
/// # Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiInterface`]
/// * `T` - Timer used for settle delays during initialisation
pub struct Icm20948Driver<SPI, T> {
    /// Bank-tracking register access
    bus: BankedBus<SPI>,

    timer: T,

    device: DeviceConfig,
    accel_config: AccelConfig,
    gyro_config: GyroConfig,

    /// Accelerometer state (g)
    acc: AxisState,

    /// Gyroscope state (°/s)
    gyro: AxisState,
}

impl<SPI, T> Icm20948Driver<SPI, T>
where
    SPI: SpiInterface,
    T: TimerInterface,
{
    /// Create a driver over an already configured bus
    ///
    /// No bus traffic happens until [`init`](Self::init) or a read.
    pub fn new(
        spi: SPI,
        timer: T,
        device: DeviceConfig,
        accel_config: AccelConfig,
        gyro_config: GyroConfig,
    ) -> Self {
        Self {
            bus: BankedBus::new(spi),
            timer,
            device,
            accel_config,
            gyro_config,
            acc: AxisState::new(accel_config.range.sensitivity()),
            gyro: AxisState::new(gyro_config.range.sensitivity()),
        }
    }

    /// Initialize the ICM-20948
    ///
    /// 1. Soft reset
    /// 2. Clear the sleep bit and enable all axes (PWR_MGMT_1 + PWR_MGMT_2)
    /// 3. Configure the accelerometer
    /// 4. Configure the gyroscope
    ///
    /// Each step is followed by the configured settle delay.
    pub fn init(&mut self) -> Result<(), ImuError> {
        self.bus
            .write_register(PWR_MGMT_1, &[registers::PWR_MGMT_1_DEVICE_RESET])?;
        // Reset returns the device to bank 0
        self.bus.mark_reset();
        self.settle()?;

        let power = self.bus.read_byte(PWR_MGMT_1)?;
        let awake = power & !registers::PWR_MGMT_1_SLEEP;
        // PWR_MGMT_2 follows PWR_MGMT_1, both written in one transaction
        self.bus
            .write_register(PWR_MGMT_1, &[awake, registers::PWR_MGMT_2_ENABLE_ALL])?;
        self.settle()?;

        self.init_accelerometer()?;
        self.settle()?;

        self.init_gyroscope()?;
        self.settle()?;

        crate::log_info!(
            "ICM-20948 initialized: ±{} g, ±{} °/s",
            self.accel_config.range.full_scale_g(),
            self.gyro_config.range.full_scale_dps()
        );
        Ok(())
    }

    fn init_accelerometer(&mut self) -> Result<(), ImuError> {
        let div = self.accel_config.sample_rate_div();
        self.bus
            .write_register(ACCEL_SMPLRT_DIV_1, &[((div >> 8) & 0x0F) as u8])?;
        self.bus
            .write_register(ACCEL_SMPLRT_DIV_2, &[(div & 0xFF) as u8])?;
        self.bus
            .write_register(ACCEL_CONFIG, &[self.accel_config.register_value()])?;
        Ok(())
    }

    fn init_gyroscope(&mut self) -> Result<(), ImuError> {
        self.bus
            .write_register(GYRO_SMPLRT_DIV, &[self.gyro_config.sample_rate_div])?;
        self.bus
            .write_register(GYRO_CONFIG_1, &[self.gyro_config.register_value()])?;
        Ok(())
    }

    fn settle(&mut self) -> Result<(), ImuError> {
        self.timer.delay_ms(self.device.settle_delay_ms)?;
        Ok(())
    }

    /// Read one accelerometer and gyroscope sample
    ///
    /// A single 12-byte burst from ACCEL_XOUT_H: accelerometer then
    /// gyroscope, big-endian per axis. Both axis states are updated.
    pub fn read_sample(&mut self) -> Result<(Vector3<f64>, Vector3<f64>), ImuError> {
        let mut block = [0u8; RAW_BLOCK_LEN];
        self.bus.read_into(ACCEL_XOUT_H, &mut block)?;

        let (acc_raw, gyro_raw) = decode_block(&block);
        let acc = self.acc.update_raw(acc_raw);
        let gyro = self.gyro.update_raw(gyro_raw);
        Ok((acc, gyro))
    }

    /// Device name and WHO_AM_I value (0xEA for a genuine part)
    pub fn identify(&mut self) -> Result<(&'static str, u8), ImuError> {
        let id = self.bus.read_byte(WHO_AM_I)?;
        Ok((DEVICE_NAME, id))
    }

    /// Read back the active accelerometer and gyroscope configuration
    pub fn device_config(&mut self) -> Result<ActiveConfig, ImuError> {
        let accel = self.bus.read_byte(ACCEL_CONFIG)?;
        let gyro = self.bus.read_byte(GYRO_CONFIG_1)?;
        Ok(ActiveConfig::from_registers(accel, gyro))
    }

    pub fn accelerometer(&self) -> &AxisState {
        &self.acc
    }

    pub fn gyroscope(&self) -> &AxisState {
        &self.gyro
    }

    pub fn accel_config(&self) -> &AccelConfig {
        &self.accel_config
    }

    pub fn gyro_config(&self) -> &GyroConfig {
        &self.gyro_config
    }

    pub fn device(&self) -> &DeviceConfig {
        &self.device
    }

    /// Underlying SPI bus
    pub fn spi(&self) -> &SPI {
        self.bus.spi()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

#[cfg(feature = "linux")]
impl Icm20948Driver<crate::platform::host::LinuxSpi, crate::platform::host::StdTimer> {
    /// Open `/dev/spidev{bus}.{cs}` at the configured clock, SPI mode 3
    ///
    /// # Errors
    ///
    /// `ImuError::Bus` if the device cannot be opened or configured.
    pub fn open(
        device: DeviceConfig,
        accel_config: AccelConfig,
        gyro_config: GyroConfig,
    ) -> Result<Self, ImuError> {
        let spi = crate::platform::host::LinuxSpi::open(
            device.bus_number,
            device.chip_select,
            device.spi_config(),
        )?;
        Ok(Self::new(
            spi,
            crate::platform::host::StdTimer::new(),
            device,
            accel_config,
            gyro_config,
        ))
    }
}

// =============================================================================
// ImuSensor Trait Implementation
// =============================================================================

impl<SPI, T> ImuSensor for Icm20948Driver<SPI, T>
where
    SPI: SpiInterface,
    T: TimerInterface,
{
    fn read_sample(&mut self) -> Result<(Vector3<f64>, Vector3<f64>), ImuError> {
        Icm20948Driver::read_sample(self)
    }

    fn identify(&mut self) -> Result<(&'static str, u8), ImuError> {
        Icm20948Driver::identify(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
