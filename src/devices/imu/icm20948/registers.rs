//! ICM-20948 Register Definitions
//!
//! The ICM-20948 uses a 4-bank register architecture, with bank selection
//! via the REG_BANK_SEL register (0x7F) in all banks. Only the registers
//! needed for accelerometer/gyroscope acquisition are listed.
//!
//! A logical register id is a `u16`: bank in the high byte, address in the
//! low byte.
//!
//! ## Register Banks
//!
//! - Bank 0: User configuration and sensor data
//! - Bank 1: Self-test
//! - Bank 2: Sensor configuration (gyro/accel ranges, DLPF)
//! - Bank 3: I2C master configuration

/// Register bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterBank {
    Bank0 = 0,
    Bank1 = 1,
    Bank2 = 2,
    Bank3 = 3,
}

impl RegisterBank {
    /// Bank from its index; only the low two bits are significant
    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => RegisterBank::Bank0,
            1 => RegisterBank::Bank1,
            2 => RegisterBank::Bank2,
            _ => RegisterBank::Bank3,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Value written to REG_BANK_SEL to select this bank
    pub const fn select_value(self) -> u8 {
        (self.index() << 4) & 0x30
    }
}

/// Logical register id (bank << 8 | address)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u16);

impl Register {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u16 {
        self.0
    }

    pub const fn bank(self) -> RegisterBank {
        RegisterBank::from_index((self.0 >> 8) as u8)
    }

    pub const fn address(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

// =============================================================================
// SPI Framing
// =============================================================================

/// Register address bits on the wire
pub const ADDRESS_MASK: u8 = 0x7F;

/// Read flag set in the first byte of a read transaction
pub const READ_FLAG: u8 = 0x80;

// =============================================================================
// Bank Selection
// =============================================================================

/// Register bank selection (available in all banks at 0x7F)
pub const REG_BANK_SEL: u8 = 0x7F;

// =============================================================================
// Bank 0 Registers (User Bank)
// =============================================================================

/// Device ID (WHO_AM_I)
pub const WHO_AM_I: Register = Register::new(0x0000);

/// Power management 1
pub const PWR_MGMT_1: Register = Register::new(0x0006);

/// Power management 2
pub const PWR_MGMT_2: Register = Register::new(0x0007);

/// Accelerometer X output high byte; start of the 12-byte sample block
pub const ACCEL_XOUT_H: Register = Register::new(0x002D);

/// Gyroscope X output high byte
pub const GYRO_XOUT_H: Register = Register::new(0x0033);

// =============================================================================
// Bank 2 Registers (Sensor Configuration)
// =============================================================================

/// Gyroscope sample rate divider
pub const GYRO_SMPLRT_DIV: Register = Register::new(0x0200);

/// Gyroscope configuration 1
pub const GYRO_CONFIG_1: Register = Register::new(0x0201);

/// Accelerometer sample rate divider high nibble
pub const ACCEL_SMPLRT_DIV_1: Register = Register::new(0x0210);

/// Accelerometer sample rate divider low byte
pub const ACCEL_SMPLRT_DIV_2: Register = Register::new(0x0211);

/// Accelerometer configuration
pub const ACCEL_CONFIG: Register = Register::new(0x0214);

// =============================================================================
// WHO_AM_I Values
// =============================================================================

/// ICM-20948 WHO_AM_I expected value
pub const ICM20948_WHO_AM_I_VALUE: u8 = 0xEA;

// =============================================================================
// PWR_MGMT_1 / PWR_MGMT_2 Bit Definitions
// =============================================================================

/// Device reset bit
pub const PWR_MGMT_1_DEVICE_RESET: u8 = 0x80;

/// Sleep mode bit
pub const PWR_MGMT_1_SLEEP: u8 = 0x40;

/// Enable all accelerometer and gyroscope axes
pub const PWR_MGMT_2_ENABLE_ALL: u8 = 0x00;

// =============================================================================
// ACCEL_CONFIG / GYRO_CONFIG_1 Fields
// =============================================================================

/// DLPF enable bit (FCHOICE)
pub const FCHOICE: u8 = 0x01;

/// Full-scale select field
pub const FS_SEL_MASK: u8 = 0x06;
pub const FS_SEL_SHIFT: u8 = 1;

/// DLPF configuration field
pub const DLPFCFG_MASK: u8 = 0x38;
pub const DLPFCFG_SHIFT: u8 = 3;

// =============================================================================
// Sensitivity Values
// =============================================================================

/// Accelerometer sensitivity (LSB/g) by sensitivity level: ±2, ±4, ±8, ±16 g
pub const ACCEL_SENSITIVITY: [f64; 4] = [16384.0, 8192.0, 4096.0, 2048.0];

/// Gyroscope sensitivity (LSB/°/s) by full-scale index: ±250, ±500, ±1000, ±2000 °/s
pub const GYRO_SENSITIVITY: [f64; 4] = [131.0, 65.5, 32.8, 16.4];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_split() {
        assert_eq!(ACCEL_CONFIG.bank(), RegisterBank::Bank2);
        assert_eq!(ACCEL_CONFIG.address(), 0x14);
        assert_eq!(WHO_AM_I.bank(), RegisterBank::Bank0);
        assert_eq!(GYRO_XOUT_H.address(), 0x33);
    }

    #[test]
    fn test_select_values() {
        assert_eq!(RegisterBank::Bank0.select_value(), 0x00);
        assert_eq!(RegisterBank::Bank1.select_value(), 0x10);
        assert_eq!(RegisterBank::Bank2.select_value(), 0x20);
        assert_eq!(RegisterBank::Bank3.select_value(), 0x30);
    }

    #[test]
    fn test_gyro_block_follows_accel_block() {
        assert_eq!(GYRO_XOUT_H.address() - ACCEL_XOUT_H.address(), 6);
    }
}
