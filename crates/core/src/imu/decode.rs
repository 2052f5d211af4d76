//! Raw sample decoder
//!
//! The sensor returns accelerometer X/Y/Z followed by gyroscope X/Y/Z, each
//! axis as a big-endian two's complement 16-bit value.

use nalgebra::Vector3;

/// Length of the contiguous accelerometer + gyroscope data block
pub const RAW_BLOCK_LEN: usize = 12;

/// Split a raw data block into accelerometer and gyroscope counts.
///
/// Returns `(accel, gyro)` as signed 16-bit triples.
pub fn decode_block(raw: &[u8; RAW_BLOCK_LEN]) -> ([i16; 3], [i16; 3]) {
    let accel = [
        i16::from_be_bytes([raw[0], raw[1]]),
        i16::from_be_bytes([raw[2], raw[3]]),
        i16::from_be_bytes([raw[4], raw[5]]),
    ];
    let gyro = [
        i16::from_be_bytes([raw[6], raw[7]]),
        i16::from_be_bytes([raw[8], raw[9]]),
        i16::from_be_bytes([raw[10], raw[11]]),
    ];
    (accel, gyro)
}

/// Convert raw counts to physical units.
///
/// `sensitivity` is in LSB per unit (LSB/g or LSB/°/s), so each axis is divided by it.
pub fn scale(raw: [i16; 3], sensitivity: f64) -> Vector3<f64> {
    Vector3::new(
        f64::from(raw[0]) / sensitivity,
        f64::from(raw[1]) / sensitivity,
        f64::from(raw[2]) / sensitivity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_block_splits_accel_then_gyro() {
        let raw = [
            0x10, 0x00, 0x00, 0x00, 0x00, 0x10, // accel
            0xFF, 0xFF, 0x80, 0x00, 0x7F, 0xFF, // gyro
        ];
        let (accel, gyro) = decode_block(&raw);
        assert_eq!(accel, [4096, 0, 16]);
        assert_eq!(gyro, [-1, i16::MIN, i16::MAX]);
    }

    #[test]
    fn test_scale_unit_sensitivity_is_identity() {
        let v = scale([4096, 0, 16], 1.0);
        assert_eq!(v, Vector3::new(4096.0, 0.0, 16.0));
    }

    #[test]
    fn test_scale_inverts_within_one_lsb() {
        for sensitivity in [16384.0, 8192.0, 4096.0, 2048.0, 131.0, 65.5, 32.8, 16.4] {
            for raw in [i16::MIN, -12345, -1, 0, 1, 777, 16384, i16::MAX] {
                let v = scale([raw, raw, raw], sensitivity);
                let back = libm::round(v.x * sensitivity);
                assert!((back - f64::from(raw)).abs() <= 1.0);
            }
        }
    }
}
