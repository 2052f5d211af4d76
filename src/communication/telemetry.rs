//! Telemetry record
//!
//! One JSON object per estimate. Angles are written with exactly two
//! decimals; `dT` and `T` are integer nanoseconds.
//!
//! ```text
//! {"accRoll":1.23,"accPitch":-4.56,"accYaw":0.00,"gyroRoll":0.10,...,"dT":5000000,"T":1718000000000000000}
//! ```

use attitude_stream_core::ahrs::ImuRotations;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// Angle serialised as a JSON number with two decimals
///
/// Non-finite values have no JSON representation and become `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed2(pub f64);

impl Serialize for Fixed2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            return serializer.serialize_none();
        }
        let raw = RawValue::from_string(format!("{:.2}", self.0))
            .map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// Wire form of [`ImuRotations`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    pub acc_roll: Fixed2,
    pub acc_pitch: Fixed2,
    pub acc_yaw: Fixed2,
    pub gyro_roll: Fixed2,
    pub gyro_pitch: Fixed2,
    pub gyro_yaw: Fixed2,
    pub roll: Fixed2,
    pub pitch: Fixed2,
    pub yaw: Fixed2,
    /// Read interval (ns)
    #[serde(rename = "dT")]
    pub read_interval_ns: u64,
    /// Read timestamp (ns)
    #[serde(rename = "T")]
    pub read_time_ns: u64,
}

impl From<&ImuRotations> for TelemetryRecord {
    fn from(r: &ImuRotations) -> Self {
        Self {
            acc_roll: Fixed2(r.acc.roll),
            acc_pitch: Fixed2(r.acc.pitch),
            acc_yaw: Fixed2(r.acc.yaw),
            gyro_roll: Fixed2(r.gyro.roll),
            gyro_pitch: Fixed2(r.gyro.pitch),
            gyro_yaw: Fixed2(r.gyro.yaw),
            roll: Fixed2(r.rotations.roll),
            pitch: Fixed2(r.rotations.pitch),
            yaw: Fixed2(r.rotations.yaw),
            read_interval_ns: u64::try_from(r.read_interval.as_nanos()).unwrap_or(u64::MAX),
            read_time_ns: r.read_time_ns,
        }
    }
}

/// Serialise one estimate as a single-line JSON object
pub fn to_json(rotations: &ImuRotations) -> Result<String, serde_json::Error> {
    serde_json::to_string(&TelemetryRecord::from(rotations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use attitude_stream_core::ahrs::Rotations;
    use core::time::Duration;
    use serde_json::Value;

    fn sample() -> ImuRotations {
        ImuRotations {
            acc: Rotations::new(1.234, -45.678, 0.0),
            gyro: Rotations::new(0.1, 0.2, 0.1),
            rotations: Rotations::new(1.234, -45.678, 0.0),
            read_interval: Duration::from_millis(5),
            read_time_ns: 1_718_000_000_123_456_789,
        }
    }

    #[test]
    fn test_keys_and_order() {
        let json = to_json(&sample()).unwrap();
        let keys = [
            "accRoll", "accPitch", "accYaw", "gyroRoll", "gyroPitch", "gyroYaw", "roll", "pitch",
            "yaw", "dT", "T",
        ];
        let mut last = 0;
        for key in keys {
            let pos = json.find(&format!("\"{}\":", key)).unwrap();
            assert!(pos >= last, "{} out of order in {}", key, json);
            last = pos;
        }
    }

    #[test]
    fn test_angles_have_two_decimals() {
        let json = to_json(&sample()).unwrap();
        assert!(json.contains("\"accRoll\":1.23,"));
        assert!(json.contains("\"accPitch\":-45.68,"));
        assert!(json.contains("\"accYaw\":0.00,"));
        assert!(json.contains("\"gyroPitch\":0.20,"));
    }

    #[test]
    fn test_times_are_integers() {
        let value: Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        assert_eq!(value["dT"].as_u64(), Some(5_000_000));
        assert_eq!(value["T"].as_u64(), Some(1_718_000_000_123_456_789));
    }

    #[test]
    fn test_non_finite_angle_is_null() {
        let mut rotations = sample();
        rotations.gyro.yaw = f64::NAN;
        let value: Value = serde_json::from_str(&to_json(&rotations).unwrap()).unwrap();
        assert!(value["gyroYaw"].is_null());
        assert_eq!(value["roll"].as_f64(), Some(1.23));
    }
}
