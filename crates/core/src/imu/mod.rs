//! IMU sample types and raw data decoding
//!
//! Platform-independent pieces of the inertial sensor pipeline: turning the
//! raw 12-byte accelerometer/gyroscope block into physical vectors and keeping
//! per-axis history. Bus access lives in the driver crate.

pub mod axis;
pub mod decode;
pub mod sample;

pub use axis::AxisState;
pub use decode::{decode_block, scale, RAW_BLOCK_LEN};
pub use sample::ImuSample;
