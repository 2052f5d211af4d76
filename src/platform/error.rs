//! Platform error types
//!
//! This module defines error types for platform operations.

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their backend-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// SPI operation failed
    #[error("SPI error: {0:?}")]
    Spi(SpiError),
    /// Timer operation failed
    #[error("Timer error: {0:?}")]
    Timer(TimerError),
    /// Peripheral could not be opened
    #[error("Platform initialization failed")]
    InitializationFailed,
    /// Invalid configuration provided
    #[error("Invalid configuration")]
    InvalidConfig,
}

/// SPI-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiError {
    /// Transfer failed
    TransferFailed,
    /// Write and read buffers differ in length
    LengthMismatch,
    /// Bus could not be configured (mode, speed, word size)
    ConfigurationFailed,
}

/// Timer-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Invalid duration
    InvalidDuration,
}
