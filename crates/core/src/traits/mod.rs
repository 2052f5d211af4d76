//! Core traits for platform-agnostic estimation.
//!
//! This module provides trait abstractions that decouple the estimation logic
//! from the host clock.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Host implementations (std `Instant`) live in the main crate

pub mod time;

pub use time::{MockTime, TimeSource};
