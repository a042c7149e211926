//! Pharos Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the Pharos display
//! drivers are written against. A driver holds a bus capability and a
//! delay capability instead of chip-specific peripheral handles, so the
//! same driver code runs on any platform that can provide the two.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Driver (pharos-display)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pharos-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  platform impls, or any embedded-hal    │
//! │  1.0 peripheral via the adapter types   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`delay::DelayMs`] - millisecond busy-wait / sleep

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use delay::{DelayMs, EmbeddedHalDelay};
pub use i2c::{EmbeddedHalI2c, I2cBus};
