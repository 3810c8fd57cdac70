//! MCA companion microcontroller core
//!
//! The MCA is a small microcontroller sitting next to the application
//! processor. It provides RTC, watchdog, GPIO, ADC and power-key functions,
//! all behind one register map reached over I2C. This crate holds what every
//! function driver shares:
//!
//! - [`regmap::Regmap`] - register transport the function drivers talk through
//! - [`regs`] - register addresses and bit definitions
//! - [`firmware::McaInfo`] - part/firmware identification and feature gating
//! - [`irq`] - MCA interrupt numbers and per-function resources
//! - [`sim::RegisterFile`] - in-memory register file (`sim` feature)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Function drivers (rtc-mca, ...)                     │
//! └──────────────────────────┬──────────────────────────────────────┘
//!                            │ Regmap
//! ┌──────────────────────────▼──────────────────────────────────────┐
//! │                         mca-core                                 │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐            │
//! │  │  Regmap  │ │   Regs   │ │ Firmware │ │   IRQ    │            │
//! │  └────┬─────┘ └──────────┘ └──────────┘ └──────────┘            │
//! └───────┼─────────────────────────────────────────────────────────┘
//!         │ I2C transactions (serialized by the bus driver)
//! ┌───────▼─────────────────────────────────────────────────────────┐
//! │                     MCA (KL03 / KL17)                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod firmware;
pub mod irq;
pub mod prelude;
pub mod regmap;
pub mod regs;

#[cfg(feature = "sim")]
pub mod sim;

// Re-exports
pub use error::{Error, Result};
pub use firmware::{DeviceId, FwVersion, McaInfo};
pub use regmap::Regmap;
