//! MCA real-time clock driver
//!
//! Driver for the RTC function of the MCA companion microcontroller. The RTC
//! keeps a year/month/day/hour/minute/second counter and one alarm in two
//! seven-register windows, plus 1 Hz and periodic interrupts.
//!
//! - [`driver::McaRtc`] - device state, implements [`ops::RtcClassOps`]
//! - [`codec`] - register window layout and field masks
//! - [`alarm`] - one-second alarm trigger correction
//! - [`ioctl`] - update/periodic interrupt control and periodic rate
//! - [`attr`] - interrupt pin attributes
//! - [`probe`] - attach and detach
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Host RTC layer                              │
//! └───────────┬───────────────────────────────────────▲─────────────┘
//!             │ RtcClassOps                           │ RtcEventSink
//! ┌───────────▼───────────────────────────────────────┴─────────────┐
//! │                         rtc-mca                                  │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐            │
//! │  │  Codec   │ │  Alarm   │ │  Ioctl   │ │   IRQ    │            │
//! │  └──────────┘ └──────────┘ └──────────┘ └──────────┘            │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐                         │
//! │  │  Power   │ │  Attrs   │ │  Probe   │                         │
//! │  └──────────┘ └──────────┘ └──────────┘                         │
//! └──────────────────────────┬──────────────────────────────────────┘
//!                            │ Regmap (mca-core)
//! ┌──────────────────────────▼──────────────────────────────────────┐
//! │                     MCA (KL03 / KL17)                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use rtc_mca::prelude::*;
//!
//! let info = McaInfo::read(&regmap)?;
//! let rtc = probe(regmap, events, &info, &platform, &RtcConfig::default())?;
//!
//! rtc.set_time(&CalendarTime::new(2024, 3, 1, 12, 0, 0))?;
//! rtc.set_alarm(&RtcWkAlrm::new(CalendarTime::new(2024, 3, 1, 12, 5, 0), true))?;
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod alarm;
pub mod attr;
pub mod codec;
pub mod driver;
pub mod error;
pub mod ioctl;
pub mod irq;
pub mod ops;
pub mod power;
pub mod prelude;
pub mod probe;
pub mod time;
pub mod tm;

// Re-exports
pub use driver::McaRtc;
pub use error::{Result, RtcError};
pub use ops::{RtcClassOps, RtcEventSink};
pub use time::CalendarTime;
