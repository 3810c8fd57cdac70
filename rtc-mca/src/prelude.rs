//! Prelude module for convenient imports

pub use crate::alarm::RtcWkAlrm;
pub use crate::attr::RtcAttribute;
pub use crate::driver::{IrqLine, McaRtc};
pub use crate::error::{Result, RtcError};
pub use crate::ioctl::IoctlReply;
pub use crate::irq::{IrqReturn, IrqSource};
pub use crate::ops::{RtcClassOps, RtcEvent, RtcEventSink};
pub use crate::probe::{probe, remove, DeviceDescription, Platform, RtcConfig};
pub use crate::time::CalendarTime;
pub use crate::tm::RtcTime;

pub use mca_core::{McaInfo, Regmap};
