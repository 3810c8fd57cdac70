//! Prelude module for convenient imports

pub use crate::error::{Error, Result};
pub use crate::firmware::{DeviceId, FwVersion, McaInfo};
pub use crate::irq::IrqResource;
pub use crate::regmap::Regmap;
pub use crate::regs::{IrqStatus0, RtcControl};

#[cfg(feature = "sim")]
pub use crate::sim::RegisterFile;
