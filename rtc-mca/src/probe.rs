//! Attach and detach
//!
//! [`probe`] binds the RTC function of an MCA: it checks the device node,
//! starts the counter, picks the read handshake from the parent's firmware
//! info and requests the three interrupt lines. Only a missing node or a
//! failure to start the counter abort the attach; an RTC without interrupts
//! still keeps time.

use alloc::string::String;

use log::{debug, error, info};
use mca_core::regs::{RtcControl, MCA_RTC_CONTROL};
use mca_core::{McaInfo, Regmap};

use crate::attr::RtcAttribute;
use crate::driver::{IrqLine, IrqLines, McaRtc};
use crate::error::{Result, RtcError};
use crate::irq::IrqSource;
use crate::ops::RtcEventSink;

/// Driver name
pub const MCA_BASE_DRVNAME_RTC: &str = "mca-rtc";

/// Device tree compatible string
pub const MCA_RTC_COMPATIBLE: &str = "digi,mca-rtc";

/// RTC node as found under the MCA node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescription {
    pub compatible: String,
    /// `status = "okay"`
    pub available: bool,
}

impl DeviceDescription {
    pub fn new(compatible: &str, available: bool) -> Self {
        Self {
            compatible: String::from(compatible),
            available,
        }
    }
}

impl Default for DeviceDescription {
    fn default() -> Self {
        Self::new(MCA_RTC_COMPATIBLE, true)
    }
}

/// Attach-time configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcConfig {
    pub name: &'static str,
    /// Node compatible string to match
    pub compatible: &'static str,
    /// Device may wake the system
    pub wakeup: bool,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            name: MCA_BASE_DRVNAME_RTC,
            compatible: MCA_RTC_COMPATIBLE,
            wakeup: true,
        }
    }
}

/// Services of the platform the RTC is attached on
pub trait Platform {
    /// Child nodes of the MCA node
    fn child_nodes(&self) -> &[DeviceDescription];

    /// Interrupt number of a named resource
    fn irq_by_name(&self, name: &str) -> Option<u32>;

    /// Route interrupt `irq` to `source`
    fn request_irq(&self, irq: u32, source: IrqSource) -> mca_core::Result<()>;

    fn free_irq(&self, irq: u32, source: IrqSource);
}

fn find_node<'a>(nodes: &'a [DeviceDescription], compatible: &str) -> Option<&'a DeviceDescription> {
    nodes.iter().find(|n| n.compatible == compatible)
}

fn request_line<P: Platform + ?Sized>(platform: &P, source: IrqSource) -> IrqLine {
    let Some(irq) = platform.irq_by_name(source.name()) else {
        error!("mca-rtc: no {} IRQ resource", source.name());
        return IrqLine::Unavailable;
    };
    match platform.request_irq(irq, source) {
        Ok(()) => {
            debug!("mca-rtc: {} on IRQ {}", source.name(), irq);
            IrqLine::Line(irq)
        }
        Err(e) => {
            error!("mca-rtc: failed to request {} IRQ {} ({})", source.name(), irq, e);
            IrqLine::Unavailable
        }
    }
}

/// Attach the RTC function
///
/// Returns [`RtcError::NoDevice`] when the node is missing or disabled and
/// [`RtcError::Transport`] when the counter cannot be started. Interrupt
/// lines that cannot be obtained are left [`IrqLine::Unavailable`].
pub fn probe<R, E, P>(
    regmap: R,
    events: E,
    info: &McaInfo,
    platform: &P,
    config: &RtcConfig,
) -> Result<McaRtc<R, E>>
where
    R: Regmap,
    E: RtcEventSink,
    P: Platform + ?Sized,
{
    match find_node(platform.child_nodes(), config.compatible) {
        Some(node) if node.available => {}
        _ => {
            debug!("mca-rtc: no available {} node", config.compatible);
            return Err(RtcError::NoDevice);
        }
    }

    regmap
        .update_bits(
            MCA_RTC_CONTROL,
            RtcControl::RTC_EN.bits(),
            RtcControl::RTC_EN.bits(),
        )
        .map_err(|e| {
            error!("mca-rtc: failed to enable RTC ({})", e);
            RtcError::Transport(e)
        })?;

    let prepare = info.rtc_prepare_enabled();

    let mut lines = IrqLines::default();
    for source in IrqSource::ALL {
        lines.set(source, request_line(platform, source));
    }

    for attr in RtcAttribute::ALL {
        debug!("mca-rtc: attribute {} ({:o})", attr.name(), attr.mode());
    }

    info!(
        "{}: registered, {} fw {}{}",
        config.name,
        info.device_id,
        info.fw_version,
        if prepare { ", prepare enabled" } else { "" }
    );

    Ok(McaRtc::new(regmap, events, prepare)
        .with_irq_lines(lines)
        .with_wakeup(config.wakeup))
}

/// Detach the RTC function, freeing every interrupt line it obtained
pub fn remove<R, E, P>(rtc: McaRtc<R, E>, platform: &P)
where
    R: Regmap,
    E: RtcEventSink,
    P: Platform + ?Sized,
{
    for source in IrqSource::ALL {
        if let Some(irq) = rtc.irq_lines().get(source).number() {
            platform.free_irq(irq, source);
        }
    }
    debug!("mca-rtc: removed");
}
