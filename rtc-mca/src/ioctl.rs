//! Legacy RTC ioctls
//!
//! The driver answers the standard update/periodic interrupt ioctls shifted by
//! [`RTC_IOCTL_DIGI`], so they reach the driver instead of being handled by the
//! generic RTC layer.

use crate::error::{Result, RtcError};

/// Offset added to the standard RTC ioctl numbers
pub const RTC_IOCTL_DIGI: u32 = 0x100;

/// Periodic interrupt timebase, ticks per second
pub const PERIODIC_TICKS_PER_SEC: u32 = 1024;

const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = 8;
const IOC_SIZESHIFT: u32 = 16;
const IOC_DIRSHIFT: u32 = 30;

const IOC_NONE: u32 = 0;
const IOC_WRITE: u32 = 1;
const IOC_READ: u32 = 2;

const RTC_IOC_TYPE: u32 = b'p' as u32;
const ULONG_SIZE: u32 = core::mem::size_of::<core::ffi::c_ulong>() as u32;

const fn ioc(dir: u32, ty: u32, nr: u32, size: u32) -> u32 {
    (dir << IOC_DIRSHIFT) | (ty << IOC_TYPESHIFT) | (nr << IOC_NRSHIFT) | (size << IOC_SIZESHIFT)
}

pub const RTC_UIE_ON: u32 = ioc(IOC_NONE, RTC_IOC_TYPE, 0x03, 0);
pub const RTC_UIE_OFF: u32 = ioc(IOC_NONE, RTC_IOC_TYPE, 0x04, 0);
pub const RTC_PIE_ON: u32 = ioc(IOC_NONE, RTC_IOC_TYPE, 0x05, 0);
pub const RTC_PIE_OFF: u32 = ioc(IOC_NONE, RTC_IOC_TYPE, 0x06, 0);
pub const RTC_IRQP_READ: u32 = ioc(IOC_READ, RTC_IOC_TYPE, 0x0b, ULONG_SIZE);
pub const RTC_IRQP_SET: u32 = ioc(IOC_WRITE, RTC_IOC_TYPE, 0x0c, ULONG_SIZE);

pub const RTC_MCA_UIE_ON: u32 = RTC_IOCTL_DIGI + RTC_UIE_ON;
pub const RTC_MCA_UIE_OFF: u32 = RTC_IOCTL_DIGI + RTC_UIE_OFF;
pub const RTC_MCA_PIE_ON: u32 = RTC_IOCTL_DIGI + RTC_PIE_ON;
pub const RTC_MCA_PIE_OFF: u32 = RTC_IOCTL_DIGI + RTC_PIE_OFF;
pub const RTC_MCA_IRQP_READ: u32 = RTC_IOCTL_DIGI + RTC_IRQP_READ;
pub const RTC_MCA_IRQP_SET: u32 = RTC_IOCTL_DIGI + RTC_IRQP_SET;

/// Decoded driver ioctl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoctlCmd {
    /// 1 Hz update interrupt on/off
    UpdateIrq(bool),
    /// Periodic interrupt on/off
    PeriodicIrq(bool),
    /// Read the periodic rate in Hz
    ReadFrequency,
    /// Set the periodic rate in Hz
    SetFrequency(u64),
}

impl IoctlCmd {
    /// Decode a command number and its argument
    pub fn decode(cmd: u32, arg: u64) -> Result<Self> {
        match cmd {
            RTC_MCA_UIE_ON => Ok(IoctlCmd::UpdateIrq(true)),
            RTC_MCA_UIE_OFF => Ok(IoctlCmd::UpdateIrq(false)),
            RTC_MCA_PIE_ON => Ok(IoctlCmd::PeriodicIrq(true)),
            RTC_MCA_PIE_OFF => Ok(IoctlCmd::PeriodicIrq(false)),
            RTC_MCA_IRQP_READ => Ok(IoctlCmd::ReadFrequency),
            RTC_MCA_IRQP_SET => Ok(IoctlCmd::SetFrequency(arg)),
            _ => Err(RtcError::Unsupported),
        }
    }
}

/// Outcome of a successful ioctl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoctlReply {
    Done,
    /// Value to copy back to the caller
    Frequency(u64),
}

/// Periodic rate for a tick register value
///
/// `None` for a zero register and for periods longer than one second, which
/// would read back as 0 Hz.
pub const fn hz_from_ticks(ticks: u16) -> Option<u32> {
    if ticks == 0 || ticks as u32 > PERIODIC_TICKS_PER_SEC {
        None
    } else {
        Some(PERIODIC_TICKS_PER_SEC / ticks as u32)
    }
}

/// Tick register value for a rate, `None` outside 1..=1024 Hz
pub const fn ticks_from_hz(hz: u64) -> Option<u16> {
    if hz == 0 || hz > PERIODIC_TICKS_PER_SEC as u64 {
        None
    } else {
        Some((PERIODIC_TICKS_PER_SEC as u64 / hz) as u16)
    }
}
