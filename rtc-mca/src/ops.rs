//! Host RTC layer interface
//!
//! [`RtcClassOps`] is what the host RTC layer calls into; [`RtcEventSink`] is
//! what the driver calls back when an interrupt fires.

use core::fmt;

use bitflags::bitflags;

use crate::alarm::RtcWkAlrm;
use crate::error::Result;
use crate::ioctl::IoctlReply;
use crate::time::CalendarTime;

bitflags! {
    /// Event flags reported with an RTC interrupt
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RtcIrqFlags: u32 {
        /// Any interrupt
        const IRQF = 0x80;
        /// Periodic interrupt
        const PF = 0x40;
        /// Alarm interrupt
        const AF = 0x20;
        /// Update (1 Hz) interrupt
        const UF = 0x10;
    }
}

/// Event delivered to the host RTC layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcEvent {
    AlarmFired,
    UpdateTick,
    PeriodicTick,
}

impl RtcEvent {
    pub const fn flags(&self) -> RtcIrqFlags {
        match self {
            RtcEvent::AlarmFired => RtcIrqFlags::IRQF.union(RtcIrqFlags::AF),
            RtcEvent::UpdateTick => RtcIrqFlags::UF,
            RtcEvent::PeriodicTick => RtcIrqFlags::PF,
        }
    }
}

/// Notification could not be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyError {
    /// Host RTC device not registered (yet, or any more)
    Unregistered,
    /// Event queue full
    Busy,
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Unregistered => write!(f, "rtc device not registered"),
            NotifyError::Busy => write!(f, "rtc event queue busy"),
        }
    }
}

/// Receiver of RTC events
pub trait RtcEventSink {
    /// Report `count` occurrences of `event`
    fn notify(&self, event: RtcEvent, count: u32) -> core::result::Result<(), NotifyError>;
}

impl<T: RtcEventSink + ?Sized> RtcEventSink for &T {
    fn notify(&self, event: RtcEvent, count: u32) -> core::result::Result<(), NotifyError> {
        (**self).notify(event, count)
    }
}

impl<T: RtcEventSink + ?Sized> RtcEventSink for alloc::sync::Arc<T> {
    fn notify(&self, event: RtcEvent, count: u32) -> core::result::Result<(), NotifyError> {
        (**self).notify(event, count)
    }
}

/// Operations the host RTC layer invokes on a registered device
pub trait RtcClassOps {
    /// Read the running clock
    fn read_time(&self) -> Result<CalendarTime>;

    /// Set the running clock
    fn set_time(&self, time: &CalendarTime) -> Result<()>;

    /// Read the alarm with its armed and pending state
    fn read_alarm(&self) -> Result<RtcWkAlrm>;

    /// Program the alarm, then arm or disarm it
    fn set_alarm(&self, alarm: &RtcWkAlrm) -> Result<()>;

    /// Arm or disarm the alarm interrupt
    fn alarm_irq_enable(&self, enabled: bool) -> Result<()>;

    /// Device specific ioctl
    fn ioctl(&self, cmd: u32, arg: u64) -> Result<IoctlReply>;
}
