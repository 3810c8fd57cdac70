//! Interrupt dispatch

use log::warn;
use mca_core::irq::{
    MCA_IRQ_RTC_1HZ_NAME, MCA_IRQ_RTC_ALARM_NAME, MCA_IRQ_RTC_PERIODIC_IRQ_NAME,
};
use mca_core::Regmap;

use crate::driver::McaRtc;
use crate::ops::{RtcEvent, RtcEventSink};

/// RTC interrupt source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqSource {
    Alarm,
    OneHz,
    Periodic,
}

impl IrqSource {
    pub const ALL: [IrqSource; 3] = [IrqSource::Alarm, IrqSource::OneHz, IrqSource::Periodic];

    /// Interrupt resource name on the parent device
    pub const fn name(self) -> &'static str {
        match self {
            IrqSource::Alarm => MCA_IRQ_RTC_ALARM_NAME,
            IrqSource::OneHz => MCA_IRQ_RTC_1HZ_NAME,
            IrqSource::Periodic => MCA_IRQ_RTC_PERIODIC_IRQ_NAME,
        }
    }

    pub const fn event(self) -> RtcEvent {
        match self {
            IrqSource::Alarm => RtcEvent::AlarmFired,
            IrqSource::OneHz => RtcEvent::UpdateTick,
            IrqSource::Periodic => RtcEvent::PeriodicTick,
        }
    }
}

/// Interrupt handler result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqReturn {
    Handled,
}

impl<R: Regmap, E: RtcEventSink> McaRtc<R, E> {
    /// Forward one interrupt to the host RTC layer
    ///
    /// Always reports the interrupt as handled. A failed notification is
    /// logged and dropped.
    pub fn handle_interrupt(&self, source: IrqSource) -> IrqReturn {
        let event = source.event();
        if let Err(e) = self.events().notify(event, 1) {
            warn!("mca-rtc: {} event dropped ({})", source.name(), e);
        }
        IrqReturn::Handled
    }
}
