//! Suspend, resume and power-off hooks
//!
//! When the device is not allowed to wake the system, an armed alarm is muted
//! in hardware for the duration of the sleep and restored on resume. The
//! runtime armed flag is left alone so that resume knows what to restore.
//! Failures are logged and never stop the transition.

use log::{debug, error};
use mca_core::Regmap;

use crate::driver::McaRtc;
use crate::ops::RtcEventSink;

impl<R: Regmap, E: RtcEventSink> McaRtc<R, E> {
    fn alarm_needs_muting(&self) -> bool {
        !self.may_wakeup() && self.is_alarm_armed()
    }

    pub fn suspend(&self) {
        if !self.alarm_needs_muting() {
            return;
        }
        debug!("mca-rtc: muting alarm for suspend");
        if let Err(e) = self.stop_alarm() {
            error!("mca-rtc: failed to disable RTC alarm ({})", e);
        }
    }

    pub fn resume(&self) {
        if !self.alarm_needs_muting() {
            return;
        }
        debug!("mca-rtc: restoring alarm after resume");
        if let Err(e) = self.start_alarm() {
            error!("mca-rtc: failed to restart RTC alarm ({})", e);
        }
    }

    /// Same policy as [`suspend`](Self::suspend)
    pub fn poweroff(&self) {
        self.suspend();
    }
}
