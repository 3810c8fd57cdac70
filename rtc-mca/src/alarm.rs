//! Alarm trigger correction
//!
//! The MCA alarm fires when the counter matches the alarm registers and then
//! increments, so one second after the programmed value. Alarm times are
//! moved back by one second on the way to the hardware and forward by one
//! second on the way back, so callers see the instant the interrupt fires.

use crate::time::{CalendarField, CalendarTime, InvalidCalendarValue};

/// Delay between the alarm match and the interrupt
pub const ALARM_TRIGGER_DELAY_SECS: i64 = 1;

/// Which way an alarm time is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    /// Caller time about to be encoded into the alarm registers
    ToHardware,
    /// Alarm registers just decoded
    FromHardware,
}

/// Shift an alarm time across the trigger delay
///
/// Works on the linear timestamp so that day, month and year roll over.
/// Fails when the result leaves the representable year range.
pub fn adjust(time: CalendarTime, direction: Adjust) -> Result<CalendarTime, InvalidCalendarValue> {
    let delta = match direction {
        Adjust::ToHardware => -ALARM_TRIGGER_DELAY_SECS,
        Adjust::FromHardware => ALARM_TRIGGER_DELAY_SECS,
    };
    time.checked_add_secs(delta)
        .ok_or(InvalidCalendarValue(CalendarField::Year))
}

/// Wake alarm as seen by the host RTC layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RtcWkAlrm {
    /// Instant the alarm interrupt fires
    pub time: CalendarTime,
    /// Alarm interrupt armed
    pub enabled: bool,
    /// Alarm fired and not yet acknowledged
    pub pending: bool,
}

impl RtcWkAlrm {
    pub const fn new(time: CalendarTime, enabled: bool) -> Self {
        Self {
            time,
            enabled,
            pending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hardware_subtracts_one_second() {
        let t = CalendarTime::new(2024, 3, 1, 12, 0, 0);
        assert_eq!(
            adjust(t, Adjust::ToHardware),
            Ok(CalendarTime::new(2024, 3, 1, 11, 59, 59))
        );
    }

    #[test]
    fn test_roundtrip_across_boundaries() {
        let samples = [
            CalendarTime::new(2024, 1, 31, 23, 59, 59),
            CalendarTime::new(2024, 3, 1, 0, 0, 0),
            CalendarTime::new(2023, 12, 31, 23, 59, 59),
            CalendarTime::new(2024, 1, 1, 0, 0, 0),
            CalendarTime::new(2100, 3, 1, 0, 0, 0),
            CalendarTime::new(1970, 1, 1, 0, 0, 1),
        ];
        for t in samples {
            let hw = adjust(t, Adjust::ToHardware).unwrap();
            assert_eq!(adjust(hw, Adjust::FromHardware), Ok(t), "{}", t);
        }
    }

    #[test]
    fn test_from_hardware_rolls_into_next_month() {
        let hw = CalendarTime::new(2023, 2, 28, 23, 59, 59);
        assert_eq!(
            adjust(hw, Adjust::FromHardware),
            Ok(CalendarTime::new(2023, 3, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(
            adjust(CalendarTime::new(1970, 1, 1, 0, 0, 0), Adjust::ToHardware),
            Err(InvalidCalendarValue(CalendarField::Year))
        );
        assert_eq!(
            adjust(CalendarTime::new(65535, 12, 31, 23, 59, 59), Adjust::FromHardware),
            Err(InvalidCalendarValue(CalendarField::Year))
        );
    }
}
