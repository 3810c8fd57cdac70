//! Host `struct tm` boundary
//!
//! The host RTC layer counts years from 1900 and months from 0. The MCA
//! counts absolute years and months from 1. This is the only place the two
//! conventions meet.

use crate::time::{CalendarField, CalendarTime, InvalidCalendarValue};

const TM_YEAR_BASE: i32 = 1900;

/// Broken-down time in the host convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RtcTime {
    pub tm_sec: i32,
    pub tm_min: i32,
    pub tm_hour: i32,
    pub tm_mday: i32,
    /// Months since January (0-11)
    pub tm_mon: i32,
    /// Years since 1900
    pub tm_year: i32,
    /// Days since Sunday (0-6)
    pub tm_wday: i32,
    /// Days since January 1 (0-365)
    pub tm_yday: i32,
}

impl From<CalendarTime> for RtcTime {
    fn from(t: CalendarTime) -> Self {
        Self {
            tm_sec: t.second as i32,
            tm_min: t.minute as i32,
            tm_hour: t.hour as i32,
            tm_mday: t.day as i32,
            tm_mon: t.month as i32 - 1,
            tm_year: t.year as i32 - TM_YEAR_BASE,
            tm_wday: t.weekday() as i32,
            tm_yday: t.day_of_year() as i32,
        }
    }
}

impl TryFrom<RtcTime> for CalendarTime {
    type Error = InvalidCalendarValue;

    /// `tm_wday` and `tm_yday` are ignored, as the host RTC layer does.
    fn try_from(tm: RtcTime) -> Result<Self, Self::Error> {
        fn field<T: TryFrom<i32>>(value: i32, which: CalendarField) -> Result<T, InvalidCalendarValue> {
            T::try_from(value).map_err(|_| InvalidCalendarValue(which))
        }

        let year = tm
            .tm_year
            .checked_add(TM_YEAR_BASE)
            .ok_or(InvalidCalendarValue(CalendarField::Year))?;
        let month = tm
            .tm_mon
            .checked_add(1)
            .ok_or(InvalidCalendarValue(CalendarField::Month))?;

        let t = CalendarTime {
            year: field(year, CalendarField::Year)?,
            month: field(month, CalendarField::Month)?,
            day: field(tm.tm_mday, CalendarField::Day)?,
            hour: field(tm.tm_hour, CalendarField::Hour)?,
            minute: field(tm.tm_min, CalendarField::Minute)?,
            second: field(tm.tm_sec, CalendarField::Second)?,
        };
        t.validate()?;
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_applied_at_boundary() {
        let tm = RtcTime::from(CalendarTime::new(2024, 3, 1, 12, 0, 0));
        assert_eq!(tm.tm_year, 124);
        assert_eq!(tm.tm_mon, 2);
        assert_eq!(tm.tm_mday, 1);
        assert_eq!(tm.tm_wday, 5);
        assert_eq!(tm.tm_yday, 60);
    }

    #[test]
    fn test_back_from_tm() {
        let t = CalendarTime::new(1999, 12, 31, 23, 59, 59);
        assert_eq!(CalendarTime::try_from(RtcTime::from(t)), Ok(t));
    }

    #[test]
    fn test_rejects_out_of_range_tm() {
        let tm = RtcTime {
            tm_year: 69,
            tm_mday: 1,
            ..Default::default()
        };
        assert_eq!(
            CalendarTime::try_from(tm),
            Err(InvalidCalendarValue(CalendarField::Year))
        );

        let tm = RtcTime {
            tm_year: 124,
            tm_mon: 11,
            tm_mday: 1,
            tm_hour: -1,
            ..Default::default()
        };
        assert_eq!(
            CalendarTime::try_from(tm),
            Err(InvalidCalendarValue(CalendarField::Hour))
        );
    }
}
