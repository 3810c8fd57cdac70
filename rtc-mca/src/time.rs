//! Calendar time as counted by the MCA
//!
//! The MCA keeps an absolute year and a 1-based month, so [`CalendarTime`]
//! does too. Conversion to the host `struct tm` convention lives in
//! [`crate::tm`].

use core::fmt;

/// First year accepted by the host RTC layer
pub const EPOCH_YEAR: u16 = 1970;

pub const SECS_PER_DAY: i64 = 86_400;

/// Julian day number of 1970-01-01
const UNIX_EPOCH_JDN: i64 = 2_440_588;

/// Calendar field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// A calendar time whose fields are out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCalendarValue(pub CalendarField);

impl fmt::Display for InvalidCalendarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid calendar value ({:?})", self.0)
    }
}

/// UTC-naive date and time
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarTime {
    /// Absolute year (1970-65535)
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl Default for CalendarTime {
    fn default() -> Self {
        Self::new(EPOCH_YEAR, 1, 1, 0, 0, 0)
    }
}

impl CalendarTime {
    /// Create a new calendar time, unchecked
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Check every field, reporting the first one out of range
    pub fn validate(&self) -> Result<(), InvalidCalendarValue> {
        let field = if self.year < EPOCH_YEAR {
            CalendarField::Year
        } else if !(1..=12).contains(&self.month) {
            CalendarField::Month
        } else if self.day < 1 || self.day > days_in_month(self.year, self.month) {
            CalendarField::Day
        } else if self.hour > 23 {
            CalendarField::Hour
        } else if self.minute > 59 {
            CalendarField::Minute
        } else if self.second > 59 {
            CalendarField::Second
        } else {
            return Ok(());
        };
        Err(InvalidCalendarValue(field))
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Seconds since 1970-01-01 00:00:00
    ///
    /// Only meaningful for a valid time.
    pub fn to_unix_timestamp(&self) -> i64 {
        days_since_epoch(self.year, self.month, self.day) * SECS_PER_DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64
    }

    /// Create from seconds since 1970-01-01 00:00:00
    ///
    /// Returns `None` before the epoch or past year 65535.
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        if timestamp < 0 {
            return None;
        }
        let days = timestamp / SECS_PER_DAY;
        let remaining = timestamp % SECS_PER_DAY;
        let (year, month, day) = date_from_days(days);

        Some(Self {
            year: u16::try_from(year).ok()?,
            month,
            day,
            hour: (remaining / 3600) as u8,
            minute: ((remaining % 3600) / 60) as u8,
            second: (remaining % 60) as u8,
        })
    }

    /// Move by a signed number of seconds, rolling over every calendar field
    pub fn checked_add_secs(&self, secs: i64) -> Option<Self> {
        Self::from_unix_timestamp(self.to_unix_timestamp().checked_add(secs)?)
    }

    /// Day of week (0=Sunday, 6=Saturday)
    pub fn weekday(&self) -> u8 {
        // Jan 1, 1970 was Thursday (4)
        ((days_since_epoch(self.year, self.month, self.day) + 4).rem_euclid(7)) as u8
    }

    /// Day of year, 0-based
    pub fn day_of_year(&self) -> u16 {
        (days_since_epoch(self.year, self.month, self.day) - days_since_epoch(self.year, 1, 1))
            as u16
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalendarTime {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u16:04}-{=u8:02}-{=u8:02} {=u8:02}:{=u8:02}:{=u8:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        );
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`, 0 for an invalid month
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days between 1970-01-01 and the given date, via the Julian day number
fn days_since_epoch(year: u16, month: u8, day: u8) -> i64 {
    let a = (14 - month as i64) / 12;
    let y = year as i64 + 4800 - a;
    let m = month as i64 + 12 * a - 3;

    let jdn = day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;

    jdn - UNIX_EPOCH_JDN
}

/// Convert non-negative days since epoch to (year, month, day)
fn date_from_days(days: i64) -> (i64, u8, u8) {
    let jdn = days + UNIX_EPOCH_JDN;

    let a = jdn + 32044;
    let b = (4 * a + 3) / 146_097;
    let c = a - 146_097 * b / 4;
    let d = (4 * c + 3) / 1461;
    let e = c - 1461 * d / 4;
    let m = (5 * e + 2) / 153;

    let day = (e - (153 * m + 2) / 5 + 1) as u8;
    let month = (m + 3 - 12 * (m / 10)) as u8;
    let year = 100 * b + d - 4800 + m / 10;

    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_zero() {
        assert_eq!(CalendarTime::default().to_unix_timestamp(), 0);
        assert_eq!(
            CalendarTime::from_unix_timestamp(0),
            Some(CalendarTime::new(1970, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_known_timestamp() {
        let t = CalendarTime::new(2024, 3, 1, 12, 0, 0);
        assert_eq!(t.to_unix_timestamp(), 1_709_294_400);
        assert_eq!(CalendarTime::from_unix_timestamp(1_709_294_400), Some(t));
    }

    #[test]
    fn test_leap_days() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_validate_reports_field() {
        let bad_day = CalendarTime::new(2023, 2, 29, 0, 0, 0);
        assert_eq!(bad_day.validate(), Err(InvalidCalendarValue(CalendarField::Day)));

        let bad_month = CalendarTime::new(2023, 0, 1, 0, 0, 0);
        assert_eq!(bad_month.validate(), Err(InvalidCalendarValue(CalendarField::Month)));

        let pre_epoch = CalendarTime::new(1969, 12, 31, 23, 59, 59);
        assert_eq!(pre_epoch.validate(), Err(InvalidCalendarValue(CalendarField::Year)));

        let bad_second = CalendarTime::new(2023, 1, 1, 0, 0, 60);
        assert_eq!(bad_second.validate(), Err(InvalidCalendarValue(CalendarField::Second)));

        assert!(CalendarTime::new(65535, 12, 31, 23, 59, 59).is_valid());
    }

    #[test]
    fn test_add_secs_rolls_over_year() {
        let t = CalendarTime::new(2023, 12, 31, 23, 59, 59);
        assert_eq!(t.checked_add_secs(1), Some(CalendarTime::new(2024, 1, 1, 0, 0, 0)));
        assert_eq!(
            CalendarTime::new(2024, 3, 1, 0, 0, 0).checked_add_secs(-1),
            Some(CalendarTime::new(2024, 2, 29, 23, 59, 59))
        );
    }

    #[test]
    fn test_add_secs_out_of_range() {
        assert_eq!(CalendarTime::default().checked_add_secs(-1), None);
        assert_eq!(
            CalendarTime::new(65535, 12, 31, 23, 59, 59).checked_add_secs(1),
            None
        );
    }

    #[test]
    fn test_weekday_and_yday() {
        // 2024-03-01 was a Friday
        let t = CalendarTime::new(2024, 3, 1, 0, 0, 0);
        assert_eq!(t.weekday(), 5);
        assert_eq!(t.day_of_year(), 60);
        assert_eq!(CalendarTime::default().weekday(), 4);
    }

    #[test]
    fn test_display() {
        let t = CalendarTime::new(2024, 3, 1, 9, 5, 7);
        assert_eq!(std::format!("{}", t), "2024-03-01 09:05:07");
    }
}
