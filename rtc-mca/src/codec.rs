//! RTC register block codec
//!
//! The counter and alarm windows share one layout: seven registers holding
//! year (low, high), month, day, hour, minute and second. Each field only
//! owns the bits of its mask; the rest of the byte may carry unrelated flags
//! and is preserved on encode and ignored on decode.

use mca_core::regs::MCA_RTC_CLOCK_DATA_LEN;

use crate::time::{CalendarTime, InvalidCalendarValue};

/// Length of a register block
pub const CLOCK_DATA_LEN: usize = MCA_RTC_CLOCK_DATA_LEN;

pub const YEAR_L_MASK: u8 = 0xFF;
pub const YEAR_H_MASK: u8 = 0xFF;
pub const MONTH_MASK: u8 = 0x0F;
pub const DAY_MASK: u8 = 0x1F;
pub const HOUR_MASK: u8 = 0x1F;
pub const MIN_MASK: u8 = 0x3F;
pub const SEC_MASK: u8 = 0x3F;

/// A field of a register block, in register order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    YearL,
    YearH,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Field {
    /// Offset from the block base
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn mask(self) -> u8 {
        match self {
            Field::YearL => YEAR_L_MASK,
            Field::YearH => YEAR_H_MASK,
            Field::Month => MONTH_MASK,
            Field::Day => DAY_MASK,
            Field::Hour => HOUR_MASK,
            Field::Minute => MIN_MASK,
            Field::Second => SEC_MASK,
        }
    }
}

/// Raw contents of the counter or alarm window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterBlock([u8; CLOCK_DATA_LEN]);

impl RegisterBlock {
    /// All-zero block
    pub const fn zeroed() -> Self {
        Self([0; CLOCK_DATA_LEN])
    }

    pub const fn from_bytes(bytes: [u8; CLOCK_DATA_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; CLOCK_DATA_LEN] {
        &self.0
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8; CLOCK_DATA_LEN] {
        &mut self.0
    }

    /// Field value with foreign bits masked off
    pub const fn field(&self, field: Field) -> u8 {
        self.0[field.index()] & field.mask()
    }

    /// Replace the field bits, leaving the rest of the byte untouched
    pub fn set_field(&mut self, field: Field, value: u8) {
        let byte = &mut self.0[field.index()];
        *byte = (*byte & !field.mask()) | (value & field.mask());
    }

    pub const fn year(&self) -> u16 {
        ((self.field(Field::YearH) as u16) << 8) | self.field(Field::YearL) as u16
    }

    pub fn set_year(&mut self, year: u16) {
        let [lo, hi] = year.to_le_bytes();
        self.set_field(Field::YearL, lo);
        self.set_field(Field::YearH, hi);
    }
}

/// Build a calendar time from a register block and validate it
pub fn decode(block: &RegisterBlock) -> Result<CalendarTime, InvalidCalendarValue> {
    let time = CalendarTime {
        year: block.year(),
        month: block.field(Field::Month),
        day: block.field(Field::Day),
        hour: block.field(Field::Hour),
        minute: block.field(Field::Minute),
        second: block.field(Field::Second),
    };
    time.validate()?;
    Ok(time)
}

/// Store a calendar time into `block`, preserving bits outside every field mask
pub fn encode(time: &CalendarTime, block: &mut RegisterBlock) {
    block.set_year(time.year);
    block.set_field(Field::Month, time.month);
    block.set_field(Field::Day, time.day);
    block.set_field(Field::Hour, time.hour);
    block.set_field(Field::Minute, time.minute);
    block.set_field(Field::Second, time.second);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::CalendarField;

    fn encoded(t: &CalendarTime) -> RegisterBlock {
        let mut block = RegisterBlock::zeroed();
        encode(t, &mut block);
        block
    }

    #[test]
    fn test_layout() {
        let block = encoded(&CalendarTime::new(2024, 3, 1, 12, 34, 56));
        assert_eq!(block.as_bytes(), &[0xE8, 0x07, 3, 1, 12, 34, 56]);
    }

    #[test]
    fn test_roundtrip_edges() {
        let samples = [
            CalendarTime::new(1970, 1, 1, 0, 0, 0),
            CalendarTime::new(2000, 2, 29, 23, 59, 59),
            CalendarTime::new(2024, 12, 31, 12, 30, 45),
            CalendarTime::new(65535, 12, 31, 23, 59, 59),
        ];
        for t in samples {
            assert_eq!(decode(&encoded(&t)), Ok(t));
        }
    }

    #[test]
    fn test_encode_preserves_foreign_bits() {
        let mut block = RegisterBlock::from_bytes([0, 0, 0xF0, 0xE0, 0xE0, 0xC0, 0xC0]);
        encode(&CalendarTime::new(2024, 3, 1, 12, 34, 56), &mut block);

        assert_eq!(block.as_bytes()[2], 0xF0 | 3);
        assert_eq!(block.as_bytes()[3], 0xE0 | 1);
        assert_eq!(block.as_bytes()[4], 0xE0 | 12);
        assert_eq!(block.as_bytes()[5], 0xC0 | 34);
        assert_eq!(block.as_bytes()[6], 0xC0 | 56);
    }

    #[test]
    fn test_encode_clears_previous_field_bits() {
        let mut block = encoded(&CalendarTime::new(2031, 12, 31, 23, 59, 59));
        encode(&CalendarTime::new(2024, 1, 2, 3, 4, 5), &mut block);
        assert_eq!(decode(&block), Ok(CalendarTime::new(2024, 1, 2, 3, 4, 5)));
    }

    #[test]
    fn test_decode_ignores_foreign_bits() {
        let mut block = encoded(&CalendarTime::new(2024, 3, 1, 12, 34, 56));
        for field in [Field::Month, Field::Day, Field::Hour, Field::Minute, Field::Second] {
            block.as_mut_bytes()[field.index()] |= !field.mask();
        }
        assert_eq!(decode(&block), Ok(CalendarTime::new(2024, 3, 1, 12, 34, 56)));
    }

    #[test]
    fn test_decode_rejects_invalid_content() {
        let block = RegisterBlock::from_bytes([0xE7, 0x07, 2, 30, 0, 0, 0]);
        assert_eq!(decode(&block), Err(InvalidCalendarValue(CalendarField::Day)));

        let block = RegisterBlock::from_bytes([0xE8, 0x07, 13, 1, 0, 0, 0]);
        assert_eq!(decode(&block), Err(InvalidCalendarValue(CalendarField::Month)));

        let block = RegisterBlock::zeroed();
        assert_eq!(decode(&block), Err(InvalidCalendarValue(CalendarField::Year)));
    }
}
