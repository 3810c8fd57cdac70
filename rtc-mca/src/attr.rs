//! Device attributes
//!
//! Two text attributes control the external interrupt pin of the RTC:
//! `rtc_irq_pin_enable` routes RTC interrupts to the pin, `rtc_irq_pin`
//! selects which pin.

use alloc::format;
use alloc::string::String;

use log::error;
use mca_core::regs::{RtcControl, MCA_RTC_IRQ_PIN};
use mca_core::Regmap;

use crate::driver::McaRtc;
use crate::error::{Result, RtcError};
use crate::ops::RtcEventSink;

const ENABLED: &str = "enabled";
const DISABLED: &str = "disabled";

/// Attribute exposed by the RTC device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcAttribute {
    IrqPinEnable,
    IrqPin,
}

impl RtcAttribute {
    pub const ALL: [RtcAttribute; 2] = [RtcAttribute::IrqPinEnable, RtcAttribute::IrqPin];

    pub const fn name(self) -> &'static str {
        match self {
            RtcAttribute::IrqPinEnable => "rtc_irq_pin_enable",
            RtcAttribute::IrqPin => "rtc_irq_pin",
        }
    }

    /// File mode
    pub const fn mode(self) -> u16 {
        match self {
            RtcAttribute::IrqPinEnable => 0o644,
            RtcAttribute::IrqPin => 0o200,
        }
    }

    pub const fn is_readable(self) -> bool {
        self.mode() & 0o444 != 0
    }
}

/// Parse an unsigned integer the way kernel attribute stores do
///
/// Base is picked from the prefix: `0x` hex, `0` octal, decimal otherwise.
/// One trailing newline is accepted.
pub fn parse_uint(input: &str) -> Option<u32> {
    let s = input.strip_suffix('\n').unwrap_or(input);
    let s = s.strip_prefix('+').unwrap_or(s);

    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    // from_str_radix would accept a second sign
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

impl<R: Regmap, E: RtcEventSink> McaRtc<R, E> {
    /// Render an attribute
    pub fn attr_show(&self, attr: RtcAttribute) -> Result<String> {
        match attr {
            RtcAttribute::IrqPinEnable => {
                let control = self.read_control().map_err(|e| {
                    error!("mca-rtc: cannot read MCA_RTC_CONTROL register ({})", e);
                    e
                })?;
                let state = if control.contains(RtcControl::IRQ_PIN_EN) {
                    ENABLED
                } else {
                    DISABLED
                };
                Ok(format!("{}\n", state))
            }
            RtcAttribute::IrqPin => Err(RtcError::InvalidArgument),
        }
    }

    /// Store into an attribute, returning the number of bytes consumed
    pub fn attr_store(&self, attr: RtcAttribute, input: &str) -> Result<usize> {
        match attr {
            RtcAttribute::IrqPinEnable => {
                let enable = if input.starts_with(ENABLED) {
                    true
                } else if input.starts_with(DISABLED) {
                    false
                } else {
                    return Err(RtcError::InvalidArgument);
                };
                self.update_control(RtcControl::IRQ_PIN_EN, enable)?;
            }
            RtcAttribute::IrqPin => {
                let pin = parse_uint(input)
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| {
                        error!("mca-rtc: invalid RTC irq pin");
                        RtcError::InvalidArgument
                    })?;
                self.regmap()
                    .bulk_write(MCA_RTC_IRQ_PIN, &[pin])
                    .map_err(|e| {
                        error!("mca-rtc: cannot set RTC irq pin ({})", e);
                        RtcError::Transport(e)
                    })?;
            }
        }
        Ok(input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uint_bases() {
        assert_eq!(parse_uint("12"), Some(12));
        assert_eq!(parse_uint("12\n"), Some(12));
        assert_eq!(parse_uint("0x1f"), Some(31));
        assert_eq!(parse_uint("017"), Some(15));
        assert_eq!(parse_uint("0"), Some(0));
        assert_eq!(parse_uint("+7"), Some(7));
    }

    #[test]
    fn test_parse_uint_rejects() {
        assert_eq!(parse_uint(""), None);
        assert_eq!(parse_uint("\n"), None);
        assert_eq!(parse_uint("0x"), None);
        assert_eq!(parse_uint("08"), None);
        assert_eq!(parse_uint("-1"), None);
        assert_eq!(parse_uint("0x+1"), None);
        assert_eq!(parse_uint("12\n\n"), None);
        assert_eq!(parse_uint("4294967296"), None);
    }

    #[test]
    fn test_attribute_modes() {
        assert!(RtcAttribute::IrqPinEnable.is_readable());
        assert!(!RtcAttribute::IrqPin.is_readable());
        assert_eq!(RtcAttribute::IrqPin.name(), "rtc_irq_pin");

        let [a, b] = RtcAttribute::ALL;
        assert_ne!(a.name(), b.name());
        assert!(RtcAttribute::ALL.iter().all(|attr| attr.name().starts_with("rtc_irq_pin")));
    }
}
