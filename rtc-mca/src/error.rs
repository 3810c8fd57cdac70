//! Error types for RTC operations

use core::fmt;

use crate::driver::AcquireKind;
use crate::time::InvalidCalendarValue;

/// RTC result type
pub type Result<T, E = RtcError> = core::result::Result<T, E>;

const EIO: i32 = 5;
const ENODEV: i32 = 19;
const EINVAL: i32 = 22;
const ENOIOCTLCMD: i32 = 515;

/// RTC operation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcError {
    /// Register transaction failed
    Transport(mca_core::Error),
    /// Time read from or handed to the RTC is not a valid calendar time
    InvalidTime(InvalidCalendarValue),
    /// Unknown ioctl
    Unsupported,
    /// Periodic rate outside 1-1024 Hz, or a zero tick register
    InvalidFrequency,
    /// Malformed attribute input
    InvalidArgument,
    /// Alarm registers written, setting the enable bit failed
    AlarmArm(mca_core::Error),
    /// RTC node missing or disabled
    NoDevice,
}

impl RtcError {
    /// Negative errno for the host RTC layer
    pub const fn errno(&self) -> i32 {
        match self {
            RtcError::Transport(_) | RtcError::AlarmArm(_) => -EIO,
            RtcError::InvalidTime(_) | RtcError::InvalidFrequency | RtcError::InvalidArgument => {
                -EINVAL
            }
            RtcError::Unsupported => -ENOIOCTLCMD,
            RtcError::NoDevice => -ENODEV,
        }
    }

    /// Whether the alarm registers hold the new value despite the error
    pub const fn alarm_written(&self) -> bool {
        matches!(self, RtcError::AlarmArm(_))
    }
}

impl From<mca_core::Error> for RtcError {
    fn from(err: mca_core::Error) -> Self {
        RtcError::Transport(err)
    }
}

impl From<InvalidCalendarValue> for RtcError {
    fn from(err: InvalidCalendarValue) -> Self {
        RtcError::InvalidTime(err)
    }
}

impl fmt::Display for RtcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcError::Transport(err) => write!(f, "register access failed: {}", err),
            RtcError::InvalidTime(err) => write!(f, "invalid time: {}", err),
            RtcError::Unsupported => write!(f, "unsupported ioctl"),
            RtcError::InvalidFrequency => write!(f, "invalid periodic frequency"),
            RtcError::InvalidArgument => write!(f, "invalid argument"),
            RtcError::AlarmArm(err) => write!(f, "alarm stored but not armed: {}", err),
            RtcError::NoDevice => write!(f, "no RTC device"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RtcError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RtcError::Transport(err) => defmt::write!(f, "Transport({})", err),
            RtcError::InvalidTime(_) => defmt::write!(f, "InvalidTime"),
            RtcError::Unsupported => defmt::write!(f, "Unsupported"),
            RtcError::InvalidFrequency => defmt::write!(f, "InvalidFrequency"),
            RtcError::InvalidArgument => defmt::write!(f, "InvalidArgument"),
            RtcError::AlarmArm(err) => defmt::write!(f, "AlarmArm({})", err),
            RtcError::NoDevice => defmt::write!(f, "NoDevice"),
        }
    }
}

/// Non-fatal condition, logged and then ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// Prepare request not accepted, the read goes ahead unlatched
    PrepareFailed {
        kind: AcquireKind,
        error: mca_core::Error,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::PrepareFailed { kind, error } => {
                write!(f, "failed to write {} ({})", kind.register_name(), error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::CalendarField;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(RtcError::Transport(mca_core::Error::Timeout).errno(), -5);
        assert_eq!(RtcError::InvalidTime(InvalidCalendarValue(CalendarField::Day)).errno(), -22);
        assert_eq!(RtcError::Unsupported.errno(), -515);
        assert_eq!(RtcError::NoDevice.errno(), -19);
    }

    #[test]
    fn test_alarm_arm_is_distinct() {
        let err = RtcError::AlarmArm(mca_core::Error::NoAcknowledge);
        assert!(err.alarm_written());
        assert!(!RtcError::Transport(mca_core::Error::NoAcknowledge).alarm_written());
    }
}
