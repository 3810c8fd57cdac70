//! Error types for MCA register transactions

use core::fmt;

/// Transport result type
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Register transport error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No acknowledge received from the MCA
    NoAcknowledge,
    /// Arbitration lost on the bus
    ArbitrationLost,
    /// Bus error
    BusError,
    /// Transaction timeout
    Timeout,
    /// Bus busy with another master
    Busy,
    /// Register address outside the MCA map
    InvalidRegister(u16),
    /// Transfer length does not fit the register window
    InvalidLength,
    /// Parent device not available
    NotAvailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoAcknowledge => write!(f, "No acknowledge received"),
            Error::ArbitrationLost => write!(f, "Arbitration lost"),
            Error::BusError => write!(f, "Bus error"),
            Error::Timeout => write!(f, "Transaction timeout"),
            Error::Busy => write!(f, "Bus busy"),
            Error::InvalidRegister(reg) => write!(f, "Invalid register 0x{:04x}", reg),
            Error::InvalidLength => write!(f, "Invalid transfer length"),
            Error::NotAvailable => write!(f, "MCA not available"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NoAcknowledge => defmt::write!(f, "NoAcknowledge"),
            Error::ArbitrationLost => defmt::write!(f, "ArbitrationLost"),
            Error::BusError => defmt::write!(f, "BusError"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::Busy => defmt::write!(f, "Busy"),
            Error::InvalidRegister(reg) => defmt::write!(f, "InvalidRegister({=u16:#x})", reg),
            Error::InvalidLength => defmt::write!(f, "InvalidLength"),
            Error::NotAvailable => defmt::write!(f, "NotAvailable"),
        }
    }
}
