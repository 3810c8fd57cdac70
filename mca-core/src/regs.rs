//! MCA register map
//!
//! Only the identification block, the interrupt status register and the RTC
//! window are described here.

use bitflags::bitflags;

// Identification
pub const MCA_DEVICE_ID: u16 = 0x0001;
pub const MCA_HW_VER: u16 = 0x0002;
pub const MCA_FW_VER_L: u16 = 0x0003;
pub const MCA_FW_VER_H: u16 = 0x0004;

// Interrupt status, write 1 to acknowledge
pub const MCA_IRQ_STATUS_0: u16 = 0x0020;

// RTC
pub const MCA_RTC_CONTROL: u16 = 0x0100;

pub const MCA_RTC_COUNT_YEAR_L: u16 = 0x0101;
pub const MCA_RTC_COUNT_YEAR_H: u16 = 0x0102;
pub const MCA_RTC_COUNT_MONTH: u16 = 0x0103;
pub const MCA_RTC_COUNT_DAY: u16 = 0x0104;
pub const MCA_RTC_COUNT_HOUR: u16 = 0x0105;
pub const MCA_RTC_COUNT_MIN: u16 = 0x0106;
pub const MCA_RTC_COUNT_SEC: u16 = 0x0107;

pub const MCA_RTC_ALARM_YEAR_L: u16 = 0x0109;
pub const MCA_RTC_ALARM_YEAR_H: u16 = 0x010A;
pub const MCA_RTC_ALARM_MONTH: u16 = 0x010B;
pub const MCA_RTC_ALARM_DAY: u16 = 0x010C;
pub const MCA_RTC_ALARM_HOUR: u16 = 0x010D;
pub const MCA_RTC_ALARM_MIN: u16 = 0x010E;
pub const MCA_RTC_ALARM_SEC: u16 = 0x010F;

/// Periodic interrupt rate in 1/1024 s ticks, 16-bit little endian
pub const MCA_RTC_PERIODIC_IRQ_FREQ: u16 = 0x0111;
pub const MCA_RTC_IRQ_PIN: u16 = 0x0113;
pub const MCA_RTC_PREPARE_DATETIME: u16 = 0x0114;
pub const MCA_RTC_PREPARE_ALARM: u16 = 0x0115;

/// Value written to a prepare register to latch its window
pub const MCA_RTC_ACQUIRE_REQUESTED: u32 = 1;

/// Number of registers in the counter window
pub const MCA_RTC_CLOCK_DATA_LEN: usize = (MCA_RTC_COUNT_SEC - MCA_RTC_COUNT_YEAR_L + 1) as usize;
/// Number of registers in the alarm window
pub const MCA_RTC_ALARM_DATA_LEN: usize = (MCA_RTC_ALARM_SEC - MCA_RTC_ALARM_YEAR_L + 1) as usize;

bitflags! {
    /// `MCA_RTC_CONTROL` bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RtcControl: u32 {
        /// RTC counter running
        const RTC_EN = 1 << 0;
        /// Alarm interrupt generation
        const ALARM_EN = 1 << 1;
        /// 1 Hz update interrupt generation
        const ONE_HZ_EN = 1 << 2;
        /// Periodic interrupt generation
        const PERIODIC_EN = 1 << 3;
        /// Route RTC interrupts to the external IRQ pin
        const IRQ_PIN_EN = 1 << 7;
    }
}

bitflags! {
    /// `MCA_IRQ_STATUS_0` bits, one per MCA interrupt number
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqStatus0: u32 {
        const RTC_ALARM = 1 << 0;
        const RTC_1HZ = 1 << 1;
        const WATCHDOG = 1 << 2;
        const PWR_SLEEP = 1 << 3;
        const PWR_OFF = 1 << 4;
        const ADC = 1 << 5;
        const RTC_PERIODIC = 1 << 6;
    }
}
