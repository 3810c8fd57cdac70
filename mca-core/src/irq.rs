//! MCA interrupt numbers and per-function interrupt resources

/// MCA interrupt numbers, matching the bit position in the status registers
pub const MCA_IRQ_RTC_ALARM: u32 = 0;
pub const MCA_IRQ_RTC_1HZ: u32 = 1;
pub const MCA_IRQ_RTC_PERIODIC_IRQ: u32 = 6;

pub const MCA_IRQ_RTC_ALARM_NAME: &str = "RTC ALARM";
pub const MCA_IRQ_RTC_1HZ_NAME: &str = "RTC 1HZ";
pub const MCA_IRQ_RTC_PERIODIC_IRQ_NAME: &str = "RTC PERIODIC IRQ";

/// Named interrupt handed to a child function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqResource {
    pub name: &'static str,
    pub irq: u32,
}

/// Interrupts owned by the RTC function
pub const MCA_RTC_RESOURCES: [IrqResource; 3] = [
    IrqResource {
        name: MCA_IRQ_RTC_ALARM_NAME,
        irq: MCA_IRQ_RTC_ALARM,
    },
    IrqResource {
        name: MCA_IRQ_RTC_1HZ_NAME,
        irq: MCA_IRQ_RTC_1HZ,
    },
    IrqResource {
        name: MCA_IRQ_RTC_PERIODIC_IRQ_NAME,
        irq: MCA_IRQ_RTC_PERIODIC_IRQ,
    },
];

/// Look up an interrupt by resource name
pub fn irq_by_name(resources: &[IrqResource], name: &str) -> Option<u32> {
    resources.iter().find(|r| r.name == name).map(|r| r.irq)
}
