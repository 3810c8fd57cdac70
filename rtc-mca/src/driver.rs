//! MCA RTC device
//!
//! [`McaRtc`] holds the per-device state and implements [`RtcClassOps`]. All
//! register traffic goes through the [`Regmap`]; the only state kept on the
//! driver side is the runtime alarm flag and the wake capability, both atomic,
//! so every operation takes `&self` and may run concurrently with interrupt
//! handlers and power hooks.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, warn};
use mca_core::regs::{
    IrqStatus0, RtcControl, MCA_IRQ_STATUS_0, MCA_RTC_ALARM_YEAR_L, MCA_RTC_CONTROL,
    MCA_RTC_ACQUIRE_REQUESTED, MCA_RTC_COUNT_YEAR_L, MCA_RTC_PERIODIC_IRQ_FREQ,
    MCA_RTC_PREPARE_ALARM, MCA_RTC_PREPARE_DATETIME,
};
use mca_core::Regmap;

use crate::alarm::{self, Adjust, RtcWkAlrm};
use crate::codec::{self, RegisterBlock};
use crate::error::{Result, RtcError, Warning};
use crate::ioctl::{self, IoctlCmd, IoctlReply};
use crate::irq::IrqSource;
use crate::ops::{RtcClassOps, RtcEventSink};
use crate::time::CalendarTime;

/// Which register window a prepare request latches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireKind {
    Time,
    Alarm,
}

impl AcquireKind {
    pub const fn register(self) -> u16 {
        match self {
            AcquireKind::Time => MCA_RTC_PREPARE_DATETIME,
            AcquireKind::Alarm => MCA_RTC_PREPARE_ALARM,
        }
    }

    pub const fn register_name(self) -> &'static str {
        match self {
            AcquireKind::Time => "PREPARE_DATETIME",
            AcquireKind::Alarm => "PREPARE_ALARM",
        }
    }
}

/// Interrupt line of one RTC source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IrqLine {
    Line(u32),
    /// Lookup or request failed at attach
    #[default]
    Unavailable,
}

impl IrqLine {
    pub const fn number(self) -> Option<u32> {
        match self {
            IrqLine::Line(irq) => Some(irq),
            IrqLine::Unavailable => None,
        }
    }
}

/// Interrupt lines of the three RTC sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IrqLines {
    pub alarm: IrqLine,
    pub one_hz: IrqLine,
    pub periodic: IrqLine,
}

impl IrqLines {
    pub const fn get(&self, source: IrqSource) -> IrqLine {
        match source {
            IrqSource::Alarm => self.alarm,
            IrqSource::OneHz => self.one_hz,
            IrqSource::Periodic => self.periodic,
        }
    }

    pub fn set(&mut self, source: IrqSource, line: IrqLine) {
        match source {
            IrqSource::Alarm => self.alarm = line,
            IrqSource::OneHz => self.one_hz = line,
            IrqSource::Periodic => self.periodic = line,
        }
    }
}

/// RTC function of one MCA
pub struct McaRtc<R: Regmap, E: RtcEventSink> {
    regmap: R,
    events: E,
    /// Latch registers with a prepare request before every read
    prepare_enabled: bool,
    lines: IrqLines,
    /// Runtime armed flag, only moved by `alarm_irq_enable`
    alarm_enabled: AtomicBool,
    /// Device may wake the system
    wakeup: AtomicBool,
}

impl<R: Regmap, E: RtcEventSink> McaRtc<R, E> {
    /// Create a driver instance with no interrupt lines and the alarm unarmed
    pub fn new(regmap: R, events: E, prepare_enabled: bool) -> Self {
        Self {
            regmap,
            events,
            prepare_enabled,
            lines: IrqLines::default(),
            alarm_enabled: AtomicBool::new(false),
            wakeup: AtomicBool::new(false),
        }
    }

    pub fn with_irq_lines(mut self, lines: IrqLines) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_wakeup(self, wakeup: bool) -> Self {
        self.wakeup.store(wakeup, Ordering::Relaxed);
        self
    }

    pub fn regmap(&self) -> &R {
        &self.regmap
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn prepare_enabled(&self) -> bool {
        self.prepare_enabled
    }

    pub fn irq_lines(&self) -> &IrqLines {
        &self.lines
    }

    /// Runtime alarm flag, independent of the hardware bit during suspend
    pub fn is_alarm_armed(&self) -> bool {
        self.alarm_enabled.load(Ordering::Acquire)
    }

    pub fn may_wakeup(&self) -> bool {
        self.wakeup.load(Ordering::Relaxed)
    }

    pub fn set_wakeup(&self, enabled: bool) {
        self.wakeup.store(enabled, Ordering::Relaxed);
    }

    /// Ask the MCA to latch a register window before it is read
    ///
    /// No-op on firmware that does not need it.
    pub fn maybe_prepare(&self, kind: AcquireKind) -> core::result::Result<(), Warning> {
        if !self.prepare_enabled {
            return Ok(());
        }
        self.regmap
            .write(kind.register(), MCA_RTC_ACQUIRE_REQUESTED)
            .map_err(|error| Warning::PrepareFailed { kind, error })
    }

    fn prepare_or_warn(&self, kind: AcquireKind) {
        if let Err(w) = self.maybe_prepare(kind) {
            warn!("mca-rtc: {}", w);
        }
    }

    fn read_block(&self, reg: u16) -> Result<RegisterBlock> {
        let mut block = RegisterBlock::zeroed();
        self.regmap.bulk_read(reg, block.as_mut_bytes())?;
        Ok(block)
    }

    /// Set the hardware alarm-enable bit
    pub(crate) fn start_alarm(&self) -> mca_core::Result<()> {
        self.regmap.update_bits(
            MCA_RTC_CONTROL,
            RtcControl::ALARM_EN.bits(),
            RtcControl::ALARM_EN.bits(),
        )
    }

    /// Clear the hardware alarm-enable bit
    pub(crate) fn stop_alarm(&self) -> mca_core::Result<()> {
        self.regmap
            .update_bits(MCA_RTC_CONTROL, RtcControl::ALARM_EN.bits(), 0)
    }

    pub(crate) fn update_control(&self, bits: RtcControl, enable: bool) -> Result<()> {
        let value = if enable { bits.bits() } else { 0 };
        self.regmap
            .update_bits(MCA_RTC_CONTROL, bits.bits(), value)
            .map_err(|e| {
                error!("mca-rtc: cannot update MCA_RTC_CONTROL register ({})", e);
                RtcError::Transport(e)
            })
    }

    pub(crate) fn read_control(&self) -> Result<RtcControl> {
        let raw = self.regmap.read(MCA_RTC_CONTROL)?;
        Ok(RtcControl::from_bits_retain(raw))
    }

    fn read_frequency(&self) -> Result<u64> {
        let ticks = self.regmap.read_u16(MCA_RTC_PERIODIC_IRQ_FREQ).map_err(|e| {
            error!("mca-rtc: failed to get RTC periodic irq freq ({})", e);
            RtcError::Transport(e)
        })?;
        let hz = ioctl::hz_from_ticks(ticks).ok_or(RtcError::InvalidFrequency)?;
        Ok(hz as u64)
    }

    fn set_frequency(&self, hz: u64) -> Result<()> {
        let ticks = ioctl::ticks_from_hz(hz).ok_or(RtcError::InvalidFrequency)?;
        self.regmap
            .write_u16(MCA_RTC_PERIODIC_IRQ_FREQ, ticks)
            .map_err(|e| {
                error!("mca-rtc: failed to set RTC periodic irq freq ({})", e);
                RtcError::Transport(e)
            })
    }
}

impl<R: Regmap, E: RtcEventSink> RtcClassOps for McaRtc<R, E> {
    fn read_time(&self) -> Result<CalendarTime> {
        self.prepare_or_warn(AcquireKind::Time);

        let block = self.read_block(MCA_RTC_COUNT_YEAR_L).map_err(|e| {
            error!("mca-rtc: failed to read RTC time data ({})", e);
            e
        })?;
        Ok(codec::decode(&block)?)
    }

    fn set_time(&self, time: &CalendarTime) -> Result<()> {
        time.validate()?;

        let mut block = RegisterBlock::zeroed();
        codec::encode(time, &mut block);
        self.regmap
            .bulk_write(MCA_RTC_COUNT_YEAR_L, block.as_bytes())
            .map_err(|e| {
                error!("mca-rtc: failed to set RTC time data ({})", e);
                RtcError::Transport(e)
            })?;
        debug!("mca-rtc: time set to {}", time);
        Ok(())
    }

    fn read_alarm(&self) -> Result<RtcWkAlrm> {
        self.prepare_or_warn(AcquireKind::Alarm);

        let block = self.read_block(MCA_RTC_ALARM_YEAR_L)?;
        let time = alarm::adjust(codec::decode(&block)?, Adjust::FromHardware)?;

        let enabled = self.read_control()?.contains(RtcControl::ALARM_EN);
        let status = IrqStatus0::from_bits_retain(self.regmap.read(MCA_IRQ_STATUS_0)?);

        Ok(RtcWkAlrm {
            time,
            enabled,
            pending: status.contains(IrqStatus0::RTC_ALARM),
        })
    }

    fn set_alarm(&self, alrm: &RtcWkAlrm) -> Result<()> {
        alrm.time.validate()?;
        let hw_time = alarm::adjust(alrm.time, Adjust::ToHardware)?;

        let mut block = RegisterBlock::zeroed();
        codec::encode(&hw_time, &mut block);
        self.regmap
            .bulk_write(MCA_RTC_ALARM_YEAR_L, block.as_bytes())
            .map_err(|e| {
                error!("mca-rtc: failed to set RTC alarm data ({})", e);
                RtcError::Transport(e)
            })?;

        match self.alarm_irq_enable(alrm.enabled) {
            Err(RtcError::Transport(e)) => Err(RtcError::AlarmArm(e)),
            other => other,
        }
    }

    fn alarm_irq_enable(&self, enabled: bool) -> Result<()> {
        let ret = if enabled {
            self.start_alarm()
        } else {
            self.stop_alarm()
        };
        if let Err(e) = ret {
            error!(
                "mca-rtc: failed to {} alarm IRQ ({})",
                if enabled { "enable" } else { "disable" },
                e
            );
            return Err(RtcError::Transport(e));
        }
        self.alarm_enabled.store(enabled, Ordering::Release);
        Ok(())
    }

    fn ioctl(&self, cmd: u32, arg: u64) -> Result<IoctlReply> {
        match IoctlCmd::decode(cmd, arg)? {
            IoctlCmd::UpdateIrq(on) => self.update_control(RtcControl::ONE_HZ_EN, on)?,
            IoctlCmd::PeriodicIrq(on) => self.update_control(RtcControl::PERIODIC_EN, on)?,
            IoctlCmd::ReadFrequency => return self.read_frequency().map(IoctlReply::Frequency),
            IoctlCmd::SetFrequency(hz) => self.set_frequency(hz)?,
        }
        Ok(IoctlReply::Done)
    }
}
