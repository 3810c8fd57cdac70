//! MCA identification and firmware feature gating
//!
//! Two MCA parts exist (KL03 and KL17) and each gained features at a
//! different firmware release, so every optional feature carries one minimum
//! version per part.

use core::fmt;

use log::debug;

use crate::error::Result;
use crate::regmap::Regmap;
use crate::regs::{MCA_DEVICE_ID, MCA_FW_VER_L, MCA_HW_VER};

/// Bit 15 of the raw version marks an alpha build
pub const MCA_FW_VER_ALPHA_MASK: u16 = 0x8000;

pub const MCA_KL03_DEVICE_ID: u8 = 0x61;
pub const MCA_KL17_DEVICE_ID: u8 = 0x4A;

/// First KL03 firmware latching the RTC counters on a prepare request
pub const RTC_PREPARE_KL03_FW_VER: FwVersion = FwVersion::new(1, 2);

/// Firmware version, major in bits 8-14 and minor in bits 0-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FwVersion(u16);

impl FwVersion {
    /// Create a version from its parts
    pub const fn new(major: u8, minor: u8) -> Self {
        Self((((major & 0x7F) as u16) << 8) | minor as u16)
    }

    /// Create from the raw register value, dropping the alpha flag
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & !MCA_FW_VER_ALPHA_MASK)
    }

    pub const fn major(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn minor(&self) -> u8 {
        self.0 as u8
    }

    pub const fn raw(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for FwVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major(), self.minor())
    }
}

/// MCA part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceId {
    Kl03,
    Kl17,
    Unknown(u8),
}

impl From<u8> for DeviceId {
    fn from(id: u8) -> Self {
        match id {
            MCA_KL03_DEVICE_ID => DeviceId::Kl03,
            MCA_KL17_DEVICE_ID => DeviceId::Kl17,
            other => DeviceId::Unknown(other),
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceId::Kl03 => write!(f, "KL03"),
            DeviceId::Kl17 => write!(f, "KL17"),
            DeviceId::Unknown(id) => write!(f, "unknown (0x{:02x})", id),
        }
    }
}

/// Identification read from the MCA at attach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McaInfo {
    pub device_id: DeviceId,
    pub hw_version: u8,
    pub fw_version: FwVersion,
    pub fw_is_alpha: bool,
}

impl McaInfo {
    /// Build from already known values
    pub const fn new(device_id: DeviceId, fw_version: FwVersion) -> Self {
        Self {
            device_id,
            hw_version: 0,
            fw_version,
            fw_is_alpha: false,
        }
    }

    /// Read the identification registers
    pub fn read<R: Regmap + ?Sized>(regmap: &R) -> Result<Self> {
        let device_id = DeviceId::from(regmap.read(MCA_DEVICE_ID)? as u8);
        let hw_version = regmap.read(MCA_HW_VER)? as u8;
        let raw = regmap.read_u16(MCA_FW_VER_L)?;

        let info = Self {
            device_id,
            hw_version,
            fw_version: FwVersion::from_raw(raw),
            fw_is_alpha: raw & MCA_FW_VER_ALPHA_MASK != 0,
        };
        debug!(
            "mca: {} HW{} FW {}{}",
            info.device_id,
            info.hw_version,
            info.fw_version,
            if info.fw_is_alpha { " (alpha)" } else { "" }
        );
        Ok(info)
    }

    /// Whether the running firmware carries a feature introduced at the given versions
    pub fn feature_is_supported(&self, since_kl03: FwVersion, since_kl17: FwVersion) -> bool {
        match self.device_id {
            DeviceId::Kl03 => self.fw_version >= since_kl03,
            DeviceId::Kl17 => self.fw_version >= since_kl17,
            DeviceId::Unknown(_) => false,
        }
    }

    /// Whether RTC reads must be preceded by a prepare request
    ///
    /// Only the KL03 needs it; the KL17 latches the counters on its own.
    pub fn rtc_prepare_enabled(&self) -> bool {
        self.device_id == DeviceId::Kl03 && self.fw_version >= RTC_PREPARE_KL03_FW_VER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parts() {
        let v = FwVersion::from_raw(0x8113);
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 0x13);
        assert_eq!(v, FwVersion::new(1, 19));
    }

    #[test]
    fn test_version_ordering() {
        assert!(FwVersion::new(1, 2) > FwVersion::new(1, 1));
        assert!(FwVersion::new(2, 0) > FwVersion::new(1, 99));
    }

    #[test]
    fn test_rtc_prepare_only_on_recent_kl03() {
        assert!(McaInfo::new(DeviceId::Kl03, FwVersion::new(1, 2)).rtc_prepare_enabled());
        assert!(!McaInfo::new(DeviceId::Kl03, FwVersion::new(1, 1)).rtc_prepare_enabled());
        assert!(!McaInfo::new(DeviceId::Kl17, FwVersion::new(9, 0)).rtc_prepare_enabled());
    }

    #[test]
    fn test_feature_gating_per_part() {
        let kl17 = McaInfo::new(DeviceId::Kl17, FwVersion::new(0, 12));
        assert!(kl17.feature_is_supported(FwVersion::new(1, 0), FwVersion::new(0, 10)));
        assert!(!kl17.feature_is_supported(FwVersion::new(0, 1), FwVersion::new(0, 13)));

        let unknown = McaInfo::new(DeviceId::Unknown(0x12), FwVersion::new(9, 9));
        assert!(!unknown.feature_is_supported(FwVersion::new(0, 0), FwVersion::new(0, 0)));
    }
}
