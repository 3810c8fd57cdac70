//! In-memory MCA register file
//!
//! Implements [`Regmap`] over a sparse byte map. Registers can be made to fail
//! and every transaction is recorded, so driver behaviour can be checked
//! without hardware.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use spin::Mutex;

use crate::error::{Error, Result};
use crate::firmware::{DeviceId, FwVersion, MCA_KL03_DEVICE_ID, MCA_KL17_DEVICE_ID};
use crate::regmap::Regmap;
use crate::regs::{MCA_DEVICE_ID, MCA_FW_VER_H, MCA_FW_VER_L};

/// A recorded register transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Read(u16),
    Write(u16, u32),
    BulkRead(u16, usize),
    BulkWrite(u16, Vec<u8>),
    UpdateBits { reg: u16, mask: u32, value: u32 },
}

impl Transaction {
    /// First register touched
    pub fn reg(&self) -> u16 {
        match self {
            Transaction::Read(reg)
            | Transaction::Write(reg, _)
            | Transaction::BulkRead(reg, _)
            | Transaction::BulkWrite(reg, _)
            | Transaction::UpdateBits { reg, .. } => *reg,
        }
    }
}

#[derive(Default)]
struct Inner {
    regs: BTreeMap<u16, u8>,
    faults: BTreeSet<u16>,
    log: Vec<Transaction>,
}

impl Inner {
    fn check(&self, reg: u16, len: usize) -> Result<()> {
        let end = reg as usize + len.max(1);
        if end > u16::MAX as usize + 1 {
            return Err(Error::InvalidLength);
        }
        match self.faults.range(reg..).next() {
            Some(&fault) if (fault as usize) < end => Err(Error::NoAcknowledge),
            _ => Ok(()),
        }
    }

    fn get(&self, reg: u16) -> u8 {
        self.regs.get(&reg).copied().unwrap_or(0)
    }
}

/// Register file backing a simulated MCA
#[derive(Default)]
pub struct RegisterFile {
    inner: Mutex<Inner>,
}

impl RegisterFile {
    /// Create an empty register file, every register reads as zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a register file with the identification block filled in
    pub fn with_identity(device: DeviceId, fw: FwVersion) -> Self {
        let file = Self::new();
        let id = match device {
            DeviceId::Kl03 => MCA_KL03_DEVICE_ID,
            DeviceId::Kl17 => MCA_KL17_DEVICE_ID,
            DeviceId::Unknown(id) => id,
        };
        let [lo, hi] = fw.raw().to_le_bytes();
        file.poke(MCA_DEVICE_ID, id);
        file.poke(MCA_FW_VER_L, lo);
        file.poke(MCA_FW_VER_H, hi);
        file
    }

    /// Set a register without recording a transaction
    pub fn poke(&self, reg: u16, value: u8) {
        self.inner.lock().regs.insert(reg, value);
    }

    /// Set consecutive registers without recording a transaction
    pub fn poke_block(&self, reg: u16, data: &[u8]) {
        let mut inner = self.inner.lock();
        for (i, byte) in data.iter().enumerate() {
            inner.regs.insert(reg.wrapping_add(i as u16), *byte);
        }
    }

    /// Get a register without recording a transaction
    pub fn peek(&self, reg: u16) -> u8 {
        self.inner.lock().get(reg)
    }

    /// Get consecutive registers without recording a transaction
    pub fn peek_block(&self, reg: u16, len: usize) -> Vec<u8> {
        let inner = self.inner.lock();
        (0..len)
            .map(|i| inner.get(reg.wrapping_add(i as u16)))
            .collect()
    }

    /// Make every transaction touching `reg` fail
    pub fn fail_on(&self, reg: u16) {
        self.inner.lock().faults.insert(reg);
    }

    /// Stop failing transactions touching `reg`
    pub fn clear_fault(&self, reg: u16) {
        self.inner.lock().faults.remove(&reg);
    }

    /// Transactions issued so far, failed ones included
    pub fn transactions(&self) -> Vec<Transaction> {
        self.inner.lock().log.clone()
    }

    /// Forget recorded transactions
    pub fn clear_log(&self) {
        self.inner.lock().log.clear();
    }
}

impl Regmap for RegisterFile {
    fn read(&self, reg: u16) -> Result<u32> {
        let mut inner = self.inner.lock();
        inner.log.push(Transaction::Read(reg));
        inner.check(reg, 1)?;
        Ok(inner.get(reg) as u32)
    }

    fn write(&self, reg: u16, value: u32) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.log.push(Transaction::Write(reg, value));
        inner.check(reg, 1)?;
        inner.regs.insert(reg, value as u8);
        Ok(())
    }

    fn bulk_read(&self, reg: u16, buf: &mut [u8]) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.log.push(Transaction::BulkRead(reg, buf.len()));
        inner.check(reg, buf.len())?;
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = inner.get(reg + i as u16);
        }
        Ok(())
    }

    fn bulk_write(&self, reg: u16, data: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.log.push(Transaction::BulkWrite(reg, data.to_vec()));
        inner.check(reg, data.len())?;
        for (i, byte) in data.iter().enumerate() {
            inner.regs.insert(reg + i as u16, *byte);
        }
        Ok(())
    }

    fn update_bits(&self, reg: u16, mask: u32, value: u32) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.log.push(Transaction::UpdateBits { reg, mask, value });
        inner.check(reg, 1)?;
        let old = inner.get(reg) as u32;
        let new = (old & !mask) | (value & mask);
        inner.regs.insert(reg, new as u8);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firmware::McaInfo;

    #[test]
    fn test_unset_registers_read_zero() {
        let file = RegisterFile::new();
        assert_eq!(file.read(0x0042), Ok(0));
    }

    #[test]
    fn test_bulk_roundtrip() {
        let file = RegisterFile::new();
        file.bulk_write(0x0100, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 3];
        file.bulk_read(0x0100, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(file.peek(0x0102), 3);
    }

    #[test]
    fn test_update_bits_keeps_other_bits() {
        let file = RegisterFile::new();
        file.poke(0x0100, 0b1000_0001);
        file.update_bits(0x0100, 0b0000_0010, 0b0000_0010).unwrap();
        assert_eq!(file.peek(0x0100), 0b1000_0011);
        file.update_bits(0x0100, 0b0000_0001, 0).unwrap();
        assert_eq!(file.peek(0x0100), 0b1000_0010);
    }

    #[test]
    fn test_fault_inside_bulk_range() {
        let file = RegisterFile::new();
        file.fail_on(0x0105);
        let mut buf = [0u8; 7];
        assert_eq!(file.bulk_read(0x0101, &mut buf), Err(Error::NoAcknowledge));
        assert_eq!(file.bulk_read(0x0109, &mut buf), Ok(()));
        assert_eq!(file.read(0x0105), Err(Error::NoAcknowledge));

        file.clear_fault(0x0105);
        assert_eq!(file.bulk_read(0x0101, &mut buf), Ok(()));
    }

    #[test]
    fn test_failed_transactions_are_logged() {
        let file = RegisterFile::new();
        file.fail_on(0x0010);
        let _ = file.write(0x0010, 1);
        assert_eq!(file.transactions(), alloc::vec![Transaction::Write(0x0010, 1)]);
        assert_eq!(file.peek(0x0010), 0);
    }

    #[test]
    fn test_identity_is_readable() {
        let file = RegisterFile::with_identity(DeviceId::Kl03, FwVersion::new(1, 5));
        let info = McaInfo::read(&file).unwrap();
        assert_eq!(info.device_id, DeviceId::Kl03);
        assert_eq!(info.fw_version, FwVersion::new(1, 5));
        assert!(!info.fw_is_alpha);
        assert!(info.rtc_prepare_enabled());
    }
}
