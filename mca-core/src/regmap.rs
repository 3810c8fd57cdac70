//! Register transport
//!
//! The MCA is reached through a register map: every peripheral function sits
//! behind 8-bit registers at 16-bit addresses. The bus driver that implements
//! [`Regmap`] is responsible for serializing transactions between callers;
//! drivers built on top of it do no locking of their own.

use alloc::sync::Arc;

use crate::error::Result;

/// Transactional register access keyed by register address
pub trait Regmap {
    /// Read a single register
    fn read(&self, reg: u16) -> Result<u32>;

    /// Write a single register
    fn write(&self, reg: u16, value: u32) -> Result<()>;

    /// Read consecutive registers starting at `reg`
    fn bulk_read(&self, reg: u16, buf: &mut [u8]) -> Result<()>;

    /// Write consecutive registers starting at `reg`
    fn bulk_write(&self, reg: u16, data: &[u8]) -> Result<()>;

    /// Read-modify-write of the bits selected by `mask`
    ///
    /// The default issues a separate read and write. Transports shared between
    /// execution contexts should override it with a version that holds the bus
    /// across both halves.
    fn update_bits(&self, reg: u16, mask: u32, value: u32) -> Result<()> {
        let old = self.read(reg)?;
        let new = (old & !mask) | (value & mask);
        if new != old {
            self.write(reg, new)?;
        }
        Ok(())
    }

    /// Read a little-endian 16-bit value from two consecutive registers
    fn read_u16(&self, reg: u16) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.bulk_read(reg, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Write a little-endian 16-bit value to two consecutive registers
    fn write_u16(&self, reg: u16, value: u16) -> Result<()> {
        self.bulk_write(reg, &value.to_le_bytes())
    }
}

impl<T: Regmap + ?Sized> Regmap for &T {
    fn read(&self, reg: u16) -> Result<u32> {
        (**self).read(reg)
    }

    fn write(&self, reg: u16, value: u32) -> Result<()> {
        (**self).write(reg, value)
    }

    fn bulk_read(&self, reg: u16, buf: &mut [u8]) -> Result<()> {
        (**self).bulk_read(reg, buf)
    }

    fn bulk_write(&self, reg: u16, data: &[u8]) -> Result<()> {
        (**self).bulk_write(reg, data)
    }

    fn update_bits(&self, reg: u16, mask: u32, value: u32) -> Result<()> {
        (**self).update_bits(reg, mask, value)
    }
}

impl<T: Regmap + ?Sized> Regmap for Arc<T> {
    fn read(&self, reg: u16) -> Result<u32> {
        (**self).read(reg)
    }

    fn write(&self, reg: u16, value: u32) -> Result<()> {
        (**self).write(reg, value)
    }

    fn bulk_read(&self, reg: u16, buf: &mut [u8]) -> Result<()> {
        (**self).bulk_read(reg, buf)
    }

    fn bulk_write(&self, reg: u16, data: &[u8]) -> Result<()> {
        (**self).bulk_write(reg, data)
    }

    fn update_bits(&self, reg: u16, mask: u32, value: u32) -> Result<()> {
        (**self).update_bits(reg, mask, value)
    }
}
