use crate::cpu::Bus;
use crate::error::{Access, CpuError, Result};

use super::{AddressSpace, Region};

impl Bus for AddressSpace {
    fn read8(&mut self, addr: u16) -> Result<u8> {
        self.peek(addr)
            .ok_or_else(|| CpuError::unmapped(addr as u32, Access::Read))
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<()> {
        let region = Region::decode(addr)
            .ok_or_else(|| CpuError::unmapped(addr as u32, Access::Write))?;
        *self.slot(region) = value;
        Ok(())
    }
}
