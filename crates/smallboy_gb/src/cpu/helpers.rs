use super::{Bus, Cpu, Flag, Operand};
use crate::error::Result;

/// Branch polarity for conditional control flow.
///
/// The decoder samples one flag and pairs it with a polarity, so the four
/// architectural conditions (NZ, Z, NC, C) map onto these two cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Polarity {
    WhenSet,
    WhenClear,
}

impl Polarity {
    #[inline]
    pub(crate) fn taken(self, sample: bool) -> bool {
        match self {
            Polarity::WhenSet => sample,
            Polarity::WhenClear => !sample,
        }
    }
}

impl Cpu {
    /// Read an 8-bit register or (HL) by opcode index.
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, index: u8) -> Result<u8> {
        Operand::decode(index, &self.regs).read(&self.regs, bus)
    }

    /// Write an 8-bit register or (HL) by opcode index.
    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, index: u8, value: u8) -> Result<()> {
        Operand::decode(index, &self.regs).write(&mut self.regs, bus, value)
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> Result<u8> {
        let value = bus.read8(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> Result<u16> {
        let value = bus.read16(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(2);
        Ok(value)
    }

    /// Push a 16-bit value: SP drops by 2, then the value is written
    /// little-endian at the new SP.
    #[inline]
    pub(crate) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<()> {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write16(self.regs.sp, value)
    }

    #[inline]
    pub(crate) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> Result<u16> {
        let value = bus.read16(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(2);
        Ok(value)
    }

    /// Map the 2-bit `cc` field of JR/JP/CALL/RET onto a sampled flag and a
    /// polarity.
    #[inline]
    pub(super) fn condition(&self, cc: u8) -> (bool, Polarity) {
        match cc & 0x03 {
            0 => (self.get_flag(Flag::Z), Polarity::WhenClear),
            1 => (self.get_flag(Flag::Z), Polarity::WhenSet),
            2 => (self.get_flag(Flag::C), Polarity::WhenClear),
            _ => (self.get_flag(Flag::C), Polarity::WhenSet),
        }
    }

    /// Relative jump. The displacement is a signed 8-bit offset from the
    /// address following the operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, sample: bool, polarity: Polarity) -> Result<()> {
        let offset = self.fetch8(bus)? as i8;
        if polarity.taken(sample) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
        }
        Ok(())
    }

    pub(super) fn jp<B: Bus>(&mut self, bus: &mut B, sample: bool, polarity: Polarity) -> Result<()> {
        let addr = self.fetch16(bus)?;
        if polarity.taken(sample) {
            self.regs.pc = addr;
        }
        Ok(())
    }

    pub(super) fn call<B: Bus>(&mut self, bus: &mut B, sample: bool, polarity: Polarity) -> Result<()> {
        let addr = self.fetch16(bus)?;
        if polarity.taken(sample) {
            let ret = self.regs.pc;
            self.push_u16(bus, ret)?;
            self.regs.pc = addr;
        }
        Ok(())
    }

    pub(super) fn ret<B: Bus>(&mut self, bus: &mut B, sample: bool, polarity: Polarity) -> Result<()> {
        if polarity.taken(sample) {
            self.regs.pc = self.pop_u16(bus)?;
        }
        Ok(())
    }

    /// Push the current PC and continue at one of the low-memory vectors.
    ///
    /// Shared by RST and interrupt dispatch.
    pub(crate) fn restart<B: Bus>(&mut self, bus: &mut B, vector: u16) -> Result<()> {
        let ret = self.regs.pc;
        self.push_u16(bus, ret)?;
        self.regs.pc = vector;
        Ok(())
    }
}
