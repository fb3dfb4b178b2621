use super::{Bus, Reg8, Registers};
use crate::error::Result;

/// 8-bit operand slot selected by the low three bits of an opcode.
///
/// Either a named register or the byte addressed through HL. The address is
/// latched at decode time, so later changes to HL do not retarget it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg8),
    Mem(u16),
}

impl Operand {
    /// Decode the standard register index used by opcode tables:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    pub fn decode(index: u8, regs: &Registers) -> Self {
        match index & 0x07 {
            0 => Operand::Reg(Reg8::B),
            1 => Operand::Reg(Reg8::C),
            2 => Operand::Reg(Reg8::D),
            3 => Operand::Reg(Reg8::E),
            4 => Operand::Reg(Reg8::H),
            5 => Operand::Reg(Reg8::L),
            6 => Operand::Mem(regs.hl()),
            _ => Operand::Reg(Reg8::A),
        }
    }

    #[inline]
    pub fn read<B: Bus>(self, regs: &Registers, bus: &mut B) -> Result<u8> {
        match self {
            Operand::Reg(reg) => Ok(regs.get(reg)),
            Operand::Mem(addr) => bus.read8(addr),
        }
    }

    #[inline]
    pub fn write<B: Bus>(self, regs: &mut Registers, bus: &mut B, value: u8) -> Result<()> {
        match self {
            Operand::Reg(reg) => {
                regs.set(reg, value);
                Ok(())
            }
            Operand::Mem(addr) => bus.write8(addr, value),
        }
    }

    pub fn is_memory(self) -> bool {
        matches!(self, Operand::Mem(_))
    }
}
