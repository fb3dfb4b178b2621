use super::{Bus, Cpu, Operand};
use crate::error::{CpuError, Result};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    ///
    /// Returns the second opcode byte so the caller can charge its cycles.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> Result<u8> {
        let prefix_pc = self.regs.pc.wrapping_sub(1);
        let cb = self.fetch8(bus)?;
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let operand = Operand::decode(cb & 0x07, &self.regs);
        let value = operand.read(&self.regs, bus)?;

        match x {
            0 => {
                let result = self.alu_shift(y, value);
                operand.write(&mut self.regs, bus, result)?;
            }
            1 => self.alu_bit(y, value),
            2 => operand.write(&mut self.regs, bus, value & !(1 << y))?,
            3 => operand.write(&mut self.regs, bus, value | (1 << y))?,
            _ => {
                return Err(CpuError::UnknownExtendedOpcode {
                    opcode: cb,
                    pc: prefix_pc,
                })
            }
        }

        Ok(cb)
    }
}
