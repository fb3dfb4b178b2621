use crate::cpu::Cpu;
use crate::error::{CpuError, Result};

impl Cpu {
    /// STOP has no low-power model here and faults the CPU.
    pub(super) fn exec_stop(&mut self) -> Result<()> {
        Err(CpuError::Stopped {
            pc: self.regs.pc.wrapping_sub(1),
        })
    }

    pub(super) fn exec_di(&mut self) -> Result<()> {
        self.ime_disable_pending = true;
        Ok(())
    }

    /// IME becomes 1 at the interrupt poll after this instruction.
    pub(super) fn exec_ei(&mut self) -> Result<()> {
        self.ime_enable_pending = true;
        Ok(())
    }
}
