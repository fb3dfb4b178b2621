use super::super::Cpu;

impl Cpu {
    /// Apply IME changes requested by EI/RETI and DI during the previous
    /// instruction. Enable is applied first, so a disable in the same
    /// window wins.
    #[inline]
    pub(in crate::cpu) fn apply_ime_requests(&mut self) {
        if self.ime_enable_pending {
            self.ime = true;
            self.ime_enable_pending = false;
            log::debug!("GB CPU: IME enabled at PC=0x{:04X}", self.regs.pc);
        }
        if self.ime_disable_pending {
            self.ime = false;
            self.ime_disable_pending = false;
            log::debug!("GB CPU: IME disabled at PC=0x{:04X}", self.regs.pc);
        }
    }
}
