use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            3 => self.regs.af(),
            _ => unreachable!(),
        };
        self.push_u16(bus, value)
    }

    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop_u16(bus)?;
        match (opcode >> 4) & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            // set_af drops the low nibble of F.
            3 => self.regs.set_af(value),
            _ => unreachable!(),
        }
        Ok(())
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(
            opcode,
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF
        ));
        self.restart(bus, (opcode & 0x38) as u16)
    }

    /// RETI returns like RET and requests IME, which is set at the next
    /// poll.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        self.regs.pc = self.pop_u16(bus)?;
        self.ime_enable_pending = true;
        Ok(())
    }
}
