use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0x20 | 0x28 | 0x30 | 0x38));
        let (sample, polarity) = self.condition((opcode >> 3) & 0x03);
        self.jr(bus, sample, polarity)
    }

    pub(super) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0xC2 | 0xCA | 0xD2 | 0xDA));
        let (sample, polarity) = self.condition((opcode >> 3) & 0x03);
        self.jp(bus, sample, polarity)
    }

    pub(super) fn exec_jp_hl(&mut self) -> Result<()> {
        self.regs.pc = self.regs.hl();
        Ok(())
    }

    pub(super) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0xC4 | 0xCC | 0xD4 | 0xDC));
        let (sample, polarity) = self.condition((opcode >> 3) & 0x03);
        self.call(bus, sample, polarity)
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0xC0 | 0xC8 | 0xD0 | 0xD8));
        let (sample, polarity) = self.condition((opcode >> 3) & 0x03);
        self.ret(bus, sample, polarity)
    }
}
