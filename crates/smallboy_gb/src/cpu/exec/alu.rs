use crate::cpu::{Bus, Cpu, Flag};
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_alu_reg_group<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let operation = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, opcode & 0x07)?;
        self.alu_dispatch(operation, value);
        Ok(())
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<()> {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));
        let value = self.fetch8(bus)?;
        self.alu_dispatch((opcode >> 3) & 0x07, value);
        Ok(())
    }

    fn alu_dispatch(&mut self, operation: u8, value: u8) {
        match operation {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            7 => self.alu_cp(value),
            _ => unreachable!(),
        }
    }

    /// RLCA, RRCA, RLA, RRA. Same as the CB forms except Z is forced to 0.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));
        let a = self.regs.a;
        self.regs.a = self.alu_shift(opcode >> 3, a);
        self.set_flag(Flag::Z, false);
        Ok(())
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = match opcode {
            0x09 => self.regs.bc(),
            0x19 => self.regs.de(),
            0x29 => self.regs.hl(),
            0x39 => self.regs.sp,
            _ => unreachable!(),
        };
        let result = self.alu_add16(self.regs.hl(), value);
        self.regs.set_hl(result);
        Ok(())
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        let imm = self.fetch8(bus)?;
        self.regs.sp = self.alu_add_sp_signed(self.regs.sp, imm);
        Ok(())
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        let imm = self.fetch8(bus)?;
        let result = self.alu_add_sp_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        Ok(())
    }

    pub(super) fn exec_daa(&mut self) -> Result<()> {
        self.alu_daa();
        Ok(())
    }

    pub(super) fn exec_cpl(&mut self) -> Result<()> {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::H, true);
        self.set_flag(Flag::N, true);
        Ok(())
    }

    pub(super) fn exec_scf(&mut self) -> Result<()> {
        self.set_flag(Flag::C, true);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        Ok(())
    }

    pub(super) fn exec_ccf(&mut self) -> Result<()> {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::C, !carry);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        Ok(())
    }
}
