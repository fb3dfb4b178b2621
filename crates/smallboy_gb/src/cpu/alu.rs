use super::{Cpu, Flag};

impl Cpu {
    /// 8-bit add with carry-in. Returns the result and sets Z N H C.
    pub(crate) fn alu_add8(&mut self, a: u8, b: u8, carry_in: bool) -> u8 {
        let c = carry_in as u8;
        let full = a as u16 + b as u16 + c as u16;
        let result = full as u8;

        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (a & 0x0F) + (b & 0x0F) + c > 0x0F);
        self.set_flag(Flag::C, full > 0xFF);
        result
    }

    /// 8-bit subtract with borrow-in. Returns the result and sets Z N H C.
    pub(crate) fn alu_sub8(&mut self, a: u8, b: u8, carry_in: bool) -> u8 {
        let c = carry_in as u8;
        let result = a.wrapping_sub(b).wrapping_sub(c);

        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (a & 0x0F) < (b & 0x0F) + c);
        self.set_flag(Flag::C, (a as u16) < b as u16 + c as u16);
        result
    }

    /// ADD/ADC on A. `use_carry` selects ADC.
    #[inline]
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let carry_in = use_carry && self.get_flag(Flag::C);
        self.regs.a = self.alu_add8(self.regs.a, value, carry_in);
    }

    /// SUB/SBC on A. `use_carry` selects SBC.
    #[inline]
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let carry_in = use_carry && self.get_flag(Flag::C);
        self.regs.a = self.alu_sub8(self.regs.a, value, carry_in);
    }

    /// Compare A with `value`. A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.alu_sub8(self.regs.a, value, false);
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, true);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    /// 8-bit increment used by INC r and INC (HL). C is left alone.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) + 1 > 0x0F);
        result
    }

    /// 8-bit decrement used by DEC r and DEC (HL). C is left alone.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) < 1);
        result
    }

    /// 16-bit add used by `ADD HL,rr`. Only H and C change.
    pub(crate) fn alu_add16(&mut self, a: u16, b: u16) -> u16 {
        self.set_flag(Flag::H, (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, a > 0xFFFF - b);
        a.wrapping_add(b)
    }

    /// SP plus a signed 8-bit immediate, shared by `ADD SP,e8` and
    /// `LD HL,SP+e8`.
    ///
    /// H comes from the low nibble and C from the low byte of SP plus the
    /// raw immediate byte. Z and N are always cleared.
    pub(crate) fn alu_add_sp_signed(&mut self, sp: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (sp & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flag::C, (sp & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        sp.wrapping_add(offset)
    }

    /// Decimal adjust A after a BCD add or subtract. N is unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// Rotate/shift/swap selected by `op` (the CB `y` field, 0..=7).
    ///
    /// Sets Z from the result, clears N and H, and puts the bit shifted out
    /// in C. SWAP clears C.
    pub(super) fn alu_shift(&mut self, op: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry) = match op & 0x07 {
            // RLC
            0 => (value.rotate_left(1), value & 0x80 != 0),
            // RRC
            1 => (value.rotate_right(1), value & 0x01 != 0),
            // RL
            2 => ((value << 1) | carry_in as u8, value & 0x80 != 0),
            // RR
            3 => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
            // SLA
            4 => (value << 1, value & 0x80 != 0),
            // SRA
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            // SWAP
            6 => (value.rotate_left(4), false),
            // SRL
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry);
        result
    }

    /// BIT b: Z is the inverse of the tested bit, H=1, N=0, C untouched.
    #[inline]
    pub(super) fn alu_bit(&mut self, bit: u8, value: u8) {
        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
    }
}
