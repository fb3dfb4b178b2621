use bitflags::bitflags;

use super::{REG_IF, REG_P1};
use crate::cpu::{Bus, Interrupt};
use crate::error::Result;

bitflags! {
    /// Buttons currently held down. The low nibble is the d-pad group and
    /// the high nibble the button group, each in P1 line order.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const SELECT = 1 << 6;
        const START = 1 << 7;
    }
}

/// P1 select bit for the d-pad group (0 selects).
const SELECT_DPAD: u8 = 0x10;
/// P1 select bit for the button group (0 selects).
const SELECT_BUTTONS: u8 = 0x20;

/// Joypad input collaborator feeding P1 and the joypad interrupt line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Joypad {
    pressed: Buttons,
}

impl Joypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> Buttons {
        self.pressed
    }

    pub fn press(&mut self, buttons: Buttons) {
        self.pressed.insert(buttons);
    }

    pub fn release(&mut self, buttons: Buttons) {
        self.pressed.remove(buttons);
    }

    /// Active-low P1 input lines (bits 0–3) for the groups selected in
    /// `select`.
    pub fn lines(&self, select: u8) -> u8 {
        let mut low = 0x0F;
        if select & SELECT_DPAD == 0 {
            low &= !self.pressed.bits() & 0x0F;
        }
        if select & SELECT_BUTTONS == 0 {
            low &= !(self.pressed.bits() >> 4) & 0x0F;
        }
        low
    }

    /// Recompute P1 from its select bits and store it back. Raises the
    /// joypad line in IF while any selected input is held.
    ///
    /// Returns whether the line was raised.
    pub fn refresh<B: Bus>(&self, bus: &mut B) -> Result<bool> {
        let select = bus.read8(REG_P1)? & (SELECT_DPAD | SELECT_BUTTONS);
        let low = self.lines(select);
        bus.write8(REG_P1, 0xC0 | select | low)?;

        let active = low != 0x0F;
        if active {
            let iflags = bus.read8(REG_IF)?;
            bus.write8(REG_IF, iflags | Interrupt::Joypad.bit())?;
        }
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::AddressSpace;

    #[test]
    fn unselected_groups_read_high() {
        let mut joypad = Joypad::new();
        joypad.press(Buttons::A | Buttons::DOWN);
        assert_eq!(joypad.lines(0x30), 0x0F);
    }

    #[test]
    fn selected_group_pulls_lines_low() {
        let mut joypad = Joypad::new();
        joypad.press(Buttons::A | Buttons::DOWN);
        // D-pad selected: DOWN is line 3.
        assert_eq!(joypad.lines(0x20), 0x07);
        // Buttons selected: A is line 0.
        assert_eq!(joypad.lines(0x10), 0x0E);
        joypad.release(Buttons::A);
        assert_eq!(joypad.lines(0x10), 0x0F);
    }

    #[test]
    fn refresh_raises_joypad_line() {
        let mut mem = AddressSpace::new();
        let mut joypad = Joypad::new();
        mem.write8(REG_P1, 0x10).unwrap();

        assert!(!joypad.refresh(&mut mem).unwrap());
        assert_eq!(mem.read8(REG_IF).unwrap(), 0x00);
        assert_eq!(mem.read8(REG_P1).unwrap(), 0xDF);

        joypad.press(Buttons::START);
        assert!(joypad.refresh(&mut mem).unwrap());
        assert_eq!(mem.read8(REG_IF).unwrap(), 0x10);
        assert_eq!(mem.read8(REG_P1).unwrap(), 0xD7);
    }
}
