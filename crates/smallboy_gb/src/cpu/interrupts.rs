mod ime;
mod poll;
mod service;

/// Interrupt lines in IE/IF bit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// Lines the controller dispatches, highest priority first. Serial is
    /// enabled in IE but never serviced.
    pub const DISPATCHED: [Interrupt; 4] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Joypad,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Interrupt::VBlank => 0,
            Interrupt::LcdStat => 1,
            Interrupt::Timer => 2,
            Interrupt::Serial => 3,
            Interrupt::Joypad => 4,
        }
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Restart vector: 0x40, 0x48, 0x50, 0x58 or 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self.index() as u16) * 8
    }
}
