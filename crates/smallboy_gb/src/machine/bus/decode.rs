/// Region an address resolves to, carrying the offset into its store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Region {
    Cart(usize),
    Vram(usize),
    Eram(usize),
    Wram(usize),
    /// Aliases the cartridge store at the same offset, not work RAM.
    Echo(usize),
    Oam(usize),
    Io(usize),
}

impl Region {
    /// Resolve a 16-bit address. `None` means no region backs it.
    pub(crate) fn decode(addr: u16) -> Option<Self> {
        let a = addr as usize;
        match addr {
            0x0000..=0x7FFF => Some(Region::Cart(a)),
            0x8000..=0x9FFF => Some(Region::Vram(a - 0x8000)),
            0xA000..=0xBFFF => Some(Region::Eram(a - 0xA000)),
            0xC000..=0xDFFF => Some(Region::Wram(a - 0xC000)),
            0xE000..=0xEFFF => Some(Region::Echo(a)),
            0xF000..=0xFE9F => Some(Region::Oam(a - 0xF000)),
            0xFF00..=0xFFFF => Some(Region::Io(a - 0xFF00)),
            0xFEA0..=0xFEFF => None,
        }
    }
}
