use super::{BootRom, Cartridge};

mod decode;
mod traits;

pub(crate) use decode::Region;

/// P1 joypad register.
pub const REG_P1: u16 = 0xFF00;
/// IF, pending interrupt lines.
pub const REG_IF: u16 = 0xFF0F;
/// LY scanline register. Reads are hardwired to `LY_STUB`.
pub const REG_LY: u16 = 0xFF44;
/// Boot overlay unmap register. Stored but never acted upon.
pub const REG_BOOT: u16 = 0xFF50;
/// IE, enabled interrupt lines.
pub const REG_IE: u16 = 0xFFFF;

/// Value every LY read returns, as if the PPU sat in VBlank.
pub const LY_STUB: u8 = 0x90;

const REGION_8K: usize = 0x2000;
/// Minimum cartridge backing size. The echo window at 0xE000–0xEFFF reads
/// the cartridge store at the same offset, so it must reach 0xEFFF.
const CART_MIN: usize = 0xF000;
/// Object attribute store for 0xF000–0xFE9F.
const OAM_SIZE: usize = 0x1000;
/// IO registers and high RAM, 0xFF00–0xFFFF.
const IO_SIZE: usize = 0x100;

/// Flat 16-bit address space split into fixed-size regions.
///
/// | Range         | Region                                       |
/// |---------------|----------------------------------------------|
/// | 0x0000–0x7FFF | cartridge image (writes stored, no banking)  |
/// | 0x8000–0x9FFF | video RAM                                    |
/// | 0xA000–0xBFFF | external RAM                                 |
/// | 0xC000–0xDFFF | work RAM                                     |
/// | 0xE000–0xEFFF | echo of the cartridge image                  |
/// | 0xF000–0xFE9F | object attributes                            |
/// | 0xFEA0–0xFEFF | unmapped                                     |
/// | 0xFF00–0xFFFF | IO and high RAM                              |
#[derive(Clone)]
pub struct AddressSpace {
    cart: Vec<u8>,
    vram: Vec<u8>,
    eram: Vec<u8>,
    wram: Vec<u8>,
    oam: Vec<u8>,
    io: Vec<u8>,
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self {
            cart: vec![0; CART_MIN],
            vram: vec![0; REGION_8K],
            eram: vec![0; REGION_8K],
            wram: vec![0; REGION_8K],
            oam: vec![0; OAM_SIZE],
            io: vec![0; IO_SIZE],
        }
    }
}

impl std::fmt::Debug for AddressSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressSpace")
            .field("cart_len", &self.cart.len())
            .finish_non_exhaustive()
    }
}

impl AddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cartridge image at address 0 and lay the boot overlay over
    /// 0x0000–0x00FF.
    pub fn load_cartridge(&mut self, cart: &Cartridge, boot: &BootRom) {
        let image = cart.bytes();
        self.cart = vec![0; image.len().max(CART_MIN)];
        self.cart[..image.len()].copy_from_slice(image);
        self.cart[..BootRom::SIZE].copy_from_slice(boot.bytes());
        log::debug!(
            "GB memory: loaded {} byte cartridge, {} bytes backing",
            image.len(),
            self.cart.len()
        );
    }

    /// Video RAM, 0x8000–0x9FFF, for a rendering collaborator.
    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    /// Background tile map window, 0x9800–0x9BFF.
    pub fn background_map(&self) -> &[u8] {
        &self.vram[0x1800..0x1C00]
    }

    /// Read a byte without going through the fallible bus interface.
    /// `None` for addresses no region backs.
    pub fn peek(&self, addr: u16) -> Option<u8> {
        if addr == REG_LY {
            return Some(LY_STUB);
        }
        Region::decode(addr).map(|region| match region {
            Region::Cart(i) | Region::Echo(i) => self.cart[i],
            Region::Vram(i) => self.vram[i],
            Region::Eram(i) => self.eram[i],
            Region::Wram(i) => self.wram[i],
            Region::Oam(i) => self.oam[i],
            Region::Io(i) => self.io[i],
        })
    }

    fn slot(&mut self, region: Region) -> &mut u8 {
        match region {
            Region::Cart(i) | Region::Echo(i) => &mut self.cart[i],
            Region::Vram(i) => &mut self.vram[i],
            Region::Eram(i) => &mut self.eram[i],
            Region::Wram(i) => &mut self.wram[i],
            Region::Oam(i) => &mut self.oam[i],
            Region::Io(i) => &mut self.io[i],
        }
    }
}
