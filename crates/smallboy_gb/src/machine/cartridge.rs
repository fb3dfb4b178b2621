use thiserror::Error;

/// Offset of the first header byte covered by the checksum (the title).
const HEADER_START: usize = 0x134;
/// Offset of the last header byte covered by the checksum.
const HEADER_END: usize = 0x14C;
const HEADER_LEN: usize = 0x150;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("image is {len} bytes, too short to hold a header")]
    TooShort { len: usize },
    #[error("boot image must be exactly 256 bytes, got {len}")]
    BootSize { len: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartridgeKind {
    RomOnly,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
    Unknown(u8),
}

impl CartridgeKind {
    pub fn from_header_byte(b: u8) -> Self {
        match b {
            0x00 => CartridgeKind::RomOnly,
            0x01..=0x03 => CartridgeKind::Mbc1,
            0x05..=0x06 => CartridgeKind::Mbc2,
            0x0F..=0x13 => CartridgeKind::Mbc3,
            0x19..=0x1E => CartridgeKind::Mbc5,
            other => CartridgeKind::Unknown(other),
        }
    }
}

/// Header fields, used for diagnostics only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub kind: CartridgeKind,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub rom_size_kb: u32,
    pub ram_size_kb: u32,
    /// Checksum byte stored at 0x14D.
    pub checksum: u8,
    /// Checksum recomputed over 0x134–0x14C.
    pub computed_checksum: u8,
}

impl CartridgeHeader {
    pub fn checksum_ok(&self) -> bool {
        self.checksum == self.computed_checksum
    }
}

/// Raw cartridge image, loaded verbatim at address 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cartridge {
    rom: Vec<u8>,
}

impl Cartridge {
    /// Any image is accepted for execution. Only `header` needs the full
    /// 0x150 bytes.
    pub fn from_bytes(rom: Vec<u8>) -> Self {
        Self { rom }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.rom
    }

    pub fn header(&self) -> Result<CartridgeHeader, CartridgeError> {
        let rom = &self.rom;
        if rom.len() < HEADER_LEN {
            return Err(CartridgeError::TooShort { len: rom.len() });
        }

        let title = String::from_utf8_lossy(&rom[HEADER_START..HEADER_START + 16])
            .trim_matches('\0')
            .to_string();
        let rom_size_code = rom[0x148];
        let ram_size_code = rom[0x149];
        let rom_size_kb = if rom_size_code <= 8 {
            32 << rom_size_code
        } else {
            0
        };
        let ram_size_kb = match ram_size_code {
            0x02 => 8,
            0x03 => 32,
            0x04 => 128,
            0x05 => 64,
            _ => 0,
        };

        Ok(CartridgeHeader {
            title,
            kind: CartridgeKind::from_header_byte(rom[0x147]),
            rom_size_code,
            ram_size_code,
            rom_size_kb,
            ram_size_kb,
            checksum: rom[0x14D],
            computed_checksum: header_checksum(&rom[HEADER_START..=HEADER_END]),
        })
    }
}

/// `x = x - byte - 1` over the header bytes, starting from zero.
pub fn header_checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
}

/// 256-byte boot overlay mapped over 0x0000–0x00FF at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootRom {
    bytes: [u8; BootRom::SIZE],
}

impl BootRom {
    pub const SIZE: usize = 0x100;

    pub fn load(bytes: &[u8]) -> Result<Self, CartridgeError> {
        let bytes = bytes
            .try_into()
            .map_err(|_| CartridgeError::BootSize { len: bytes.len() })?;
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for BootRom {
    /// Minimal boot stub. It leaves the registers in the DMG post-boot
    /// state, writes 0xFF50 at 0x00FE and falls through to 0x0100.
    fn default() -> Self {
        Self {
            bytes: boot_stub(),
        }
    }
}

const fn boot_stub() -> [u8; BootRom::SIZE] {
    const PROLOGUE: [u8; 28] = [
        0x31, 0xFE, 0xFF, // LD SP,$FFFE
        0x3E, 0x91, 0xE0, 0x40, // LD A,$91 ; LDH ($40),A  (LCDC)
        0x3E, 0xFC, 0xE0, 0x47, // LD A,$FC ; LDH ($47),A  (BGP)
        0x21, 0xB0, 0x01, 0xE5, 0xF1, // LD HL,$01B0 ; PUSH HL ; POP AF
        0x01, 0x13, 0x00, // LD BC,$0013
        0x11, 0xD8, 0x00, // LD DE,$00D8
        0x21, 0x4D, 0x01, // LD HL,$014D
        0xC3, 0xFE, 0x00, // JP $00FE
    ];

    let mut rom = [0u8; BootRom::SIZE];
    let mut i = 0;
    while i < PROLOGUE.len() {
        rom[i] = PROLOGUE[i];
        i += 1;
    }
    // LDH ($50),A
    rom[0xFE] = 0xE0;
    rom[0xFF] = 0x50;
    rom
}
