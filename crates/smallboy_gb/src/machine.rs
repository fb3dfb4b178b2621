mod bus;
mod cartridge;
mod gameboy;
mod joypad;

pub use bus::{AddressSpace, LY_STUB, REG_BOOT, REG_IE, REG_IF, REG_LY, REG_P1};
pub use cartridge::{
    header_checksum, BootRom, Cartridge, CartridgeError, CartridgeHeader, CartridgeKind,
};
pub use gameboy::{GameBoy, StepOutcome};
pub use joypad::{Buttons, Joypad};
