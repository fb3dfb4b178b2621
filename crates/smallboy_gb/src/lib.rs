pub mod cpu;
pub mod error;
pub mod machine;
pub mod opcodes;

pub use cpu::{Bus, Counters, Cpu, Flag, Interrupt, Registers};
pub use error::{Access, CpuError, Result};
pub use machine::{
    AddressSpace, BootRom, Buttons, Cartridge, CartridgeHeader, CartridgeKind, GameBoy, Joypad,
    StepOutcome,
};
pub use opcodes::{OpcodeInfo, OpcodeTable};

/// DMG master clock in T-cycles per second.
pub const CPU_FREQ: u32 = 4_194_304;
