mod alu;
mod cb;
mod exec;
mod helpers;
mod interrupts;
mod operand;
mod regs;
mod step;

pub(crate) use helpers::Polarity;
pub use interrupts::Interrupt;
pub use operand::Operand;
pub use regs::{Flag, Reg8, Registers};

use crate::error::{Access, CpuError, Result};

/// Abstraction over the Game Boy address space as seen by the CPU.
///
/// Every access is fallible: an address outside all mapped windows is a
/// fatal decode error rather than a silent zero.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> Result<u8>;
    fn write8(&mut self, addr: u16, value: u8) -> Result<()>;

    /// Little-endian 16-bit read, resolving each byte through `read8`.
    ///
    /// A read at 0xFFFF would need a byte at 0x10000, which does not
    /// exist.
    fn read16(&mut self, addr: u16) -> Result<u16> {
        let lo = self.read8(addr)?;
        let hi = self.read8(next_addr(addr, Access::Read)?)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn write16(&mut self, addr: u16, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo)?;
        self.write8(next_addr(addr, Access::Write)?, hi)
    }
}

#[inline]
fn next_addr(addr: u16, access: Access) -> Result<u16> {
    addr.checked_add(1)
        .ok_or_else(|| CpuError::unmapped(u32::from(addr) + 1, access))
}

/// Diagnostic counters owned by the CPU. Only the dispatcher mutates them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub instructions: u64,
    pub ticks: u64,
}

/// Game Boy CPU core.
///
/// Power-on state is all zeros with PC at 0x0000, where the boot overlay
/// lives. IME changes requested by EI/RETI and DI take effect during the
/// interrupt poll that follows the next instruction.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    /// Waiting in HALT for `IE & IF` to become non-zero.
    pub halted: bool,
    ime_enable_pending: bool,
    ime_disable_pending: bool,
    counters: Counters,
    /// First fatal error hit by `step`. Once set, the CPU is dead until
    /// `reset`.
    fault: Option<CpuError>,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the CPU to its power-on state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn fault(&self) -> Option<CpuError> {
        self.fault
    }

    /// True when an EI or RETI is waiting for the next poll to set IME.
    pub fn enable_pending(&self) -> bool {
        self.ime_enable_pending
    }

    /// True when a DI is waiting for the next poll to clear IME.
    pub fn disable_pending(&self) -> bool {
        self.ime_disable_pending
    }
}
