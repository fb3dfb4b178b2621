use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CpuError>;

/// Direction of a bus access that failed to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

/// Fatal conditions raised while stepping the CPU.
///
/// None of these are retryable. Once `Cpu::step` has returned one of them
/// the CPU keeps returning the same value until it is reset.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CpuError {
    /// The address is wider than 16 bits when a 16-bit access spills past
    /// 0xFFFF.
    #[error("unmapped {access} at address {addr:#06x}")]
    UnmappedAddress { addr: u32, access: Access },
    #[error("unknown opcode {opcode:#04x} at {pc:#06x}")]
    UnknownOpcode { opcode: u8, pc: u16 },
    #[error("unknown extended opcode 0xcb {opcode:#04x} at {pc:#06x}")]
    UnknownExtendedOpcode { opcode: u8, pc: u16 },
    #[error("STOP at {pc:#06x} is not supported")]
    Stopped { pc: u16 },
}

impl CpuError {
    pub(crate) fn unmapped(addr: u32, access: Access) -> Self {
        CpuError::UnmappedAddress { addr, access }
    }
}
