use crate::cpu::{Counters, Cpu, Interrupt};
use crate::error::Result;
use crate::opcodes::OpcodeTable;

use super::{AddressSpace, BootRom, Cartridge, Joypad};

/// Result of one machine step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// T-cycles charged by the dispatcher.
    pub cycles: u32,
    /// Interrupt serviced by the poll that followed the instruction.
    pub interrupt: Option<Interrupt>,
}

/// High-level Game Boy machine.
///
/// Owns the CPU core, the address space, the joypad and the opcode table.
/// The driving loop owns the machine and calls `step` once per
/// instruction; nothing here is global.
#[derive(Clone, Debug)]
pub struct GameBoy {
    pub cpu: Cpu,
    pub memory: AddressSpace,
    pub joypad: Joypad,
    opcodes: OpcodeTable,
}

impl GameBoy {
    /// Build a machine with `cart` loaded and `boot` overlaid, using the
    /// embedded opcode table.
    pub fn new(cart: &Cartridge, boot: &BootRom) -> Self {
        Self::with_opcodes(cart, boot, OpcodeTable::builtin().clone())
    }

    pub fn with_opcodes(cart: &Cartridge, boot: &BootRom, opcodes: OpcodeTable) -> Self {
        let mut memory = AddressSpace::new();
        memory.load_cartridge(cart, boot);
        Self {
            cpu: Cpu::new(),
            memory,
            joypad: Joypad::new(),
            opcodes,
        }
    }

    pub fn opcodes(&self) -> &OpcodeTable {
        &self.opcodes
    }

    pub fn counters(&self) -> Counters {
        self.cpu.counters()
    }

    /// Dispatch one instruction, then run the interrupt poll.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let cycles = self.cpu.step(&mut self.memory, &self.opcodes)?;
        let interrupt = self.cpu.poll_interrupts(&mut self.memory, &self.joypad)?;
        Ok(StepOutcome { cycles, interrupt })
    }

    /// Step up to `max_steps` times, stopping at the first fatal error.
    ///
    /// Returns the number of steps taken. Idle steps spent in HALT count
    /// as steps.
    pub fn run(&mut self, max_steps: u64) -> Result<u64> {
        for taken in 0..max_steps {
            if let Err(err) = self.step() {
                log::debug!("GB machine stopped after {taken} steps: {err}");
                return Err(err);
            }
        }
        Ok(max_steps)
    }

    /// Register dump plus the four bytes at PC, one line per instruction
    /// for trace logs. Unmapped bytes show as `--`.
    pub fn trace_line(&self) -> String {
        let r = &self.cpu.regs;
        let pcmem: Vec<String> = (0..4u16)
            .map(|i| match self.memory.peek(r.pc.wrapping_add(i)) {
                Some(b) => format!("{b:02X}"),
                None => "--".to_string(),
            })
            .collect();
        format!(
            "A:{:02X} F:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} H:{:02X} L:{:02X} SP:{:04X} PC:{:04X} PCMEM:{}",
            r.a,
            r.f(),
            r.b,
            r.c,
            r.d,
            r.e,
            r.h,
            r.l,
            r.sp,
            r.pc,
            pcmem.join(","),
        )
    }
}
