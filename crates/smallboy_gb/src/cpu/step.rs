use super::{Bus, Cpu};
use crate::error::Result;
use crate::opcodes::OpcodeTable;

/// Cost charged for each idle step spent waiting in HALT.
const HALT_IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Execute a single instruction and return the number of T-cycles
    /// charged for it.
    ///
    /// The cycle cost comes from the opcode metadata table and is used only
    /// for the diagnostic counters. Any error faults the CPU: this and
    /// every later call return the same error without touching state.
    pub fn step<B: Bus>(&mut self, bus: &mut B, opcodes: &OpcodeTable) -> Result<u32> {
        if let Some(err) = self.fault {
            return Err(err);
        }
        let result = self.step_instruction(bus, opcodes);
        self.latch(result)
    }

    fn step_instruction<B: Bus>(&mut self, bus: &mut B, opcodes: &OpcodeTable) -> Result<u32> {
        if self.halted {
            if self.triggered_lines(bus)? & 0x1F == 0 {
                self.counters.ticks += HALT_IDLE_CYCLES as u64;
                return Ok(HALT_IDLE_CYCLES);
            }
            self.halted = false;
            if self.ime {
                // The poll that follows services the line before the next fetch.
                self.counters.ticks += HALT_IDLE_CYCLES as u64;
                return Ok(HALT_IDLE_CYCLES);
            }
        }

        let opcode = self.fetch8(bus)?;
        let cycles = match self.exec_opcode(bus, opcode)? {
            Some(cb) => opcodes.extended(cb).cycles,
            None => opcodes.primary(opcode).cycles,
        };

        self.counters.instructions += 1;
        self.counters.ticks += cycles as u64;
        Ok(cycles)
    }

    /// Record the first fatal error so the CPU stays dead until `reset`.
    pub(super) fn latch<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if self.fault.is_none() {
                log::error!(
                    "GB CPU faulted: {err} (PC=0x{pc:04X} SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                    pc = self.regs.pc,
                    sp = self.regs.sp,
                    af = self.regs.af(),
                    bc = self.regs.bc(),
                    de = self.regs.de(),
                    hl = self.regs.hl(),
                );
            }
            self.fault = Some(*err);
        }
        result
    }
}
