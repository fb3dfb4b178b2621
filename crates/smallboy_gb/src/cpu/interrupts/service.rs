use super::super::{Bus, Cpu};
use super::{poll, Interrupt};
use crate::error::Result;
use crate::machine::Joypad;
use crate::machine::REG_IF;

impl Cpu {
    /// Interrupt poll run once after every dispatched instruction.
    ///
    /// In order: refresh the joypad lines (which may raise IF bit 4),
    /// service at most one interrupt when IME is set, then apply any EI/DI
    /// request left by the previous instruction. Returns the serviced line.
    pub fn poll_interrupts<B: Bus>(
        &mut self,
        bus: &mut B,
        joypad: &Joypad,
    ) -> Result<Option<Interrupt>> {
        if let Some(err) = self.fault {
            return Err(err);
        }
        let result = self.poll_interrupts_inner(bus, joypad);
        self.latch(result)
    }

    fn poll_interrupts_inner<B: Bus>(
        &mut self,
        bus: &mut B,
        joypad: &Joypad,
    ) -> Result<Option<Interrupt>> {
        joypad.refresh(bus)?;

        let serviced = if self.ime {
            self.handle_interrupts(bus)?
        } else {
            None
        };

        self.apply_ime_requests();
        Ok(serviced)
    }

    /// Dispatch one interrupt if IME is set and `IE & IF` is non-zero.
    ///
    /// IME is cleared for any non-zero trigger, even when only the serial
    /// line or the unused high bits are set and nothing is dispatched.
    fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Result<Option<Interrupt>> {
        let trigger = self.triggered_lines(bus)?;
        if trigger == 0 {
            return Ok(None);
        }
        self.ime = false;

        let Some(irq) = poll::select(trigger) else {
            return Ok(None);
        };

        let iflags = bus.read8(REG_IF)?;
        bus.write8(REG_IF, iflags & !irq.bit())?;
        self.halted = false;

        let pc = self.regs.pc;
        self.restart(bus, irq.vector())?;
        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X} IF=0x{:02X}",
            irq,
            irq.vector(),
            pc,
            self.regs.sp,
            iflags,
        );
        Ok(Some(irq))
    }
}
