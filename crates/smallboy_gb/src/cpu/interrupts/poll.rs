use super::super::{Bus, Cpu};
use super::Interrupt;
use crate::error::Result;
use crate::machine::{REG_IE, REG_IF};

impl Cpu {
    /// Raw `IE & IF`, including lines the controller never dispatches.
    pub(in crate::cpu) fn triggered_lines<B: Bus>(&self, bus: &mut B) -> Result<u8> {
        let ie = bus.read8(REG_IE)?;
        let iflags = bus.read8(REG_IF)?;
        Ok(ie & iflags)
    }
}

/// Pick the highest-priority dispatchable line in `trigger`.
pub(in crate::cpu) fn select(trigger: u8) -> Option<Interrupt> {
    Interrupt::DISPATCHED
        .into_iter()
        .find(|irq| trigger & irq.bit() != 0)
}
