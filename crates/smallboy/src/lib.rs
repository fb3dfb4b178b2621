use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use smallboy_gb::{BootRom, Cartridge, CpuError, GameBoy, OpcodeTable, CPU_FREQ};
use typed_builder::TypedBuilder;

/// Step budget when none is given.
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Sleep only once emulated time runs this far ahead of wall time.
const THROTTLE_SLACK: Duration = Duration::from_millis(2);

#[derive(Clone, Debug, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    /// 256-byte boot image. The built-in stub is used when absent.
    #[builder(default, setter(strip_option, into))]
    pub boot_path: Option<PathBuf>,
    /// Opcode metadata CSV replacing the embedded table.
    #[builder(default, setter(strip_option, into))]
    pub opcodes_path: Option<PathBuf>,
    /// Machine steps to run. Idle steps spent in HALT count.
    #[builder(default = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,
    /// Target clock in Hz. Runs unthrottled when absent.
    #[builder(default, setter(strip_option))]
    pub clock_hz: Option<u32>,
    /// Log a register trace line before every step, at trace level.
    #[builder(default)]
    pub trace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    StepLimit,
    Fault(CpuError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub instructions: u64,
    pub ticks: u64,
    pub pc: u16,
    pub stop: StopReason,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} instructions, {} ticks, PC=0x{:04X}, ",
            self.instructions, self.ticks, self.pc
        )?;
        match self.stop {
            StopReason::StepLimit => write!(f, "step limit reached"),
            StopReason::Fault(err) => write!(f, "stopped: {err}"),
        }
    }
}

/// Load the files named by `config` and run the machine.
///
/// IO and parse failures are errors. A CPU fault is a normal end of the
/// run and is reported in the summary.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let mut gb = load_machine(config)?;
    Ok(run_machine(&mut gb, config))
}

pub fn load_machine(config: &RunConfig) -> Result<GameBoy> {
    let rom = read_file(&config.rom_path, "ROM")?;
    let cart = Cartridge::from_bytes(rom);
    log_header(&cart);

    let boot = match &config.boot_path {
        Some(path) => {
            let bytes = read_file(path, "boot image")?;
            BootRom::load(&bytes)
                .with_context(|| format!("Invalid boot image '{}'", path.display()))?
        }
        None => BootRom::default(),
    };

    let opcodes = match &config.opcodes_path {
        Some(path) => {
            let bytes = read_file(path, "opcode table")?;
            let text = String::from_utf8(bytes)
                .with_context(|| format!("Opcode table '{}' is not UTF-8", path.display()))?;
            OpcodeTable::parse(&text)
                .with_context(|| format!("Invalid opcode table '{}'", path.display()))?
        }
        None => OpcodeTable::builtin().clone(),
    };

    Ok(GameBoy::with_opcodes(&cart, &boot, opcodes))
}

/// Step `gb` until the step budget runs out or the CPU faults.
pub fn run_machine(gb: &mut GameBoy, config: &RunConfig) -> RunSummary {
    let throttle = config.clock_hz.map(Throttle::new);
    let trace = config.trace && log::log_enabled!(log::Level::Trace);
    let mut stop = StopReason::StepLimit;

    for _ in 0..config.max_steps {
        if trace {
            log::trace!("{}", gb.trace_line());
        }
        if let Err(err) = gb.step() {
            stop = StopReason::Fault(err);
            break;
        }
        if let Some(throttle) = &throttle {
            throttle.wait(gb.counters().ticks);
        }
    }

    let counters = gb.counters();
    let summary = RunSummary {
        instructions: counters.instructions,
        ticks: counters.ticks,
        pc: gb.cpu.regs.pc,
        stop,
    };
    log::info!("Run finished: {summary}");
    summary
}

fn read_file(path: &Path, what: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {what} '{}'", path.display()))
}

fn log_header(cart: &Cartridge) {
    match cart.header() {
        Ok(header) => {
            log::info!(
                "Cartridge '{}' {:?}, ROM {} KiB, RAM {} KiB",
                header.title,
                header.kind,
                header.rom_size_kb,
                header.ram_size_kb
            );
            if !header.checksum_ok() {
                log::warn!(
                    "Header checksum mismatch: stored 0x{:02X}, computed 0x{:02X}",
                    header.checksum,
                    header.computed_checksum
                );
            }
        }
        Err(err) => log::warn!("No cartridge header: {err}"),
    }
}

/// Holds emulated time to wall time using the tick counter.
struct Throttle {
    start: Instant,
    clock_hz: u32,
}

impl Throttle {
    fn new(clock_hz: u32) -> Self {
        if clock_hz != CPU_FREQ {
            log::info!("Throttling to {clock_hz} Hz (hardware runs at {CPU_FREQ} Hz)");
        }
        Self {
            start: Instant::now(),
            clock_hz: clock_hz.max(1),
        }
    }

    fn target(&self, ticks: u64) -> Duration {
        let nanos = ticks as u128 * 1_000_000_000 / self.clock_hz as u128;
        Duration::from_nanos(nanos.min(u64::MAX as u128) as u64)
    }

    fn wait(&self, ticks: u64) {
        let target = self.target(ticks);
        let elapsed = self.start.elapsed();
        if target > elapsed + THROTTLE_SLACK {
            std::thread::sleep(target - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with(program: &[u8]) -> Cartridge {
        let mut rom = vec![0u8; 0x8000];
        rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
        Cartridge::from_bytes(rom)
    }

    fn config(max_steps: u64) -> RunConfig {
        RunConfig::builder()
            .rom_path("unused.gb")
            .max_steps(max_steps)
            .build()
    }

    #[test]
    fn builder_defaults() {
        let config = RunConfig::builder().rom_path("game.gb").build();
        assert_eq!(config.rom_path, PathBuf::from("game.gb"));
        assert_eq!(config.boot_path, None);
        assert_eq!(config.opcodes_path, None);
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(config.clock_hz, None);
        assert!(!config.trace);
    }

    #[test]
    fn step_limit_ends_run() {
        // JR -2
        let mut gb = GameBoy::new(&cart_with(&[0x18, 0xFE]), &BootRom::default());
        let summary = run_machine(&mut gb, &config(20));
        assert_eq!(summary.stop, StopReason::StepLimit);
        assert_eq!(summary.instructions, 20);
        assert_eq!(summary.pc, 0x0100);
    }

    #[test]
    fn fault_ends_run() {
        let mut gb = GameBoy::new(&cart_with(&[0xD3]), &BootRom::default());
        let summary = run_machine(&mut gb, &config(1_000));
        assert_eq!(
            summary.stop,
            StopReason::Fault(CpuError::UnknownOpcode {
                opcode: 0xD3,
                pc: 0x0100
            })
        );
        assert_eq!(summary.instructions, 13);
        assert_eq!(summary.ticks, 156);
        assert_eq!(summary.pc, 0x0101);
    }

    #[test]
    fn missing_rom_is_an_error() {
        let config = RunConfig::builder()
            .rom_path("/nonexistent/smallboy/rom.gb")
            .build();
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to read ROM"));
    }

    #[test]
    fn throttle_target_follows_clock() {
        let throttle = Throttle::new(CPU_FREQ);
        assert_eq!(throttle.target(CPU_FREQ as u64), Duration::from_secs(1));
        assert_eq!(throttle.target(0), Duration::ZERO);
    }

    #[test]
    fn summary_display() {
        let summary = RunSummary {
            instructions: 3,
            ticks: 12,
            pc: 0x0150,
            stop: StopReason::Fault(CpuError::Stopped { pc: 0x014F }),
        };
        assert!(summary
            .to_string()
            .starts_with("3 instructions, 12 ticks, PC=0x0150, stopped: "));
    }
}
