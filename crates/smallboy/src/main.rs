use std::path::PathBuf;

use smallboy::{RunConfig, StopReason};

const USAGE: &str = "Usage: smallboy <rom_path> [--boot PATH] [--opcodes PATH] [--steps N] [--clock HZ|--realtime] [--trace]";

fn usage_exit(message: &str) -> ! {
    eprintln!("{message}\n{USAGE}");
    std::process::exit(2);
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> T {
    let value = value.unwrap_or_else(|| usage_exit(&format!("Missing value for {flag}.")));
    value
        .parse()
        .unwrap_or_else(|_| usage_exit(&format!("Invalid value '{value}' for {flag}.")))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut rom_path: Option<PathBuf> = None;
    let mut boot_path = None;
    let mut opcodes_path = None;
    let mut max_steps = smallboy::DEFAULT_MAX_STEPS;
    let mut clock_hz = None;
    let mut trace = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--boot" => {
                boot_path = Some(PathBuf::from(
                    args.next()
                        .unwrap_or_else(|| usage_exit("Missing value for --boot.")),
                ))
            }
            "--opcodes" => {
                opcodes_path = Some(PathBuf::from(
                    args.next()
                        .unwrap_or_else(|| usage_exit("Missing value for --opcodes.")),
                ))
            }
            "--steps" => max_steps = parse_number("--steps", args.next()),
            "--clock" => clock_hz = Some(parse_number("--clock", args.next())),
            "--realtime" => clock_hz = Some(smallboy_gb::CPU_FREQ),
            "--trace" => trace = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            other if other.starts_with('-') => usage_exit(&format!("Unknown option '{other}'.")),
            other => {
                if rom_path.is_some() {
                    usage_exit(&format!("Unexpected argument '{other}'."));
                }
                rom_path = Some(PathBuf::from(other));
            }
        }
    }

    let Some(rom_path) = rom_path else {
        usage_exit("No ROM path provided.");
    };
    log::info!("Running ROM path: '{}'", rom_path.display());

    let config = RunConfig {
        rom_path,
        boot_path,
        opcodes_path,
        max_steps,
        clock_hz,
        trace,
    };
    let summary = smallboy::run(&config)?;
    println!("{summary}");

    if let StopReason::Fault(_) = summary.stop {
        std::process::exit(1);
    }
    Ok(())
}
