//! Opcode metadata table used for cycle accounting and diagnostics.
//!
//! The table is a delimited text resource with one line per opcode:
//!
//! ```text
//! opcode,name,bytes,cycles,Z,N,H,C
//! 0x3E,LD A n8,2,8,-,-,-,-
//! ```
//!
//! The first 256 lines describe the unprefixed opcodes, the next 256 the
//! CB-prefixed ones (their names start with `CB `). Cycle counts are
//! T-cycles, using the taken cost for conditional branches.

use lazy_static::lazy_static;
use thiserror::Error;

use crate::cpu::Bus;
use crate::error::Result;

const BUILTIN_CSV: &str = include_str!("../assets/opcodes.csv");

lazy_static! {
    static ref BUILTIN: OpcodeTable =
        OpcodeTable::parse(BUILTIN_CSV).expect("embedded opcode table is well-formed");
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OpcodeTableError {
    #[error("line {line}: expected 8 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("duplicate entry for {prefix}{opcode:#04x} on line {line}")]
    Duplicate {
        line: usize,
        prefix: &'static str,
        opcode: u8,
    },
    #[error("missing {prefix}{opcode:#04x}")]
    Missing { prefix: &'static str, opcode: u8 },
}

/// How an instruction affects one flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagEffect {
    Unaffected,
    Reset,
    Set,
    /// Computed from the result.
    Computed,
}

impl FlagEffect {
    fn parse(field: &str) -> Option<Self> {
        match field {
            "-" => Some(FlagEffect::Unaffected),
            "0" => Some(FlagEffect::Reset),
            "1" => Some(FlagEffect::Set),
            "Z" | "N" | "H" | "C" => Some(FlagEffect::Computed),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub name: String,
    pub bytes: u8,
    pub cycles: u32,
    /// Effects on Z, N, H, C in that order.
    pub flags: [FlagEffect; 4],
}

impl Default for OpcodeInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            bytes: 1,
            cycles: 0,
            flags: [FlagEffect::Unaffected; 4],
        }
    }
}

#[derive(Clone, Debug)]
pub struct OpcodeTable {
    primary: Vec<OpcodeInfo>,
    extended: Vec<OpcodeInfo>,
}

impl OpcodeTable {
    /// The table embedded in this crate.
    pub fn builtin() -> &'static OpcodeTable {
        &BUILTIN
    }

    pub fn parse(text: &str) -> std::result::Result<Self, OpcodeTableError> {
        let mut primary: Vec<Option<OpcodeInfo>> = vec![None; 256];
        let mut extended: Vec<Option<OpcodeInfo>> = vec![None; 256];
        let mut rows = 0usize;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
            if fields.len() != 8 {
                return Err(OpcodeTableError::FieldCount {
                    line,
                    found: fields.len(),
                });
            }

            let opcode = parse_hex_u8(fields[0]).ok_or_else(|| invalid(line, "opcode", fields[0]))?;
            let name = fields[1].to_string();
            let bytes = fields[2]
                .parse::<u8>()
                .map_err(|_| invalid(line, "byte count", fields[2]))?;
            let cycles = fields[3]
                .parse::<u32>()
                .map_err(|_| invalid(line, "cycle count", fields[3]))?;
            let mut flags = [FlagEffect::Unaffected; 4];
            for (slot, field) in flags.iter_mut().zip(&fields[4..]) {
                *slot = FlagEffect::parse(field).ok_or_else(|| invalid(line, "flag", field))?;
            }

            // The first 256 rows are the primary table even if a primary
            // mnemonic happened to start with "CB".
            let (table, prefix) = if rows >= 256 || name.starts_with("CB ") {
                (&mut extended, "0xcb ")
            } else {
                (&mut primary, "")
            };
            let slot = &mut table[opcode as usize];
            if slot.is_some() {
                return Err(OpcodeTableError::Duplicate {
                    line,
                    prefix,
                    opcode,
                });
            }
            *slot = Some(OpcodeInfo {
                name,
                bytes,
                cycles,
                flags,
            });
            rows += 1;
        }

        Ok(Self {
            primary: complete(primary, "")?,
            extended: complete(extended, "0xcb ")?,
        })
    }

    pub fn primary(&self, opcode: u8) -> &OpcodeInfo {
        &self.primary[opcode as usize]
    }

    pub fn extended(&self, opcode: u8) -> &OpcodeInfo {
        &self.extended[opcode as usize]
    }

    /// Render the instruction at `addr` as `NAME [operand bytes]` and
    /// return it with its length in bytes.
    pub fn disassemble<B: Bus>(&self, bus: &mut B, addr: u16) -> Result<(String, u16)> {
        let opcode = bus.read8(addr)?;
        let info = if opcode == 0xCB {
            self.extended(bus.read8(addr.wrapping_add(1))?)
        } else {
            self.primary(opcode)
        };

        let len = info.bytes.max(1) as u16;
        let mut text = info.name.clone();
        if opcode != 0xCB && len > 1 {
            let mut operand = 0u16;
            for i in (1..len).rev() {
                operand = (operand << 8) | bus.read8(addr.wrapping_add(i))? as u16;
            }
            let width = (len as usize - 1) * 2;
            text.push_str(&format!(" ${operand:0width$X}"));
        }
        Ok((text, len))
    }
}

fn parse_hex_u8(field: &str) -> Option<u8> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))?;
    u8::from_str_radix(digits, 16).ok()
}

fn invalid(line: usize, field: &'static str, value: &str) -> OpcodeTableError {
    OpcodeTableError::InvalidField {
        line,
        field,
        value: value.to_string(),
    }
}

fn complete(
    table: Vec<Option<OpcodeInfo>>,
    prefix: &'static str,
) -> std::result::Result<Vec<OpcodeInfo>, OpcodeTableError> {
    table
        .into_iter()
        .enumerate()
        .map(|(opcode, entry)| {
            entry.ok_or(OpcodeTableError::Missing {
                prefix,
                opcode: opcode as u8,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::AddressSpace;

    #[test]
    fn builtin_table_is_complete() {
        let table = OpcodeTable::builtin();
        assert_eq!(table.primary(0x00).name, "NOP");
        assert_eq!(table.primary(0x3E).bytes, 2);
        assert_eq!(table.primary(0x3E).cycles, 8);
        assert_eq!(table.primary(0xCD).cycles, 24);
        assert_eq!(table.extended(0x7C).name, "CB BIT 7 H");
        assert_eq!(table.extended(0x06).cycles, 16);
    }

    #[test]
    fn flag_columns_are_decoded() {
        let info = OpcodeTable::builtin().primary(0x80);
        assert_eq!(
            info.flags,
            [
                FlagEffect::Computed,
                FlagEffect::Reset,
                FlagEffect::Computed,
                FlagEffect::Computed
            ]
        );
    }

    #[test]
    fn truncated_table_is_rejected() {
        let text: String = BUILTIN_CSV.lines().take(300).map(|l| format!("{l}\n")).collect();
        assert_eq!(
            OpcodeTable::parse(&text).unwrap_err(),
            OpcodeTableError::Missing {
                prefix: "0xcb ",
                opcode: 44
            }
        );
    }

    #[test]
    fn malformed_row_is_rejected() {
        let err = OpcodeTable::parse("0x00,NOP,1,4,-,-,-\n").unwrap_err();
        assert_eq!(err, OpcodeTableError::FieldCount { line: 1, found: 7 });

        let err = OpcodeTable::parse("0x00,NOP,one,4,-,-,-,-\n").unwrap_err();
        assert!(matches!(err, OpcodeTableError::InvalidField { line: 1, .. }));
    }

    #[test]
    fn disassemble_renders_operands() {
        let mut mem = AddressSpace::new();
        mem.write8(0xC000, 0x31).unwrap();
        mem.write16(0xC001, 0xFFFE).unwrap();
        mem.write8(0xC003, 0xCB).unwrap();
        mem.write8(0xC004, 0x7C).unwrap();

        let table = OpcodeTable::builtin();
        assert_eq!(
            table.disassemble(&mut mem, 0xC000).unwrap(),
            ("LD SP n16 $FFFE".to_string(), 3)
        );
        assert_eq!(
            table.disassemble(&mut mem, 0xC003).unwrap(),
            ("CB BIT 7 H".to_string(), 2)
        );
    }
}
