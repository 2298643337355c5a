//! 6502/65C02 Disassembler Module
//!
//! Converts binary machine code into assembly text using the opcode table of
//! the selected chip variant. Bytes that do not decode (illegal opcodes or
//! instructions truncated by the end of input) become `.byte` directives.
//!
//! ```
//! use lib65xx::{disassemble, format_instruction, CpuClass, DisassemblyOptions};
//!
//! let options = DisassemblyOptions { start_address: 0x8000, ..Default::default() };
//! let listing = disassemble(&[0xA9, 0x42, 0x80, 0xFE], CpuClass::Cmos65C02, options);
//!
//! assert_eq!(format_instruction(&listing[0]), "LDA #$42");
//! assert_eq!(format_instruction(&listing[1]), "BRA $8002");
//! ```

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::config::CpuClass;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedInstruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "BBR3"), `.byte` for data
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes following the opcode
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes, opcode included
    pub size_bytes: u8,

    /// Base cycle cost (excluding penalties)
    pub base_cycles: u8,
}

impl DecodedInstruction {
    /// Returns true for `.byte` directives produced from undecodable input.
    pub fn is_data(&self) -> bool {
        self.mnemonic == ".byte"
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Address of the first byte (affects addresses and branch targets)
    pub start_address: u16,

    /// Prefix each line with its address and raw bytes
    pub hex_dump: bool,
}

/// Disassemble a byte slice into a vector of instructions
pub fn disassemble(bytes: &[u8], class: CpuClass, options: DisassemblyOptions) -> Vec<DecodedInstruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = options.start_address;

    while offset < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[offset..], address, class)
            .unwrap_or_else(|| decoder::data_byte(bytes[offset], address));

        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

/// Disassembles `bytes` into a multi-line listing.
pub fn disassemble_to_string(bytes: &[u8], class: CpuClass, options: DisassemblyOptions) -> String {
    disassemble(bytes, class, options)
        .iter()
        .map(|instr| formatter::format_line(instr, options))
        .collect::<Vec<_>>()
        .join("\n")
}
