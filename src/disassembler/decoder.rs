//! Instruction decoder for the disassembler

use crate::addressing::AddressingMode;
use crate::config::CpuClass;
use crate::disassembler::DecodedInstruction;
use crate::opcodes::opcode_table;

/// Decode a single instruction from a byte slice
///
/// Returns `None` for illegal opcodes and for instructions whose operand
/// bytes run past the end of `bytes`.
pub fn decode_instruction(bytes: &[u8], address: u16, class: CpuClass) -> Option<DecodedInstruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = &opcode_table(class)[opcode as usize];
    let mnemonic = metadata.mnemonic?;

    let operand_len = (metadata.size_bytes() - 1) as usize;
    let operand_bytes = rest.get(..operand_len)?.to_vec();

    Some(DecodedInstruction {
        address,
        opcode,
        mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes(),
        base_cycles: metadata.base_cycles,
    })
}

/// Wraps an undecodable byte as a `.byte` directive.
pub fn data_byte(byte: u8, address: u16) -> DecodedInstruction {
    DecodedInstruction {
        address,
        opcode: byte,
        mnemonic: ".byte",
        addressing_mode: AddressingMode::Implied,
        operand_bytes: vec![byte],
        size_bytes: 1,
        base_cycles: 0,
    }
}
