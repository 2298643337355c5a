//! Formatting functions for disassembled instructions

use crate::addressing::{format_operand, AddressingMode};
use crate::disassembler::{DecodedInstruction, DisassemblyOptions};

/// Format a single instruction as assembly text, e.g. `LDA #$42`
pub fn format_instruction(instr: &DecodedInstruction) -> String {
    let operand = operand_text(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Formats one listing line, with address and raw bytes when
/// `options.hex_dump` is set: `8000  A9 42     LDA #$42`.
pub fn format_line(instr: &DecodedInstruction, options: DisassemblyOptions) -> String {
    let text = format_instruction(instr);
    if !options.hex_dump {
        return text;
    }

    let raw: Vec<String> = if instr.is_data() {
        vec![format!("{:02X}", instr.opcode)]
    } else {
        std::iter::once(instr.opcode)
            .chain(instr.operand_bytes.iter().copied())
            .map(|b| format!("{:02X}", b))
            .collect()
    };

    format!("{:04X}  {:<8}  {}", instr.address, raw.join(" "), text)
}

fn operand_text(instr: &DecodedInstruction) -> String {
    if instr.is_data() {
        return format!("${:02X}", instr.opcode);
    }

    let next_pc = instr.address.wrapping_add(instr.size_bytes as u16);

    // BBR/BBS: zero page operand followed by a branch displacement
    if instr.addressing_mode == AddressingMode::ZeroPage && instr.operand_bytes.len() == 2 {
        let zp = instr.operand_bytes[0];
        let target = next_pc.wrapping_add_signed(instr.operand_bytes[1] as i8 as i16);
        return format!("${:02X},${:04X}", zp, target);
    }

    format_operand(instr.addressing_mode, &instr.operand_bytes, next_pc)
}
