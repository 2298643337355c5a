//! Per-instruction trace records.
//!
//! An [`InstructionEvent`] is produced after every executed instruction. It
//! feeds the instruction callback and, when tracing is requested, is rendered
//! as one line of text:
//!
//! ```text
//! 8000 LDA   #$42        A:42 X:00 Y:00 SP:FD  nv-bdIzc
//! ```

use crate::registers::Registers;

/// Snapshot of one executed instruction.
#[derive(Debug, Clone, Copy)]
pub struct InstructionEvent<'a> {
    /// Address the opcode was fetched from.
    pub address: u16,

    /// Opcode byte.
    pub opcode: u8,

    /// Instruction mnemonic.
    pub mnemonic: &'static str,

    /// Operand rendered as assembler text.
    pub operand: &'a str,

    /// Registers after execution.
    pub registers: &'a Registers,

    /// Cycles consumed by this instruction, penalties included.
    pub instruction_cycles: u64,

    /// Cumulative cycle count after this instruction.
    pub total_cycles: u64,

    /// Instructions processed so far, this one included.
    pub instructions_processed: u64,
}

impl InstructionEvent<'_> {
    /// Formats the event as a single trace line.
    pub fn trace_line(&self) -> String {
        format!(
            "{:04X} {:<4}  {:<10}  {}  {:<8}",
            self.address,
            self.mnemonic,
            self.operand,
            self.registers,
            self.registers.flags_display()
        )
    }
}
