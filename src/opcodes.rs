//! # Opcode Tables
//!
//! Two immutable 256-entry tables, one per chip variant, indexed by opcode
//! byte. They are the single source of truth for decoding: each entry names
//! the mnemonic (absent for illegal opcodes), the addressing-mode decoder,
//! the instruction executor and the timing.
//!
//! The tables are `static` data built at compile time, so any number of CPU
//! instances on any number of threads can share them.
//!
//! - **NMOS 6502**: the 151 documented opcodes. Everything else is illegal.
//! - **CMOS 65C02**: the NMOS set plus BRA, STZ, TSB/TRB, PHX/PHY/PLX/PLY,
//!   INC A/DEC A, the extra BIT forms, `(zp)` addressing, `JMP (abs,X)`,
//!   the Rockwell bit instructions RMB/SMB/BBR/BBS, and WAI/STP.
//!
//! Undefined 65C02 opcodes are treated as illegal as well; the engine halts
//! on them rather than emulating the chip's multi-byte NOPs.

use crate::addressing::AddressingMode;
use crate::config::CpuClass;

/// Instruction executor selected by an opcode.
///
/// Accumulator forms of the shift and increment instructions, the immediate
/// form of BIT and the variant-specific ADC/SBC implementations get their own
/// executors. Bit instructions carry the bit number they operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    AdcNmos,
    AdcCmos,
    And,
    Asl,
    AslA,
    Bbr(u8),
    Bbs(u8),
    Bcc,
    Bcs,
    Beq,
    Bit,
    BitImmediate,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    DecA,
    Dex,
    Dey,
    Eor,
    Inc,
    IncA,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    LsrA,
    Nop,
    Ora,
    Pha,
    Php,
    Phx,
    Phy,
    Pla,
    Plp,
    Plx,
    Ply,
    Rmb(u8),
    Rol,
    RolA,
    Ror,
    RorA,
    Rti,
    Rts,
    SbcNmos,
    SbcCmos,
    Sec,
    Sed,
    Sei,
    Smb(u8),
    Sta,
    Stp,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Trb,
    Tsb,
    Tsx,
    Txa,
    Txs,
    Tya,
    Wai,
    Illegal,
}

/// Metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use lib65xx::{opcode_table, AddressingMode, CpuClass};
///
/// let lda_imm = &opcode_table(CpuClass::Nmos6502)[0xA9];
/// assert_eq!(lda_imm.mnemonic, Some("LDA"));
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic, `None` for illegal opcodes.
    pub mnemonic: Option<&'static str>,

    /// Addressing-mode decoder.
    pub addressing_mode: AddressingMode,

    /// Instruction executor.
    pub instruction: Instruction,

    /// Base cycle cost before any penalty.
    pub base_cycles: u8,

    /// Extra cycles charged when indexing or a taken branch crosses a page.
    pub page_cross_penalty: u8,
}

impl OpcodeMetadata {
    /// Returns true when the opcode is defined for its variant.
    pub const fn is_legal(&self) -> bool {
        self.mnemonic.is_some()
    }

    /// Total instruction size in bytes, opcode included.
    ///
    /// BBR/BBS carry a branch displacement after their zero page operand.
    pub const fn size_bytes(&self) -> u8 {
        let extra = match self.instruction {
            Instruction::Bbr(_) | Instruction::Bbs(_) => 1,
            _ => 0,
        };
        1 + self.addressing_mode.operand_bytes() + extra
    }
}

const ILLEGAL: OpcodeMetadata = OpcodeMetadata {
    mnemonic: None,
    addressing_mode: AddressingMode::Implied,
    instruction: Instruction::Illegal,
    base_cycles: 0,
    page_cross_penalty: 0,
};

const fn op(
    mnemonic: &'static str,
    addressing_mode: AddressingMode,
    instruction: Instruction,
    base_cycles: u8,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: Some(mnemonic),
        addressing_mode,
        instruction,
        base_cycles,
        page_cross_penalty: 0,
    }
}

/// Same as [`op`] with a one-cycle page-cross penalty.
const fn opp(
    mnemonic: &'static str,
    addressing_mode: AddressingMode,
    instruction: Instruction,
    base_cycles: u8,
) -> OpcodeMetadata {
    OpcodeMetadata {
        page_cross_penalty: 1,
        ..op(mnemonic, addressing_mode, instruction, base_cycles)
    }
}

const RMB: [&str; 8] = ["RMB0", "RMB1", "RMB2", "RMB3", "RMB4", "RMB5", "RMB6", "RMB7"];
const SMB: [&str; 8] = ["SMB0", "SMB1", "SMB2", "SMB3", "SMB4", "SMB5", "SMB6", "SMB7"];
const BBR: [&str; 8] = ["BBR0", "BBR1", "BBR2", "BBR3", "BBR4", "BBR5", "BBR6", "BBR7"];
const BBS: [&str; 8] = ["BBS0", "BBS1", "BBS2", "BBS3", "BBS4", "BBS5", "BBS6", "BBS7"];

const fn build_table(class: CpuClass) -> [OpcodeMetadata; 256] {
    use AddressingMode::*;
    use Instruction::*;

    let cmos = matches!(class, CpuClass::Cmos65C02);
    let (adc, sbc) = if cmos {
        (AdcCmos, SbcCmos)
    } else {
        (AdcNmos, SbcNmos)
    };

    let mut t = [ILLEGAL; 256];

    // 0x00-0x0F
    t[0x00] = op("BRK", Stack, Brk, 7);
    t[0x01] = op("ORA", XIndexedIndirect, Ora, 6);
    t[0x05] = op("ORA", ZeroPage, Ora, 3);
    t[0x06] = op("ASL", ZeroPage, Asl, 5);
    t[0x08] = op("PHP", Stack, Php, 3);
    t[0x09] = op("ORA", Immediate, Ora, 2);
    t[0x0A] = op("ASL", Accumulator, AslA, 2);
    t[0x0D] = op("ORA", Absolute, Ora, 4);
    t[0x0E] = op("ASL", Absolute, Asl, 6);

    // 0x10-0x1F
    t[0x10] = opp("BPL", Relative, Bpl, 2);
    t[0x11] = opp("ORA", IndirectYIndexed, Ora, 5);
    t[0x15] = op("ORA", ZeroPageX, Ora, 4);
    t[0x16] = op("ASL", ZeroPageX, Asl, 6);
    t[0x18] = op("CLC", Implied, Clc, 2);
    t[0x19] = opp("ORA", AbsoluteY, Ora, 4);
    t[0x1D] = opp("ORA", AbsoluteX, Ora, 4);
    t[0x1E] = op("ASL", AbsoluteX, Asl, 7);

    // 0x20-0x2F
    t[0x20] = op("JSR", Absolute, Jsr, 6);
    t[0x21] = op("AND", XIndexedIndirect, And, 6);
    t[0x24] = op("BIT", ZeroPage, Bit, 3);
    t[0x25] = op("AND", ZeroPage, And, 3);
    t[0x26] = op("ROL", ZeroPage, Rol, 5);
    t[0x28] = op("PLP", Stack, Plp, 4);
    t[0x29] = op("AND", Immediate, And, 2);
    t[0x2A] = op("ROL", Accumulator, RolA, 2);
    t[0x2C] = op("BIT", Absolute, Bit, 4);
    t[0x2D] = op("AND", Absolute, And, 4);
    t[0x2E] = op("ROL", Absolute, Rol, 6);

    // 0x30-0x3F
    t[0x30] = opp("BMI", Relative, Bmi, 2);
    t[0x31] = opp("AND", IndirectYIndexed, And, 5);
    t[0x35] = op("AND", ZeroPageX, And, 4);
    t[0x36] = op("ROL", ZeroPageX, Rol, 6);
    t[0x38] = op("SEC", Implied, Sec, 2);
    t[0x39] = opp("AND", AbsoluteY, And, 4);
    t[0x3D] = opp("AND", AbsoluteX, And, 4);
    t[0x3E] = op("ROL", AbsoluteX, Rol, 7);

    // 0x40-0x4F
    t[0x40] = op("RTI", Stack, Rti, 6);
    t[0x41] = op("EOR", XIndexedIndirect, Eor, 6);
    t[0x45] = op("EOR", ZeroPage, Eor, 3);
    t[0x46] = op("LSR", ZeroPage, Lsr, 5);
    t[0x48] = op("PHA", Stack, Pha, 3);
    t[0x49] = op("EOR", Immediate, Eor, 2);
    t[0x4A] = op("LSR", Accumulator, LsrA, 2);
    t[0x4C] = op("JMP", Absolute, Jmp, 3);
    t[0x4D] = op("EOR", Absolute, Eor, 4);
    t[0x4E] = op("LSR", Absolute, Lsr, 6);

    // 0x50-0x5F
    t[0x50] = opp("BVC", Relative, Bvc, 2);
    t[0x51] = opp("EOR", IndirectYIndexed, Eor, 5);
    t[0x55] = op("EOR", ZeroPageX, Eor, 4);
    t[0x56] = op("LSR", ZeroPageX, Lsr, 6);
    t[0x58] = op("CLI", Implied, Cli, 2);
    t[0x59] = opp("EOR", AbsoluteY, Eor, 4);
    t[0x5D] = opp("EOR", AbsoluteX, Eor, 4);
    t[0x5E] = op("LSR", AbsoluteX, Lsr, 7);

    // 0x60-0x6F
    t[0x60] = op("RTS", Stack, Rts, 6);
    t[0x61] = op("ADC", XIndexedIndirect, adc, 6);
    t[0x65] = op("ADC", ZeroPage, adc, 3);
    t[0x66] = op("ROR", ZeroPage, Ror, 5);
    t[0x68] = op("PLA", Stack, Pla, 4);
    t[0x69] = op("ADC", Immediate, adc, 2);
    t[0x6A] = op("ROR", Accumulator, RorA, 2);
    t[0x6C] = op("JMP", AbsoluteIndirect, Jmp, 5);
    t[0x6D] = op("ADC", Absolute, adc, 4);
    t[0x6E] = op("ROR", Absolute, Ror, 6);

    // 0x70-0x7F
    t[0x70] = opp("BVS", Relative, Bvs, 2);
    t[0x71] = opp("ADC", IndirectYIndexed, adc, 5);
    t[0x75] = op("ADC", ZeroPageX, adc, 4);
    t[0x76] = op("ROR", ZeroPageX, Ror, 6);
    t[0x78] = op("SEI", Implied, Sei, 2);
    t[0x79] = opp("ADC", AbsoluteY, adc, 4);
    t[0x7D] = opp("ADC", AbsoluteX, adc, 4);
    t[0x7E] = op("ROR", AbsoluteX, Ror, 7);

    // 0x80-0x8F
    t[0x81] = op("STA", XIndexedIndirect, Sta, 6);
    t[0x84] = op("STY", ZeroPage, Sty, 3);
    t[0x85] = op("STA", ZeroPage, Sta, 3);
    t[0x86] = op("STX", ZeroPage, Stx, 3);
    t[0x88] = op("DEY", Implied, Dey, 2);
    t[0x8A] = op("TXA", Implied, Txa, 2);
    t[0x8C] = op("STY", Absolute, Sty, 4);
    t[0x8D] = op("STA", Absolute, Sta, 4);
    t[0x8E] = op("STX", Absolute, Stx, 4);

    // 0x90-0x9F
    t[0x90] = opp("BCC", Relative, Bcc, 2);
    t[0x91] = op("STA", IndirectYIndexed, Sta, 6);
    t[0x94] = op("STY", ZeroPageX, Sty, 4);
    t[0x95] = op("STA", ZeroPageX, Sta, 4);
    t[0x96] = op("STX", ZeroPageY, Stx, 4);
    t[0x98] = op("TYA", Implied, Tya, 2);
    t[0x99] = op("STA", AbsoluteY, Sta, 5);
    t[0x9A] = op("TXS", Implied, Txs, 2);
    t[0x9D] = op("STA", AbsoluteX, Sta, 5);

    // 0xA0-0xAF
    t[0xA0] = op("LDY", Immediate, Ldy, 2);
    t[0xA1] = op("LDA", XIndexedIndirect, Lda, 6);
    t[0xA2] = op("LDX", Immediate, Ldx, 2);
    t[0xA4] = op("LDY", ZeroPage, Ldy, 3);
    t[0xA5] = op("LDA", ZeroPage, Lda, 3);
    t[0xA6] = op("LDX", ZeroPage, Ldx, 3);
    t[0xA8] = op("TAY", Implied, Tay, 2);
    t[0xA9] = op("LDA", Immediate, Lda, 2);
    t[0xAA] = op("TAX", Implied, Tax, 2);
    t[0xAC] = op("LDY", Absolute, Ldy, 4);
    t[0xAD] = op("LDA", Absolute, Lda, 4);
    t[0xAE] = op("LDX", Absolute, Ldx, 4);

    // 0xB0-0xBF
    t[0xB0] = opp("BCS", Relative, Bcs, 2);
    t[0xB1] = opp("LDA", IndirectYIndexed, Lda, 5);
    t[0xB4] = op("LDY", ZeroPageX, Ldy, 4);
    t[0xB5] = op("LDA", ZeroPageX, Lda, 4);
    t[0xB6] = op("LDX", ZeroPageY, Ldx, 4);
    t[0xB8] = op("CLV", Implied, Clv, 2);
    t[0xB9] = opp("LDA", AbsoluteY, Lda, 4);
    t[0xBA] = op("TSX", Implied, Tsx, 2);
    t[0xBC] = opp("LDY", AbsoluteX, Ldy, 4);
    t[0xBD] = opp("LDA", AbsoluteX, Lda, 4);
    t[0xBE] = opp("LDX", AbsoluteY, Ldx, 4);

    // 0xC0-0xCF
    t[0xC0] = op("CPY", Immediate, Cpy, 2);
    t[0xC1] = op("CMP", XIndexedIndirect, Cmp, 6);
    t[0xC4] = op("CPY", ZeroPage, Cpy, 3);
    t[0xC5] = op("CMP", ZeroPage, Cmp, 3);
    t[0xC6] = op("DEC", ZeroPage, Dec, 5);
    t[0xC8] = op("INY", Implied, Iny, 2);
    t[0xC9] = op("CMP", Immediate, Cmp, 2);
    t[0xCA] = op("DEX", Implied, Dex, 2);
    t[0xCC] = op("CPY", Absolute, Cpy, 4);
    t[0xCD] = op("CMP", Absolute, Cmp, 4);
    t[0xCE] = op("DEC", Absolute, Dec, 6);

    // 0xD0-0xDF
    t[0xD0] = opp("BNE", Relative, Bne, 2);
    t[0xD1] = opp("CMP", IndirectYIndexed, Cmp, 5);
    t[0xD5] = op("CMP", ZeroPageX, Cmp, 4);
    t[0xD6] = op("DEC", ZeroPageX, Dec, 6);
    t[0xD8] = op("CLD", Implied, Cld, 2);
    t[0xD9] = opp("CMP", AbsoluteY, Cmp, 4);
    t[0xDD] = opp("CMP", AbsoluteX, Cmp, 4);
    t[0xDE] = op("DEC", AbsoluteX, Dec, 7);

    // 0xE0-0xEF
    t[0xE0] = op("CPX", Immediate, Cpx, 2);
    t[0xE1] = op("SBC", XIndexedIndirect, sbc, 6);
    t[0xE4] = op("CPX", ZeroPage, Cpx, 3);
    t[0xE5] = op("SBC", ZeroPage, sbc, 3);
    t[0xE6] = op("INC", ZeroPage, Inc, 5);
    t[0xE8] = op("INX", Implied, Inx, 2);
    t[0xE9] = op("SBC", Immediate, sbc, 2);
    t[0xEA] = op("NOP", Implied, Nop, 2);
    t[0xEC] = op("CPX", Absolute, Cpx, 4);
    t[0xED] = op("SBC", Absolute, sbc, 4);
    t[0xEE] = op("INC", Absolute, Inc, 6);

    // 0xF0-0xFF
    t[0xF0] = opp("BEQ", Relative, Beq, 2);
    t[0xF1] = opp("SBC", IndirectYIndexed, sbc, 5);
    t[0xF5] = op("SBC", ZeroPageX, sbc, 4);
    t[0xF6] = op("INC", ZeroPageX, Inc, 6);
    t[0xF8] = op("SED", Implied, Sed, 2);
    t[0xF9] = opp("SBC", AbsoluteY, sbc, 4);
    t[0xFD] = opp("SBC", AbsoluteX, sbc, 4);
    t[0xFE] = op("INC", AbsoluteX, Inc, 7);

    if !cmos {
        return t;
    }

    // 65C02 additions
    t[0x04] = op("TSB", ZeroPage, Tsb, 5);
    t[0x0C] = op("TSB", Absolute, Tsb, 6);
    t[0x12] = op("ORA", ZeroPageIndirect, Ora, 5);
    t[0x14] = op("TRB", ZeroPage, Trb, 5);
    t[0x1A] = op("INC", Accumulator, IncA, 2);
    t[0x1C] = op("TRB", Absolute, Trb, 6);
    t[0x32] = op("AND", ZeroPageIndirect, And, 5);
    t[0x34] = op("BIT", ZeroPageX, Bit, 4);
    t[0x3A] = op("DEC", Accumulator, DecA, 2);
    t[0x3C] = opp("BIT", AbsoluteX, Bit, 4);
    t[0x52] = op("EOR", ZeroPageIndirect, Eor, 5);
    t[0x5A] = op("PHY", Stack, Phy, 3);
    t[0x64] = op("STZ", ZeroPage, Stz, 3);
    t[0x72] = op("ADC", ZeroPageIndirect, adc, 5);
    t[0x74] = op("STZ", ZeroPageX, Stz, 4);
    t[0x7A] = op("PLY", Stack, Ply, 4);
    t[0x7C] = op("JMP", AbsoluteIndexedIndirect, Jmp, 6);
    t[0x80] = opp("BRA", Relative, Bra, 3);
    t[0x89] = op("BIT", Immediate, BitImmediate, 2);
    t[0x92] = op("STA", ZeroPageIndirect, Sta, 5);
    t[0x9C] = op("STZ", Absolute, Stz, 4);
    t[0x9E] = op("STZ", AbsoluteX, Stz, 5);
    t[0xB2] = op("LDA", ZeroPageIndirect, Lda, 5);
    t[0xCB] = op("WAI", Implied, Wai, 3);
    t[0xD2] = op("CMP", ZeroPageIndirect, Cmp, 5);
    t[0xDA] = op("PHX", Stack, Phx, 3);
    t[0xDB] = op("STP", Implied, Stp, 3);
    t[0xF2] = op("SBC", ZeroPageIndirect, sbc, 5);
    t[0xFA] = op("PLX", Stack, Plx, 4);

    // 65C02 timing changes
    t[0x6C] = op("JMP", AbsoluteIndirect, Jmp, 6);
    t[0x1E] = opp("ASL", AbsoluteX, Asl, 6);
    t[0x3E] = opp("ROL", AbsoluteX, Rol, 6);
    t[0x5E] = opp("LSR", AbsoluteX, Lsr, 6);
    t[0x7E] = opp("ROR", AbsoluteX, Ror, 6);

    // Rockwell bit instructions: column 7 is RMB/SMB, column F is BBR/BBS.
    let mut bit = 0;
    while bit < 8 {
        let row = bit * 0x10;
        t[0x07 + row] = op(RMB[bit], ZeroPage, Rmb(bit as u8), 5);
        t[0x87 + row] = op(SMB[bit], ZeroPage, Smb(bit as u8), 5);
        t[0x0F + row] = opp(BBR[bit], ZeroPage, Bbr(bit as u8), 5);
        t[0x8F + row] = opp(BBS[bit], ZeroPage, Bbs(bit as u8), 5);
        bit += 1;
    }

    t
}

/// Opcode table for the NMOS 6502.
pub static OPCODE_TABLE_6502: [OpcodeMetadata; 256] = build_table(CpuClass::Nmos6502);

/// Opcode table for the CMOS 65C02.
pub static OPCODE_TABLE_65C02: [OpcodeMetadata; 256] = build_table(CpuClass::Cmos65C02);

/// Returns the opcode table for a chip variant.
///
/// ```
/// use lib65xx::{opcode_table, CpuClass};
///
/// assert!(opcode_table(CpuClass::Nmos6502)[0x80].mnemonic.is_none());
/// assert_eq!(opcode_table(CpuClass::Cmos65C02)[0x80].mnemonic, Some("BRA"));
/// ```
pub fn opcode_table(class: CpuClass) -> &'static [OpcodeMetadata; 256] {
    match class {
        CpuClass::Nmos6502 => &OPCODE_TABLE_6502,
        CpuClass::Cmos65C02 => &OPCODE_TABLE_65C02,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal_count(table: &[OpcodeMetadata; 256]) -> usize {
        table.iter().filter(|m| m.is_legal()).count()
    }

    #[test]
    fn test_nmos_documented_opcode_count() {
        assert_eq!(legal_count(&OPCODE_TABLE_6502), 151);
    }

    #[test]
    fn test_cmos_opcode_count() {
        // 151 NMOS + 27 new opcodes + 32 Rockwell bit instructions + WAI/STP
        assert_eq!(legal_count(&OPCODE_TABLE_65C02), 212);
    }

    #[test]
    fn test_variant_specific_arithmetic() {
        assert_eq!(OPCODE_TABLE_6502[0x69].instruction, Instruction::AdcNmos);
        assert_eq!(OPCODE_TABLE_65C02[0x69].instruction, Instruction::AdcCmos);
        assert_eq!(OPCODE_TABLE_6502[0xE9].instruction, Instruction::SbcNmos);
        assert_eq!(OPCODE_TABLE_65C02[0xE9].instruction, Instruction::SbcCmos);
    }

    #[test]
    fn test_bit_instruction_layout() {
        assert_eq!(OPCODE_TABLE_65C02[0x07].mnemonic, Some("RMB0"));
        assert_eq!(OPCODE_TABLE_65C02[0x77].instruction, Instruction::Rmb(7));
        assert_eq!(OPCODE_TABLE_65C02[0x87].instruction, Instruction::Smb(0));
        assert_eq!(OPCODE_TABLE_65C02[0x7F].instruction, Instruction::Bbr(7));
        assert_eq!(OPCODE_TABLE_65C02[0xFF].instruction, Instruction::Bbs(7));
        assert_eq!(OPCODE_TABLE_65C02[0xFF].size_bytes(), 3);
    }

    #[test]
    fn test_illegal_entries_have_no_mnemonic() {
        assert_eq!(OPCODE_TABLE_6502[0x02], ILLEGAL);
        assert_eq!(OPCODE_TABLE_65C02[0x02], ILLEGAL);
        assert!(!OPCODE_TABLE_6502[0xDA].is_legal());
    }
}
