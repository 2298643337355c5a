//! # Addressing Modes
//!
//! This module defines the addressing modes of the 6502 and 65C02 and the
//! resolver that turns operand bytes into an effective address.
//!
//! Each resolver routine consumes the operand bytes at the program counter,
//! advances the program counter past them and returns the effective address
//! (0 for modes without a memory operand). As a by-product it renders the
//! operand as disassembly text, exposed through
//! [`CPU::operand_display`](crate::CPU::operand_display).

use crate::config::IndirectJump;
use crate::registers::make_word;
use crate::{MemoryBus, CPU};

/// 6502/65C02 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Stack, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   ZeroPageIndirect, XIndexedIndirect, IndirectYIndexed
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, AbsoluteIndirect,
///   AbsoluteIndexedIndirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, TAX, NOP
    Implied,

    /// Operand is the hardware stack.
    ///
    /// Examples: PHA, PLP, RTS, BRK
    Stack,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, INC A (65C02)
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit displacement added to the program counter after the
    /// displacement byte has been consumed.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X.
    ///
    /// Example: LDA $1234,X
    /// Read instructions pay a penalty cycle when indexing crosses a page.
    AbsoluteX,

    /// 16-bit address indexed by Y.
    ///
    /// Example: LDA $1234,Y
    /// Read instructions pay a penalty cycle when indexing crosses a page.
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer.
    ///
    /// Example: JMP ($FFFC)
    /// The NMOS part fetches the high byte of a pointer at $xxFF from $xx00.
    AbsoluteIndirect,

    /// Indirect jump through a pointer table indexed by X (65C02).
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    /// The pointer location wraps within zero page.
    XIndexedIndirect,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// Adding Y may carry into the next page.
    IndirectYIndexed,

    /// Zero page indirect without indexing (65C02).
    ///
    /// Example: LDA ($40)
    ZeroPageIndirect,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        use AddressingMode::*;

        match self {
            Implied | Stack | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | ZeroPageIndirect
            | XIndexedIndirect | IndirectYIndexed => 1,
            Absolute | AbsoluteX | AbsoluteY | AbsoluteIndirect | AbsoluteIndexedIndirect => 2,
        }
    }
}

/// Renders an operand as assembler text.
///
/// `operand` holds the raw operand bytes (little-endian) and `next_pc` the
/// address following them, used to resolve relative branch targets.
pub fn format_operand(mode: AddressingMode, operand: &[u8], next_pc: u16) -> String {
    use AddressingMode::*;

    let byte = operand.first().copied();
    let word = match operand {
        [lo, hi, ..] => Some(make_word(*hi, *lo)),
        _ => None,
    };

    match (mode, byte, word) {
        (Implied | Stack, _, _) => String::new(),
        (Accumulator, _, _) => "A".to_string(),
        (Immediate, Some(b), _) => format!("#${:02X}", b),
        (ZeroPage, Some(b), _) => format!("${:02X}", b),
        (ZeroPageX, Some(b), _) => format!("${:02X},X", b),
        (ZeroPageY, Some(b), _) => format!("${:02X},Y", b),
        (Relative, Some(b), _) => {
            let target = next_pc.wrapping_add_signed(b as i8 as i16);
            format!("${:04X}", target)
        }
        (ZeroPageIndirect, Some(b), _) => format!("(${:02X})", b),
        (XIndexedIndirect, Some(b), _) => format!("(${:02X},X)", b),
        (IndirectYIndexed, Some(b), _) => format!("(${:02X}),Y", b),
        (Absolute, _, Some(w)) => format!("${:04X}", w),
        (AbsoluteX, _, Some(w)) => format!("${:04X},X", w),
        (AbsoluteY, _, Some(w)) => format!("${:04X},Y", w),
        (AbsoluteIndirect, _, Some(w)) => format!("(${:04X})", w),
        (AbsoluteIndexedIndirect, _, Some(w)) => format!("(${:04X},X)", w),
        _ => "???".to_string(),
    }
}

fn crosses_page(base: u16, effective: u16) -> bool {
    (base & 0xFF00) != (effective & 0xFF00)
}

impl<M: MemoryBus> CPU<M> {
    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.registers.pc);
        self.registers.pc = self.registers.pc.wrapping_add(1);
        value
    }

    /// Reads a pointer stored in zero page; the high byte wraps to $00.
    fn read_zero_page_word(&self, pointer: u8) -> u16 {
        let lo = self.memory.read(pointer as u16);
        let hi = self.memory.read(pointer.wrapping_add(1) as u16);
        make_word(hi, lo)
    }

    fn read_word(&self, pointer: u16) -> u16 {
        let lo = self.memory.read(pointer);
        let hi = self.memory.read(pointer.wrapping_add(1));
        make_word(hi, lo)
    }

    /// Resolves the effective address for `mode`, consuming operand bytes.
    pub(crate) fn resolve_address(&mut self, mode: AddressingMode) -> u16 {
        use AddressingMode::*;

        self.page_crossed = false;

        let mut operand = [0u8; 2];
        let len = mode.operand_bytes() as usize;

        if mode == Immediate {
            // The operand is the address itself; the engine reads it next.
            let address = self.registers.pc;
            operand[0] = self.memory.read(address);
            self.registers.pc = self.registers.pc.wrapping_add(1);
            self.operand_display = format_operand(mode, &operand[..1], self.registers.pc);
            return address;
        }

        for slot in operand.iter_mut().take(len) {
            *slot = self.fetch_byte();
        }

        let zp = operand[0];
        let abs = make_word(operand[1], operand[0]);

        let address = match mode {
            Implied | Stack | Accumulator | Immediate => 0,
            ZeroPage => zp as u16,
            ZeroPageX => zp.wrapping_add(self.registers.x) as u16,
            ZeroPageY => zp.wrapping_add(self.registers.y) as u16,
            Relative => self.registers.pc.wrapping_add_signed(zp as i8 as i16),
            Absolute => abs,
            AbsoluteX => {
                let address = abs.wrapping_add(self.registers.x as u16);
                self.page_crossed = crosses_page(abs, address);
                address
            }
            AbsoluteY => {
                let address = abs.wrapping_add(self.registers.y as u16);
                self.page_crossed = crosses_page(abs, address);
                address
            }
            AbsoluteIndirect => {
                let lo = self.memory.read(abs);
                let hi_address = match self.config.indirect_jump {
                    // High byte comes from the start of the same page.
                    IndirectJump::PageWrapBug => (abs & 0xFF00) | (abs.wrapping_add(1) & 0x00FF),
                    IndirectJump::Fixed => abs.wrapping_add(1),
                };
                let hi = self.memory.read(hi_address);
                make_word(hi, lo)
            }
            AbsoluteIndexedIndirect => self.read_word(abs.wrapping_add(self.registers.x as u16)),
            XIndexedIndirect => self.read_zero_page_word(zp.wrapping_add(self.registers.x)),
            IndirectYIndexed => {
                let base = self.read_zero_page_word(zp);
                let address = base.wrapping_add(self.registers.y as u16);
                self.page_crossed = crosses_page(base, address);
                address
            }
            ZeroPageIndirect => self.read_zero_page_word(zp),
        };

        self.operand_display = format_operand(mode, &operand[..len], self.registers.pc);

        address
    }
}
