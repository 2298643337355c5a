//! # Register File
//!
//! The programmer-visible 6502 state: accumulator, index registers, program
//! counter, stack pointer and the packed processor status byte.
//!
//! The status byte uses the NV-BDIZC layout:
//!
//! | Bit | Flag | Meaning                         |
//! |-----|------|---------------------------------|
//! | 7   | N    | Negative                        |
//! | 6   | V    | Overflow                        |
//! | 5   | -    | Unused, always 1 when read out  |
//! | 4   | B    | Break (BRK executed)            |
//! | 3   | D    | Decimal mode                    |
//! | 2   | I    | Interrupt disable               |
//! | 1   | Z    | Zero                            |
//! | 0   | C    | Carry                           |

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Packed processor status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

/// Stack pointer value after reset.
pub const RESET_STACK_POINTER: u8 = 0xFD;

/// CPU register file.
///
/// Owned by a single [`CPU`](crate::CPU); the engine and the instruction
/// executors are the only writers. Hosts get a read-only view through
/// [`CPU::registers`](crate::CPU::registers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Program counter (address of the next byte to fetch)
    pub pc: u16,
    /// Stack pointer (offset into page 1)
    pub sp: u8,
    /// Processor status
    pub status: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Returns a register file in the power-on state.
    pub fn new() -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: RESET_STACK_POINTER,
            status: Status::INTERRUPT_DISABLE | Status::UNUSED,
        }
    }

    /// Reinitializes every register. The program counter is left for the
    /// caller to load from the reset vector.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Sets Z and N from a result value.
    ///
    /// The value may be a wide intermediate (negative compare results, BCD
    /// temporaries); only its low byte is inspected.
    pub fn set_nz(&mut self, value: i32) {
        let byte = truncate_to_byte(value);
        self.status.set(Status::ZERO, byte == 0);
        self.status.set(Status::NEGATIVE, byte & 0x80 != 0);
    }

    /// Returns the status byte as it appears when materialized, with the
    /// unused bit forced on.
    pub fn processor_status(&self) -> u8 {
        (self.status | Status::UNUSED).bits()
    }

    /// Loads the status register from a raw byte. The unused bit always reads
    /// back as 1.
    pub fn set_processor_status(&mut self, value: u8) {
        self.status = Status::from_bits_retain(value) | Status::UNUSED;
    }

    pub fn carry(&self) -> bool {
        self.status.contains(Status::CARRY)
    }

    pub fn set_carry(&mut self, on: bool) {
        self.status.set(Status::CARRY, on);
    }

    pub fn zero(&self) -> bool {
        self.status.contains(Status::ZERO)
    }

    pub fn set_zero(&mut self, on: bool) {
        self.status.set(Status::ZERO, on);
    }

    pub fn interrupt_disable(&self) -> bool {
        self.status.contains(Status::INTERRUPT_DISABLE)
    }

    pub fn set_interrupt_disable(&mut self, on: bool) {
        self.status.set(Status::INTERRUPT_DISABLE, on);
    }

    pub fn decimal(&self) -> bool {
        self.status.contains(Status::DECIMAL)
    }

    pub fn set_decimal(&mut self, on: bool) {
        self.status.set(Status::DECIMAL, on);
    }

    pub fn break_flag(&self) -> bool {
        self.status.contains(Status::BREAK)
    }

    pub fn set_break_flag(&mut self, on: bool) {
        self.status.set(Status::BREAK, on);
    }

    pub fn overflow(&self) -> bool {
        self.status.contains(Status::OVERFLOW)
    }

    pub fn set_overflow(&mut self, on: bool) {
        self.status.set(Status::OVERFLOW, on);
    }

    pub fn negative(&self) -> bool {
        self.status.contains(Status::NEGATIVE)
    }

    pub fn set_negative(&mut self, on: bool) {
        self.status.set(Status::NEGATIVE, on);
    }

    /// Renders the flags as `NV-BDIZC`, upper case for set flags and lower
    /// case for clear ones.
    pub fn flags_display(&self) -> String {
        const LETTERS: [(Status, char); 8] = [
            (Status::NEGATIVE, 'N'),
            (Status::OVERFLOW, 'V'),
            (Status::UNUSED, '-'),
            (Status::BREAK, 'B'),
            (Status::DECIMAL, 'D'),
            (Status::INTERRUPT_DISABLE, 'I'),
            (Status::ZERO, 'Z'),
            (Status::CARRY, 'C'),
        ];

        LETTERS
            .iter()
            .map(|&(flag, letter)| {
                if flag == Status::UNUSED {
                    '-'
                } else if self.status.contains(flag) {
                    letter
                } else {
                    letter.to_ascii_lowercase()
                }
            })
            .collect()
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} SP:{:02X}",
            self.a, self.x, self.y, self.sp
        )
    }
}

// ========== Register Math ==========

/// Increments a register value, wrapping at 256.
pub fn increment(value: u8) -> u8 {
    value.wrapping_add(1)
}

/// Decrements a register value, wrapping at 256.
pub fn decrement(value: u8) -> u8 {
    value.wrapping_sub(1)
}

/// Keeps the low 8 bits of a wide intermediate.
pub fn truncate_to_byte(value: i32) -> u8 {
    (value & 0xFF) as u8
}

/// Composes a 16-bit word from its high and low bytes.
pub fn make_word(high: u8, low: u8) -> u16 {
    u16::from_le_bytes([low, high])
}

pub fn high_byte(word: u16) -> u8 {
    (word >> 8) as u8
}

pub fn low_byte(word: u16) -> u8 {
    (word & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_state() {
        let regs = Registers::new();
        assert_eq!(regs.sp, 0xFD);
        assert!(regs.interrupt_disable());
        assert_eq!(regs.processor_status(), 0b0010_0100);
    }

    #[test]
    fn test_set_nz_uses_low_byte_of_wide_values() {
        let mut regs = Registers::new();

        regs.set_nz(0x100);
        assert!(regs.zero());
        assert!(!regs.negative());

        regs.set_nz(-1);
        assert!(!regs.zero());
        assert!(regs.negative());

        regs.set_nz(0x7F);
        assert!(!regs.zero());
        assert!(!regs.negative());
    }

    #[test]
    fn test_unused_bit_always_materialized() {
        let mut regs = Registers::new();
        regs.set_processor_status(0x00);
        assert_eq!(regs.processor_status(), 0x20);
    }

    #[test]
    fn test_register_math_wraps() {
        assert_eq!(increment(0xFF), 0x00);
        assert_eq!(decrement(0x00), 0xFF);
        assert_eq!(truncate_to_byte(0x1A5), 0xA5);
        assert_eq!(truncate_to_byte(-2), 0xFE);
        assert_eq!(make_word(0x12, 0x34), 0x1234);
        assert_eq!(high_byte(0xABCD), 0xAB);
        assert_eq!(low_byte(0xABCD), 0xCD);
    }

    #[test]
    fn test_flags_display() {
        let mut regs = Registers::new();
        regs.set_carry(true);
        regs.set_negative(true);
        assert_eq!(regs.flags_display(), "Nv-bdIzC");
    }
}
