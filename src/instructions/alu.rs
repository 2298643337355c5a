//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC/SBC: Add and subtract with carry, in NMOS and CMOS flavors
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparison
//! - BIT: Bit test
//!
//! ## Decimal Mode
//!
//! With D set, ADC and SBC treat both operands as packed BCD and cost one
//! extra cycle. The two chip families disagree on how the flags come out:
//!
//! - **NMOS**: Z reflects the binary result, N and V come from an
//!   intermediate value before the final high-nibble correction.
//! - **CMOS**: N and Z reflect the corrected decimal result.
//!
//! Binary-mode SBC on the CMOS part is ADC of the complemented operand.

use super::Operand;
use crate::registers::truncate_to_byte;
use crate::{ExecutionError, MemoryBus, CPU};

/// ADC for the NMOS 6502.
pub(crate) fn execute_adc_nmos<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let a = cpu.registers.a as i32;
    let m = op.value as i32;
    let carry = cpu.registers.carry() as i32;
    let mut cycles = op.cycles;

    if cpu.registers.decimal() {
        let mut lo = (a & 0x0F) + (m & 0x0F) + carry;
        if lo > 0x09 {
            lo += 0x06;
        }

        let half_carry = if lo > 0x0F { 0x10 } else { 0 };
        let mut w = (a & 0xF0) + (m & 0xF0) + half_carry + (lo & 0x0F);

        cpu.registers.set_zero(truncate_to_byte(a + m + carry) == 0);
        cpu.registers.set_negative(w & 0x80 != 0);
        cpu.registers.set_overflow((a ^ w) & !(a ^ m) & 0x80 != 0);

        if (w & 0x1F0) > 0x90 {
            w += 0x60;
        }
        cpu.registers.set_carry((w & 0xFF0) > 0xF0);
        cpu.registers.a = truncate_to_byte(w);

        cycles += 1;
    } else {
        add_binary(cpu, op.value);
    }

    cpu.account_cycles(cycles);
    Ok(())
}

/// SBC for the NMOS 6502.
///
/// Flags always reflect the binary difference; in decimal mode only the
/// accumulator receives the BCD-corrected result.
pub(crate) fn execute_sbc_nmos<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let a = cpu.registers.a as i32;
    let m = op.value as i32;
    let borrow = 1 - cpu.registers.carry() as i32;
    let diff = a - m - borrow;
    let mut cycles = op.cycles;

    cpu.registers.set_carry(diff >= 0);
    cpu.registers.set_overflow((a ^ diff) & (a ^ m) & 0x80 != 0);
    cpu.registers.set_nz(diff);

    if cpu.registers.decimal() {
        let lo = (a & 0x0F) - (m & 0x0F) - borrow;
        let mut w = if lo & 0x10 != 0 {
            ((lo - 0x06) & 0x0F) | ((a & 0xF0) - (m & 0xF0) - 0x10)
        } else {
            (lo & 0x0F) | ((a & 0xF0) - (m & 0xF0))
        };
        if w & 0x100 != 0 {
            w -= 0x60;
        }
        cpu.registers.a = truncate_to_byte(w);

        cycles += 1;
    } else {
        cpu.registers.a = truncate_to_byte(diff);
    }

    cpu.account_cycles(cycles);
    Ok(())
}

/// ADC for the CMOS 65C02.
pub(crate) fn execute_adc_cmos<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let mut cycles = op.cycles;

    if cpu.registers.decimal() {
        let a = cpu.registers.a as i32;
        let m = op.value as i32;
        let carry = cpu.registers.carry() as i32;
        let mut overflow = (a ^ m) & 0x80 == 0;

        let mut w = (a & 0x0F) + (m & 0x0F) + carry;
        if w >= 0x0A {
            w = 0x10 | ((w + 0x06) & 0x0F);
        }
        w += (a & 0xF0) + (m & 0xF0);

        if w >= 0xA0 {
            cpu.registers.set_carry(true);
            overflow &= w < 0x180;
            w += 0x60;
        } else {
            cpu.registers.set_carry(false);
            overflow &= w >= 0x80;
        }

        cpu.registers.set_overflow(overflow);
        cpu.registers.a = truncate_to_byte(w);
        cpu.registers.set_nz(w);

        cycles += 1;
    } else {
        add_binary(cpu, op.value);
    }

    cpu.account_cycles(cycles);
    Ok(())
}

/// SBC for the CMOS 65C02.
pub(crate) fn execute_sbc_cmos<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    if !cpu.registers.decimal() {
        return execute_adc_cmos(
            cpu,
            Operand {
                value: !op.value,
                ..op
            },
        );
    }

    let a = cpu.registers.a as i32;
    let m = op.value as i32;
    let carry = cpu.registers.carry() as i32;
    let mut overflow = (a ^ m) & 0x80 != 0;

    let mut w = 0x0F + (a & 0x0F) - (m & 0x0F) + carry;
    let mut hi = 0;
    if w < 0x10 {
        w -= 0x06;
    } else {
        hi = 0x10;
        w -= 0x10;
    }

    hi += 0xF0 + (a & 0xF0) - (m & 0xF0);
    if hi < 0x100 {
        cpu.registers.set_carry(false);
        overflow &= hi >= 0x80;
        hi -= 0x60;
    } else {
        cpu.registers.set_carry(true);
        overflow &= hi < 0x180;
    }
    hi += w;

    cpu.registers.set_overflow(overflow);
    cpu.registers.a = truncate_to_byte(hi);
    cpu.registers.set_nz(hi);

    cpu.account_cycles(op.cycles + 1);
    Ok(())
}

fn add_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.registers.a as i32;
    let m = value as i32;
    let sum = a + m + cpu.registers.carry() as i32;

    cpu.registers.set_carry(sum > 0xFF);
    cpu.registers.set_overflow(!(a ^ m) & (a ^ sum) & 0x80 != 0);
    cpu.registers.a = truncate_to_byte(sum);
    cpu.registers.set_nz(sum);
}

pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a &= op.value;
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a |= op.value;
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a ^= op.value;
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// Shared compare: C = register >= operand, N/Z from the difference.
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, op: Operand) {
    let diff = register as i32 - op.value as i32;
    cpu.registers.set_carry(diff >= 0);
    cpu.registers.set_nz(diff);
    cpu.account_cycles(op.cycles);
}

pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let register = cpu.registers.a;
    compare(cpu, register, op);
    Ok(())
}

pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let register = cpu.registers.x;
    compare(cpu, register, op);
    Ok(())
}

pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let register = cpu.registers.y;
    compare(cpu, register, op);
    Ok(())
}

/// BIT: Z from A AND M, N and V copied from bits 7 and 6 of the operand.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.set_zero(cpu.registers.a & op.value == 0);
    cpu.registers.set_negative(op.value & 0x80 != 0);
    cpu.registers.set_overflow(op.value & 0x40 != 0);
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// BIT #imm (65C02) only touches Z.
pub(crate) fn execute_bit_immediate<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.set_zero(cpu.registers.a & op.value == 0);
    cpu.account_cycles(op.cycles);
    Ok(())
}
