//! # Branch Instructions
//!
//! This module implements the relative branches:
//! - BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS: Conditional on one flag
//! - BRA: Branch always (65C02)
//! - BBR, BBS: Branch on a zero page bit (65C02)
//!
//! The addressing-mode decoder has already consumed the displacement and
//! computed the target. A taken branch costs the base cycles, plus the
//! page-cross penalty when the target lies on a different page than the
//! instruction that follows the branch.
//!
//! BVC and BVS never charge the page-cross penalty.

use super::Operand;
use crate::{ExecutionError, MemoryBus, CPU};

fn crosses_page(from: u16, to: u16) -> bool {
    (from & 0xFF00) != (to & 0xFF00)
}

fn branch<M: MemoryBus>(cpu: &mut CPU<M>, taken: bool, op: Operand, page_penalty: bool) {
    let mut cycles = op.cycles;

    if taken {
        if page_penalty && crosses_page(cpu.registers.pc, op.address) {
            cycles += op.page_cross_penalty;
        }
        cpu.registers.pc = op.address;
    }

    cpu.account_cycles(cycles);
}

pub(crate) fn execute_bcc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = !cpu.registers.carry();
    branch(cpu, taken, op, true);
    Ok(())
}

pub(crate) fn execute_bcs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = cpu.registers.carry();
    branch(cpu, taken, op, true);
    Ok(())
}

pub(crate) fn execute_beq<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = cpu.registers.zero();
    branch(cpu, taken, op, true);
    Ok(())
}

pub(crate) fn execute_bne<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = !cpu.registers.zero();
    branch(cpu, taken, op, true);
    Ok(())
}

pub(crate) fn execute_bmi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = cpu.registers.negative();
    branch(cpu, taken, op, true);
    Ok(())
}

pub(crate) fn execute_bpl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = !cpu.registers.negative();
    branch(cpu, taken, op, true);
    Ok(())
}

pub(crate) fn execute_bvc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = !cpu.registers.overflow();
    branch(cpu, taken, op, false);
    Ok(())
}

pub(crate) fn execute_bvs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let taken = cpu.registers.overflow();
    branch(cpu, taken, op, false);
    Ok(())
}

pub(crate) fn execute_bra<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    branch(cpu, true, op, true);
    Ok(())
}

/// BBR/BBS: the operand is a zero page byte; the displacement follows it.
///
/// The displacement is consumed whether or not the branch is taken, and the
/// operand text is extended to `$zp,$target`.
fn branch_on_bit<M: MemoryBus>(cpu: &mut CPU<M>, op: Operand, bit: u8, when_set: bool) {
    let is_set = op.value & (1 << bit) != 0;

    let offset = cpu.fetch_byte() as i8;
    let target = cpu.registers.pc.wrapping_add_signed(offset as i16);
    cpu.operand_display.push_str(&format!(",${:04X}", target));

    branch(
        cpu,
        is_set == when_set,
        Operand {
            address: target,
            ..op
        },
        true,
    );
}

pub(crate) fn execute_bbr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
    bit: u8,
) -> Result<(), ExecutionError> {
    branch_on_bit(cpu, op, bit, false);
    Ok(())
}

pub(crate) fn execute_bbs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
    bit: u8,
) -> Result<(), ExecutionError> {
    branch_on_bit(cpu, op, bit, true);
    Ok(())
}
