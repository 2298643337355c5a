//! # Increment and Decrement Instructions
//!
//! - INC, DEC: Memory read-modify-write, or the accumulator on the 65C02
//! - INX, INY, DEX, DEY: Index registers
//!
//! All wrap at 256 and update N and Z. Carry is untouched.

use super::Operand;
use crate::registers::{decrement, increment};
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let result = increment(op.value);
    cpu.write_modified(op.address, op.value, result);
    cpu.registers.set_nz(result as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let result = decrement(op.value);
    cpu.write_modified(op.address, op.value, result);
    cpu.registers.set_nz(result as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_inc_a<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a = increment(cpu.registers.a);
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_dec_a<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a = decrement(cpu.registers.a);
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.x = increment(cpu.registers.x);
    cpu.registers.set_nz(cpu.registers.x as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.y = increment(cpu.registers.y);
    cpu.registers.set_nz(cpu.registers.y as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.x = decrement(cpu.registers.x);
    cpu.registers.set_nz(cpu.registers.x as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.y = decrement(cpu.registers.y);
    cpu.registers.set_nz(cpu.registers.y as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}
