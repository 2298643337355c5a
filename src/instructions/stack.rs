//! # Stack Instructions
//!
//! Pushes and pulls of A, P and (65C02) X and Y. The stack lives in page 1
//! and the stack pointer wraps within it in both directions.
//!
//! PHP always pushes B and the unused bit set. PLP loads the pulled byte with
//! the unused bit forced on.

use super::Operand;
use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.push(cpu.registers.a);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_phx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.push(cpu.registers.x);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_phy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.push(cpu.registers.y);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let status = cpu.registers.processor_status() | Status::BREAK.bits();
    cpu.push(status);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a = cpu.pop();
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_plx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.x = cpu.pop();
    cpu.registers.set_nz(cpu.registers.x as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_ply<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.y = cpu.pop();
    cpu.registers.set_nz(cpu.registers.y as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.registers.set_processor_status(status);
    cpu.account_cycles(op.cycles);
    Ok(())
}
