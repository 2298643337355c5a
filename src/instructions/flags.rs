//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each set or clear a single flag.
//! All are implied-mode, 2 cycles.

use super::Operand;
use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, CPU};

fn set_flag<M: MemoryBus>(cpu: &mut CPU<M>, flag: Status, on: bool, op: Operand) {
    cpu.registers.status.set(flag, on);
    cpu.account_cycles(op.cycles);
}

pub(crate) fn execute_clc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    set_flag(cpu, Status::CARRY, false, op);
    Ok(())
}

pub(crate) fn execute_sec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    set_flag(cpu, Status::CARRY, true, op);
    Ok(())
}

pub(crate) fn execute_cli<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    set_flag(cpu, Status::INTERRUPT_DISABLE, false, op);
    Ok(())
}

pub(crate) fn execute_sei<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    set_flag(cpu, Status::INTERRUPT_DISABLE, true, op);
    Ok(())
}

pub(crate) fn execute_cld<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    set_flag(cpu, Status::DECIMAL, false, op);
    Ok(())
}

pub(crate) fn execute_sed<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    set_flag(cpu, Status::DECIMAL, true, op);
    Ok(())
}

pub(crate) fn execute_clv<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    set_flag(cpu, Status::OVERFLOW, false, op);
    Ok(())
}
