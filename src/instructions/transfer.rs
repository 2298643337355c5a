//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy one register into another and update N
//! and Z. TXS sets the stack pointer and affects no flags.

use super::Operand;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.x = cpu.registers.a;
    cpu.registers.set_nz(cpu.registers.x as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.y = cpu.registers.a;
    cpu.registers.set_nz(cpu.registers.y as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a = cpu.registers.x;
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a = cpu.registers.y;
    cpu.registers.set_nz(cpu.registers.a as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.x = cpu.registers.sp;
    cpu.registers.set_nz(cpu.registers.x as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// TXS does not touch the flags.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.sp = cpu.registers.x;
    cpu.account_cycles(op.cycles);
    Ok(())
}
