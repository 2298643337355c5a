//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR, each in an accumulator form and a memory
//! read-modify-write form. The bit shifted out lands in C; N and Z follow the
//! result.

use super::Operand;
use crate::{ExecutionError, MemoryBus, CPU};

fn asl(value: u8) -> (u8, bool) {
    (value << 1, value & 0x80 != 0)
}

fn lsr(value: u8) -> (u8, bool) {
    (value >> 1, value & 0x01 != 0)
}

fn rol(value: u8, carry_in: bool) -> (u8, bool) {
    ((value << 1) | carry_in as u8, value & 0x80 != 0)
}

fn ror(value: u8, carry_in: bool) -> (u8, bool) {
    ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0)
}

fn shift_accumulator<M: MemoryBus>(cpu: &mut CPU<M>, op: Operand, shift: impl Fn(u8, bool) -> (u8, bool)) {
    let (result, carry) = shift(cpu.registers.a, cpu.registers.carry());
    cpu.registers.a = result;
    cpu.registers.set_carry(carry);
    cpu.registers.set_nz(result as i32);
    cpu.account_cycles(op.cycles);
}

fn shift_memory<M: MemoryBus>(cpu: &mut CPU<M>, op: Operand, shift: impl Fn(u8, bool) -> (u8, bool)) {
    let (result, carry) = shift(op.value, cpu.registers.carry());
    cpu.write_modified(op.address, op.value, result);
    cpu.registers.set_carry(carry);
    cpu.registers.set_nz(result as i32);
    cpu.account_cycles(op.cycles);
}

pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_memory(cpu, op, |v, _| asl(v));
    Ok(())
}

pub(crate) fn execute_asl_a<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_accumulator(cpu, op, |v, _| asl(v));
    Ok(())
}

pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_memory(cpu, op, |v, _| lsr(v));
    Ok(())
}

pub(crate) fn execute_lsr_a<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_accumulator(cpu, op, |v, _| lsr(v));
    Ok(())
}

pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_memory(cpu, op, rol);
    Ok(())
}

pub(crate) fn execute_rol_a<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_accumulator(cpu, op, rol);
    Ok(())
}

pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_memory(cpu, op, ror);
    Ok(())
}

pub(crate) fn execute_ror_a<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    shift_accumulator(cpu, op, ror);
    Ok(())
}
