//! # Load and Store Instructions
//!
//! Loads copy the operand into a register and update N and Z. Stores write a
//! register (or zero, for STZ) to the effective address and leave the flags
//! alone.
//!
//! Indexed stores never pay the page-cross penalty; their table cycle counts
//! already include the extra cycle.

use super::Operand;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.a = op.value;
    cpu.registers.set_nz(op.value as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.x = op.value;
    cpu.registers.set_nz(op.value as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.y = op.value;
    cpu.registers.set_nz(op.value as i32);
    cpu.account_cycles(op.cycles);
    Ok(())
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, value: u8, op: Operand) {
    cpu.memory.write(op.address, value);
    cpu.account_cycles(op.cycles);
}

pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let value = cpu.registers.a;
    store(cpu, value, op);
    Ok(())
}

pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let value = cpu.registers.x;
    store(cpu, value, op);
    Ok(())
}

pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let value = cpu.registers.y;
    store(cpu, value, op);
    Ok(())
}

/// Executes the STZ (Store Zero) instruction, 65C02 only.
///
/// Writes $00 without touching A or any flag.
///
/// Addressing modes: zp, zp,X, abs, abs,X
///
/// Cycles: 3 (zp), 4 (zp,X / abs), 5 (abs,X)
///
/// ```
/// use lib65xx::{CpuClass, CpuConfig, FlatMemory, MemoryBus, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.load(0x8000, &[0x64, 0x10]); // STZ $10
/// memory.write(0x0010, 0xFF);
///
/// let mut cpu = CPU::with_config(memory, CpuConfig::new(CpuClass::Cmos65C02));
/// cpu.set_a(0x42);
/// let status = cpu.status();
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.memory().read(0x0010), 0x00);
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.status(), status);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_stz<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    store(cpu, 0x00, op);
    Ok(())
}
