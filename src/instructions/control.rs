//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP, JSR, RTS, RTI: Jumps and returns
//! - BRK: Software interrupt
//! - NOP: No operation
//! - WAI, STP: 65C02 wait and stop, reported as unsupported
//! - Illegal opcodes: halt the processor
//!
//! BRK is a software interrupt that:
//! 1. Skips the signature byte following the opcode
//! 2. Pushes PC (high byte first, then low byte)
//! 3. Pushes processor status with B and the unused bit set
//! 4. Clears D, sets I and B
//! 5. Loads PC from the IRQ/BRK vector at $FFFE/F

use super::Operand;
use crate::cpu::IRQ_VECTOR;
use crate::hooks::InterruptKind;
use crate::registers::{high_byte, low_byte, make_word, Status};
use crate::{ExecutionError, HaltReason, MemoryBus, CPU};

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is two bytes long: the byte after the opcode is skipped, so the
/// pushed return address is the opcode address + 2. The pushed status has B
/// and the unused bit set.
///
/// Cycles: 7
///
/// Flags affected: I set, D cleared
///
/// ```
/// use lib65xx::{FlatMemory, MemoryBus, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.set_irq_vector(0x9000);
/// memory.load(0x8000, &[0x00, 0xEA]); // BRK + signature byte
///
/// let mut cpu = CPU::new(memory);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.pc(), 0x9000);
/// assert_eq!(cpu.memory().read(0x01FD), 0x80);
/// assert_eq!(cpu.memory().read(0x01FC), 0x02);
/// assert_eq!(cpu.memory().read(0x01FB), 0x34);
/// assert_eq!(cpu.sp(), 0xFA);
/// assert_eq!(cpu.cycles(), 7);
/// ```
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.pc = cpu.registers.pc.wrapping_add(1);

    let status = cpu.registers.processor_status() | (Status::BREAK | Status::UNUSED).bits();
    cpu.push_interrupt_frame(status);

    cpu.registers.set_decimal(false);
    cpu.registers.set_interrupt_disable(true);
    cpu.registers.set_break_flag(true);
    cpu.registers.pc = cpu.read_vector(IRQ_VECTOR);

    cpu.account_cycles(op.cycles);
    cpu.notify_interrupt(InterruptKind::Break);
    Ok(())
}

/// Executes the JMP (Jump) instruction.
///
/// The addressing mode has already resolved the target, including the
/// indirect forms and the NMOS page-wrap bug.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.registers.pc = op.address;
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// JSR pushes the address of its last operand byte, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let return_address = cpu.registers.pc.wrapping_sub(1);
    cpu.push(high_byte(return_address));
    cpu.push(low_byte(return_address));

    cpu.registers.pc = op.address;
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the address JSR pushed (its last operand byte) and adds one, so
/// execution resumes after the JSR.
///
/// Cycles: 6
///
/// ```
/// use lib65xx::{FlatMemory, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.load(0x8000, &[0x20, 0x10, 0x80]); // JSR $8010
/// memory.load(0x8010, &[0x60]); // RTS
///
/// let mut cpu = CPU::new(memory);
/// cpu.step().unwrap();
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.pc(), 0x8003);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.cycles(), 12);
/// ```
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let lo = cpu.pop();
    let hi = cpu.pop();
    cpu.registers.pc = make_word(hi, lo).wrapping_add(1);
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// RTI restores status (unused bit forced on) and then PC.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.registers.set_processor_status(status);

    let lo = cpu.pop();
    let hi = cpu.pop();
    cpu.registers.pc = make_word(hi, lo);

    cpu.account_cycles(op.cycles);
    Ok(())
}

/// NOP: charges its cycles and nothing else.
pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    cpu.account_cycles(op.cycles);
    Ok(())
}

fn unsupported<M: MemoryBus>(cpu: &mut CPU<M>, op: Operand, mnemonic: &'static str) -> ExecutionError {
    cpu.account_cycles(op.cycles);
    log::warn!(
        "{} at ${:04X} is not supported",
        mnemonic,
        cpu.current_address
    );
    ExecutionError::UnsupportedInstruction {
        mnemonic,
        opcode: cpu.current_opcode,
        address: cpu.current_address,
    }
}

/// WAI is decoded but not emulated; it fails with
/// [`ExecutionError::UnsupportedInstruction`].
pub(crate) fn execute_wai<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    Err(unsupported(cpu, op, "WAI"))
}

pub(crate) fn execute_stp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    Err(unsupported(cpu, op, "STP"))
}

/// Illegal opcodes halt the processor; no cycles are charged.
pub(crate) fn execute_illegal<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _op: Operand,
) -> Result<(), ExecutionError> {
    cpu.halt(HaltReason::IllegalOpcode {
        opcode: cpu.current_opcode,
        address: cpu.current_address,
    });
    Ok(())
}
