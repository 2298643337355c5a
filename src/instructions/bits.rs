//! # Bit Manipulation Instructions (65C02)
//!
//! - TSB/TRB: Test and set/reset memory bits against the accumulator
//! - RMB/SMB: Reset/set a single bit of a zero page byte
//!
//! All four are read-modify-write and go through
//! [`CPU::write_modified`] for their bus traffic.

use super::Operand;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the TSB (Test and Set Bits) instruction.
///
/// Z reports whether A AND M is zero, tested against the value before the
/// update. N and V are untouched, unlike BIT. Then M |= A.
///
/// Addressing modes: zero page, absolute
///
/// Cycles: 5 (zp), 6 (abs)
///
/// ```
/// use lib65xx::{CpuClass, CpuConfig, FlatMemory, MemoryBus, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.load(0x8000, &[0x04, 0x10]); // TSB $10
/// memory.write(0x0010, 0x30);
///
/// let mut cpu = CPU::with_config(memory, CpuConfig::new(CpuClass::Cmos65C02));
/// cpu.set_a(0x0F);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.memory().read(0x0010), 0x3F);
/// assert!(cpu.flag_z());
/// assert_eq!(cpu.cycles(), 5);
/// ```
pub(crate) fn execute_tsb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let a = cpu.registers.a;
    cpu.registers.set_zero(a & op.value == 0);
    cpu.write_modified(op.address, op.value, op.value | a);
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// TRB (Test and Reset Bits): Z from A AND M as for TSB, then M &= !A.
pub(crate) fn execute_trb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
) -> Result<(), ExecutionError> {
    let a = cpu.registers.a;
    cpu.registers.set_zero(a & op.value == 0);
    cpu.write_modified(op.address, op.value, op.value & !a);
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// RMB0-7: clear bit `bit` of a zero page byte. No flags change.
pub(crate) fn execute_rmb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
    bit: u8,
) -> Result<(), ExecutionError> {
    cpu.write_modified(op.address, op.value, op.value & !(1 << bit));
    cpu.account_cycles(op.cycles);
    Ok(())
}

/// SMB0-7: set bit `bit` of a zero page byte.
pub(crate) fn execute_smb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: Operand,
    bit: u8,
) -> Result<(), ExecutionError> {
    cpu.write_modified(op.address, op.value, op.value | (1 << bit));
    cpu.account_cycles(op.cycles);
    Ok(())
}
