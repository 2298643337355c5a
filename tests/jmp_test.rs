//! Tests for JMP in its absolute, indirect and indexed-indirect forms.
//!
//! The NMOS 6502 fetches the high byte of an indirect target from the start
//! of the same page when the pointer sits at $xxFF. The 65C02 fixes this and
//! takes one extra cycle.

use lib65xx::{CpuClass, CpuConfig, FlatMemory, IndirectJump, MemoryBus, CPU};

fn setup_with(config: CpuConfig) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    CPU::with_config(memory, config)
}

fn setup_cpu() -> CPU<FlatMemory> {
    setup_with(CpuConfig::new(CpuClass::Nmos6502))
}

fn setup_cmos() -> CPU<FlatMemory> {
    setup_with(CpuConfig::new(CpuClass::Cmos65C02))
}

/// Writes `JMP ($30FF)` with pointer bytes that reveal which high byte is
/// fetched.
fn load_page_boundary_jump(cpu: &mut CPU<FlatMemory>) {
    cpu.memory_mut().load(0x8000, &[0x6C, 0xFF, 0x30]);
    cpu.memory_mut().write(0x30FF, 0x80);
    cpu.memory_mut().write(0x3000, 0x50);
    cpu.memory_mut().write(0x3100, 0x40);
}

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x4C, 0x34, 0x12]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.cycles(), 3);
    assert_eq!(cpu.operand_display(), "$1234");
}

#[test]
fn test_jmp_indirect() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x6C, 0x00, 0x20]);
    cpu.memory_mut().load(0x2000, &[0x34, 0x12]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.cycles(), 5);
    assert_eq!(cpu.operand_display(), "($2000)");
}

#[test]
fn test_nmos_indirect_page_wrap_bug() {
    let mut cpu = setup_cpu();
    load_page_boundary_jump(&mut cpu);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x5080);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_cmos_indirect_crosses_page() {
    let mut cpu = setup_cmos();
    load_page_boundary_jump(&mut cpu);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x4080);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_indirect_behavior_override() {
    let mut nmos_fixed =
        setup_with(CpuConfig::new(CpuClass::Nmos6502).with_indirect_jump(IndirectJump::Fixed));
    load_page_boundary_jump(&mut nmos_fixed);
    nmos_fixed.step().unwrap();
    assert_eq!(nmos_fixed.pc(), 0x4080);
    assert_eq!(nmos_fixed.cycles(), 5);

    let mut cmos_buggy = setup_with(
        CpuConfig::new(CpuClass::Cmos65C02).with_indirect_jump(IndirectJump::PageWrapBug),
    );
    load_page_boundary_jump(&mut cmos_buggy);
    cmos_buggy.step().unwrap();
    assert_eq!(cmos_buggy.pc(), 0x5080);
    assert_eq!(cmos_buggy.cycles(), 6);
}

#[test]
fn test_cmos_jmp_absolute_indexed_indirect() {
    let mut cpu = setup_cmos();
    cpu.memory_mut().load(0x8000, &[0x7C, 0x00, 0x20]);
    cpu.memory_mut().load(0x2004, &[0x00, 0x90]);
    cpu.set_x(0x04);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.cycles(), 6);
    assert_eq!(cpu.operand_display(), "($2000,X)");
}

#[test]
fn test_jmp_absolute_indexed_indirect_is_illegal_on_nmos() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x7C, 0x00, 0x20]);

    cpu.step().unwrap();

    assert!(cpu.is_halted());
    assert_eq!(cpu.memory().read(0x8000), 0x7C);
}
