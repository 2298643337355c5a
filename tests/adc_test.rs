//! Tests for the ADC (Add with Carry) instruction.
//!
//! Tests cover:
//! - Binary addition and flag updates (C, Z, V, N)
//! - Cycle counts including page crossing penalties
//! - Decimal mode on the NMOS 6502 and the CMOS 65C02

use lib65xx::{CpuClass, CpuConfig, FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    CPU::new(memory)
}

fn setup_cmos() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    CPU::with_config(memory, CpuConfig::new(CpuClass::Cmos65C02))
}

/// Runs `ADC #operand` with the given accumulator, carry and decimal flag.
fn adc_immediate(cpu: &mut CPU<FlatMemory>, a: u8, operand: u8, carry: bool, decimal: bool) {
    cpu.memory_mut().load(0x8000, &[0x69, operand]);
    cpu.set_pc(0x8000);
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.set_flag_d(decimal);
    cpu.step().unwrap();
}

// ========== Binary Mode ==========

#[test]
fn test_adc_immediate_basic() {
    let mut cpu = setup_cpu();

    adc_immediate(&mut cpu, 0x10, 0x05, false, false);

    assert_eq!(cpu.a(), 0x15);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_adc_with_carry_in() {
    let mut cpu = setup_cpu();

    adc_immediate(&mut cpu, 0x10, 0x05, true, false);

    assert_eq!(cpu.a(), 0x16);
}

#[test]
fn test_adc_carry_and_zero() {
    let mut cpu = setup_cpu();

    adc_immediate(&mut cpu, 0x01, 0xFF, false, false);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_signed_overflow() {
    // CLD; CLC; LDA #$7F; ADC #$01
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xD8, 0x18, 0xA9, 0x7F, 0x69, 0x01]);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_adc_negative_overflow() {
    let mut cpu = setup_cpu();

    adc_immediate(&mut cpu, 0x80, 0xFF, false, false);

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

#[test]
fn test_cmos_binary_matches_nmos() {
    for &(a, m, c) in &[(0x10, 0x05, false), (0x7F, 0x01, false), (0xFF, 0x01, true), (0x80, 0x80, false)] {
        let mut nmos = setup_cpu();
        let mut cmos = setup_cmos();
        adc_immediate(&mut nmos, a, m, c, false);
        adc_immediate(&mut cmos, a, m, c, false);

        assert_eq!(nmos.a(), cmos.a());
        assert_eq!(nmos.status(), cmos.status());
        assert_eq!(nmos.cycles(), cmos.cycles());
    }
}

// ========== Cycle Timing ==========

#[test]
fn test_adc_absolute_x_no_page_cross() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x7D, 0x00, 0x20]); // ADC $2000,X
    cpu.memory_mut().write(0x2005, 0x01);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_adc_absolute_x_page_cross_penalty() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x7D, 0xFF, 0x20]); // ADC $20FF,X
    cpu.memory_mut().write(0x2100, 0x02);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_adc_indirect_y_page_cross_penalty() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x71, 0x40]); // ADC ($40),Y
    cpu.memory_mut().load(0x0040, &[0xFF, 0x20]);
    cpu.memory_mut().write(0x2100, 0x03);
    cpu.set_y(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x03);
    assert_eq!(cpu.cycles(), 6);
}

// ========== Decimal Mode: NMOS ==========

#[test]
fn test_nmos_decimal_add_with_carry_out() {
    let mut cpu = setup_cpu();

    adc_immediate(&mut cpu, 0x58, 0x46, true, true);

    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());
    assert_eq!(cpu.cycles(), 3, "decimal mode costs one extra cycle");
}

#[test]
fn test_nmos_decimal_simple_sums() {
    let cases = [
        (0x12, 0x34, false, 0x46, false),
        (0x05, 0x05, false, 0x10, false),
        (0x09, 0x00, true, 0x10, false),
        (0x81, 0x92, false, 0x73, true),
    ];

    for &(a, m, c, expected, carry) in &cases {
        let mut cpu = setup_cpu();
        adc_immediate(&mut cpu, a, m, c, true);
        assert_eq!(cpu.a(), expected, "{:02X} + {:02X} + {}", a, m, c as u8);
        assert_eq!(cpu.flag_c(), carry, "carry for {:02X} + {:02X}", a, m);
    }
}

#[test]
fn test_nmos_decimal_flags_follow_binary_sum() {
    // 99 + 1 = 00 with carry; Z reflects the binary sum $9A, N the
    // intermediate high nibble.
    let mut cpu = setup_cpu();

    adc_immediate(&mut cpu, 0x99, 0x01, false, true);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

// ========== Decimal Mode: CMOS ==========

#[test]
fn test_cmos_decimal_flags_follow_result() {
    let mut cpu = setup_cmos();

    adc_immediate(&mut cpu, 0x99, 0x01, false, true);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_cmos_decimal_add_with_carry_out() {
    let mut cpu = setup_cmos();

    adc_immediate(&mut cpu, 0x58, 0x46, true, true);

    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_cmos_decimal_simple_sums() {
    let cases = [(0x12, 0x34, 0x46), (0x05, 0x05, 0x10), (0x49, 0x01, 0x50), (0x00, 0x00, 0x00)];

    for &(a, m, expected) in &cases {
        let mut cpu = setup_cmos();
        adc_immediate(&mut cpu, a, m, false, true);
        assert_eq!(cpu.a(), expected, "{:02X} + {:02X}", a, m);
        assert!(!cpu.flag_c());
    }
}
