//! Tests for the stack instructions and stack pointer wrapping.
//!
//! Tests cover:
//! - PHA/PLA, PHP/PLP and the B/unused bits in pushed status
//! - Stack pointer wrap within page 1
//! - PHX/PHY/PLX/PLY on the 65C02

use lib65xx::{CpuClass, CpuConfig, FlatMemory, MemoryBus, CPU};

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

// ========== PHA / PLA ==========

#[test]
fn test_pha_pushes_accumulator() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x48);
    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x01FD), 0x42);
    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_pla_pulls_and_sets_flags() {
    // LDA #$80; PHA; LDA #$00; PLA
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xA9, 0x80, 0x48, 0xA9, 0x00, 0x68]);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 2 + 3 + 2 + 4);
}

// ========== PHP / PLP ==========

#[test]
fn test_php_sets_break_and_unused_bits() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x08);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    // I and C from the register, B and bit 5 forced on
    assert_eq!(cpu.memory().read(0x01FD), 0x35);
    assert!(!cpu.flag_b(), "PHP does not change the live B flag");
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_plp_forces_unused_bit() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x28);
    cpu.memory_mut().write(0x01FE, 0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.status(), 0x20);
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_plp_restores_all_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x28);
    cpu.memory_mut().write(0x01FE, 0xCB);

    cpu.step().unwrap();

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_d());
    assert!(!cpu.flag_i());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

// ========== Wrapping ==========

#[test]
fn test_push_wraps_from_00_to_ff() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x48);
    cpu.set_sp(0x00);
    cpu.set_a(0x99);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0100), 0x99);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_pull_wraps_from_ff_to_00() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x68);
    cpu.memory_mut().write(0x0100, 0x77);
    cpu.set_sp(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x77);
    assert_eq!(cpu.sp(), 0x00);
}

#[test]
fn test_full_page_of_pushes_wraps() {
    // LDX #$00; loop: TXA; PHA; INX; BNE loop; PLA
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xA2, 0x00, 0x8A, 0x48, 0xE8, 0xD0, 0xFB, 0x68]);
    cpu.set_sp(0xFF);

    cpu.step().unwrap();
    for _ in 0..256 * 4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.memory().read(0x01FF), 0x00);
    assert_eq!(cpu.memory().read(0x0100), 0xFF);

    cpu.step().unwrap(); // PLA
    assert_eq!(cpu.a(), 0xFF);
    assert_eq!(cpu.sp(), 0x00);
}

// ========== 65C02 Register Pushes ==========

#[test]
fn test_phx_plx_round_trip() {
    // PHX; LDX #$00; PLX
    let mut cpu = setup_cmos();
    cpu.memory_mut().load(0x8000, &[0xDA, 0xA2, 0x00, 0xFA]);
    cpu.set_x(0x81);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x01FD), 0x81);
    assert_eq!(cpu.cycles(), 3);

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x81);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 3 + 2 + 4);
}

#[test]
fn test_phy_ply_round_trip() {
    // PHY; LDY #$05; PLY
    let mut cpu = setup_cmos();
    cpu.memory_mut().load(0x8000, &[0x5A, 0xA0, 0x05, 0x7A]);
    cpu.set_y(0x00);

    for _ in 0..3 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.y(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_phx_is_illegal_on_nmos() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0xDA);

    cpu.step().unwrap();

    assert!(cpu.is_halted());
    assert_eq!(cpu.sp(), 0xFD);
}
