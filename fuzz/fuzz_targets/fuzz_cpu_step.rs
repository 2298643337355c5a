//! Fuzz target for CPU execution.
//!
//! Builds an arbitrary CPU state and memory image, then runs a short burst
//! of instructions on either chip variant. Every opcode byte must either
//! execute, halt the processor, or report an unsupported instruction.

#![no_main]

use arbitrary::Arbitrary;
use lib65xx::{CpuClass, CpuConfig, FlatMemory, RunState, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    cmos: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Region at $4000 for absolute operands
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    memory.set_nmi_vector(0x9000);
    memory.set_irq_vector(0x9000);
    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let class = if input.cpu_state.cmos {
        CpuClass::Cmos65C02
    } else {
        CpuClass::Nmos6502
    };
    let mut cpu = CPU::with_config(memory, CpuConfig::new(class));

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for _ in 0..input.steps.min(32) {
        let before = cpu.instructions_processed();
        match cpu.step() {
            Ok(RunState::Running) => assert_eq!(cpu.instructions_processed(), before + 1),
            Ok(_) => {
                assert!(cpu.is_halted());
                assert_eq!(cpu.instructions_processed(), before);
                break;
            }
            Err(_) => break,
        }

        // Bit 5 of the status register always reads back as 1
        assert_eq!(cpu.status() & 0x20, 0x20);
    }
});
