//! # 6502 / 65C02 Emulator Core
//!
//! A cycle-counting emulator for the NMOS 6502 and the CMOS 65C02, built
//! around a pluggable memory bus and a table-driven decoder.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib65xx::{CPU, FlatMemory, MemoryBus, RunOptions, RunState};
//!
//! let mut memory = FlatMemory::new();
//! memory.set_reset_vector(0x8000);
//! memory.load(0x8000, &[
//!     0xA9, 0x05, // LDA #$05
//!     0x69, 0x03, // ADC #$03
//!     0x8D, 0x00, 0x02, // STA $0200
//!     0x02, // illegal opcode: halts
//! ]);
//!
//! let mut cpu = CPU::new(memory);
//! let state = cpu.run(RunOptions::default()).unwrap();
//!
//! assert!(matches!(state, RunState::Halted(_)));
//! assert_eq!(cpu.memory().read(0x0200), 0x08);
//! assert_eq!(cpu.instructions_processed(), 3);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the [`MemoryBus`] trait
//! - **Table-Driven Design**: one immutable 256-entry opcode table per chip variant
//! - **Cycle Counting**: base costs, page-cross penalties and decimal-mode extras
//! - **Host Hooks**: instruction observer, step/interrupt/break hooks, trace sink
//! - **Pacing**: optional real-time throttling through the [`Pacer`] trait
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the execution engine
//! - `registers` - Register file and status flags
//! - `addressing` - Addressing modes and the effective-address resolver
//! - `opcodes` - NMOS and CMOS opcode tables
//! - `memory` - MemoryBus trait and implementations
//! - `config` - Chip variant and behavioral switches
//! - `hooks`, `trace`, `timing` - Host integration
//! - `disassembler` - Machine code to assembly text
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: resets, interrupts and halts at
//! `debug`, one line per executed instruction at `trace`, unsupported
//! instructions at `warn`. Install any logger in the host to see them.

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod disassembler;
pub mod hooks;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod timing;
pub mod trace;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::{format_operand, AddressingMode};
pub use config::{CpuClass, CpuConfig, IndirectJump, IrqVector, RmwTraffic, RunOptions};
pub use cpu::{HaltReason, RunState, StopReason, CPU};
pub use disassembler::formatter::{format_instruction, format_line};
pub use disassembler::{disassemble, disassemble_to_string, DecodedInstruction, DisassemblyOptions};
pub use hooks::InterruptKind;
pub use memory::{FlatMemory, FnBus, MemoryBus};
pub use opcodes::{opcode_table, Instruction, OpcodeMetadata, OPCODE_TABLE_6502, OPCODE_TABLE_65C02};
pub use registers::{Registers, Status};
pub use timing::{NoPacing, Pacer, RealTimePacer};
pub use trace::InstructionEvent;

/// Errors that can occur during CPU execution.
///
/// Illegal opcodes are not errors: they halt the processor and are reported
/// through [`RunState::Halted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// A defined instruction the emulator does not implement (WAI, STP).
    UnsupportedInstruction {
        mnemonic: &'static str,
        opcode: u8,
        address: u16,
    },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UnsupportedInstruction {
                mnemonic,
                opcode,
                address,
            } => write!(
                f,
                "{} (opcode 0x{:02X}) at ${:04X} is not supported",
                mnemonic, opcode, address
            ),
        }
    }
}

impl std::error::Error for ExecutionError {}
