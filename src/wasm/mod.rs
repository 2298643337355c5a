//! WebAssembly bindings for the emulator.
//!
//! This module provides JavaScript-callable interfaces to the CPU core,
//! enabling browser-based execution of 6502 and 65C02 machine code.

pub mod api;

pub use api::{CpuState, Emulator, EmulatorError};
