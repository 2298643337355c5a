//! WASM API for the emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! interrupts and disassembly over a flat 64KB memory.

use crate::{
    disassemble, format_instruction, CpuClass, CpuConfig, DisassemblyOptions, ExecutionError,
    FlatMemory, MemoryBus, RunOptions, RunState, CPU,
};
use wasm_bindgen::prelude::*;

/// Execution failure surfaced to JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct EmulatorError {
    message: String,
    address: u16,
}

#[wasm_bindgen]
impl EmulatorError {
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Address of the instruction that failed
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }
}

impl From<ExecutionError> for EmulatorError {
    fn from(err: ExecutionError) -> Self {
        let address = match &err {
            ExecutionError::UnsupportedInstruction { address, .. } => *address,
        };
        EmulatorError {
            message: err.to_string(),
            address,
        }
    }
}

/// Register and counter snapshot.
///
/// Counters are `f64` since JavaScript numbers cannot hold a full `u64`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    flags: String,
    pub cycles: f64,
    pub instructions: f64,
    pub halted: bool,
}

#[wasm_bindgen]
impl CpuState {
    /// Flags rendered as `NV-BDIZC`
    #[wasm_bindgen(getter)]
    pub fn flags(&self) -> String {
        self.flags.clone()
    }
}

/// One line of disassembly
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator {
    cpu: CPU<FlatMemory>,
    program_start: u16,
    program_end: u16,
}

#[wasm_bindgen]
impl Emulator {
    /// Create an emulator; `cmos` selects the 65C02 instead of the 6502.
    ///
    /// The reset vector is preset to $0600.
    #[wasm_bindgen(constructor)]
    pub fn new(cmos: bool) -> Self {
        let class = if cmos {
            CpuClass::Cmos65C02
        } else {
            CpuClass::Nmos6502
        };

        let mut memory = FlatMemory::new();
        memory.set_reset_vector(0x0600);

        Emulator {
            cpu: CPU::with_config(memory, CpuConfig::new(class)),
            program_start: 0x0600,
            program_end: 0x0600,
        }
    }

    /// Execute a single instruction; returns false once the CPU has halted
    pub fn step(&mut self) -> Result<bool, EmulatorError> {
        Ok(self.cpu.step()? == RunState::Running)
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, EmulatorError> {
        let consumed = self.cpu.run_for_cycles(cycles as u64)?;
        Ok(u32::try_from(consumed).unwrap_or(u32::MAX))
    }

    /// Run until halt or BRK; returns "halted", "stopped" or "suspended"
    pub fn run(&mut self, stop_on_break: bool) -> Result<String, EmulatorError> {
        let options = RunOptions {
            stop_on_break,
            ..RunOptions::default()
        };

        let state = match self.cpu.run(options)? {
            RunState::Running => "running",
            RunState::Halted(_) => "halted",
            RunState::Stopped(_) => "stopped",
            RunState::Suspended => "suspended",
        };
        Ok(state.to_string())
    }

    /// Reset the CPU, keeping memory contents
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    pub fn nmi(&mut self) {
        self.cpu.nmi();
    }

    /// Signal IRQ; returns whether it was taken
    pub fn irq(&mut self) -> bool {
        self.cpu.irq()
    }

    /// Snapshot of the register file and counters
    pub fn registers(&self) -> CpuState {
        let regs = self.cpu.registers();
        CpuState {
            a: regs.a,
            x: regs.x,
            y: regs.y,
            sp: regs.sp,
            pc: regs.pc,
            status: regs.status.bits(),
            flags: regs.flags_display(),
            cycles: self.cpu.cycles() as f64,
            instructions: self.cpu.instructions_processed() as f64,
            halted: self.cpu.is_halted(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as usize) << 8;
        self.cpu.memory().as_slice()[start..start + 256].to_vec()
    }

    /// Load a program into memory and set PC
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        self.cpu.memory_mut().load(start_addr, program);
        self.cpu.set_pc(start_addr);
        self.program_start = start_addr;
        self.program_end = start_addr.wrapping_add(program.len() as u16);
    }

    /// Disassemble memory starting at an address
    pub fn disassemble(&self, start_addr: u16, num_instructions: u32) -> js_sys::Array {
        let options = DisassemblyOptions {
            start_address: start_addr,
            ..DisassemblyOptions::default()
        };

        // At most three bytes per instruction
        let window = (num_instructions as usize).saturating_mul(3).min(0x10000);
        let bytes: Vec<u8> = (0..window)
            .map(|i| self.cpu.memory().read(start_addr.wrapping_add(i as u16)))
            .collect();

        disassemble(&bytes, self.cpu.cpu_class(), options)
            .iter()
            .take(num_instructions as usize)
            .map(|instr| {
                let mut raw = vec![instr.opcode];
                if !instr.is_data() {
                    raw.extend_from_slice(&instr.operand_bytes);
                }

                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes: raw,
                    text: format_instruction(instr),
                })
            })
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u16 {
        self.program_start
    }

    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u16 {
        self.program_end
    }
}
