//! # CPU State and Execution
//!
//! This module contains the [`CPU`] struct and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, PC, SP and the packed status byte ([`Registers`])
//! - **Cycle counter**: cycles consumed since construction
//! - **Instruction counter**: instructions completed since construction
//! - **Halt flag**: set when an illegal opcode is fetched
//!
//! Neither counter is cleared by [`CPU::reset`].
//!
//! ## Execution Model
//!
//! Each step fetches the opcode at PC and looks it up in the opcode table of
//! the configured chip variant. Illegal opcodes halt the processor. Otherwise
//! the addressing-mode decoder consumes the operand bytes and produces the
//! effective address, the engine reads the byte at that address, and the
//! instruction executor runs with both. After execution the instruction
//! counter advances, the pacer is told how many cycles were spent and the
//! instruction is published to the trace sink and callback.
//!
//! - [`CPU::step`]: Execute one instruction
//! - [`CPU::run`]: Execute until halted, stopped on BRK or suspended by a hook
//! - [`CPU::run_for_cycles`]: Execute until a cycle budget is exhausted
//!
//! Interrupts are delivered only between instructions, through
//! [`CPU::nmi`] and [`CPU::irq`].

use std::fmt;
use std::io::{self, Write};

use crate::config::{CpuClass, CpuConfig, IrqVector, RmwTraffic, RunOptions};
use crate::hooks::{BreakHook, Hooks, InstructionCallback, InterruptHook, InterruptKind, StepHook};
use crate::instructions;
use crate::opcodes::{opcode_table, Instruction};
use crate::registers::{high_byte, low_byte, make_word, Registers, Status};
use crate::timing::{NoPacing, Pacer};
use crate::trace::InstructionEvent;
use crate::{ExecutionError, MemoryBus};

/// NMI vector address.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Cycles spent entering an NMI or IRQ handler.
const INTERRUPT_CYCLES: u64 = 7;

/// Why the processor stopped executing on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// An opcode with no table entry was fetched.
    IllegalOpcode { opcode: u8, address: u16 },
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::IllegalOpcode { opcode, address } => {
                write!(f, "illegal opcode 0x{:02X} at ${:04X}", opcode, address)
            }
        }
    }
}

/// Why [`CPU::run`] returned control while the processor can still execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// BRK executed with stop-on-break requested, or the break hook asked to
    /// stop.
    Break,
}

/// Execution state reported by [`CPU::step`] and [`CPU::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The processor can execute further instructions.
    Running,

    /// The processor halted; further steps do nothing until reset.
    Halted(HaltReason),

    /// The run loop returned after BRK.
    Stopped(StopReason),

    /// The step hook suspended the run loop.
    Suspended,
}

/// 6502/65C02 CPU state and execution context.
///
/// The CPU owns its register file, cycle and instruction counters, and the
/// memory bus it executes from. It is generic over the memory implementation
/// via the [`MemoryBus`] trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use lib65xx::{CPU, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
///
/// cpu.step().unwrap();
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.cycles(), 2);
/// ```
pub struct CPU<M: MemoryBus> {
    pub(crate) registers: Registers,
    pub(crate) cycles: u64,
    pub(crate) instructions_processed: u64,

    /// Cycles charged by the instruction currently executing.
    pub(crate) instruction_cycles: u64,

    pub(crate) halt: Option<HaltReason>,

    /// Set by the address resolver when indexing crossed a page.
    pub(crate) page_crossed: bool,

    /// Operand text of the most recently decoded instruction.
    pub(crate) operand_display: String,

    pub(crate) current_address: u16,
    pub(crate) current_opcode: u8,

    pub(crate) config: CpuConfig,
    pub(crate) memory: M,

    pacer: Box<dyn Pacer>,
    hooks: Hooks,
    trace_sink: Box<dyn Write + Send>,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates an NMOS 6502 with default configuration and resets it.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a CPU with the given configuration and resets it.
    ///
    /// Reset loads PC from the reset vector at $FFFC/$FFFD, so the vector
    /// should be in place before construction.
    ///
    /// ```
    /// use lib65xx::{CpuClass, CpuConfig, FlatMemory, CPU};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.set_reset_vector(0x0400);
    ///
    /// let cpu = CPU::with_config(memory, CpuConfig::new(CpuClass::Cmos65C02));
    /// assert_eq!(cpu.cpu_class(), CpuClass::Cmos65C02);
    /// assert_eq!(cpu.pc(), 0x0400);
    /// ```
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut cpu = Self {
            registers: Registers::new(),
            cycles: 0,
            instructions_processed: 0,
            instruction_cycles: 0,
            halt: None,
            page_crossed: false,
            operand_display: String::new(),
            current_address: 0,
            current_opcode: 0,
            config,
            memory,
            pacer: Box::new(NoPacing),
            hooks: Hooks::default(),
            trace_sink: Box::new(io::stdout()),
        };
        cpu.reset();
        cpu
    }

    /// Performs the reset sequence.
    ///
    /// Registers return to their power-on values (SP = $FD, I set) and PC is
    /// loaded from the reset vector. A halted processor resumes. Cycle and
    /// instruction counters are preserved.
    pub fn reset(&mut self) {
        self.registers.reset();
        self.registers.pc = self.read_vector(RESET_VECTOR);
        self.halt = None;

        log::debug!(
            "{} reset, PC=${:04X}",
            self.config.cpu_class,
            self.registers.pc
        );
    }

    /// Executes one instruction.
    ///
    /// Returns [`RunState::Running`] after a normal instruction and
    /// [`RunState::Halted`] when an illegal opcode is fetched or the
    /// processor was already halted.
    ///
    /// # Errors
    ///
    /// [`ExecutionError::UnsupportedInstruction`] for WAI and STP.
    pub fn step(&mut self) -> Result<RunState, ExecutionError> {
        self.execute_next(false)
    }

    /// Executes instructions until the processor halts, BRK stops the loop,
    /// or the step hook suspends it.
    ///
    /// ```
    /// use lib65xx::{CPU, FlatMemory, RunOptions, RunState, StopReason};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.set_reset_vector(0x8000);
    /// memory.load(0x8000, &[0xE8, 0xE8, 0x00]); // INX; INX; BRK
    ///
    /// let mut cpu = CPU::new(memory);
    /// let options = RunOptions { stop_on_break: true, ..RunOptions::default() };
    ///
    /// assert_eq!(cpu.run(options).unwrap(), RunState::Stopped(StopReason::Break));
    /// assert_eq!(cpu.x(), 2);
    /// ```
    pub fn run(&mut self, options: RunOptions) -> Result<RunState, ExecutionError> {
        loop {
            if let Some(reason) = self.halt {
                return Ok(RunState::Halted(reason));
            }

            if let Some(hook) = self.hooks.on_step.as_mut() {
                if !hook(&self.registers) {
                    log::debug!("run suspended at ${:04X}", self.registers.pc);
                    return Ok(RunState::Suspended);
                }
            }

            let state = self.execute_next(options.write_instructions)?;
            if state != RunState::Running {
                return Ok(state);
            }

            if opcode_table(self.config.cpu_class)[self.current_opcode as usize].instruction
                == Instruction::Brk
            {
                let hook_stop = match self.hooks.on_break.as_mut() {
                    Some(hook) => hook(&self.registers),
                    None => false,
                };

                if options.stop_on_break || hook_stop {
                    log::debug!("stopped on BRK at ${:04X}", self.current_address);
                    return Ok(RunState::Stopped(StopReason::Break));
                }
            }
        }
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or the
    /// processor halts. Returns the number of cycles actually consumed, which
    /// may exceed the budget by part of one instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            if let RunState::Halted(_) = self.step()? {
                break;
            }
        }

        Ok(self.cycles - start_cycles)
    }

    fn execute_next(&mut self, write_instructions: bool) -> Result<RunState, ExecutionError> {
        if let Some(reason) = self.halt {
            return Ok(RunState::Halted(reason));
        }

        let table = opcode_table(self.config.cpu_class);

        self.current_address = self.registers.pc;
        self.current_opcode = self.fetch_byte();
        self.instruction_cycles = 0;

        let metadata = &table[self.current_opcode as usize];
        let Some(mnemonic) = metadata.mnemonic else {
            // No operand is resolved or read for an undefined opcode.
            self.page_crossed = false;
            instructions::execute(self, metadata, self.current_address, self.current_opcode)?;
            return Ok(self.state());
        };

        let address = self.resolve_address(metadata.addressing_mode);
        let value = self.memory.read(address);

        instructions::execute(self, metadata, address, value)?;

        self.instructions_processed += 1;
        self.pacer.wait_cycles(self.instruction_cycles);
        self.publish(mnemonic, write_instructions);

        Ok(RunState::Running)
    }

    fn publish(&mut self, mnemonic: &'static str, write_instructions: bool) {
        let event = InstructionEvent {
            address: self.current_address,
            opcode: self.current_opcode,
            mnemonic,
            operand: &self.operand_display,
            registers: &self.registers,
            instruction_cycles: self.instruction_cycles,
            total_cycles: self.cycles,
            instructions_processed: self.instructions_processed,
        };

        if write_instructions || log::log_enabled!(log::Level::Trace) {
            let line = event.trace_line();
            log::trace!("{}", line);

            if write_instructions {
                if let Err(err) = writeln!(self.trace_sink, "{}", line) {
                    log::warn!("failed to write trace line: {}", err);
                }
            }
        }

        if let Some(callback) = self.hooks.on_instruction.as_mut() {
            callback(&event);
        }
    }

    // ========== Interrupts ==========

    /// Signals a non-maskable interrupt.
    ///
    /// Pushes PC and status (B clear), sets I, clears D and loads PC from
    /// $FFFA/$FFFB. Takes 7 cycles.
    pub fn nmi(&mut self) {
        self.enter_interrupt(NMI_VECTOR, InterruptKind::Nmi);
    }

    /// Signals a maskable interrupt.
    ///
    /// Ignored while I is set. Otherwise runs the same entry sequence as NMI
    /// through the vector selected by [`CpuConfig::irq_vector`]. Returns
    /// whether the interrupt was taken.
    pub fn irq(&mut self) -> bool {
        if self.registers.interrupt_disable() {
            log::trace!("IRQ masked at ${:04X}", self.registers.pc);
            return false;
        }

        let vector = match self.config.irq_vector {
            IrqVector::SharedWithNmi => NMI_VECTOR,
            IrqVector::Dedicated => IRQ_VECTOR,
        };
        self.enter_interrupt(vector, InterruptKind::Irq);
        true
    }

    fn enter_interrupt(&mut self, vector: u16, kind: InterruptKind) {
        let status = (self.registers.processor_status() & !Status::BREAK.bits()) | Status::UNUSED.bits();
        self.push_interrupt_frame(status);

        self.registers.set_interrupt_disable(true);
        self.registers.set_decimal(false);
        self.registers.pc = self.read_vector(vector);

        self.instruction_cycles = 0;
        self.account_cycles(INTERRUPT_CYCLES);
        self.pacer.wait_cycles(INTERRUPT_CYCLES);

        log::debug!("{:?} taken, vector ${:04X} -> ${:04X}", kind, vector, self.registers.pc);
        self.notify_interrupt(kind);
    }

    // ========== Engine Helpers ==========

    /// Adds cycles to the running count and to the current instruction.
    pub(crate) fn account_cycles(&mut self, cycles: u64) {
        self.cycles += cycles;
        self.instruction_cycles += cycles;
    }

    pub(crate) fn halt(&mut self, reason: HaltReason) {
        log::debug!("halted: {}", reason);
        self.halt = Some(reason);
    }

    pub(crate) fn read_vector(&self, vector: u16) -> u16 {
        let lo = self.memory.read(vector);
        let hi = self.memory.read(vector.wrapping_add(1));
        make_word(hi, lo)
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.registers.sp as u16, value);
        self.registers.sp = self.registers.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.registers.sp = self.registers.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.registers.sp as u16)
    }

    /// Pushes PC (high byte first) followed by `status`.
    pub(crate) fn push_interrupt_frame(&mut self, status: u8) {
        let pc = self.registers.pc;
        self.push(high_byte(pc));
        self.push(low_byte(pc));
        self.push(status);
    }

    pub(crate) fn notify_interrupt(&mut self, kind: InterruptKind) {
        if let Some(hook) = self.hooks.on_interrupt.as_mut() {
            hook(kind, &self.registers);
        }
    }

    /// Stores the result of a read-modify-write instruction.
    ///
    /// By default the unmodified value is written back before the result on
    /// both variants. [`RmwTraffic::DoubleRead`] re-reads the address instead
    /// and writes once.
    pub(crate) fn write_modified(&mut self, address: u16, original: u8, modified: u8) {
        match self.config.rmw_traffic {
            RmwTraffic::DoubleWrite => self.memory.write(address, original),
            RmwTraffic::DoubleRead => {
                self.memory.read(address);
            }
        }
        self.memory.write(address, modified);
    }

    // ========== Hooks ==========

    /// Installs the post-instruction observer.
    pub fn set_instruction_callback(&mut self, callback: impl FnMut(&InstructionEvent<'_>) + Send + 'static) {
        let callback: InstructionCallback = Box::new(callback);
        self.hooks.on_instruction = Some(callback);
    }

    /// Installs the hook consulted before each fetch in [`CPU::run`].
    pub fn set_step_hook(&mut self, hook: impl FnMut(&Registers) -> bool + Send + 'static) {
        let hook: StepHook = Box::new(hook);
        self.hooks.on_step = Some(hook);
    }

    /// Installs the hook invoked on NMI, IRQ and BRK entry.
    pub fn set_interrupt_hook(&mut self, hook: impl FnMut(InterruptKind, &Registers) + Send + 'static) {
        let hook: InterruptHook = Box::new(hook);
        self.hooks.on_interrupt = Some(hook);
    }

    /// Installs the hook invoked after BRK inside [`CPU::run`].
    pub fn set_break_hook(&mut self, hook: impl FnMut(&Registers) -> bool + Send + 'static) {
        let hook: BreakHook = Box::new(hook);
        self.hooks.on_break = Some(hook);
    }

    /// Removes every installed hook.
    pub fn clear_hooks(&mut self) {
        self.hooks = Hooks::default();
    }

    /// Redirects trace lines (default: standard output).
    pub fn set_trace_sink(&mut self, sink: impl Write + Send + 'static) {
        self.trace_sink = Box::new(sink);
    }

    /// Replaces the pacing strategy (default: [`NoPacing`]).
    pub fn set_pacer(&mut self, pacer: impl Pacer + 'static) {
        self.pacer = Box::new(pacer);
    }

    // ========== Memory Access ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== State Getters ==========

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    pub fn cpu_class(&self) -> CpuClass {
        self.config.cpu_class
    }

    /// Returns a copy of the register file.
    pub fn registers(&self) -> Registers {
        self.registers
    }

    /// Returns the operand text of the last decoded instruction, e.g. `#$42`.
    pub fn operand_display(&self) -> &str {
        &self.operand_display
    }

    /// Returns the total number of cycles consumed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the number of instructions completed since construction.
    pub fn instructions_processed(&self) -> u64 {
        self.instructions_processed
    }

    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halt
    }

    /// Current execution state.
    pub fn state(&self) -> RunState {
        match self.halt {
            Some(reason) => RunState::Halted(reason),
            None => RunState::Running,
        }
    }

    // ========== Register Getters ==========

    pub fn a(&self) -> u8 {
        self.registers.a
    }

    pub fn x(&self) -> u8 {
        self.registers.x
    }

    pub fn y(&self) -> u8 {
        self.registers.y
    }

    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.registers.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC), bit 5 set.
    pub fn status(&self) -> u8 {
        self.registers.processor_status()
    }

    // ========== Status Flag Getters ==========

    pub fn flag_n(&self) -> bool {
        self.registers.negative()
    }

    pub fn flag_v(&self) -> bool {
        self.registers.overflow()
    }

    pub fn flag_b(&self) -> bool {
        self.registers.break_flag()
    }

    pub fn flag_d(&self) -> bool {
        self.registers.decimal()
    }

    pub fn flag_i(&self) -> bool {
        self.registers.interrupt_disable()
    }

    pub fn flag_z(&self) -> bool {
        self.registers.zero()
    }

    pub fn flag_c(&self) -> bool {
        self.registers.carry()
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.registers.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.registers.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.registers.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.registers.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.registers.sp = value;
    }

    /// Loads the status register; bit 5 always reads back as 1.
    pub fn set_status(&mut self, value: u8) {
        self.registers.set_processor_status(value);
    }

    pub fn set_flag_n(&mut self, on: bool) {
        self.registers.set_negative(on);
    }

    pub fn set_flag_v(&mut self, on: bool) {
        self.registers.set_overflow(on);
    }

    pub fn set_flag_b(&mut self, on: bool) {
        self.registers.set_break_flag(on);
    }

    pub fn set_flag_d(&mut self, on: bool) {
        self.registers.set_decimal(on);
    }

    pub fn set_flag_i(&mut self, on: bool) {
        self.registers.set_interrupt_disable(on);
    }

    pub fn set_flag_z(&mut self, on: bool) {
        self.registers.set_zero(on);
    }

    pub fn set_flag_c(&mut self, on: bool) {
        self.registers.set_carry(on);
    }
}
