//! Host callback slots.
//!
//! All hooks are optional. The post-instruction callback is an observer that
//! fires strictly after an instruction has completed. The step, interrupt and
//! break hooks are extension points invoked at instruction boundaries and at
//! interrupt entry.

use crate::registers::Registers;
use crate::trace::InstructionEvent;

/// Kind of interrupt sequence being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptKind {
    Nmi,
    Irq,
    Break,
}

/// Observer invoked after every executed instruction.
pub type InstructionCallback = Box<dyn FnMut(&InstructionEvent<'_>) + Send>;

/// Invoked before each fetch inside [`CPU::run`](crate::CPU::run). Returning
/// `false` suspends the run loop.
pub type StepHook = Box<dyn FnMut(&Registers) -> bool + Send>;

/// Invoked once an interrupt sequence has pushed its frame and loaded the
/// vector.
pub type InterruptHook = Box<dyn FnMut(InterruptKind, &Registers) + Send>;

/// Invoked after BRK executes. Returning `true` stops the run loop as if
/// stop-on-break had been requested.
pub type BreakHook = Box<dyn FnMut(&Registers) -> bool + Send>;

#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) on_instruction: Option<InstructionCallback>,
    pub(crate) on_step: Option<StepHook>,
    pub(crate) on_interrupt: Option<InterruptHook>,
    pub(crate) on_break: Option<BreakHook>,
}
