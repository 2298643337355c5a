//! # CPU Configuration
//!
//! Chip-variant selection and the behavioral switches that differ between
//! silicon revisions. A [`CpuConfig`] is fixed at construction time.
//!
//! ```
//! use lib65xx::{CpuClass, CpuConfig, IndirectJump, IrqVector};
//!
//! let config = CpuConfig::new(CpuClass::Cmos65C02).with_irq_vector(IrqVector::Dedicated);
//!
//! assert_eq!(config.indirect_jump, IndirectJump::Fixed);
//! assert_eq!(config.irq_vector, IrqVector::Dedicated);
//! ```

use std::fmt;

/// Processor family being emulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CpuClass {
    /// Original NMOS 6502.
    #[default]
    Nmos6502,

    /// CMOS 65C02 with the extended instruction set.
    Cmos65C02,
}

impl fmt::Display for CpuClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuClass::Nmos6502 => write!(f, "6502"),
            CpuClass::Cmos65C02 => write!(f, "65C02"),
        }
    }
}

/// How `JMP ($xxFF)` fetches the high byte of its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndirectJump {
    /// High byte read from `$xx00` (NMOS behavior).
    PageWrapBug,

    /// High byte read from `$xxFF + 1` (65C02 behavior).
    Fixed,
}

/// Vector loaded when a maskable interrupt is taken through [`CPU::irq`].
///
/// [`CPU::irq`]: crate::CPU::irq
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IrqVector {
    /// IRQ runs the NMI entry sequence and loads the NMI vector at
    /// $FFFA/$FFFB.
    #[default]
    SharedWithNmi,

    /// IRQ loads its own vector at $FFFE/$FFFF, like BRK.
    Dedicated,
}

/// Bus traffic of a memory read-modify-write instruction (INC, DEC, shifts,
/// TSB/TRB, RMB/SMB) after the operand read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RmwTraffic {
    /// Write the unmodified value back, then the result. Used by both
    /// variants unless overridden.
    #[default]
    DoubleWrite,

    /// Read the address a second time, then write the result once, as 65C02
    /// silicon does.
    DoubleRead,
}

/// Construction-time CPU configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Chip variant; selects the opcode table.
    pub cpu_class: CpuClass,

    /// Indirect JMP page-wrap behavior.
    pub indirect_jump: IndirectJump,

    /// Vector used by [`CPU::irq`](crate::CPU::irq).
    pub irq_vector: IrqVector,

    /// Read-modify-write bus sequence.
    pub rmw_traffic: RmwTraffic,
}

impl CpuConfig {
    /// Returns the defaults for a chip variant: the indirect JMP bug on NMOS,
    /// the fix on CMOS.
    pub fn new(cpu_class: CpuClass) -> Self {
        let indirect_jump = match cpu_class {
            CpuClass::Nmos6502 => IndirectJump::PageWrapBug,
            CpuClass::Cmos65C02 => IndirectJump::Fixed,
        };

        Self {
            cpu_class,
            indirect_jump,
            irq_vector: IrqVector::default(),
            rmw_traffic: RmwTraffic::default(),
        }
    }

    pub fn with_indirect_jump(mut self, indirect_jump: IndirectJump) -> Self {
        self.indirect_jump = indirect_jump;
        self
    }

    pub fn with_irq_vector(mut self, irq_vector: IrqVector) -> Self {
        self.irq_vector = irq_vector;
        self
    }

    pub fn with_rmw_traffic(mut self, rmw_traffic: RmwTraffic) -> Self {
        self.rmw_traffic = rmw_traffic;
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::new(CpuClass::default())
    }
}

/// Options for [`CPU::run`](crate::CPU::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Return control the first time BRK executes.
    pub stop_on_break: bool,

    /// Write one disassembly trace line per instruction to the trace sink.
    pub write_instructions: bool,
}
