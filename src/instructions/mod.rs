//! # Instruction Implementations
//!
//! Executors for every 6502 and 65C02 instruction, organized by category.
//! Each executor is a standalone function taking the CPU and the resolved
//! [`Operand`]. Executors own the full semantics of their instruction,
//! including flag updates, extra bus traffic and cycle accounting.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC (NMOS and CMOS), AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **bits**: TSB, TRB, RMB, SMB (65C02)
//! - **branches**: Conditional branches, BRA, BBR, BBS
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP, WAI, STP, illegal opcodes
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY, STZ
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **stack**: PHA, PHP, PLA, PLP, PHX, PHY, PLX, PLY
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

pub(crate) mod alu;
pub(crate) mod bits;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::opcodes::{Instruction, OpcodeMetadata};
use crate::{ExecutionError, MemoryBus, CPU};

/// Resolved operand handed to an executor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operand {
    /// Effective address (branch target for relative modes).
    pub address: u16,

    /// Byte read from `address` before execution.
    pub value: u8,

    /// Cycles to charge, base cost plus any indexing penalty.
    pub cycles: u64,

    /// Penalty for executors that detect page crossings themselves.
    pub page_cross_penalty: u64,
}

/// Runs the executor selected by `metadata`.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    address: u16,
    value: u8,
) -> Result<(), ExecutionError> {
    let penalty = metadata.page_cross_penalty as u64;
    let mut cycles = metadata.base_cycles as u64;
    if cpu.page_crossed {
        cycles += penalty;
    }

    let op = Operand {
        address,
        value,
        cycles,
        page_cross_penalty: penalty,
    };

    use Instruction::*;
    match metadata.instruction {
        AdcNmos => alu::execute_adc_nmos(cpu, op),
        AdcCmos => alu::execute_adc_cmos(cpu, op),
        SbcNmos => alu::execute_sbc_nmos(cpu, op),
        SbcCmos => alu::execute_sbc_cmos(cpu, op),
        And => alu::execute_and(cpu, op),
        Ora => alu::execute_ora(cpu, op),
        Eor => alu::execute_eor(cpu, op),
        Cmp => alu::execute_cmp(cpu, op),
        Cpx => alu::execute_cpx(cpu, op),
        Cpy => alu::execute_cpy(cpu, op),
        Bit => alu::execute_bit(cpu, op),
        BitImmediate => alu::execute_bit_immediate(cpu, op),

        Tsb => bits::execute_tsb(cpu, op),
        Trb => bits::execute_trb(cpu, op),
        Rmb(bit) => bits::execute_rmb(cpu, op, bit),
        Smb(bit) => bits::execute_smb(cpu, op, bit),

        Bcc => branches::execute_bcc(cpu, op),
        Bcs => branches::execute_bcs(cpu, op),
        Beq => branches::execute_beq(cpu, op),
        Bne => branches::execute_bne(cpu, op),
        Bmi => branches::execute_bmi(cpu, op),
        Bpl => branches::execute_bpl(cpu, op),
        Bvc => branches::execute_bvc(cpu, op),
        Bvs => branches::execute_bvs(cpu, op),
        Bra => branches::execute_bra(cpu, op),
        Bbr(bit) => branches::execute_bbr(cpu, op, bit),
        Bbs(bit) => branches::execute_bbs(cpu, op, bit),

        Brk => control::execute_brk(cpu, op),
        Jmp => control::execute_jmp(cpu, op),
        Jsr => control::execute_jsr(cpu, op),
        Rts => control::execute_rts(cpu, op),
        Rti => control::execute_rti(cpu, op),
        Nop => control::execute_nop(cpu, op),
        Wai => control::execute_wai(cpu, op),
        Stp => control::execute_stp(cpu, op),
        Illegal => control::execute_illegal(cpu, op),

        Clc => flags::execute_clc(cpu, op),
        Sec => flags::execute_sec(cpu, op),
        Cli => flags::execute_cli(cpu, op),
        Sei => flags::execute_sei(cpu, op),
        Cld => flags::execute_cld(cpu, op),
        Sed => flags::execute_sed(cpu, op),
        Clv => flags::execute_clv(cpu, op),

        Inc => inc_dec::execute_inc(cpu, op),
        IncA => inc_dec::execute_inc_a(cpu, op),
        Dec => inc_dec::execute_dec(cpu, op),
        DecA => inc_dec::execute_dec_a(cpu, op),
        Inx => inc_dec::execute_inx(cpu, op),
        Iny => inc_dec::execute_iny(cpu, op),
        Dex => inc_dec::execute_dex(cpu, op),
        Dey => inc_dec::execute_dey(cpu, op),

        Lda => load_store::execute_lda(cpu, op),
        Ldx => load_store::execute_ldx(cpu, op),
        Ldy => load_store::execute_ldy(cpu, op),
        Sta => load_store::execute_sta(cpu, op),
        Stx => load_store::execute_stx(cpu, op),
        Sty => load_store::execute_sty(cpu, op),
        Stz => load_store::execute_stz(cpu, op),

        Asl => shifts::execute_asl(cpu, op),
        AslA => shifts::execute_asl_a(cpu, op),
        Lsr => shifts::execute_lsr(cpu, op),
        LsrA => shifts::execute_lsr_a(cpu, op),
        Rol => shifts::execute_rol(cpu, op),
        RolA => shifts::execute_rol_a(cpu, op),
        Ror => shifts::execute_ror(cpu, op),
        RorA => shifts::execute_ror_a(cpu, op),

        Pha => stack::execute_pha(cpu, op),
        Php => stack::execute_php(cpu, op),
        Phx => stack::execute_phx(cpu, op),
        Phy => stack::execute_phy(cpu, op),
        Pla => stack::execute_pla(cpu, op),
        Plp => stack::execute_plp(cpu, op),
        Plx => stack::execute_plx(cpu, op),
        Ply => stack::execute_ply(cpu, op),

        Tax => transfer::execute_tax(cpu, op),
        Tay => transfer::execute_tay(cpu, op),
        Txa => transfer::execute_txa(cpu, op),
        Tya => transfer::execute_tya(cpu, op),
        Tsx => transfer::execute_tsx(cpu, op),
        Txs => transfer::execute_txs(cpu, op),
    }
}
