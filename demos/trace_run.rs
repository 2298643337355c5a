//! Trace run example
//!
//! Runs a small multiplication loop on the NMOS 6502 with instruction
//! tracing enabled, then stops on BRK.
//!
//! Set `RUST_LOG=debug` to also see reset and interrupt log lines.

use lib65xx::{FlatMemory, MemoryBus, RunOptions, RunState, CPU};

fn main() {
    env_logger::init();

    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    memory.set_irq_vector(0x9000);

    // Multiply 6 by 7 by repeated addition, result in $0200
    memory.load(
        0x8000,
        &[
            0xA9, 0x00, // LDA #$00
            0xA2, 0x07, // LDX #$07
            0x18, // loop: CLC
            0x69, 0x06, // ADC #$06
            0xCA, // DEX
            0xD0, 0xFA, // BNE loop
            0x8D, 0x00, 0x02, // STA $0200
            0x00, 0x00, // BRK
        ],
    );

    let mut cpu = CPU::new(memory);
    let options = RunOptions {
        stop_on_break: true,
        write_instructions: true,
    };

    match cpu.run(options) {
        Ok(RunState::Stopped(reason)) => println!("\nstopped: {:?}", reason),
        Ok(state) => println!("\nreturned: {:?}", state),
        Err(err) => eprintln!("\nerror: {}", err),
    }

    println!("result at $0200: {}", cpu.memory().read(0x0200));
    println!(
        "{} instructions, {} cycles",
        cpu.instructions_processed(),
        cpu.cycles()
    );
}
