//! Basic disassembler usage example

use lib65xx::{disassemble_to_string, CpuClass, DisassemblyOptions};

fn main() {
    let code = &[
        0xA9, 0x42, // LDA #$42
        0x8D, 0x00, 0x80, // STA $8000
        0x64, 0x10, // STZ $10 (65C02)
        0x0F, 0x10, 0xFD, // BBR0 $10,*
        0x4C, 0x00, 0x80, // JMP $8000
    ];

    let options = DisassemblyOptions {
        start_address: 0x8000,
        hex_dump: true,
    };

    for class in [CpuClass::Nmos6502, CpuClass::Cmos65C02] {
        println!("{}:", class);
        println!("{}\n", disassemble_to_string(code, class, options));
    }
}
