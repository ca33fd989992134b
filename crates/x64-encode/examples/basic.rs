//! Basic encoding example: demonstrates the one-shot and session APIs.
//!
//! Run with: `cargo run --example basic`

use x64_encode::opcodes::*;
use x64_encode::regs::*;
use x64_encode::{
    encode, encode_hex, Assembler, Checks, Code, Imm, Instruction, Label, Mem, Opcode, Options,
    Syntax,
};

fn main() {
    println!("=== x64_encode basic example ===\n");

    // --- One-shot encoding ---
    println!("1. One-shot encoding (mov eax, 42; ret):");
    let mut code = Code::new();
    code.emit(MOV_R32_IMM32, &[EAX.into(), Imm::imm32(42).into()])
        .emit(RET, &[]);
    print_hex("   ", &encode(&code).unwrap());

    // --- Function with labels ---
    println!("\n2. strlen(rdi) with a backward branch:");
    let top = Label::new(0);
    let mut strlen = Code::new();
    strlen
        .emit(XOR_R32_R32, &[EAX.into(), EAX.into()])
        .bind(top)
        .emit(MOVZX_R32_M8, &[ECX.into(), Mem::sib(RDI, RAX, x64_encode::Scale::S1, 0).into()])
        .emit(INC_R64, &[RAX.into()])
        .emit(TEST_R32_R32, &[ECX.into(), ECX.into()])
        .emit(JNE_REL32, &[top.into()])
        .emit(DEC_R64, &[RAX.into()])
        .emit(RET, &[]);

    println!("\n   Hex, one instruction per line:");
    for line in encode_hex(&strlen).unwrap().lines() {
        println!("   {}", line);
    }

    println!("\n   Listing (Intel / AT&T):");
    for instr in &strlen {
        println!(
            "   {:<32} {}",
            instr.display(Syntax::Intel).to_string(),
            instr.display(Syntax::Att)
        );
    }

    // --- Session API ---
    println!("\n3. Reusing one session buffer:");
    let mut asm = Assembler::with_options(Options {
        capacity: 4096,
        checks: Checks::Enabled,
    });
    for n in [1i8, 2, 3] {
        let mut add = Code::new();
        add.emit(ADD_R64_IMM8, &[RDI.into(), Imm::imm8(n).into()])
            .emit(MOV_R64_R64, &[RAX.into(), RDI.into()])
            .emit(RET, &[]);
        print_hex("   ", asm.assemble_code(&add).unwrap());
    }

    // --- Errors and the unchecked fallback ---
    println!("\n4. Rejected instructions:");
    let bad = Instruction::new(MOV_R8_R8, &[AH.into(), SIL.into()]);
    asm.start();
    match asm.assemble(&bad) {
        Ok(()) => println!("   unexpectedly accepted"),
        Err(e) => println!("   checked:   {}", e),
    }
    asm.checks(Checks::Disabled);
    asm.assemble(&bad).unwrap();
    asm.assemble(&Instruction::new(Opcode::from_raw(0xFFFF), &[])).unwrap();
    print!("   unchecked: ");
    print_hex("", asm.finish());
}

fn print_hex(prefix: &str, bytes: &[u8]) {
    print!("{}", prefix);
    for b in bytes {
        print!("{:02X} ", b);
    }
    println!("({} bytes)", bytes.len());
}
