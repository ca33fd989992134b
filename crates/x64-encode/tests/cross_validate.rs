#![cfg(not(target_arch = "wasm32"))]
//! Cross-validation tests: encode with x64_encode, decode with iced-x86.
//!
//! Every recipe in the opcode table is encoded with representative operands
//! and decoded by iced-x86; the decoded mnemonic and length must agree.
//! Register and addressing-mode sweeps then check the decoded operands.

use iced_x86::{
    Decoder, DecoderOptions, Formatter, Instruction as IcedInstruction, IntelFormatter,
    Register as IcedRegister,
};
use x64_encode::opcodes::{self, *};
use x64_encode::recipe::Role;
use x64_encode::regs::*;
use x64_encode::{encode, Code, Imm, Label, Mem, Opcode, Operand, Register, Scale};

// ─── Helpers ──────────────────────────────────────────────────────────────────

const ICED_GPR64: [IcedRegister; 16] = [
    IcedRegister::RAX,
    IcedRegister::RCX,
    IcedRegister::RDX,
    IcedRegister::RBX,
    IcedRegister::RSP,
    IcedRegister::RBP,
    IcedRegister::RSI,
    IcedRegister::RDI,
    IcedRegister::R8,
    IcedRegister::R9,
    IcedRegister::R10,
    IcedRegister::R11,
    IcedRegister::R12,
    IcedRegister::R13,
    IcedRegister::R14,
    IcedRegister::R15,
];

/// Encode one instruction and decode it with iced-x86, checking that the
/// decoder consumed exactly the emitted bytes.
fn enc_and_decode(opcode: Opcode, ops: &[Operand]) -> (Vec<u8>, IcedInstruction) {
    let mut code = Code::new();
    code.emit(opcode, ops);
    let bytes = encode(&code).unwrap_or_else(|e| panic!("failed to encode {opcode}: {e}"));
    assert!(!bytes.is_empty(), "empty output for {opcode}");

    let mut decoder = Decoder::with_ip(64, &bytes, 0, DecoderOptions::NONE);
    let instr = decoder.decode();
    assert!(
        !instr.is_invalid(),
        "iced-x86 decoded INVALID for {opcode} → {:02X?}",
        bytes
    );
    assert_eq!(
        instr.len(),
        bytes.len(),
        "iced-x86 decoded {} bytes but {} were emitted for {opcode} → {:02X?}",
        instr.len(),
        bytes.len(),
        bytes
    );
    (bytes, instr)
}

fn formatted(instr: &IcedInstruction) -> String {
    let mut formatter = IntelFormatter::new();
    let mut output = String::new();
    formatter.format(instr, &mut output);
    output
}

/// A representative operand for `role` in operand position `slot`.
fn sample(role: Role, slot: usize) -> Operand {
    match role {
        Role::R64 => [R10, RDX, R11][slot].into(),
        Role::R32 => [R10D, EDX, R11D][slot].into(),
        Role::R16 => [R10W, DX, R11W][slot].into(),
        Role::R8 => [R10B, DL, R11B][slot].into(),
        Role::M => Mem::sib(RBX, R12, Scale::S4, 0x40).into(),
        Role::Imm8 => Imm::imm8(0x7f).into(),
        Role::Imm16 => Imm::imm16(0x1234).into(),
        Role::Imm32 => Imm::imm32(0x1234_5678).into(),
        Role::Imm64 => Imm::imm64(0x1122_3344_5566_7788).into(),
        Role::Rel => Label::new(0).into(),
        Role::Cl => CL.into(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Whole table
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn xv_every_recipe_decodes() {
    for (opcode, recipe) in opcodes::iter() {
        let ops: Vec<Operand> = recipe
            .roles
            .iter()
            .enumerate()
            .map(|(slot, role)| sample(*role, slot))
            .collect();
        let (_, instr) = enc_and_decode(opcode, &ops);
        let decoded = format!("{:?}", instr.mnemonic()).to_lowercase();
        assert_eq!(
            decoded,
            recipe.mnemonic,
            "{opcode}: iced decoded `{}`",
            formatted(&instr)
        );
    }
}

#[test]
fn xv_every_recipe_without_rex_decodes() {
    // Low registers only, so no REX bit is needed beyond REX.W.
    for (opcode, recipe) in opcodes::iter() {
        let ops: Vec<Operand> = recipe
            .roles
            .iter()
            .enumerate()
            .map(|(slot, role)| match role {
                Role::R64 => [RAX, RCX, RBX][slot].into(),
                Role::R32 => [EAX, ECX, EBX][slot].into(),
                Role::R16 => [AX, CX, BX][slot].into(),
                Role::R8 => [AL, CL, BL][slot].into(),
                Role::M => Mem::base_disp(RSI, -8).into(),
                other => sample(*other, slot),
            })
            .collect();
        let (_, instr) = enc_and_decode(opcode, &ops);
        assert_eq!(format!("{:?}", instr.mnemonic()).to_lowercase(), recipe.mnemonic);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Register sweeps
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn xv_mov_all_register_pairs() {
    for (i, dst) in GPR64.iter().enumerate() {
        for (j, src) in GPR64.iter().enumerate() {
            let (_, instr) = enc_and_decode(MOV_R64_R64, &[(*dst).into(), (*src).into()]);
            assert_eq!(instr.op0_register(), ICED_GPR64[i], "mov {dst}, {src}");
            assert_eq!(instr.op1_register(), ICED_GPR64[j], "mov {dst}, {src}");
        }
    }
}

#[test]
fn xv_push_pop_all_registers() {
    for (i, reg) in GPR64.iter().enumerate() {
        let (_, push) = enc_and_decode(PUSH_R64, &[(*reg).into()]);
        assert_eq!(push.op0_register(), ICED_GPR64[i]);
        let (_, pop) = enc_and_decode(POP_R64, &[(*reg).into()]);
        assert_eq!(pop.op0_register(), ICED_GPR64[i]);
    }
}

#[test]
fn xv_byte_registers() {
    let cases = [
        (AL, IcedRegister::AL),
        (AH, IcedRegister::AH),
        (BH, IcedRegister::BH),
        (SPL, IcedRegister::SPL),
        (DIL, IcedRegister::DIL),
        (R15B, IcedRegister::R15L),
    ];
    for (reg, expected) in cases {
        let (_, instr) = enc_and_decode(MOV_R8_IMM8, &[reg.into(), Imm::imm8(1).into()]);
        assert_eq!(instr.op0_register(), expected, "mov {reg}, 1");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Addressing modes
// ═══════════════════════════════════════════════════════════════════════════════

fn check_mem(mem: Mem, base: IcedRegister, index: IcedRegister, scale: u32, disp: i32) {
    let (bytes, instr) = enc_and_decode(MOV_R64_M64, &[RAX.into(), mem.into()]);
    let what = format!("mov rax, {mem} → {:02X?}", bytes);
    assert_eq!(instr.memory_base(), base, "{what}");
    assert_eq!(instr.memory_index(), index, "{what}");
    if index != IcedRegister::None {
        assert_eq!(instr.memory_index_scale(), scale, "{what}");
    }
    assert_eq!(instr.memory_displacement64() as i64, i64::from(disp), "{what}");
}

#[test]
fn xv_every_base_and_displacement() {
    for (i, base) in GPR64.iter().enumerate() {
        for disp in [0, 1, -1, 127, -128, 128, -129, 0x7fff_ffff, i32::MIN] {
            check_mem(
                Mem::base_disp(*base, disp),
                ICED_GPR64[i],
                IcedRegister::None,
                1,
                disp,
            );
        }
    }
}

#[test]
fn xv_every_base_index_pair() {
    let scales = [(Scale::S1, 1), (Scale::S2, 2), (Scale::S4, 4), (Scale::S8, 8)];
    for (i, base) in GPR64.iter().enumerate() {
        for (j, index) in GPR64.iter().enumerate() {
            if index.index() == 4 {
                continue;
            }
            let (scale, factor) = scales[(i + j) % 4];
            for disp in [0, 0x10, -0x200] {
                check_mem(
                    Mem::sib(*base, *index, scale, disp),
                    ICED_GPR64[i],
                    ICED_GPR64[j],
                    factor,
                    disp,
                );
            }
        }
    }
}

#[test]
fn xv_index_without_base() {
    for (j, index) in GPR64.iter().enumerate() {
        if index.index() == 4 {
            continue;
        }
        check_mem(
            Mem::index_only(*index, Scale::S8, 0x100),
            IcedRegister::None,
            ICED_GPR64[j],
            8,
            0x100,
        );
    }
}

#[test]
fn xv_rip_relative() {
    let (bytes, instr) = enc_and_decode(MOV_R64_M64, &[RAX.into(), Mem::rip(0x100).into()]);
    assert!(instr.is_ip_rel_memory_operand());
    assert_eq!(instr.ip_rel_memory_address(), bytes.len() as u64 + 0x100);
}

#[test]
fn xv_address_size_override() {
    let (_, instr) = enc_and_decode(MOV_R32_M32, &[EAX.into(), Mem::base_disp(ECX, 4).into()]);
    assert_eq!(instr.memory_base(), IcedRegister::ECX);
    assert_eq!(instr.memory_displacement64(), 4);
}

#[test]
fn xv_absolute_address() {
    let mut code = Code::new();
    code.emit(MOV_R64_M64, &[RAX.into(), Mem::abs(0x1000).into()]);
    let mut asm = x64_encode::Assembler::with_options(x64_encode::Options {
        capacity: 64,
        checks: x64_encode::Checks::Disabled,
    });
    let bytes = asm.assemble_code(&code).unwrap().to_vec();
    let mut decoder = Decoder::with_ip(64, &bytes, 0, DecoderOptions::NONE);
    let instr = decoder.decode();
    assert_eq!(instr.len(), bytes.len());
    assert_eq!(instr.memory_base(), IcedRegister::None);
    assert_eq!(instr.memory_index(), IcedRegister::None);
    assert_eq!(instr.memory_displacement64(), 0x1000);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Branches
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn xv_branch_targets() {
    let top = Label::new(0);
    let end = Label::new(1);
    let mut code = Code::new();
    code.bind(top)
        .emit(TEST_R64_R64, &[RDI.into(), RDI.into()])
        .emit(JE_REL32, &[end.into()])
        .emit(DEC_R64, &[RDI.into()])
        .emit(JMP_REL32, &[top.into()])
        .bind(end)
        .emit(RET, &[]);
    let bytes = encode(&code).unwrap();

    let mut decoder = Decoder::with_ip(64, &bytes, 0, DecoderOptions::NONE);
    let decoded: Vec<IcedInstruction> = decoder.iter().collect();
    assert_eq!(decoded.len(), 5);
    let ret_at = decoded[4].ip();
    assert_eq!(decoded[1].near_branch_target(), ret_at);
    assert_eq!(decoded[3].near_branch_target(), 0);
}

#[test]
fn xv_register_constants_match_iced() {
    let names: Vec<String> = GPR64.iter().map(Register::to_string).collect();
    let iced: Vec<String> = ICED_GPR64
        .iter()
        .map(|r| format!("{r:?}").to_lowercase())
        .collect();
    assert_eq!(names, iced);
}
