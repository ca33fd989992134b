#![cfg(not(target_arch = "wasm32"))]
//! Property-based tests using proptest.
//!
//! These tests check encoder invariants across randomly generated
//! instructions and sequences, complementing the byte-exact tests and the
//! libfuzzer target.

use iced_x86::{Decoder, DecoderOptions};
use proptest::prelude::*;
use x64_encode::opcodes::*;
use x64_encode::{
    encode, encode_hex, Assembler, Checks, Code, Imm, Instruction, Label, Mem, Opcode, Operand,
    Options, Register, Scale, Width,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_reg(width: Width) -> impl Strategy<Value = Register> {
    (0u8..16).prop_map(move |i| Register::new(width, i))
}

fn arb_scale() -> impl Strategy<Value = Scale> {
    prop::sample::select(vec![Scale::S1, Scale::S2, Scale::S4, Scale::S8])
}

/// Memory operands that pass `Mem::check`.
fn arb_mem() -> impl Strategy<Value = Mem> {
    let index = (0u8..16)
        .prop_filter("rsp is not an index", |i| *i != 4)
        .prop_map(|i| Register::new(Width::W64, i));
    prop_oneof![
        (arb_reg(Width::W64), any::<i32>()).prop_map(|(b, d)| Mem::base_disp(b, d)),
        (arb_reg(Width::W64), index.clone(), arb_scale(), any::<i32>())
            .prop_map(|(b, i, s, d)| Mem::sib(b, i, s, d)),
        (index, arb_scale(), any::<i32>()).prop_map(|(i, s, d)| Mem::index_only(i, s, d)),
        any::<i32>().prop_map(Mem::rip),
    ]
}

/// Valid instructions over registers, memory and immediates.
fn arb_instruction() -> impl Strategy<Value = Instruction> {
    let r64 = || arb_reg(Width::W64);
    let r32 = || arb_reg(Width::W32);
    prop_oneof![
        (prop::sample::select(vec![MOV_R64_R64, CMOVG_R64_R64, XCHG_R64_R64]), r64(), r64())
            .prop_map(|(op, a, b)| Instruction::new(op, &[a.into(), b.into()])),
        (r32(), r32()).prop_map(|(a, b)| Instruction::new(ADD_R32_R32, &[a.into(), b.into()])),
        (prop::sample::select(vec![MOV_R64_M64, LEA_R64_M, ADD_R64_M64]), r64(), arb_mem())
            .prop_map(|(op, a, m)| Instruction::new(op, &[a.into(), m.into()])),
        (arb_mem(), r64()).prop_map(|(m, a)| Instruction::new(MOV_M64_R64, &[m.into(), a.into()])),
        (r64(), any::<i64>())
            .prop_map(|(a, v)| Instruction::new(MOV_R64_IMM64, &[a.into(), Imm::imm64(v).into()])),
        (r64(), any::<i32>())
            .prop_map(|(a, v)| Instruction::new(SUB_R64_IMM32, &[a.into(), Imm::imm32(v).into()])),
        (r64(), any::<i8>())
            .prop_map(|(a, v)| Instruction::new(SHL_R64_IMM8, &[a.into(), Imm::imm8(v).into()])),
        (prop::sample::select(vec![PUSH_R64, POP_R64, NOT_R64]), r64())
            .prop_map(|(op, a)| Instruction::new(op, &[a.into()])),
        arb_reg(Width::W8).prop_map(|a| Instruction::new(SETNE_R8, &[a.into()])),
        prop::sample::select(vec![NOP, RET, CQO]).prop_map(|op| Instruction::new(op, &[])),
    ]
}

/// Sequences mixing instructions, label definitions and branches to four labels.
fn arb_code() -> impl Strategy<Value = Code> {
    let item = prop_oneof![
        6 => arb_instruction(),
        1 => (0u32..4).prop_map(|l| Instruction::label(Label::new(l))),
        1 => (0u32..4).prop_map(|l| Instruction::new(JMP_REL32, &[Label::new(l).into()])),
        1 => (0u32..4).prop_map(|l| Instruction::new(JNE_REL32, &[Label::new(l).into()])),
    ];
    prop::collection::vec(item, 0..64).prop_map(Code::from)
}

/// Anything at all, including opcodes outside the table and ill-typed operands.
fn arb_garbage() -> impl Strategy<Value = Instruction> {
    let width = prop::sample::select(vec![Width::W8, Width::W16, Width::W32, Width::W64]);
    let reg = (width.clone(), 0u8..20).prop_map(|(w, i)| Register::new(w, i));
    let operand = prop_oneof![
        reg.clone().prop_map(Operand::from),
        (prop::option::of(reg.clone()), prop::option::of(reg), any::<i32>()).prop_map(
            |(b, i, d)| match (b, i) {
                (Some(b), Some(i)) => Mem::sib(b, i, Scale::S2, d).into(),
                (Some(b), None) => Mem::base_disp(b, d).into(),
                (None, Some(i)) => Mem::index_only(i, Scale::S1, d).into(),
                (None, None) => Mem::abs(d).into(),
            }
        ),
        (any::<i64>(), width).prop_map(|(v, w)| Imm::new(v, w).into()),
        (0u32..8).prop_map(|l| Label::new(l).into()),
    ];
    (0u32..300, 0u32..3, prop::collection::vec(operand, 0..=4)).prop_map(|(index, family, ops)| {
        Instruction::new(Opcode::from_raw((family << 16) | index), &ops)
    })
}

fn unchecked(code: &Code) -> Assembler {
    Assembler::with_options(Options {
        capacity: code.max_encoded_len(),
        checks: Checks::Disabled,
    })
}

// ── REX necessity ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A REX prefix appears exactly when an extended register is used.
    #[test]
    fn rex_only_when_needed_r32(a in arb_reg(Width::W32), b in arb_reg(Width::W32)) {
        let mut code = Code::new();
        code.emit(MOV_R32_R32, &[a.into(), b.into()]);
        let bytes = encode(&code).unwrap();
        let rex = (u8::from(b.is_extended()) << 2) | u8::from(a.is_extended());
        if rex == 0 {
            prop_assert_eq!(bytes.len(), 2);
            prop_assert_eq!(bytes[0], 0x89);
        } else {
            prop_assert_eq!(bytes.len(), 3);
            prop_assert_eq!(bytes[0], 0x40 | rex);
        }
    }

    /// REX.W is always present for 64-bit operands; R and B follow the registers.
    #[test]
    fn rex_w_for_r64(a in arb_reg(Width::W64), b in arb_reg(Width::W64)) {
        let mut code = Code::new();
        code.emit(MOV_R64_R64, &[a.into(), b.into()]);
        let bytes = encode(&code).unwrap();
        let rex = 0x48 | (u8::from(b.is_extended()) << 2) | u8::from(a.is_extended());
        prop_assert_eq!(bytes, vec![rex, 0x89, 0xC0 | (b.base_code() << 3) | a.base_code()]);
    }

    /// For memory operands REX.X and REX.B come from index and base.
    #[test]
    fn rex_bits_for_memory(mem in arb_mem()) {
        let mut code = Code::new();
        code.emit(MOV_R32_M32, &[x64_encode::regs::EAX.into(), mem.into()]);
        let bytes = encode(&code).unwrap();
        let x = mem.get_index().is_some_and(Register::is_extended);
        let b = mem.get_base().is_some_and(Register::is_extended);
        if x || b {
            prop_assert_eq!(bytes[0], 0x40 | (u8::from(x) << 1) | u8::from(b));
            prop_assert_eq!(bytes[1], 0x8B);
        } else {
            prop_assert_eq!(bytes[0], 0x8B);
        }
    }

    /// Every valid instruction decodes back to exactly its own length.
    #[test]
    fn valid_instruction_decodes(instr in arb_instruction()) {
        let mut code = Code::new();
        code.push(instr);
        let bytes = encode(&code).unwrap();
        prop_assert!(bytes.len() <= 15);
        let mut decoder = Decoder::with_ip(64, &bytes, 0, DecoderOptions::NONE);
        let decoded = decoder.decode();
        prop_assert!(!decoded.is_invalid(), "{} → {:02X?}", instr, bytes);
        prop_assert_eq!(decoded.len(), bytes.len());
    }
}

// ── Sessions ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Encoding the same sequence twice yields the same bytes, whether in
    /// fresh assemblers or by reusing one.
    #[test]
    fn idempotent(code in arb_code()) {
        let once = encode(&code);
        let twice = encode(&code);
        prop_assert_eq!(&once, &twice);

        let mut asm = unchecked(&code);
        let first = asm.assemble_code(&code).map(<[u8]>::to_vec);
        let second = asm.assemble_code(&code).map(<[u8]>::to_vec);
        prop_assert_eq!(first, second);
    }

    /// A forward jump over `n` one-byte instructions has displacement `n`.
    #[test]
    fn forward_displacement(n in 0usize..200) {
        let target = Label::new(0);
        let mut code = Code::new();
        code.emit(JMP_REL32, &[target.into()]);
        for _ in 0..n {
            code.emit(NOP, &[]);
        }
        code.bind(target);
        let bytes = encode(&code).unwrap();
        let disp = i32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        prop_assert_eq!(disp, n as i32);
    }

    /// Every rel32 lands on its label, or is 0 when the label is unbound.
    #[test]
    fn fixups_hit_labels(code in arb_code()) {
        let mut asm = unchecked(&code);
        let Ok(bytes) = asm.assemble_code(&code).map(<[u8]>::to_vec) else {
            return Ok(());
        };
        let mut decoder = Decoder::with_ip(64, &bytes, 0, DecoderOptions::NONE);
        for decoded in decoder.iter() {
            prop_assert!(!decoded.is_invalid());
            if decoded.is_jmp_near() || decoded.is_jcc_near() {
                let target = decoded.near_branch_target();
                let fallthrough = decoded.next_ip();
                let bound =
                    (0..4).any(|l| asm.label_offset(Label::new(l)) == Some(target as usize));
                prop_assert!(bound || target == fallthrough);
            }
        }
    }

    /// The hex listing holds the same bytes, one line per non-empty instruction.
    #[test]
    fn hex_matches_binary(code in arb_code()) {
        let (Ok(bytes), Ok(hex)) = (encode(&code), encode_hex(&code)) else {
            return Ok(());
        };
        let parsed: Vec<u8> = hex
            .split_whitespace()
            .map(|b| u8::from_str_radix(b, 16).unwrap())
            .collect();
        prop_assert_eq!(&parsed, &bytes);
        prop_assert!(!hex.ends_with('\n'));
        prop_assert!(!hex.starts_with('\n'));
        let emitting = code
            .iter()
            .filter(|i| i.opcode() != Opcode::LABEL)
            .count();
        let lines = if hex.is_empty() { 0 } else { hex.lines().count() };
        prop_assert_eq!(lines, emitting);
    }

    /// Unchecked sessions never panic, whatever they are fed.
    #[test]
    fn unchecked_never_panics(instrs in prop::collection::vec(arb_garbage(), 0..32)) {
        let code = Code::from(instrs);
        let mut asm = unchecked(&code);
        prop_assert!(asm.assemble_code(&code).is_ok());
    }

    /// Checked sessions never panic either; they only return errors.
    #[test]
    fn checked_never_panics(instrs in prop::collection::vec(arb_garbage(), 0..32)) {
        let code = Code::from(instrs);
        let _ = encode(&code);
    }
}
