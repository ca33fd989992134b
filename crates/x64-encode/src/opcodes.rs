//! The opcode table.
//!
//! Each entry names an opcode constant, its mnemonic, the operand roles it
//! accepts and the steps that encode it. Names follow the operand forms:
//! `R64` is a 64-bit register, `M64` a memory operand, `IMM32` a 32-bit
//! immediate, `REL32` a label. The `M` in `LEA_R64_M` takes any address.
//!
//! ```
//! use x64_encode::{opcodes, regs::*, Code, Imm};
//!
//! let mut code = Code::new();
//! code.emit(opcodes::MOV_R64_IMM32, &[RAX.into(), Imm::imm32(60).into()])
//!     .emit(opcodes::SYSCALL, &[]);
//! assert_eq!(
//!     x64_encode::encode(&code).unwrap(),
//!     [0x48, 0xC7, 0xC0, 0x3C, 0x00, 0x00, 0x00, 0x0F, 0x05]
//! );
//! ```

#![allow(missing_docs)]

use crate::encoder::REX_W;
use crate::instruction::Opcode;
use crate::recipe::{Field::*, Recipe, Role, Step::*};

macro_rules! recipes {
    ($($name:ident => $mnemonic:literal [$($role:ident),*] { $($step:expr),* $(,)? };)*) => {
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[repr(u16)]
        enum Slot {
            $($name,)*
        }

        $(pub const $name: Opcode = Opcode::instruction(Slot::$name as u16);)*

        static RECIPES: &[Recipe] = &[
            $(Recipe {
                mnemonic: $mnemonic,
                roles: &[$(Role::$role),*],
                steps: &[$($step),*],
            },)*
        ];
    };
}

/// The recipe for `opcode`, if it is a known instruction.
pub fn recipe(opcode: Opcode) -> Option<&'static Recipe> {
    if opcode.family() != Opcode::INSTRUCTION_FAMILY {
        return None;
    }
    RECIPES.get(opcode.index() as usize)
}

/// Every instruction opcode with its recipe, in table order.
pub fn iter() -> impl Iterator<Item = (Opcode, &'static Recipe)> {
    RECIPES
        .iter()
        .enumerate()
        .map(|(i, r)| (Opcode::instruction(i as u16), r))
}

recipes! {
    NOP => "nop" [] { Op(&[0x90]) };
    RET => "ret" [] { Op(&[0xC3]) };
    INT3 => "int3" [] { Op(&[0xCC]) };
    HLT => "hlt" [] { Op(&[0xF4]) };
    LEAVE => "leave" [] { Op(&[0xC9]) };
    SYSCALL => "syscall" [] { Op(&[0x0F, 0x05]) };
    CDQ => "cdq" [] { Op(&[0x99]) };
    CQO => "cqo" [] { Rex(REX_W, None, None), Op(&[0x99]) };

    // Stack
    PUSH_R64 => "push" [R64] { Rex(0, Some(0), None), OpReg(&[0x50], 0) };
    POP_R64 => "pop" [R64] { Rex(0, Some(0), None), OpReg(&[0x58], 0) };
    PUSH_IMM8 => "push" [Imm8] { Op(&[0x6A]), Imm(0) };
    PUSH_IMM32 => "push" [Imm32] { Op(&[0x68]), Imm(0) };
    PUSH_M64 => "push" [M] { MemPrefix(0), Rex(0, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(6)) };
    POP_M64 => "pop" [M] { MemPrefix(0), Rex(0, Some(0), None), Op(&[0x8F]), ModRm(0, Digit(0)) };

    // Data movement
    MOV_R8_R8 => "mov" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x88]), ModRm(0, Reg(1)) };
    MOV_R16_R16 => "mov" [R16, R16] { Prefix(&[0x66]), Rex(0, Some(0), Some(1)), Op(&[0x89]), ModRm(0, Reg(1)) };
    MOV_R32_R32 => "mov" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x89]), ModRm(0, Reg(1)) };
    MOV_R64_R64 => "mov" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x89]), ModRm(0, Reg(1)) };
    MOV_R8_M8 => "mov" [R8, M] { MemPrefix(1), Rex(0, Some(1), Some(0)), Op(&[0x8A]), ModRm(1, Reg(0)) };
    MOV_M8_R8 => "mov" [M, R8] { MemPrefix(0), Rex(0, Some(0), Some(1)), Op(&[0x88]), ModRm(0, Reg(1)) };
    MOV_R16_M16 => "mov" [R16, M] { MemPrefix(1), Prefix(&[0x66]), Rex(0, Some(1), Some(0)), Op(&[0x8B]), ModRm(1, Reg(0)) };
    MOV_M16_R16 => "mov" [M, R16] { MemPrefix(0), Prefix(&[0x66]), Rex(0, Some(0), Some(1)), Op(&[0x89]), ModRm(0, Reg(1)) };
    MOV_R32_M32 => "mov" [R32, M] { MemPrefix(1), Rex(0, Some(1), Some(0)), Op(&[0x8B]), ModRm(1, Reg(0)) };
    MOV_M32_R32 => "mov" [M, R32] { MemPrefix(0), Rex(0, Some(0), Some(1)), Op(&[0x89]), ModRm(0, Reg(1)) };
    MOV_R64_M64 => "mov" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x8B]), ModRm(1, Reg(0)) };
    MOV_M64_R64 => "mov" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x89]), ModRm(0, Reg(1)) };
    MOV_R8_IMM8 => "mov" [R8, Imm8] { Rex(0, Some(0), None), OpReg(&[0xB0], 0), Imm(1) };
    MOV_R16_IMM16 => "mov" [R16, Imm16] { Prefix(&[0x66]), Rex(0, Some(0), None), OpReg(&[0xB8], 0), Imm(1) };
    MOV_R32_IMM32 => "mov" [R32, Imm32] { Rex(0, Some(0), None), OpReg(&[0xB8], 0), Imm(1) };
    MOV_R64_IMM64 => "mov" [R64, Imm64] { Rex(REX_W, Some(0), None), OpReg(&[0xB8], 0), Imm(1) };
    MOV_R64_IMM32 => "mov" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0xC7]), ModRm(0, Digit(0)), Imm(1) };
    MOV_M8_IMM8 => "mov" [M, Imm8] { MemPrefix(0), Rex(0, Some(0), None), Op(&[0xC6]), ModRm(0, Digit(0)), Imm(1) };
    MOV_M16_IMM16 => "mov" [M, Imm16] { MemPrefix(0), Prefix(&[0x66]), Rex(0, Some(0), None), Op(&[0xC7]), ModRm(0, Digit(0)), Imm(1) };
    MOV_M32_IMM32 => "mov" [M, Imm32] { MemPrefix(0), Rex(0, Some(0), None), Op(&[0xC7]), ModRm(0, Digit(0)), Imm(1) };
    MOV_M64_IMM32 => "mov" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0xC7]), ModRm(0, Digit(0)), Imm(1) };
    MOVZX_R32_R8 => "movzx" [R32, R8] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0xB6]), ModRm(1, Reg(0)) };
    MOVZX_R64_R8 => "movzx" [R64, R8] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0xB6]), ModRm(1, Reg(0)) };
    MOVZX_R32_R16 => "movzx" [R32, R16] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0xB7]), ModRm(1, Reg(0)) };
    MOVSX_R32_R8 => "movsx" [R32, R8] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0xBE]), ModRm(1, Reg(0)) };
    MOVSX_R64_R8 => "movsx" [R64, R8] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0xBE]), ModRm(1, Reg(0)) };
    MOVSX_R64_R16 => "movsx" [R64, R16] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0xBF]), ModRm(1, Reg(0)) };
    MOVSXD_R64_R32 => "movsxd" [R64, R32] { Rex(REX_W, Some(1), Some(0)), Op(&[0x63]), ModRm(1, Reg(0)) };
    MOVZX_R32_M8 => "movzx" [R32, M] { MemPrefix(1), Rex(0, Some(1), Some(0)), Op(&[0x0F, 0xB6]), ModRm(1, Reg(0)) };
    MOVSXD_R64_M32 => "movsxd" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x63]), ModRm(1, Reg(0)) };
    LEA_R64_M => "lea" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x8D]), ModRm(1, Reg(0)) };
    LEA_R32_M => "lea" [R32, M] { MemPrefix(1), Rex(0, Some(1), Some(0)), Op(&[0x8D]), ModRm(1, Reg(0)) };
    XCHG_R64_R64 => "xchg" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x87]), ModRm(0, Reg(1)) };
    XCHG_R32_R32 => "xchg" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x87]), ModRm(0, Reg(1)) };

    // Integer arithmetic and logic
    ADD_R64_R64 => "add" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x01]), ModRm(0, Reg(1)) };
    ADD_R32_R32 => "add" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x01]), ModRm(0, Reg(1)) };
    ADD_R8_R8 => "add" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x00]), ModRm(0, Reg(1)) };
    ADD_R64_M64 => "add" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x03]), ModRm(1, Reg(0)) };
    ADD_M64_R64 => "add" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x01]), ModRm(0, Reg(1)) };
    ADD_R64_IMM32 => "add" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(0)), Imm(1) };
    ADD_R64_IMM8 => "add" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(0)), Imm(1) };
    ADD_R32_IMM32 => "add" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(0)), Imm(1) };
    ADD_M64_IMM32 => "add" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(0)), Imm(1) };
    OR_R64_R64 => "or" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x09]), ModRm(0, Reg(1)) };
    OR_R32_R32 => "or" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x09]), ModRm(0, Reg(1)) };
    OR_R8_R8 => "or" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x08]), ModRm(0, Reg(1)) };
    OR_R64_M64 => "or" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x0B]), ModRm(1, Reg(0)) };
    OR_M64_R64 => "or" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x09]), ModRm(0, Reg(1)) };
    OR_R64_IMM32 => "or" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(1)), Imm(1) };
    OR_R64_IMM8 => "or" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(1)), Imm(1) };
    OR_R32_IMM32 => "or" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(1)), Imm(1) };
    OR_M64_IMM32 => "or" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(1)), Imm(1) };
    ADC_R64_R64 => "adc" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x11]), ModRm(0, Reg(1)) };
    ADC_R32_R32 => "adc" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x11]), ModRm(0, Reg(1)) };
    ADC_R8_R8 => "adc" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x10]), ModRm(0, Reg(1)) };
    ADC_R64_M64 => "adc" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x13]), ModRm(1, Reg(0)) };
    ADC_M64_R64 => "adc" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x11]), ModRm(0, Reg(1)) };
    ADC_R64_IMM32 => "adc" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(2)), Imm(1) };
    ADC_R64_IMM8 => "adc" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(2)), Imm(1) };
    ADC_R32_IMM32 => "adc" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(2)), Imm(1) };
    ADC_M64_IMM32 => "adc" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(2)), Imm(1) };
    SBB_R64_R64 => "sbb" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x19]), ModRm(0, Reg(1)) };
    SBB_R32_R32 => "sbb" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x19]), ModRm(0, Reg(1)) };
    SBB_R8_R8 => "sbb" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x18]), ModRm(0, Reg(1)) };
    SBB_R64_M64 => "sbb" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x1B]), ModRm(1, Reg(0)) };
    SBB_M64_R64 => "sbb" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x19]), ModRm(0, Reg(1)) };
    SBB_R64_IMM32 => "sbb" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(3)), Imm(1) };
    SBB_R64_IMM8 => "sbb" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(3)), Imm(1) };
    SBB_R32_IMM32 => "sbb" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(3)), Imm(1) };
    SBB_M64_IMM32 => "sbb" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(3)), Imm(1) };
    AND_R64_R64 => "and" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x21]), ModRm(0, Reg(1)) };
    AND_R32_R32 => "and" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x21]), ModRm(0, Reg(1)) };
    AND_R8_R8 => "and" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x20]), ModRm(0, Reg(1)) };
    AND_R64_M64 => "and" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x23]), ModRm(1, Reg(0)) };
    AND_M64_R64 => "and" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x21]), ModRm(0, Reg(1)) };
    AND_R64_IMM32 => "and" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(4)), Imm(1) };
    AND_R64_IMM8 => "and" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(4)), Imm(1) };
    AND_R32_IMM32 => "and" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(4)), Imm(1) };
    AND_M64_IMM32 => "and" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(4)), Imm(1) };
    SUB_R64_R64 => "sub" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x29]), ModRm(0, Reg(1)) };
    SUB_R32_R32 => "sub" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x29]), ModRm(0, Reg(1)) };
    SUB_R8_R8 => "sub" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x28]), ModRm(0, Reg(1)) };
    SUB_R64_M64 => "sub" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x2B]), ModRm(1, Reg(0)) };
    SUB_M64_R64 => "sub" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x29]), ModRm(0, Reg(1)) };
    SUB_R64_IMM32 => "sub" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(5)), Imm(1) };
    SUB_R64_IMM8 => "sub" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(5)), Imm(1) };
    SUB_R32_IMM32 => "sub" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(5)), Imm(1) };
    SUB_M64_IMM32 => "sub" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(5)), Imm(1) };
    XOR_R64_R64 => "xor" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x31]), ModRm(0, Reg(1)) };
    XOR_R32_R32 => "xor" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x31]), ModRm(0, Reg(1)) };
    XOR_R8_R8 => "xor" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x30]), ModRm(0, Reg(1)) };
    XOR_R64_M64 => "xor" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x33]), ModRm(1, Reg(0)) };
    XOR_M64_R64 => "xor" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x31]), ModRm(0, Reg(1)) };
    XOR_R64_IMM32 => "xor" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(6)), Imm(1) };
    XOR_R64_IMM8 => "xor" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(6)), Imm(1) };
    XOR_R32_IMM32 => "xor" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(6)), Imm(1) };
    XOR_M64_IMM32 => "xor" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(6)), Imm(1) };
    CMP_R64_R64 => "cmp" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x39]), ModRm(0, Reg(1)) };
    CMP_R32_R32 => "cmp" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x39]), ModRm(0, Reg(1)) };
    CMP_R8_R8 => "cmp" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x38]), ModRm(0, Reg(1)) };
    CMP_R64_M64 => "cmp" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x3B]), ModRm(1, Reg(0)) };
    CMP_M64_R64 => "cmp" [M, R64] { MemPrefix(0), Rex(REX_W, Some(0), Some(1)), Op(&[0x39]), ModRm(0, Reg(1)) };
    CMP_R64_IMM32 => "cmp" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(7)), Imm(1) };
    CMP_R64_IMM8 => "cmp" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0x83]), ModRm(0, Digit(7)), Imm(1) };
    CMP_R32_IMM32 => "cmp" [R32, Imm32] { Rex(0, Some(0), None), Op(&[0x81]), ModRm(0, Digit(7)), Imm(1) };
    CMP_M64_IMM32 => "cmp" [M, Imm32] { MemPrefix(0), Rex(REX_W, Some(0), None), Op(&[0x81]), ModRm(0, Digit(7)), Imm(1) };
    TEST_R64_R64 => "test" [R64, R64] { Rex(REX_W, Some(0), Some(1)), Op(&[0x85]), ModRm(0, Reg(1)) };
    TEST_R32_R32 => "test" [R32, R32] { Rex(0, Some(0), Some(1)), Op(&[0x85]), ModRm(0, Reg(1)) };
    TEST_R8_R8 => "test" [R8, R8] { Rex(0, Some(0), Some(1)), Op(&[0x84]), ModRm(0, Reg(1)) };
    TEST_R64_IMM32 => "test" [R64, Imm32] { Rex(REX_W, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(0)), Imm(1) };
    INC_R64 => "inc" [R64] { Rex(REX_W, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(0)) };
    INC_R32 => "inc" [R32] { Rex(0, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(0)) };
    DEC_R64 => "dec" [R64] { Rex(REX_W, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(1)) };
    DEC_R32 => "dec" [R32] { Rex(0, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(1)) };
    NOT_R64 => "not" [R64] { Rex(REX_W, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(2)) };
    NOT_R32 => "not" [R32] { Rex(0, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(2)) };
    NEG_R64 => "neg" [R64] { Rex(REX_W, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(3)) };
    NEG_R32 => "neg" [R32] { Rex(0, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(3)) };
    MUL_R64 => "mul" [R64] { Rex(REX_W, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(4)) };
    MUL_R32 => "mul" [R32] { Rex(0, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(4)) };
    DIV_R64 => "div" [R64] { Rex(REX_W, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(6)) };
    DIV_R32 => "div" [R32] { Rex(0, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(6)) };
    IDIV_R64 => "idiv" [R64] { Rex(REX_W, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(7)) };
    IDIV_R32 => "idiv" [R32] { Rex(0, Some(0), None), Op(&[0xF7]), ModRm(0, Digit(7)) };
    IMUL_R64_R64 => "imul" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0xAF]), ModRm(1, Reg(0)) };
    IMUL_R32_R32 => "imul" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0xAF]), ModRm(1, Reg(0)) };
    IMUL_R64_M64 => "imul" [R64, M] { MemPrefix(1), Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0xAF]), ModRm(1, Reg(0)) };
    IMUL_R64_R64_IMM32 => "imul" [R64, R64, Imm32] { Rex(REX_W, Some(1), Some(0)), Op(&[0x69]), ModRm(1, Reg(0)), Imm(2) };
    IMUL_R64_R64_IMM8 => "imul" [R64, R64, Imm8] { Rex(REX_W, Some(1), Some(0)), Op(&[0x6B]), ModRm(1, Reg(0)), Imm(2) };

    // Shifts and rotates
    ROL_R64_IMM8 => "rol" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(0)), Imm(1) };
    ROL_R64_CL => "rol" [R64, Cl] { Rex(REX_W, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(0)) };
    ROL_R32_IMM8 => "rol" [R32, Imm8] { Rex(0, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(0)), Imm(1) };
    ROL_R32_CL => "rol" [R32, Cl] { Rex(0, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(0)) };
    ROR_R64_IMM8 => "ror" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(1)), Imm(1) };
    ROR_R64_CL => "ror" [R64, Cl] { Rex(REX_W, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(1)) };
    ROR_R32_IMM8 => "ror" [R32, Imm8] { Rex(0, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(1)), Imm(1) };
    ROR_R32_CL => "ror" [R32, Cl] { Rex(0, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(1)) };
    SHL_R64_IMM8 => "shl" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(4)), Imm(1) };
    SHL_R64_CL => "shl" [R64, Cl] { Rex(REX_W, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(4)) };
    SHL_R32_IMM8 => "shl" [R32, Imm8] { Rex(0, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(4)), Imm(1) };
    SHL_R32_CL => "shl" [R32, Cl] { Rex(0, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(4)) };
    SHR_R64_IMM8 => "shr" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(5)), Imm(1) };
    SHR_R64_CL => "shr" [R64, Cl] { Rex(REX_W, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(5)) };
    SHR_R32_IMM8 => "shr" [R32, Imm8] { Rex(0, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(5)), Imm(1) };
    SHR_R32_CL => "shr" [R32, Cl] { Rex(0, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(5)) };
    SAR_R64_IMM8 => "sar" [R64, Imm8] { Rex(REX_W, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(7)), Imm(1) };
    SAR_R64_CL => "sar" [R64, Cl] { Rex(REX_W, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(7)) };
    SAR_R32_IMM8 => "sar" [R32, Imm8] { Rex(0, Some(0), None), Op(&[0xC1]), ModRm(0, Digit(7)), Imm(1) };
    SAR_R32_CL => "sar" [R32, Cl] { Rex(0, Some(0), None), Op(&[0xD3]), ModRm(0, Digit(7)) };
    BSWAP_R64 => "bswap" [R64] { Rex(REX_W, Some(0), None), OpReg(&[0x0F, 0xC8], 0) };
    BSWAP_R32 => "bswap" [R32] { Rex(0, Some(0), None), OpReg(&[0x0F, 0xC8], 0) };

    // Conditional set and move
    SETO_R8 => "seto" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x90]), ModRm(0, Digit(0)) };
    SETNO_R8 => "setno" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x91]), ModRm(0, Digit(0)) };
    SETB_R8 => "setb" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x92]), ModRm(0, Digit(0)) };
    SETAE_R8 => "setae" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x93]), ModRm(0, Digit(0)) };
    SETE_R8 => "sete" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x94]), ModRm(0, Digit(0)) };
    SETNE_R8 => "setne" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x95]), ModRm(0, Digit(0)) };
    SETBE_R8 => "setbe" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x96]), ModRm(0, Digit(0)) };
    SETA_R8 => "seta" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x97]), ModRm(0, Digit(0)) };
    SETS_R8 => "sets" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x98]), ModRm(0, Digit(0)) };
    SETNS_R8 => "setns" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x99]), ModRm(0, Digit(0)) };
    SETP_R8 => "setp" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x9A]), ModRm(0, Digit(0)) };
    SETNP_R8 => "setnp" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x9B]), ModRm(0, Digit(0)) };
    SETL_R8 => "setl" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x9C]), ModRm(0, Digit(0)) };
    SETGE_R8 => "setge" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x9D]), ModRm(0, Digit(0)) };
    SETLE_R8 => "setle" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x9E]), ModRm(0, Digit(0)) };
    SETG_R8 => "setg" [R8] { Rex(0, Some(0), None), Op(&[0x0F, 0x9F]), ModRm(0, Digit(0)) };
    CMOVO_R64_R64 => "cmovo" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x40]), ModRm(1, Reg(0)) };
    CMOVNO_R64_R64 => "cmovno" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x41]), ModRm(1, Reg(0)) };
    CMOVB_R64_R64 => "cmovb" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x42]), ModRm(1, Reg(0)) };
    CMOVAE_R64_R64 => "cmovae" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x43]), ModRm(1, Reg(0)) };
    CMOVE_R64_R64 => "cmove" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x44]), ModRm(1, Reg(0)) };
    CMOVNE_R64_R64 => "cmovne" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x45]), ModRm(1, Reg(0)) };
    CMOVBE_R64_R64 => "cmovbe" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x46]), ModRm(1, Reg(0)) };
    CMOVA_R64_R64 => "cmova" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x47]), ModRm(1, Reg(0)) };
    CMOVS_R64_R64 => "cmovs" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x48]), ModRm(1, Reg(0)) };
    CMOVNS_R64_R64 => "cmovns" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x49]), ModRm(1, Reg(0)) };
    CMOVP_R64_R64 => "cmovp" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x4A]), ModRm(1, Reg(0)) };
    CMOVNP_R64_R64 => "cmovnp" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x4B]), ModRm(1, Reg(0)) };
    CMOVL_R64_R64 => "cmovl" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x4C]), ModRm(1, Reg(0)) };
    CMOVGE_R64_R64 => "cmovge" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x4D]), ModRm(1, Reg(0)) };
    CMOVLE_R64_R64 => "cmovle" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x4E]), ModRm(1, Reg(0)) };
    CMOVG_R64_R64 => "cmovg" [R64, R64] { Rex(REX_W, Some(1), Some(0)), Op(&[0x0F, 0x4F]), ModRm(1, Reg(0)) };
    CMOVO_R32_R32 => "cmovo" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x40]), ModRm(1, Reg(0)) };
    CMOVNO_R32_R32 => "cmovno" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x41]), ModRm(1, Reg(0)) };
    CMOVB_R32_R32 => "cmovb" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x42]), ModRm(1, Reg(0)) };
    CMOVAE_R32_R32 => "cmovae" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x43]), ModRm(1, Reg(0)) };
    CMOVE_R32_R32 => "cmove" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x44]), ModRm(1, Reg(0)) };
    CMOVNE_R32_R32 => "cmovne" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x45]), ModRm(1, Reg(0)) };
    CMOVBE_R32_R32 => "cmovbe" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x46]), ModRm(1, Reg(0)) };
    CMOVA_R32_R32 => "cmova" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x47]), ModRm(1, Reg(0)) };
    CMOVS_R32_R32 => "cmovs" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x48]), ModRm(1, Reg(0)) };
    CMOVNS_R32_R32 => "cmovns" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x49]), ModRm(1, Reg(0)) };
    CMOVP_R32_R32 => "cmovp" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x4A]), ModRm(1, Reg(0)) };
    CMOVNP_R32_R32 => "cmovnp" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x4B]), ModRm(1, Reg(0)) };
    CMOVL_R32_R32 => "cmovl" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x4C]), ModRm(1, Reg(0)) };
    CMOVGE_R32_R32 => "cmovge" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x4D]), ModRm(1, Reg(0)) };
    CMOVLE_R32_R32 => "cmovle" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x4E]), ModRm(1, Reg(0)) };
    CMOVG_R32_R32 => "cmovg" [R32, R32] { Rex(0, Some(1), Some(0)), Op(&[0x0F, 0x4F]), ModRm(1, Reg(0)) };

    // Control transfer
    JMP_REL32 => "jmp" [Rel] { Op(&[0xE9]), Rel32(0) };
    CALL_REL32 => "call" [Rel] { Op(&[0xE8]), Rel32(0) };
    JMP_R64 => "jmp" [R64] { Rex(0, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(4)) };
    CALL_R64 => "call" [R64] { Rex(0, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(2)) };
    JMP_M64 => "jmp" [M] { MemPrefix(0), Rex(0, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(4)) };
    CALL_M64 => "call" [M] { MemPrefix(0), Rex(0, Some(0), None), Op(&[0xFF]), ModRm(0, Digit(2)) };
    JO_REL32 => "jo" [Rel] { Op(&[0x0F, 0x80]), Rel32(0) };
    JNO_REL32 => "jno" [Rel] { Op(&[0x0F, 0x81]), Rel32(0) };
    JB_REL32 => "jb" [Rel] { Op(&[0x0F, 0x82]), Rel32(0) };
    JAE_REL32 => "jae" [Rel] { Op(&[0x0F, 0x83]), Rel32(0) };
    JE_REL32 => "je" [Rel] { Op(&[0x0F, 0x84]), Rel32(0) };
    JNE_REL32 => "jne" [Rel] { Op(&[0x0F, 0x85]), Rel32(0) };
    JBE_REL32 => "jbe" [Rel] { Op(&[0x0F, 0x86]), Rel32(0) };
    JA_REL32 => "ja" [Rel] { Op(&[0x0F, 0x87]), Rel32(0) };
    JS_REL32 => "js" [Rel] { Op(&[0x0F, 0x88]), Rel32(0) };
    JNS_REL32 => "jns" [Rel] { Op(&[0x0F, 0x89]), Rel32(0) };
    JP_REL32 => "jp" [Rel] { Op(&[0x0F, 0x8A]), Rel32(0) };
    JNP_REL32 => "jnp" [Rel] { Op(&[0x0F, 0x8B]), Rel32(0) };
    JL_REL32 => "jl" [Rel] { Op(&[0x0F, 0x8C]), Rel32(0) };
    JGE_REL32 => "jge" [Rel] { Op(&[0x0F, 0x8D]), Rel32(0) };
    JLE_REL32 => "jle" [Rel] { Op(&[0x0F, 0x8E]), Rel32(0) };
    JG_REL32 => "jg" [Rel] { Op(&[0x0F, 0x8F]), Rel32(0) };
}
