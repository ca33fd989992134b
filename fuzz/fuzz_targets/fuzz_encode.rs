#![no_main]
use libfuzzer_sys::fuzz_target;
use x64_encode::{
    encode, Assembler, Checks, Code, Imm, Instruction, Label, Mem, Opcode, Operand, Options,
    Register, Scale, Width,
};

const WIDTHS: [Width; 4] = [Width::W8, Width::W16, Width::W32, Width::W64];
const SCALES: [Scale; 4] = [Scale::S1, Scale::S2, Scale::S4, Scale::S8];

/// Decode one operand from the front of `data`, consuming 3 bytes.
fn operand(data: &mut &[u8]) -> Option<Operand> {
    let (&tag, rest) = data.split_first()?;
    let (&a, rest) = rest.split_first()?;
    let (&b, rest) = rest.split_first()?;
    *data = rest;
    let reg = |x: u8| Register::new(WIDTHS[(x >> 5) as usize & 3], x & 0x1f);
    let word = i16::from_le_bytes([a, b]);
    let select = (tag >> 3) as usize & 3;
    Some(match tag % 5 {
        0 => reg(a).into(),
        1 => Mem::sib(reg(a), reg(b), SCALES[select], i32::from(b) - 0x80).into(),
        2 => Mem::base_disp(reg(a), i32::from(word)).into(),
        3 => Imm::new(i64::from(word), WIDTHS[select]).into(),
        _ => Label::new(u32::from(a & 7)).into(),
    })
}

fuzz_target!(|data: &[u8]| {
    let mut data = data;
    let mut code = Code::new();
    while data.len() >= 3 {
        let index = u16::from_le_bytes([data[1], data[2]]) % 300;
        let raw = (u32::from(data[0] & 1) << 16) | u32::from(index);
        let count = (data[0] >> 1) as usize % 5;
        data = &data[3..];
        let ops: Vec<Operand> = (0..count).map_while(|_| operand(&mut data)).collect();
        code.push(Instruction::new(Opcode::from_raw(raw), &ops));
    }

    // Checked: must return Ok or Err, never panic.
    let _ = encode(&code);

    // Unchecked: every instruction produces something, and never panics.
    let mut asm = Assembler::with_options(Options {
        capacity: code.max_encoded_len(),
        checks: Checks::Disabled,
    });
    let bytes = asm.assemble_code(&code).expect("unchecked sessions do not fail");
    assert!(bytes.len() <= code.max_encoded_len());
});
