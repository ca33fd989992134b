//! Encoding primitives: prefixes, REX, opcode bytes, ModR/M + SIB +
//! displacement, and immediates.
//!
//! Each primitive appends to an [`InstrBytes`]. Recipes in
//! [`opcodes`](crate::opcodes) are sequences of calls into this module.

use crate::operand::{Imm, Mem, Register};
use crate::table::{mod_rm, sib};

/// REX.W: 64-bit operand size.
pub const REX_W: u8 = 0x08;
/// REX.R: extends the ModR/M reg field.
pub const REX_R: u8 = 0x04;
/// REX.X: extends the SIB index field.
pub const REX_X: u8 = 0x02;
/// REX.B: extends the ModR/M r/m field, SIB base or opcode register.
pub const REX_B: u8 = 0x01;

/// Architectural limit on x86 instruction length.
pub const MAX_INSTRUCTION_LEN: usize = 15;

/// The bytes of one instruction, held inline. Dereferences to the filled
/// prefix; pushing past [`MAX_INSTRUCTION_LEN`] bytes panics.
#[derive(Clone, Default)]
pub struct InstrBytes {
    data: [u8; MAX_INSTRUCTION_LEN],
    len: u8,
}

impl InstrBytes {
    /// Empty buffer.
    pub const fn new() -> Self {
        Self {
            data: [0; MAX_INSTRUCTION_LEN],
            len: 0,
        }
    }

    /// Append one byte.
    pub fn push(&mut self, byte: u8) {
        self.extend_from_slice(&[byte]);
    }

    /// Append `bytes`.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let start = self.len as usize;
        let end = start + bytes.len();
        assert!(end <= MAX_INSTRUCTION_LEN, "instruction longer than 15 bytes");
        self.data[start..end].copy_from_slice(bytes);
        self.len = end as u8;
    }
}

impl core::ops::Deref for InstrBytes {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

impl core::fmt::Debug for InstrBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02x?}", &**self)
    }
}

// ─── Prefixes ──────────────────────────────────────────

/// Emit legacy prefix bytes (`0x66`, `0xF2`, `0xF3`, ...).
#[inline]
pub fn emit_prefix(buf: &mut InstrBytes, bytes: &[u8]) {
    buf.extend_from_slice(bytes);
}

/// Emit the prefixes a memory operand implies: its segment override, then
/// `0x67` when the address is formed from 32-bit registers.
pub fn emit_mem_prefix(buf: &mut InstrBytes, mem: &Mem) {
    if let Some(seg) = mem.segment() {
        buf.push(seg.prefix());
    }
    if mem.addr_size_override() {
        buf.push(0x67);
    }
}

// ─── REX ───────────────────────────────────────────────

/// Emit `0x40 | rex` when any bit is set, or when `force` is set because a
/// SPL/BPL/SIL/DIL operand must not be read as AH/CH/DH/BH.
#[inline]
fn emit_rex(buf: &mut InstrBytes, rex: u8, force: bool) {
    if rex != 0 || force {
        buf.push(0x40 | rex);
    }
}

/// REX for an instruction whose only register sits in r/m or in the opcode.
pub fn emit_rex_r(buf: &mut InstrBytes, rm: Register, rex: u8) {
    let b = (rm.index() >> 3) & 1;
    emit_rex(buf, rex | b, rm.requires_rex_for_byte());
}

/// REX for a register-direct r/m plus a reg-field register.
pub fn emit_rex_rr(buf: &mut InstrBytes, rm: Register, reg: Register, rex: u8) {
    let b = (rm.index() >> 3) & 1;
    let r = (reg.index() >> 1) & REX_R;
    emit_rex(
        buf,
        rex | r | b,
        rm.requires_rex_for_byte() || reg.requires_rex_for_byte(),
    );
}

/// REX for a memory r/m plus a reg-field register.
pub fn emit_rex_mr(buf: &mut InstrBytes, rm: &Mem, reg: Register, rex: u8) {
    let r = (reg.index() >> 1) & REX_R;
    emit_rex(
        buf,
        rex | r | rm.rex_x() | rm.rex_b(),
        reg.requires_rex_for_byte(),
    );
}

/// REX for a memory r/m with a `/digit` reg field.
pub fn emit_rex_m(buf: &mut InstrBytes, rm: &Mem, rex: u8) {
    emit_rex(buf, rex | rm.rex_x() | rm.rex_b(), false);
}

// ─── Opcode ────────────────────────────────────────────

/// Emit opcode bytes verbatim.
#[inline]
pub fn emit_opcode(buf: &mut InstrBytes, bytes: &[u8]) {
    buf.extend_from_slice(bytes);
}

/// Emit opcode bytes with the register's low three bits added to the last
/// byte (`+rb`/`+rw`/`+rd`/`+ro` forms).
pub fn emit_opcode_reg(buf: &mut InstrBytes, bytes: &[u8], reg: Register) {
    let (last, head) = match bytes.split_last() {
        Some(split) => split,
        None => return,
    };
    buf.extend_from_slice(head);
    buf.push(last.wrapping_add(reg.base_code()));
}

// ─── ModR/M ────────────────────────────────────────────

/// Register-direct ModR/M: mode 3, `rm` in r/m, `reg` (register encoding or
/// `/digit`) in the reg field.
#[inline]
pub fn emit_mod_rm_reg(buf: &mut InstrBytes, rm: Register, reg: u8) {
    buf.push(mod_rm(3, rm.index(), reg));
}

/// Memory ModR/M with any SIB byte and displacement.
///
/// * RIP-relative: mode 0, r/m 5, disp32.
/// * No base: mode 0, r/m 4, SIB with base 5 and the index (or 4 for none),
///   disp32.
/// * Base with displacement 0: mode 0 and no displacement, except RBP/R13,
///   whose mode 0 slot is taken by RIP-relative and SIB-no-base. They get
///   mode 2 with a zero disp32.
/// * Displacement in `-128..=127`: mode 1, disp8. Otherwise mode 2, disp32.
/// * A SIB byte follows whenever there is an index or the base is RSP/R12.
pub fn emit_mod_rm_mem(buf: &mut InstrBytes, mem: &Mem, reg: u8) {
    let disp = mem.get_disp();

    if mem.is_rip_relative() {
        buf.push(mod_rm(0, 5, reg));
        buf.extend_from_slice(&disp.to_le_bytes());
        return;
    }

    let scale = mem.get_scale().bits();
    let index = mem.get_index().map_or(4, Register::index);

    let Some(base) = mem.get_base() else {
        buf.push(mod_rm(0, 4, reg));
        buf.push(sib(scale, index, 5));
        buf.extend_from_slice(&disp.to_le_bytes());
        return;
    };

    let mode = if disp == 0 && base.base_code() != 5 {
        0
    } else if disp != 0 && i8::try_from(disp).is_ok() {
        1
    } else {
        2
    };

    if mem.get_index().is_some() || base.base_code() == 4 {
        buf.push(mod_rm(mode, 4, reg));
        buf.push(sib(scale, index, base.index()));
    } else {
        buf.push(mod_rm(mode, base.index(), reg));
    }

    match mode {
        1 => buf.push(disp as i8 as u8),
        2 => buf.extend_from_slice(&disp.to_le_bytes()),
        _ => {}
    }
}

// ─── Immediates ────────────────────────────────────────

/// Emit an immediate little-endian at its declared width.
pub fn emit_imm(buf: &mut InstrBytes, imm: Imm) {
    let bytes = imm.value().to_le_bytes();
    buf.extend_from_slice(&bytes[..imm.width().bytes()]);
}

/// Emit a zero rel32 placeholder and return its offset within `buf`.
pub fn emit_rel32(buf: &mut InstrBytes) -> usize {
    let at = buf.len();
    buf.extend_from_slice(&[0; 4]);
    at
}
