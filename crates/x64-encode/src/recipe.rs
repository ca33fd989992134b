//! Encoding recipes.
//!
//! A [`Recipe`] describes one opcode: its mnemonic, the [`Role`] each
//! operand slot accepts, and the [`Step`]s that produce its bytes. The
//! table itself lives in [`opcodes`](crate::opcodes).

use alloc::string::{String, ToString};
use core::fmt;

use crate::encoder::{
    emit_imm, emit_mem_prefix, emit_mod_rm_mem, emit_mod_rm_reg, emit_opcode, emit_opcode_reg,
    emit_prefix, emit_rel32, emit_rex_m, emit_rex_mr, emit_rex_r, emit_rex_rr, InstrBytes,
};
use crate::error::EncodeError;
use crate::instruction::high_byte_conflict;
use crate::operand::{Alias, Label, Operand, Register, Width};
use crate::regs::CL;

/// What an operand slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// 8-bit register, including AH/CH/DH/BH.
    R8,
    /// 16-bit register.
    R16,
    /// 32-bit register.
    R32,
    /// 64-bit register.
    R64,
    /// Memory reference.
    M,
    /// 8-bit immediate.
    Imm8,
    /// 16-bit immediate.
    Imm16,
    /// 32-bit immediate.
    Imm32,
    /// 64-bit immediate.
    Imm64,
    /// Label, encoded as rel32.
    Rel,
    /// Exactly CL (shift counts).
    Cl,
}

impl Role {
    /// Whether `op` fits this slot by kind and width.
    pub fn accepts(self, op: &Operand) -> bool {
        match (self, op) {
            (Role::R8, Operand::Register(r)) => r.width() == Width::W8,
            (Role::R16, Operand::Register(r)) => standard(*r, Width::W16),
            (Role::R32, Operand::Register(r)) => standard(*r, Width::W32),
            (Role::R64, Operand::Register(r)) => standard(*r, Width::W64),
            (Role::Cl, Operand::Register(r)) => *r == CL,
            (Role::M, Operand::Memory(_)) => true,
            (Role::Imm8, Operand::Immediate(i)) => i.width() == Width::W8,
            (Role::Imm16, Operand::Immediate(i)) => i.width() == Width::W16,
            (Role::Imm32, Operand::Immediate(i)) => i.width() == Width::W32,
            (Role::Imm64, Operand::Immediate(i)) => i.width() == Width::W64,
            (Role::Rel, Operand::Label(_)) => true,
            _ => false,
        }
    }
}

fn standard(r: Register, width: Width) -> bool {
    r.width() == width && r.alias() == Alias::Standard
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::R8 => "r8",
            Role::R16 => "r16",
            Role::R32 => "r32",
            Role::R64 => "r64",
            Role::M => "m",
            Role::Imm8 => "imm8",
            Role::Imm16 => "imm16",
            Role::Imm32 => "imm32",
            Role::Imm64 => "imm64",
            Role::Rel => "rel32",
            Role::Cl => "cl",
        })
    }
}

/// Source of the ModR/M reg field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The register operand at this position.
    Reg(u8),
    /// A fixed opcode extension (`/0`..`/7`).
    Digit(u8),
}

/// One encoding step. Operand positions are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Fixed legacy prefix bytes.
    Prefix(&'static [u8]),
    /// Segment and address-size prefixes of the memory operand at this position.
    MemPrefix(u8),
    /// REX prefix: fixed bits, the r/m operand, the reg-field operand.
    /// Emitted only when some bit is set or a byte register requires it.
    Rex(u8, Option<u8>, Option<u8>),
    /// Fixed opcode bytes.
    Op(&'static [u8]),
    /// Opcode bytes with the register operand folded into the last byte.
    OpReg(&'static [u8], u8),
    /// ModR/M (plus SIB and displacement) for the r/m operand at this position.
    ModRm(u8, Field),
    /// The immediate operand at this position, at its declared width.
    Imm(u8),
    /// A rel32 placeholder for the label operand at this position.
    Rel32(u8),
}

/// How to encode one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Intel mnemonic.
    pub mnemonic: &'static str,
    /// Accepted operand per slot.
    pub roles: &'static [Role],
    /// Encoding steps, in emission order.
    pub steps: &'static [Step],
}

/// The bytes of one instruction, plus the label its rel32 field refers to.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Machine code with any rel32 field zeroed.
    pub bytes: InstrBytes,
    /// Offset of the rel32 field within `bytes`, and its target.
    pub fixup: Option<(usize, Label)>,
}

impl Recipe {
    /// Whether the recipe always emits a REX prefix.
    pub fn forces_rex(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, Step::Rex(bits, _, _) if *bits != 0))
    }

    /// Full validation, reporting the first problem found.
    pub fn validate(&self, ops: &[Operand]) -> Result<(), EncodeError> {
        if ops.len() != self.roles.len() {
            return Err(EncodeError::OperandCount {
                mnemonic: self.mnemonic.to_string(),
                expected: self.roles.len(),
                found: ops.len(),
            });
        }
        for (index, (role, op)) in self.roles.iter().zip(ops).enumerate() {
            if !role.accepts(op) {
                return Err(EncodeError::OperandMismatch {
                    mnemonic: self.mnemonic.to_string(),
                    index,
                    expected: role.to_string(),
                    found: op.kind(),
                });
            }
            if let Some(detail) = op.defect() {
                return Err(EncodeError::InvalidOperand {
                    index,
                    detail: String::from(detail),
                });
            }
        }
        if high_byte_conflict(ops, self.forces_rex()) {
            return Err(EncodeError::HighByteConflict {
                mnemonic: self.mnemonic.to_string(),
            });
        }
        Ok(())
    }

    /// Whether `ops` can be encoded at all. The same rules as
    /// [`Recipe::validate`], except that a displacement-only address is
    /// allowed: it has exactly one encoding.
    fn encodable(&self, ops: &[Operand]) -> bool {
        ops.len() == self.roles.len()
            && self.roles.iter().zip(ops).all(|(role, op)| role.accepts(op))
            && ops.iter().all(well_formed)
            && !high_byte_conflict(ops, self.forces_rex())
    }

    /// Run the steps. `None` means the operands cannot be encoded by this
    /// recipe.
    pub fn encode(&self, ops: &[Operand]) -> Option<Encoded> {
        if !self.encodable(ops) {
            return None;
        }
        let mut buf = InstrBytes::new();
        let mut fixup = None;
        for step in self.steps {
            match *step {
                Step::Prefix(bytes) => emit_prefix(&mut buf, bytes),
                Step::MemPrefix(i) => emit_mem_prefix(&mut buf, operand(ops, i)?.as_memory()?),
                Step::Rex(bits, rm, reg) => rex(&mut buf, ops, bits, rm, reg)?,
                Step::Op(bytes) => emit_opcode(&mut buf, bytes),
                Step::OpReg(bytes, i) => {
                    emit_opcode_reg(&mut buf, bytes, operand(ops, i)?.as_register()?);
                }
                Step::ModRm(i, field) => {
                    let reg = match field {
                        Field::Reg(r) => operand(ops, r)?.as_register()?.index(),
                        Field::Digit(d) => d,
                    };
                    match operand(ops, i)? {
                        Operand::Register(rm) => emit_mod_rm_reg(&mut buf, *rm, reg),
                        Operand::Memory(mem) => emit_mod_rm_mem(&mut buf, mem, reg),
                        _ => return None,
                    }
                }
                Step::Imm(i) => emit_imm(&mut buf, operand(ops, i)?.as_immediate()?),
                Step::Rel32(i) => {
                    let label = operand(ops, i)?.as_label()?;
                    fixup = Some((emit_rel32(&mut buf), label));
                }
            }
        }
        Some(Encoded { bytes: buf, fixup })
    }
}

fn operand(ops: &[Operand], i: u8) -> Option<&Operand> {
    ops.get(i as usize)
}

fn well_formed(op: &Operand) -> bool {
    match op {
        Operand::Memory(m) if m.is_absolute() => true,
        _ => op.defect().is_none(),
    }
}

fn rex(
    buf: &mut InstrBytes,
    ops: &[Operand],
    bits: u8,
    rm: Option<u8>,
    reg: Option<u8>,
) -> Option<()> {
    let reg = match reg {
        Some(i) => Some(operand(ops, i)?.as_register()?),
        None => None,
    };
    let rm = match rm {
        Some(i) => Some(operand(ops, i)?),
        None => None,
    };
    match (rm, reg) {
        (None, None) if bits != 0 => buf.push(0x40 | bits),
        (None, None) => {}
        (Some(Operand::Register(r)), None) => emit_rex_r(buf, *r, bits),
        (Some(Operand::Register(r)), Some(g)) => emit_rex_rr(buf, *r, g, bits),
        (Some(Operand::Memory(m)), None) => emit_rex_m(buf, m, bits),
        (Some(Operand::Memory(m)), Some(g)) => emit_rex_mr(buf, m, g, bits),
        _ => return None,
    }
    Some(())
}
