//! Instructions and instruction sequences.

use alloc::vec::Vec;
use core::fmt;

use crate::operand::Operand;
use crate::opcodes;
use crate::syntax::{InstructionDisplay, Syntax};

/// Maximum operands per instruction.
pub const MAX_OPERANDS: usize = 4;

// ─── Opcode ──────────────────────────────────────────────

/// A 32-bit opcode identifier.
///
/// The upper 16 bits select a family, the lower 16 bits index a recipe
/// within it. Family [`Opcode::INSTRUCTION_FAMILY`] holds the x86-64
/// instructions listed in [`opcodes`](crate::opcodes);
/// [`Opcode::LABEL_FAMILY`] holds the single label-definition
/// pseudo-instruction [`Opcode::LABEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode(u32);

impl Opcode {
    /// Family of machine instructions.
    pub const INSTRUCTION_FAMILY: u16 = 0;
    /// Family of label-definition pseudo-instructions.
    pub const LABEL_FAMILY: u16 = 1;
    /// Bind the label operand to the current output position.
    pub const LABEL: Opcode = Opcode((Self::LABEL_FAMILY as u32) << 16);

    /// Opcode from its raw value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) const fn instruction(index: u16) -> Self {
        Self(((Self::INSTRUCTION_FAMILY as u32) << 16) | index as u32)
    }

    /// Raw 32-bit value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Upper 16 bits.
    pub const fn family(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Lower 16 bits.
    pub const fn index(self) -> u16 {
        self.0 as u16
    }

    /// Mnemonic, or `None` for opcodes without a recipe.
    pub fn mnemonic(self) -> Option<&'static str> {
        if self == Self::LABEL {
            return Some("label");
        }
        opcodes::recipe(self).map(|r| r.mnemonic)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(m) => f.write_str(m),
            None => write!(f, "<opcode {:#x}>", self.0),
        }
    }
}

// ─── OperandList ─────────────────────────────────────────

/// Fixed-capacity operand list stored inline.
#[derive(Clone, Copy)]
pub struct OperandList {
    ops: [Operand; MAX_OPERANDS],
    len: u8,
}

impl OperandList {
    /// Empty list.
    pub fn new() -> Self {
        Self {
            ops: [Operand::default(); MAX_OPERANDS],
            len: 0,
        }
    }

    /// Append an operand.
    ///
    /// # Panics
    ///
    /// Panics if the list already holds [`MAX_OPERANDS`] operands.
    pub fn push(&mut self, op: Operand) {
        assert!(
            (self.len as usize) < MAX_OPERANDS,
            "OperandList overflow: at most {} operands",
            MAX_OPERANDS
        );
        self.ops[self.len as usize] = op;
        self.len += 1;
    }
}

impl Default for OperandList {
    fn default() -> Self {
        Self::new()
    }
}

impl core::ops::Deref for OperandList {
    type Target = [Operand];
    fn deref(&self) -> &[Operand] {
        &self.ops[..self.len as usize]
    }
}

impl From<&[Operand]> for OperandList {
    fn from(ops: &[Operand]) -> Self {
        let mut list = Self::new();
        for op in ops {
            list.push(*op);
        }
        list
    }
}

impl fmt::Debug for OperandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for OperandList {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl Eq for OperandList {}

#[cfg(feature = "serde")]
impl serde::Serialize for OperandList {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = s.serialize_seq(Some(self.len()))?;
        for op in self.iter() {
            seq.serialize_element(op)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OperandList {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let ops = Vec::<Operand>::deserialize(d)?;
        if ops.len() > MAX_OPERANDS {
            return Err(serde::de::Error::invalid_length(
                ops.len(),
                &"at most 4 operands",
            ));
        }
        Ok(Self::from(ops.as_slice()))
    }
}

// ─── Instruction ─────────────────────────────────────────

/// An opcode paired with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    opcode: Opcode,
    operands: OperandList,
}

impl Instruction {
    /// Build an instruction.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_OPERANDS`] operands are given.
    pub fn new(opcode: Opcode, operands: &[Operand]) -> Self {
        Self {
            opcode,
            operands: OperandList::from(operands),
        }
    }

    /// A label definition binding `label` at the point it is assembled.
    pub fn label(label: crate::Label) -> Self {
        Self::new(Opcode::LABEL, &[Operand::Label(label)])
    }

    /// The opcode.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// All operands.
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Operand at `index`.
    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }

    /// Structural validity: every operand passes its own check and no
    /// high-byte register meets an operand that forces a REX prefix.
    /// Opcode-specific rules are applied when the instruction is assembled.
    pub fn check(&self) -> bool {
        self.operands.iter().all(Operand::check) && !high_byte_conflict(&self.operands, false)
    }

    /// Render in the given syntax.
    pub fn display(&self, syntax: Syntax) -> InstructionDisplay<'_> {
        InstructionDisplay::new(self, syntax)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Syntax::Intel), f)
    }
}

/// Whether `ops` mixes AH/CH/DH/BH with anything that needs a REX prefix.
/// `forced` is set when the opcode itself carries REX.W.
pub(crate) fn high_byte_conflict(ops: &[Operand], forced: bool) -> bool {
    let mut high = false;
    let mut rex = forced;
    for op in ops {
        match op {
            Operand::Register(r) => {
                high |= r.is_high_byte();
                rex |= r.is_extended() || r.requires_rex_for_byte();
            }
            Operand::Memory(m) => rex |= m.needs_rex(),
            _ => {}
        }
    }
    high && rex
}

// ─── Code ────────────────────────────────────────────────

/// An ordered sequence of instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Code(Vec<Instruction>);

impl Code {
    /// Empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an instruction.
    pub fn push(&mut self, instr: Instruction) -> &mut Self {
        self.0.push(instr);
        self
    }

    /// Append `opcode` with `operands`.
    pub fn emit(&mut self, opcode: Opcode, operands: &[Operand]) -> &mut Self {
        self.push(Instruction::new(opcode, operands))
    }

    /// Append a label definition.
    pub fn bind(&mut self, label: crate::Label) -> &mut Self {
        self.push(Instruction::label(label))
    }

    /// Upper bound on the encoded size: 15 bytes per instruction.
    pub fn max_encoded_len(&self) -> usize {
        self.0.len() * 15
    }

    /// The instructions.
    pub fn as_slice(&self) -> &[Instruction] {
        &self.0
    }
}

impl core::ops::Deref for Code {
    type Target = [Instruction];
    fn deref(&self) -> &[Instruction] {
        &self.0
    }
}

impl From<Vec<Instruction>> for Code {
    fn from(v: Vec<Instruction>) -> Self {
        Self(v)
    }
}

impl FromIterator<Instruction> for Code {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Code {
    type Item = &'a Instruction;
    type IntoIter = core::slice::Iter<'a, Instruction>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
