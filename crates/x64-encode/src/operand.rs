//! Operand model: registers, memory references, immediates and labels.
//!
//! Every operand is plain `Copy` data. Validity is a pure predicate
//! ([`Operand::check`]); nothing here touches the output buffer.

use core::fmt;

/// Operand width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Width {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
}

impl Width {
    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Aliasing class of a register.
///
/// The legacy high-byte registers (AH, CH, DH, BH) share encodings 4–7 with
/// SPL, BPL, SIL and DIL. Which one the processor picks depends on whether a
/// REX prefix is present, so the two groups can never meet in one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alias {
    /// Any register that is not a legacy high-byte alias.
    Standard,
    /// AH, CH, DH or BH.
    HighByte,
}

/// Register family used when an opcode carries the register in its low three
/// bits (`+rb`, `+rw`, `+rd`, `+ro` in the Intel manuals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegFamily {
    /// Byte registers (`+rb`).
    Rb,
    /// Word registers (`+rw`).
    Rw,
    /// Doubleword registers (`+rd`).
    Rd,
    /// Quadword registers (`+ro`).
    Ro,
}

const NAMES_64: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];
const NAMES_32: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d",
    "r13d", "r14d", "r15d",
];
const NAMES_16: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w",
    "r14w", "r15w",
];
const NAMES_8: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
    "r13b", "r14b", "r15b",
];
const NAMES_HIGH: [&str; 4] = ["ah", "ch", "dh", "bh"];

/// A general-purpose register.
///
/// `index` is the 4-bit hardware encoding: bits 0–2 go into the ModR/M, SIB
/// or opcode byte, bit 3 into REX.R, REX.X or REX.B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register {
    width: Width,
    index: u8,
    alias: Alias,
}

impl Register {
    /// Create a standard register of the given width and encoding index.
    pub const fn new(width: Width, index: u8) -> Self {
        Self {
            width,
            index,
            alias: Alias::Standard,
        }
    }

    /// Create a legacy high-byte register. `index` is the hardware encoding
    /// (4 = AH, 5 = CH, 6 = DH, 7 = BH).
    pub const fn high_byte(index: u8) -> Self {
        Self {
            width: Width::W8,
            index,
            alias: Alias::HighByte,
        }
    }

    /// Operand width of the register.
    pub const fn width(self) -> Width {
        self.width
    }

    /// Full 4-bit encoding index.
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Aliasing class.
    pub const fn alias(self) -> Alias {
        self.alias
    }

    /// The 3-bit encoding that lands in ModR/M, SIB or the opcode byte.
    pub const fn base_code(self) -> u8 {
        self.index & 0x7
    }

    /// Whether the register needs a REX extension bit (R8–R15 at any width).
    pub const fn is_extended(self) -> bool {
        self.index & 0x8 != 0
    }

    /// Whether this is AH, CH, DH or BH.
    pub const fn is_high_byte(self) -> bool {
        matches!(self.alias, Alias::HighByte)
    }

    /// SPL, BPL, SIL and DIL are only reachable with a REX prefix present;
    /// without one, encodings 4–7 select the high-byte registers instead.
    pub const fn requires_rex_for_byte(self) -> bool {
        matches!(self.width, Width::W8)
            && matches!(self.alias, Alias::Standard)
            && self.index >= 4
            && self.index < 8
    }

    /// The 64-bit register this register is part of.
    pub const fn parent(self) -> Register {
        match self.alias {
            Alias::HighByte => Register::new(Width::W64, self.index - 4),
            Alias::Standard => Register::new(Width::W64, self.index),
        }
    }

    /// Opcode-fold family of the register.
    pub const fn family(self) -> RegFamily {
        match self.width {
            Width::W8 => RegFamily::Rb,
            Width::W16 => RegFamily::Rw,
            Width::W32 => RegFamily::Rd,
            Width::W64 => RegFamily::Ro,
        }
    }

    /// Whether the register can be used to form an address (32 or 64 bits).
    pub const fn is_address(self) -> bool {
        matches!(self.width, Width::W32 | Width::W64)
    }

    /// Validity predicate.
    pub fn check(self) -> bool {
        match self.alias {
            Alias::Standard => self.index < 16,
            Alias::HighByte => self.width == Width::W8 && (4..8).contains(&self.index),
        }
    }

    /// Lower-case register name, e.g. `"r9d"` or `"ah"`.
    pub fn name(self) -> &'static str {
        if !self.check() {
            return "<invalid>";
        }
        let i = self.index as usize;
        match (self.alias, self.width) {
            (Alias::HighByte, _) => NAMES_HIGH[i - 4],
            (Alias::Standard, Width::W64) => NAMES_64[i],
            (Alias::Standard, Width::W32) => NAMES_32[i],
            (Alias::Standard, Width::W16) => NAMES_16[i],
            (Alias::Standard, Width::W8) => NAMES_8[i],
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SIB scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scale {
    /// `*1`
    #[default]
    S1,
    /// `*2`
    S2,
    /// `*4`
    S4,
    /// `*8`
    S8,
}

impl Scale {
    /// The 2-bit SIB encoding (0–3).
    pub const fn bits(self) -> u8 {
        match self {
            Scale::S1 => 0,
            Scale::S2 => 1,
            Scale::S4 => 2,
            Scale::S8 => 3,
        }
    }

    /// The multiplier (1, 2, 4 or 8).
    pub const fn factor(self) -> u8 {
        1 << self.bits()
    }
}

/// Segment override carried by a memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// `es:`
    Es,
    /// `cs:`
    Cs,
    /// `ss:`
    Ss,
    /// `ds:`
    Ds,
    /// `fs:`
    Fs,
    /// `gs:`
    Gs,
}

impl Segment {
    /// The legacy prefix byte selecting this segment.
    pub const fn prefix(self) -> u8 {
        match self {
            Segment::Es => 0x26,
            Segment::Cs => 0x2E,
            Segment::Ss => 0x36,
            Segment::Ds => 0x3E,
            Segment::Fs => 0x64,
            Segment::Gs => 0x65,
        }
    }

    /// Lower-case segment register name.
    pub const fn name(self) -> &'static str {
        match self {
            Segment::Es => "es",
            Segment::Cs => "cs",
            Segment::Ss => "ss",
            Segment::Ds => "ds",
            Segment::Fs => "fs",
            Segment::Gs => "gs",
        }
    }
}

/// A memory operand: `segment:[base + index*scale + disp]` or `[rip + disp]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    base: Option<Register>,
    index: Option<Register>,
    scale: Scale,
    disp: i32,
    segment: Option<Segment>,
    rip: bool,
}

impl Mem {
    /// `[base]`
    pub const fn base(base: Register) -> Self {
        Self::base_disp(base, 0)
    }

    /// `[base + disp]`
    pub const fn base_disp(base: Register, disp: i32) -> Self {
        Self {
            base: Some(base),
            index: None,
            scale: Scale::S1,
            disp,
            segment: None,
            rip: false,
        }
    }

    /// `[base + index*scale + disp]`
    pub const fn sib(base: Register, index: Register, scale: Scale, disp: i32) -> Self {
        Self {
            base: Some(base),
            index: Some(index),
            scale,
            disp,
            segment: None,
            rip: false,
        }
    }

    /// `[index*scale + disp]` with no base register.
    pub const fn index_only(index: Register, scale: Scale, disp: i32) -> Self {
        Self {
            base: None,
            index: Some(index),
            scale,
            disp,
            segment: None,
            rip: false,
        }
    }

    /// `[disp]`: displacement only, encoded through a SIB byte with both
    /// escapes. Only reachable from unchecked sessions; see [`Mem::check`].
    pub const fn abs(disp: i32) -> Self {
        Self {
            base: None,
            index: None,
            scale: Scale::S1,
            disp,
            segment: None,
            rip: false,
        }
    }

    /// `[rip + disp]`
    pub const fn rip(disp: i32) -> Self {
        Self {
            base: None,
            index: None,
            scale: Scale::S1,
            disp,
            segment: None,
            rip: true,
        }
    }

    /// Attach a segment override.
    #[must_use]
    pub const fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Base register, if any.
    pub const fn get_base(&self) -> Option<Register> {
        self.base
    }

    /// Index register, if any.
    pub const fn get_index(&self) -> Option<Register> {
        self.index
    }

    /// Scale factor.
    pub const fn get_scale(&self) -> Scale {
        self.scale
    }

    /// Signed displacement.
    pub const fn get_disp(&self) -> i32 {
        self.disp
    }

    /// Segment override, if any.
    pub const fn segment(&self) -> Option<Segment> {
        self.segment
    }

    /// Whether the operand is RIP-relative.
    pub const fn is_rip_relative(&self) -> bool {
        self.rip
    }

    /// Whether this is the displacement-only form built by [`Mem::abs`].
    pub const fn is_absolute(&self) -> bool {
        !self.rip && self.base.is_none() && self.index.is_none()
    }

    /// Whether the address is formed from 32-bit registers, which in 64-bit
    /// mode needs the `0x67` address-size prefix.
    pub fn addr_size_override(&self) -> bool {
        self.base.or(self.index).is_some_and(|r| r.width() == Width::W32)
    }

    /// REX.B contribution of the base register.
    pub const fn rex_b(&self) -> u8 {
        match self.base {
            Some(b) => (b.index() >> 3) & 0x1,
            None => 0,
        }
    }

    /// REX.X contribution of the index register (already shifted into bit 1).
    pub const fn rex_x(&self) -> u8 {
        match self.index {
            Some(i) => (i.index() >> 2) & 0x2,
            None => 0,
        }
    }

    /// Whether the operand alone forces a REX prefix.
    pub fn needs_rex(&self) -> bool {
        self.rex_b() | self.rex_x() != 0
    }

    /// Validity predicate.
    pub fn check(&self) -> bool {
        self.defect().is_none()
    }

    pub(crate) fn defect(&self) -> Option<&'static str> {
        if self.rip {
            if self.base.is_some() || self.index.is_some() {
                return Some("RIP-relative operand cannot have a base or index register");
            }
            return None;
        }
        if self.base.is_none() && self.index.is_none() {
            return Some("memory operand needs a base or index register");
        }
        for reg in self.base.iter().chain(self.index.iter()) {
            if !reg.check() || !reg.is_address() {
                return Some("address registers must be 32 or 64 bits wide");
            }
        }
        if let (Some(base), Some(index)) = (self.base, self.index) {
            if base.width() != index.width() {
                return Some("base and index registers must have the same width");
            }
        }
        if self.index.is_some_and(|i| i.index() == 4) {
            return Some("rsp/esp cannot be used as an index register");
        }
        None
    }
}

impl fmt::Display for Mem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(seg) = self.segment {
            write!(f, "{}:", seg.name())?;
        }
        f.write_str("[")?;
        let mut parts = false;
        if self.rip {
            f.write_str("rip")?;
            parts = true;
        }
        if let Some(base) = self.base {
            write!(f, "{}", base)?;
            parts = true;
        }
        if let Some(index) = self.index {
            if parts {
                f.write_str("+")?;
            }
            write!(f, "{}*{}", index, self.scale.factor())?;
            parts = true;
        }
        if self.disp != 0 || !parts {
            if self.disp < 0 {
                write!(f, "-0x{:x}", self.disp.unsigned_abs())?;
            } else {
                if parts {
                    f.write_str("+")?;
                }
                write!(f, "0x{:x}", self.disp)?;
            }
        }
        f.write_str("]")
    }
}

/// An immediate with a declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Imm {
    value: i64,
    width: Width,
}

impl Imm {
    /// An immediate of the given width. The value may be signed or unsigned
    /// but must fit the width; see [`Imm::check`].
    pub const fn new(value: i64, width: Width) -> Self {
        Self { value, width }
    }

    /// 8-bit immediate.
    pub const fn imm8(value: i8) -> Self {
        Self::new(value as i64, Width::W8)
    }

    /// 16-bit immediate.
    pub const fn imm16(value: i16) -> Self {
        Self::new(value as i64, Width::W16)
    }

    /// 32-bit immediate.
    pub const fn imm32(value: i32) -> Self {
        Self::new(value as i64, Width::W32)
    }

    /// 64-bit immediate.
    pub const fn imm64(value: i64) -> Self {
        Self::new(value, Width::W64)
    }

    /// The value as supplied.
    pub const fn value(self) -> i64 {
        self.value
    }

    /// Declared width.
    pub const fn width(self) -> Width {
        self.width
    }

    /// Validity predicate: the value fits the declared width, read either as
    /// a signed or an unsigned quantity.
    pub fn check(self) -> bool {
        let v = self.value as i128;
        match self.width {
            Width::W8 => (i8::MIN as i128..=u8::MAX as i128).contains(&v),
            Width::W16 => (i16::MIN as i128..=u16::MAX as i128).contains(&v),
            Width::W32 => (i32::MIN as i128..=u32::MAX as i128).contains(&v),
            Width::W64 => true,
        }
    }
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value < 0 {
            write!(f, "-0x{:x}", self.value.unsigned_abs())
        } else {
            write!(f, "0x{:x}", self.value)
        }
    }
}

/// An opaque code position, used as a jump or call target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label(u32);

impl Label {
    /// Create a label from a caller-chosen id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The label id.
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".L{}", self.0)
    }
}

/// Operand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandKind {
    /// A register.
    Register,
    /// A memory reference.
    Memory,
    /// An immediate.
    Immediate,
    /// A label.
    Label,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Register => write!(f, "register"),
            OperandKind::Memory => write!(f, "memory"),
            OperandKind::Immediate => write!(f, "immediate"),
            OperandKind::Label => write!(f, "label"),
        }
    }
}

/// An instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// A register operand.
    Register(Register),
    /// A memory operand.
    Memory(Mem),
    /// An immediate operand.
    Immediate(Imm),
    /// A jump or call target.
    Label(Label),
}

impl Operand {
    /// Operand category.
    pub const fn kind(&self) -> OperandKind {
        match self {
            Operand::Register(_) => OperandKind::Register,
            Operand::Memory(_) => OperandKind::Memory,
            Operand::Immediate(_) => OperandKind::Immediate,
            Operand::Label(_) => OperandKind::Label,
        }
    }

    /// Validity predicate.
    pub fn check(&self) -> bool {
        self.defect().is_none()
    }

    pub(crate) fn defect(&self) -> Option<&'static str> {
        match self {
            Operand::Register(r) if !r.check() => Some("register encoding out of range"),
            Operand::Memory(m) => m.defect(),
            Operand::Immediate(i) if !i.check() => Some("immediate does not fit its width"),
            _ => None,
        }
    }

    /// The register, if this is a register operand.
    pub const fn as_register(&self) -> Option<Register> {
        match self {
            Operand::Register(r) => Some(*r),
            _ => None,
        }
    }

    /// The memory reference, if this is a memory operand.
    pub const fn as_memory(&self) -> Option<&Mem> {
        match self {
            Operand::Memory(m) => Some(m),
            _ => None,
        }
    }

    /// The immediate, if this is an immediate operand.
    pub const fn as_immediate(&self) -> Option<Imm> {
        match self {
            Operand::Immediate(i) => Some(*i),
            _ => None,
        }
    }

    /// The label, if this is a label operand.
    pub const fn as_label(&self) -> Option<Label> {
        match self {
            Operand::Label(l) => Some(*l),
            _ => None,
        }
    }
}

impl Default for Operand {
    /// Sentinel used for unoccupied operand slots; never exposed.
    fn default() -> Self {
        Operand::Immediate(Imm::imm8(0))
    }
}

impl From<Register> for Operand {
    fn from(r: Register) -> Self {
        Operand::Register(r)
    }
}

impl From<Mem> for Operand {
    fn from(m: Mem) -> Self {
        Operand::Memory(m)
    }
}

impl From<Imm> for Operand {
    fn from(i: Imm) -> Self {
        Operand::Immediate(i)
    }
}

impl From<Label> for Operand {
    fn from(l: Label) -> Self {
        Operand::Label(l)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => write!(f, "{}", r),
            Operand::Memory(m) => write!(f, "{}", m),
            Operand::Immediate(i) => write!(f, "{}", i),
            Operand::Label(l) => write!(f, "{}", l),
        }
    }
}
