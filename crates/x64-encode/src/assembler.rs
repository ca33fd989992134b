//! Encoding sessions.
//!
//! An [`Assembler`] owns a fixed-capacity code buffer. A session is
//! [`start`](Assembler::start), any number of
//! [`assemble`](Assembler::assemble) calls, then
//! [`finish`](Assembler::finish), which patches every rel32 field. The
//! buffer is reused across sessions.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace, warn};

use crate::error::EncodeError;
use crate::instruction::{Code, Instruction, Opcode};
use crate::opcodes;
use crate::operand::{Label, Operand};
use crate::recipe::Recipe;
use crate::resolver::Resolver;

/// Byte emitted in place of an instruction an unchecked session cannot encode.
pub const FALLBACK: u8 = 0x90;

/// Whether a session validates instructions before encoding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Checks {
    /// Reject invalid instructions with an [`EncodeError`]. Nothing is
    /// emitted for a rejected instruction.
    Enabled,
    /// Trust the caller. An instruction that cannot be encoded at all
    /// becomes a single `nop` (0x90) and a warning is logged.
    Disabled,
}

impl Default for Checks {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Checks::Enabled
        } else {
            Checks::Disabled
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Code buffer size in bytes. Default: 1 MiB.
    ///
    /// Sessions must not emit more than this; overflowing the buffer panics.
    /// [`Code::max_encoded_len`] is a safe bound for a given sequence.
    pub capacity: usize,
    /// Validation policy. Default: [`Checks::Enabled`] in debug builds,
    /// [`Checks::Disabled`] in release builds.
    pub checks: Checks,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            capacity: 1024 * 1024,
            checks: Checks::default(),
        }
    }
}

// ─── CodeBuffer ────────────────────────────────────────

/// Fixed-size output area with a write cursor.
#[derive(Debug, Clone)]
struct CodeBuffer {
    bytes: Box<[u8]>,
    pos: usize,
}

impl CodeBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
            pos: 0,
        }
    }

    fn emit(&mut self, src: &[u8]) {
        let end = self.pos + src.len();
        assert!(
            end <= self.bytes.len(),
            "code buffer overflow: {} bytes exceed capacity {}",
            end,
            self.bytes.len()
        );
        self.bytes[self.pos..end].copy_from_slice(src);
        self.pos = end;
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.pos]
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.pos]
    }
}

// ─── Assembler ─────────────────────────────────────────

/// Encodes [`Instruction`]s into x86-64 machine code.
///
/// # Examples
///
/// ```rust
/// use x64_encode::{opcodes::*, regs::*, Assembler, Instruction, Label};
///
/// let mut asm = Assembler::new();
/// let top = Label::new(0);
/// asm.start();
/// asm.assemble(&Instruction::label(top))?;
/// asm.assemble(&Instruction::new(DEC_R64, &[RCX.into()]))?;
/// asm.assemble(&Instruction::new(JNE_REL32, &[top.into()]))?;
/// assert_eq!(
///     asm.finish(),
///     &[0x48, 0xFF, 0xC9, 0x0F, 0x85, 0xF7, 0xFF, 0xFF, 0xFF]
/// );
/// # Ok::<(), x64_encode::EncodeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Assembler {
    buf: CodeBuffer,
    resolver: Resolver,
    boundaries: Vec<usize>,
    checks: Checks,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Assembler with default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Assembler with explicit options.
    pub fn with_options(options: Options) -> Self {
        Self {
            buf: CodeBuffer::new(options.capacity),
            resolver: Resolver::new(),
            boundaries: Vec::new(),
            checks: options.checks,
        }
    }

    /// Change the validation policy. Takes effect for the next instruction.
    pub fn checks(&mut self, checks: Checks) -> &mut Self {
        self.checks = checks;
        self
    }

    /// Code buffer size in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.bytes.len()
    }

    /// Begin a session: clear the output, labels and fix-ups.
    pub fn start(&mut self) -> &mut Self {
        self.buf.pos = 0;
        self.resolver.clear();
        self.boundaries.clear();
        debug!(
            "session start: capacity {} bytes, checks {:?}",
            self.capacity(),
            self.checks
        );
        self
    }

    /// Encode one instruction, or bind a label for a label definition.
    ///
    /// # Errors
    ///
    /// Only when checks are enabled; see [`EncodeError`]. A rejected
    /// instruction leaves the output untouched.
    ///
    /// # Panics
    ///
    /// Panics if the output would exceed the buffer capacity.
    pub fn assemble(&mut self, instr: &Instruction) -> Result<(), EncodeError> {
        let opcode = instr.opcode();
        let result = if opcode == Opcode::LABEL {
            self.define_label(instr)
        } else {
            match opcodes::recipe(opcode) {
                Some(recipe) => self.encode(recipe, instr),
                None => self.reject(EncodeError::UnknownOpcode { opcode }),
            }
        };
        if result.is_ok() {
            self.boundaries.push(self.buf.pos);
        }
        result
    }

    fn define_label(&mut self, instr: &Instruction) -> Result<(), EncodeError> {
        let label = match instr.operands() {
            [Operand::Label(label)] => *label,
            _ => return self.reject(EncodeError::MissingLabel),
        };
        let pos = self.buf.pos;
        if self.checks == Checks::Enabled && self.resolver.offset(label).is_some() {
            return Err(EncodeError::DuplicateLabel { label });
        }
        if let Some(prev) = self.resolver.bind(label, pos) {
            debug!("label {} rebound from {:#x} to {:#x}", label, prev, pos);
        }
        trace!("{:#06x}: {}:", pos, label);
        Ok(())
    }

    fn encode(&mut self, recipe: &Recipe, instr: &Instruction) -> Result<(), EncodeError> {
        let ops = instr.operands();
        if self.checks == Checks::Enabled {
            recipe.validate(ops)?;
        }
        let Some(encoded) = recipe.encode(ops) else {
            return self.reject(EncodeError::InvalidOperand {
                index: 0,
                detail: alloc::format!("operands not encodable as '{}'", recipe.mnemonic),
            });
        };
        let pos = self.buf.pos;
        trace!("{:#06x}: {} -> {:02x?}", pos, instr, &*encoded.bytes);
        self.buf.emit(&encoded.bytes);
        if let Some((offset, label)) = encoded.fixup {
            self.resolver.record(pos + offset, label);
        }
        Ok(())
    }

    /// Checked sessions return the error; unchecked ones emit [`FALLBACK`].
    fn reject(&mut self, err: EncodeError) -> Result<(), EncodeError> {
        match self.checks {
            Checks::Enabled => Err(err),
            Checks::Disabled => {
                warn!(
                    "{:#06x}: {}; emitting nop instead",
                    self.buf.pos, err
                );
                self.buf.emit(&[FALLBACK]);
                Ok(())
            }
        }
    }

    /// End the session: patch every rel32 field and return the code.
    /// References to labels that were never bound are left as 0; see
    /// [`unresolved`](Self::unresolved).
    pub fn finish(&mut self) -> &[u8] {
        self.resolver.patch(self.buf.as_mut_slice());
        debug!(
            "session finish: {} bytes, {} fix-ups, {} unresolved",
            self.buf.pos,
            self.resolver.fixups().len(),
            self.resolver.unresolved().len()
        );
        self.buf.as_slice()
    }

    /// Bytes emitted so far in the current session.
    pub fn bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// Output offset after each successfully assembled instruction,
    /// including label definitions.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Offset bound to `label` in the current session.
    pub fn label_offset(&self, label: Label) -> Option<usize> {
        self.resolver.offset(label)
    }

    /// Labels referenced but never bound, one entry per reference, as of
    /// the last [`finish`](Self::finish).
    pub fn unresolved(&self) -> &[Label] {
        self.resolver.unresolved()
    }

    /// Run a whole session over `code`.
    ///
    /// # Errors
    ///
    /// The first [`EncodeError`] a checked session hits. The session is left
    /// unfinished; call [`start`](Self::start) before reusing it.
    pub fn assemble_code(&mut self, code: &Code) -> Result<&[u8], EncodeError> {
        self.start();
        for instr in code {
            self.assemble(instr)?;
        }
        Ok(self.finish())
    }

    /// Assemble `code` and write the raw bytes to `out`.
    ///
    /// # Errors
    ///
    /// Encoding errors as for [`assemble_code`](Self::assemble_code), and
    /// [`EncodeError::Output`] if the writer fails.
    #[cfg(feature = "std")]
    pub fn write_binary<W: std::io::Write>(
        &mut self,
        out: &mut W,
        code: &Code,
    ) -> Result<(), EncodeError> {
        let bytes = self.assemble_code(code)?;
        out.write_all(bytes)?;
        Ok(())
    }

    /// Assemble `code` and write it as hex text to `out`.
    ///
    /// Each byte is two lower-case hex digits and a space. A newline
    /// precedes the first byte of every instruction after the first, so each
    /// line holds one instruction. Label definitions and other instructions
    /// that emit nothing add no line. The output never starts with a newline,
    /// even when the code opens with a label definition.
    ///
    /// # Errors
    ///
    /// As for [`write_binary`](Self::write_binary).
    pub fn write_hex<W: fmt::Write>(
        &mut self,
        out: &mut W,
        code: &Code,
    ) -> Result<(), EncodeError> {
        self.assemble_code(code)?;
        write_hex_lines(out, self.buf.as_slice(), &self.boundaries)?;
        Ok(())
    }
}

/// Hex-dump `bytes`, breaking the line at each offset in `boundaries`
/// (sorted, duplicates allowed). Offset 0 never breaks.
pub(crate) fn write_hex_lines<W: fmt::Write>(
    out: &mut W,
    bytes: &[u8],
    boundaries: &[usize],
) -> fmt::Result {
    let mut breaks = boundaries.iter().copied().peekable();
    for (i, byte) in bytes.iter().enumerate() {
        let mut newline = false;
        while let Some(&at) = breaks.peek() {
            if at > i {
                break;
            }
            newline |= at == i && i != 0;
            breaks.next();
        }
        if newline {
            out.write_char('\n')?;
        }
        write!(out, "{:02x} ", byte)?;
    }
    Ok(())
}
