//! # x64-encode: table-driven x86-64 machine-code encoder
//!
//! `x64-encode` turns structured instructions (an opcode plus typed operands)
//! into x86-64 machine code. There is no text parser: callers build
//! [`Instruction`]s from the constants in [`opcodes`] and [`regs`].
//!
//! ## Quick Start
//!
//! ```rust
//! use x64_encode::{encode, opcodes::*, regs::*, Code, Mem};
//!
//! let mut code = Code::new();
//! code.emit(MOV_R64_M64, &[RAX.into(), Mem::base_disp(RDI, 8).into()])
//!     .emit(RET, &[]);
//! assert_eq!(encode(&code).unwrap(), vec![0x48, 0x8B, 0x47, 0x08, 0xC3]);
//! ```
//!
//! ## Features
//!
//! - **Table-driven**: one recipe per opcode, ModR/M and SIB from a
//!   precomputed lookup table.
//! - **Labels**: forward and backward rel32 references, patched when a
//!   session finishes.
//! - **Checked or unchecked**: validate every operand and report
//!   [`EncodeError`]s, or trust the caller and skip the checks.
//! - **`no_std` + `alloc`**: disable the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// An encoder performs many narrowing casts between integer widths and uses
// dense hex literals without separators. The lints below are expected here.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::match_same_arms,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::similar_names,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]

extern crate alloc;

/// Encoding sessions, options and the hex/binary writers.
pub mod assembler;
/// Encoding primitives (prefixes, REX, opcode, ModR/M, SIB, immediates).
pub mod encoder;
/// Error type.
pub mod error;
/// Opcodes, instructions and instruction sequences.
pub mod instruction;
/// Opcode constants and their encoding recipes.
pub mod opcodes;
/// Registers, memory references, immediates and labels.
pub mod operand;
/// Operand roles and encoding steps.
pub mod recipe;
/// Named register constants.
pub mod regs;
/// Label binding and rel32 patching.
pub mod resolver;
/// Intel and AT&T rendering.
pub mod syntax;
/// ModR/M and SIB lookup table.
pub mod table;

// Re-exports
pub use assembler::{Assembler, Checks, Options};
pub use encoder::InstrBytes;
pub use error::EncodeError;
pub use instruction::{Code, Instruction, Opcode, OperandList};
pub use operand::{
    Alias, Imm, Label, Mem, Operand, OperandKind, RegFamily, Register, Scale, Segment, Width,
};
pub use resolver::Fixup;
pub use syntax::Syntax;

use alloc::string::String;
use alloc::vec::Vec;

fn one_shot(code: &Code) -> Assembler {
    Assembler::with_options(Options {
        capacity: code.max_encoded_len(),
        checks: Checks::Enabled,
    })
}

/// Encode `code` in a fresh checked session.
///
/// # Errors
///
/// The first [`EncodeError`] found.
///
/// # Examples
///
/// ```rust
/// use x64_encode::{encode, opcodes::*, Code, Label};
///
/// let mut code = Code::new();
/// code.emit(JMP_REL32, &[Label::new(0).into()]).bind(Label::new(0));
/// assert_eq!(encode(&code).unwrap(), vec![0xE9, 0, 0, 0, 0]);
/// ```
pub fn encode(code: &Code) -> Result<Vec<u8>, EncodeError> {
    let mut asm = one_shot(code);
    asm.assemble_code(code).map(<[u8]>::to_vec)
}

/// Encode `code` in a fresh checked session and render it as hex text, one
/// instruction per line. See [`Assembler::write_hex`].
///
/// # Errors
///
/// The first [`EncodeError`] found.
pub fn encode_hex(code: &Code) -> Result<String, EncodeError> {
    let mut out = String::new();
    one_shot(code).write_hex(&mut out, code)?;
    Ok(out)
}
