//! Error type for checked encoding sessions.

use alloc::string::String;
use core::fmt;

use crate::instruction::Opcode;
use crate::operand::{Label, OperandKind};

/// Why an instruction could not be encoded.
///
/// Only checked sessions report these; an unchecked session emits a
/// single `nop` in place of the rejected instruction instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodeError {
    /// The opcode has no encoding recipe.
    UnknownOpcode {
        /// The rejected opcode.
        opcode: Opcode,
    },

    /// Wrong number of operands for the opcode.
    OperandCount {
        /// Mnemonic of the opcode.
        mnemonic: String,
        /// Number of operands the opcode takes.
        expected: usize,
        /// Number of operands supplied.
        found: usize,
    },

    /// An operand has the wrong kind or width for its slot.
    OperandMismatch {
        /// Mnemonic of the opcode.
        mnemonic: String,
        /// Zero-based operand position.
        index: usize,
        /// What the slot accepts, e.g. `r64` or `imm8`.
        expected: String,
        /// What was supplied.
        found: OperandKind,
    },

    /// An operand failed its validity predicate.
    InvalidOperand {
        /// Zero-based operand position.
        index: usize,
        /// Description of the defect.
        detail: String,
    },

    /// AH, CH, DH or BH appears in an instruction that needs a REX prefix.
    HighByteConflict {
        /// Mnemonic of the opcode.
        mnemonic: String,
    },

    /// A label was bound twice in one session.
    DuplicateLabel {
        /// The label bound twice.
        label: Label,
    },

    /// A label definition carried no label operand.
    MissingLabel,

    /// Writing to the output sink failed.
    Output {
        /// Description of the sink error.
        detail: String,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnknownOpcode { opcode } => {
                write!(f, "unknown opcode {:#010x}", opcode.raw())
            }
            EncodeError::OperandCount {
                mnemonic,
                expected,
                found,
            } => write!(
                f,
                "'{}' takes {} operand(s), found {}",
                mnemonic, expected, found
            ),
            EncodeError::OperandMismatch {
                mnemonic,
                index,
                expected,
                found,
            } => write!(
                f,
                "'{}' operand {}: expected {}, found {}",
                mnemonic, index, expected, found
            ),
            EncodeError::InvalidOperand { index, detail } => {
                write!(f, "invalid operand {}: {}", index, detail)
            }
            EncodeError::HighByteConflict { mnemonic } => write!(
                f,
                "'{}': ah/ch/dh/bh cannot be encoded with a REX prefix",
                mnemonic
            ),
            EncodeError::DuplicateLabel { label } => {
                write!(f, "label {} is already bound", label)
            }
            EncodeError::MissingLabel => write!(f, "label definition without a label operand"),
            EncodeError::Output { detail } => write!(f, "output error: {}", detail),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> Self {
        use alloc::string::ToString;
        EncodeError::Output {
            detail: e.to_string(),
        }
    }
}

impl From<fmt::Error> for EncodeError {
    fn from(_: fmt::Error) -> Self {
        EncodeError::Output {
            detail: String::from("formatter error"),
        }
    }
}
