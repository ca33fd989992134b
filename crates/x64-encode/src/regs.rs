//! Named register constants.
//!
//! ```
//! use x64_encode::regs::*;
//!
//! assert_eq!(R9D.parent(), R9);
//! assert!(SIL.requires_rex_for_byte());
//! ```

#![allow(missing_docs)]

use crate::operand::{Register, Width};

macro_rules! registers {
    ($width:ident: $($name:ident = $index:literal),* $(,)?) => {
        $(pub const $name: Register = Register::new(Width::$width, $index);)*
    };
}

registers!(W64:
    RAX = 0, RCX = 1, RDX = 2, RBX = 3, RSP = 4, RBP = 5, RSI = 6, RDI = 7,
    R8 = 8, R9 = 9, R10 = 10, R11 = 11, R12 = 12, R13 = 13, R14 = 14, R15 = 15,
);

registers!(W32:
    EAX = 0, ECX = 1, EDX = 2, EBX = 3, ESP = 4, EBP = 5, ESI = 6, EDI = 7,
    R8D = 8, R9D = 9, R10D = 10, R11D = 11, R12D = 12, R13D = 13, R14D = 14, R15D = 15,
);

registers!(W16:
    AX = 0, CX = 1, DX = 2, BX = 3, SP = 4, BP = 5, SI = 6, DI = 7,
    R8W = 8, R9W = 9, R10W = 10, R11W = 11, R12W = 12, R13W = 13, R14W = 14, R15W = 15,
);

registers!(W8:
    AL = 0, CL = 1, DL = 2, BL = 3, SPL = 4, BPL = 5, SIL = 6, DIL = 7,
    R8B = 8, R9B = 9, R10B = 10, R11B = 11, R12B = 12, R13B = 13, R14B = 14, R15B = 15,
);

pub const AH: Register = Register::high_byte(4);
pub const CH: Register = Register::high_byte(5);
pub const DH: Register = Register::high_byte(6);
pub const BH: Register = Register::high_byte(7);

/// All sixteen 64-bit registers in encoding order.
pub const GPR64: [Register; 16] = [
    RAX, RCX, RDX, RBX, RSP, RBP, RSI, RDI, R8, R9, R10, R11, R12, R13, R14, R15,
];
