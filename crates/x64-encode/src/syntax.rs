//! Textual rendering of instructions.

use core::fmt;

use crate::instruction::{Instruction, Opcode};
use crate::operand::{Mem, Operand};

/// Assembly syntax flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Syntax {
    /// Intel: destination first, bare register names.
    #[default]
    Intel,
    /// AT&T: source first, `%` registers, `$` immediates.
    Att,
}

/// Returned by [`Instruction::display`].
pub struct InstructionDisplay<'a> {
    instr: &'a Instruction,
    syntax: Syntax,
}

impl<'a> InstructionDisplay<'a> {
    pub(crate) fn new(instr: &'a Instruction, syntax: Syntax) -> Self {
        Self { instr, syntax }
    }
}

impl fmt::Display for InstructionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instr = self.instr;
        if instr.opcode() == Opcode::LABEL {
            return match instr.operand(0) {
                Some(Operand::Label(l)) => write!(f, "{}:", l),
                _ => f.write_str("<label>:"),
            };
        }
        write!(f, "{}", instr.opcode())?;
        let ops = instr.operands();
        match self.syntax {
            Syntax::Intel => {
                for (i, op) in ops.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    write!(f, "{}", op)?;
                }
            }
            Syntax::Att => {
                for (i, op) in ops.iter().rev().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    att_operand(f, op)?;
                }
            }
        }
        Ok(())
    }
}

fn att_operand(f: &mut fmt::Formatter<'_>, op: &Operand) -> fmt::Result {
    match op {
        Operand::Register(r) => write!(f, "%{}", r),
        Operand::Immediate(i) => write!(f, "${}", i),
        Operand::Label(l) => write!(f, "{}", l),
        Operand::Memory(m) => att_mem(f, m),
    }
}

fn att_mem(f: &mut fmt::Formatter<'_>, m: &Mem) -> fmt::Result {
    if let Some(seg) = m.segment() {
        write!(f, "%{}:", seg.name())?;
    }
    let disp = m.get_disp();
    let bare = m.get_base().is_none() && m.get_index().is_none() && !m.is_rip_relative();
    if disp != 0 || bare {
        if disp < 0 {
            write!(f, "-0x{:x}", disp.unsigned_abs())?;
        } else {
            write!(f, "0x{:x}", disp)?;
        }
    }
    if bare {
        return Ok(());
    }
    f.write_str("(")?;
    if m.is_rip_relative() {
        f.write_str("%rip")?;
    }
    if let Some(base) = m.get_base() {
        write!(f, "%{}", base)?;
    }
    if let Some(index) = m.get_index() {
        write!(f, ",%{},{}", index, m.get_scale().factor())?;
    }
    f.write_str(")")
}
