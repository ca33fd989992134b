//! Label binding and rel32 fix-ups.
//!
//! Labels are bound to output offsets as label definitions are assembled.
//! Every rel32 field emitted for a label reference is recorded as a
//! [`Fixup`] and patched in one pass when the session finishes, so forward
//! and backward references are handled alike.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::operand::Label;

/// A rel32 field awaiting its displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixup {
    /// Offset of the 4-byte field in the output.
    pub offset: usize,
    /// The referenced label.
    pub label: Label,
}

impl Fixup {
    /// Displacement from the end of the field to `target`.
    pub fn displacement(&self, target: usize) -> i32 {
        (target as i64 - self.offset as i64 - 4) as i32
    }
}

/// Label table and pending fix-ups for one session.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    labels: BTreeMap<Label, usize>,
    fixups: Vec<Fixup>,
    unresolved: Vec<Label>,
}

impl Resolver {
    /// Empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all bindings and fix-ups.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.fixups.clear();
        self.unresolved.clear();
    }

    /// Bind `label` to `offset`, returning the previous binding if any.
    /// The new binding always replaces the old one.
    pub fn bind(&mut self, label: Label, offset: usize) -> Option<usize> {
        self.labels.insert(label, offset)
    }

    /// Offset bound to `label`.
    pub fn offset(&self, label: Label) -> Option<usize> {
        self.labels.get(&label).copied()
    }

    /// Record a rel32 field at `offset` referring to `label`.
    pub fn record(&mut self, offset: usize, label: Label) {
        self.fixups.push(Fixup { offset, label });
    }

    /// Pending fix-ups in emission order.
    pub fn fixups(&self) -> &[Fixup] {
        &self.fixups
    }

    /// Labels referenced but never bound, as found by the last [`patch`](Self::patch).
    /// A label appears once per unresolved reference.
    pub fn unresolved(&self) -> &[Label] {
        &self.unresolved
    }

    /// Write every recorded displacement into `code`. References to labels
    /// that were never bound get displacement 0 and are listed in
    /// [`unresolved`](Self::unresolved).
    ///
    /// # Panics
    ///
    /// Panics if a fix-up lies outside `code`.
    pub fn patch(&mut self, code: &mut [u8]) {
        self.unresolved.clear();
        for fixup in &self.fixups {
            let disp = match self.labels.get(&fixup.label) {
                Some(&target) => fixup.displacement(target),
                None => {
                    log::debug!(
                        "label {} unresolved, rel32 at {:#x} left as 0",
                        fixup.label,
                        fixup.offset
                    );
                    self.unresolved.push(fixup.label);
                    0
                }
            };
            code[fixup.offset..fixup.offset + 4].copy_from_slice(&disp.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn forward_reference() {
        let mut r = Resolver::new();
        let mut code = vec![0xE9, 0xAA, 0xAA, 0xAA, 0xAA, 0x90];
        r.record(1, Label::new(0));
        r.bind(Label::new(0), 5);
        r.patch(&mut code);
        assert_eq!(code, vec![0xE9, 0x00, 0x00, 0x00, 0x00, 0x90]);
        assert!(r.unresolved().is_empty());
    }

    #[test]
    fn backward_reference() {
        let mut r = Resolver::new();
        r.bind(Label::new(1), 0);
        let mut code = vec![0x90, 0xE9, 0, 0, 0, 0];
        r.record(2, Label::new(1));
        r.patch(&mut code);
        let rel = i32::from_le_bytes([code[2], code[3], code[4], code[5]]);
        assert_eq!(rel, -6);
    }

    #[test]
    fn unbound_label_gets_zero() {
        let mut r = Resolver::new();
        let mut code = vec![0xE8, 0xFF, 0xFF, 0xFF, 0xFF];
        r.record(1, Label::new(9));
        r.patch(&mut code);
        assert_eq!(code, vec![0xE8, 0, 0, 0, 0]);
        assert_eq!(r.unresolved(), &[Label::new(9)]);
    }

    #[test]
    fn rebinding_replaces() {
        let mut r = Resolver::new();
        assert_eq!(r.bind(Label::new(2), 4), None);
        assert_eq!(r.bind(Label::new(2), 8), Some(4));
        assert_eq!(r.offset(Label::new(2)), Some(8));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut r = Resolver::new();
        r.bind(Label::new(0), 1);
        r.record(0, Label::new(0));
        r.clear();
        assert_eq!(r.offset(Label::new(0)), None);
        assert!(r.fixups().is_empty());
    }
}
