//! ModR/M and SIB byte lookup.
//!
//! A single 4×16×16 table serves both bytes. Indexed as `[mode][rm][reg]`
//! it yields `mode<<6 | (reg&7)<<3 | (rm&7)`, which is the ModR/M byte. A SIB
//! byte has the same bit layout (`scale<<6 | index<<3 | base`), so indexing
//! the same table as `[scale][base][index]` yields the SIB byte.
//!
//! The two middle dimensions take full 4-bit register encodings; bit 3 is
//! discarded here and travels in the REX prefix instead.

type Table = [[[u8; 16]; 16]; 4];

const fn build() -> Table {
    let mut table = [[[0u8; 16]; 16]; 4];
    let mut mode = 0;
    while mode < 4 {
        let mut rm = 0;
        while rm < 16 {
            let mut reg = 0;
            while reg < 16 {
                table[mode][rm][reg] =
                    ((mode as u8) << 6) | (((reg & 7) as u8) << 3) | (rm & 7) as u8;
                reg += 1;
            }
            rm += 1;
        }
        mode += 1;
    }
    table
}

static TABLE: Table = build();

/// The ModR/M byte for `mode` (0–3), r/m field `rm` and reg field `reg`
/// (register encoding or `/digit` extension, 0–15).
#[inline]
pub fn mod_rm(mode: u8, rm: u8, reg: u8) -> u8 {
    debug_assert!(mode < 4, "ModR/M mode out of range: {mode}");
    debug_assert!(rm < 16 && reg < 16, "register encoding out of range");
    TABLE[mode as usize][rm as usize][reg as usize]
}

/// The SIB byte for `scale` (0–3), `index` and `base`.
#[inline]
pub fn sib(scale: u8, index: u8, base: u8) -> u8 {
    debug_assert!(scale < 4, "SIB scale out of range: {scale}");
    debug_assert!(index < 16 && base < 16, "register encoding out of range");
    TABLE[scale as usize][base as usize][index as usize]
}
