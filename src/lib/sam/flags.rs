//! SAM flag bit masks and the flag word of a simulated pair.

use crate::alignment::{Alignment, ReadNumber};

pub const PAIRED: u16 = 0x1; // Template having multiple segments in sequencing
pub const PROPER_PAIR: u16 = 0x2; // Each segment properly aligned
pub const REVERSE: u16 = 0x10; // SEQ being reverse complemented
pub const MATE_REVERSE: u16 = 0x20; // SEQ of the next segment reverse complemented
pub const FIRST_IN_PAIR: u16 = 0x40; // The first segment in the template
pub const SECOND_IN_PAIR: u16 = 0x80; // The last segment in the template
pub const SECONDARY: u16 = 0x100; // Secondary alignment

/// Flags of `read` aligned as a proper pair with `mate`.
#[must_use]
pub fn pair_flags(read: &Alignment, mate: &Alignment) -> u16 {
    let mut flags = PAIRED | PROPER_PAIR;
    if read.reversed {
        flags |= REVERSE;
    }
    if mate.reversed {
        flags |= MATE_REVERSE;
    }
    flags |= match read.read_number {
        ReadNumber::First => FIRST_IN_PAIR,
        ReadNumber::Second => SECOND_IN_PAIR,
    };
    flags
}
