//! The nucleotide alphabet.
//!
//! Bases are stored as small integers so that a whole reference can live in a
//! `Vec<Base>` of one byte per position. Code `0` is `N`, which also means
//! "not yet resolved" while a reference is being synthesized.
//!
//! # Example
//!
//! ```
//! use perfect_aligner_dna::Base;
//!
//! assert_eq!(Base::from_ascii(b'g'), Base::G);
//! assert_eq!(Base::G.to_ascii(), b'G');
//! assert!(!Base::N.is_resolved());
//! ```

use std::fmt;

/// A single nucleotide, encoded as `N=0, A=1, C=2, G=3, T=4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Base {
    /// Unknown or unresolved.
    #[default]
    N = 0,
    A = 1,
    C = 2,
    G = 3,
    T = 4,
}

impl Base {
    /// The four concrete bases, in code order.
    pub const ACGT: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    /// Decode an ASCII byte. Anything other than `ACGTacgt` becomes [`Base::N`].
    #[inline]
    #[must_use]
    pub const fn from_ascii(byte: u8) -> Self {
        match byte {
            b'A' | b'a' => Base::A,
            b'C' | b'c' => Base::C,
            b'G' | b'g' => Base::G,
            b'T' | b't' => Base::T,
            _ => Base::N,
        }
    }

    /// Upper-case ASCII letter.
    #[inline]
    #[must_use]
    pub const fn to_ascii(self) -> u8 {
        match self {
            Base::N => crate::NO_CALL_BASE,
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
        }
    }

    /// `true` for A, C, G and T.
    #[inline]
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Base::N)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.to_ascii()))
    }
}

/// Render bases as upper-case ASCII.
///
/// ```
/// use perfect_aligner_dna::Base;
/// use perfect_aligner_dna::base::to_ascii;
///
/// assert_eq!(to_ascii(&[Base::A, Base::N, Base::T]), b"ANT".to_vec());
/// ```
#[must_use]
pub fn to_ascii(bases: &[Base]) -> Vec<u8> {
    bases.iter().map(|b| b.to_ascii()).collect()
}
