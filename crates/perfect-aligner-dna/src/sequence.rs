//! Immutable DNA sequences with a description line.

use crate::base::{self, Base};

/// A sequence of bases together with its FASTA defline (without the leading `>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnaSequence {
    defline: String,
    bases: Vec<Base>,
}

impl DnaSequence {
    /// Create a sequence from already-decoded bases.
    #[must_use]
    pub fn new(defline: impl Into<String>, bases: Vec<Base>) -> Self {
        Self { defline: defline.into(), bases }
    }

    /// Create a sequence from ASCII letters; non-ACGT letters become `N`.
    ///
    /// ```
    /// use perfect_aligner_dna::{Base, DnaSequence};
    ///
    /// let seq = DnaSequence::from_ascii("chr1", b"ACgt");
    /// assert_eq!(seq.bases(), &[Base::A, Base::C, Base::G, Base::T]);
    /// ```
    #[must_use]
    pub fn from_ascii(defline: impl Into<String>, letters: &[u8]) -> Self {
        Self::new(defline, letters.iter().map(|&b| Base::from_ascii(b)).collect())
    }

    /// The description line.
    #[must_use]
    pub fn defline(&self) -> &str {
        &self.defline
    }

    #[must_use]
    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Upper-case ASCII rendering of the bases.
    #[must_use]
    pub fn to_ascii(&self) -> Vec<u8> {
        base::to_ascii(&self.bases)
    }

    /// Number of `N` bases.
    #[must_use]
    pub fn n_count(&self) -> usize {
        self.bases.iter().filter(|b| !b.is_resolved()).count()
    }

    /// Fraction of resolved bases that are G or C; `0.0` when nothing is resolved.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn gc_fraction(&self) -> f64 {
        let resolved = self.len() - self.n_count();
        if resolved == 0 {
            return 0.0;
        }
        let gc = self.bases.iter().filter(|b| matches!(b, Base::G | Base::C)).count();
        gc as f64 / resolved as f64
    }
}
