//! Reconciliation of two independent tiling passes into one reference.
//!
//! The primary set P holds where reads truly come from; the secondary set S
//! holds where the same reads are also (mis)placed. For every read present in
//! both whose placements do not overlap, the two reference windows are filled
//! from each other, so that a read's secondary placement resembles its primary
//! one wherever earlier fills allow. Afterwards every coordinate under any
//! alignment of P or S is resolved.

use crate::alignment::{Alignment, AlignmentSet};
use crate::reference::ReferenceBuffer;
use crate::simulate::rng::random_base;
use log::debug;
use rand::Rng;

/// Counters describing one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Reads present in both sets
    pub common: usize,
    /// Common reads whose two placements overlap and were left alone
    pub overlapping: usize,
    /// Coordinates copied from the counterpart window
    pub copied: usize,
    /// Coordinates given a fresh random base during the pairwise fill
    pub randomized: usize,
    /// Coordinates resolved by the final sweep over all alignments
    pub swept: usize,
}

/// Output of [`reconcile`]: both alignment sets and the reference they share.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub primary: AlignmentSet,
    pub secondary: AlignmentSet,
    pub reference: ReferenceBuffer,
    pub stats: ReconcileStats,
}

impl Reconciliation {
    /// Number of resolved reference coordinates.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.reference.resolved_count()
    }
}

/// Build the shared reference for `primary` and `secondary`.
///
/// The buffer is sized to the largest alignment end of either set.
///
/// ```
/// use perfect_aligner_lib::alignment::{Alignment, AlignmentSet, ReadNumber};
/// use perfect_aligner_lib::reconcile::reconcile;
/// use perfect_aligner_lib::simulate::create_rng;
///
/// let p = AlignmentSet::from_alignments([Alignment::new("1", ReadNumber::First, 0..10, false)]);
/// let s = AlignmentSet::from_alignments([Alignment::new("1", ReadNumber::First, 20..30, false)]);
/// let result = reconcile(p, s, &mut create_rng(Some(1)));
/// assert_eq!(result.reference.slice(0..10), result.reference.slice(20..30));
/// assert!(!result.reference.get(15).unwrap().is_resolved());
/// ```
pub fn reconcile(
    primary: AlignmentSet,
    secondary: AlignmentSet,
    rng: &mut impl Rng,
) -> Reconciliation {
    let size = primary.max_end().max(secondary.max_end());
    let mut reference = ReferenceBuffer::unresolved(size);
    let mut stats = ReconcileStats::default();

    for sa in secondary.intersection(&primary) {
        let Some(pa) = primary.counterpart(sa) else { continue };
        stats.common += 1;
        if pa.overlaps(sa) {
            stats.overlapping += 1;
            continue;
        }
        cross_fill(&mut reference, pa, sa, rng, &mut stats);
        cross_fill(&mut reference, sa, pa, rng, &mut stats);
    }

    for alignment in primary.iter().chain(secondary.iter()) {
        stats.swept += reference.fill_unresolved(alignment.range.clone(), rng);
    }

    debug!("Reconciliation: {stats:?}");
    Reconciliation { primary, secondary, reference, stats }
}

/// Resolve every unresolved coordinate of `target` from the same offset in
/// `source`, or with a random base when `source` has nothing there.
fn cross_fill(
    reference: &mut ReferenceBuffer,
    target: &Alignment,
    source: &Alignment,
    rng: &mut impl Rng,
    stats: &mut ReconcileStats,
) {
    for (i, pos) in target.range.clone().enumerate() {
        if reference.resolved(pos).is_some() {
            continue;
        }
        let copied = (i < source.len()).then(|| reference.resolved(source.start() + i)).flatten();
        let base = match copied {
            Some(base) => {
                stats.copied += 1;
                base
            }
            None => {
                stats.randomized += 1;
                random_base(rng)
            }
        };
        reference.set(pos, base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::ReadNumber;
    use crate::simulate::{SimulationConfig, create_rng, simulate};
    use perfect_aligner_dna::Base;

    fn aln(name: &str, rn: ReadNumber, range: std::ops::Range<usize>) -> Alignment {
        Alignment::new(name, rn, range, false)
    }

    #[test]
    fn test_buffer_sized_to_max_end() {
        let p = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 0..10)]);
        let s = AlignmentSet::from_alignments([aln("9", ReadNumber::First, 40..55)]);
        let result = reconcile(p, s, &mut create_rng(Some(1)));
        assert_eq!(result.reference.len(), 55);
        assert_eq!(result.stats.common, 0);
        assert_eq!(result.resolved(), 25);
    }

    #[test]
    fn test_non_overlapping_pair_is_cross_filled() {
        let p = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 0..100)]);
        let s = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 500..600)]);
        let result = reconcile(p, s, &mut create_rng(Some(2)));
        assert_eq!(result.reference.slice(0..100), result.reference.slice(500..600));
        assert_eq!(result.stats.randomized, 100);
        assert_eq!(result.stats.copied, 100);
        assert_eq!(result.stats.swept, 0);
    }

    #[test]
    fn test_overlapping_pair_is_skipped_then_swept() {
        let p = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 0..100)]);
        let s = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 50..150)]);
        let result = reconcile(p, s, &mut create_rng(Some(3)));
        assert_eq!(result.stats.overlapping, 1);
        assert_eq!(result.stats.copied + result.stats.randomized, 0);
        assert_eq!(result.stats.swept, 150);
        assert_eq!(result.resolved(), 150);
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let p = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 0..100)]);
        let s = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 100..200)]);
        let result = reconcile(p, s, &mut create_rng(Some(4)));
        assert_eq!(result.stats.overlapping, 0);
        assert_eq!(result.reference.slice(0..100), result.reference.slice(100..200));
    }

    #[test]
    fn test_existing_bases_are_kept() {
        // Read 2 lands on the window read 1 already resolved; its own
        // counterpart must then copy what is there.
        let p = AlignmentSet::from_alignments([
            aln("1", ReadNumber::First, 0..50),
            aln("2", ReadNumber::First, 100..150),
        ]);
        let s = AlignmentSet::from_alignments([
            aln("1", ReadNumber::First, 300..350),
            aln("2", ReadNumber::First, 300..350),
        ]);
        let result = reconcile(p, s, &mut create_rng(Some(5)));
        let window = result.reference.slice(300..350);
        assert_eq!(window, result.reference.slice(0..50));
        assert_eq!(window, result.reference.slice(100..150));
    }

    #[test]
    fn test_shorter_source_falls_back_to_random() {
        let p = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 0..20)]);
        let s = AlignmentSet::from_alignments([aln("1", ReadNumber::First, 100..110)]);
        let result = reconcile(p, s, &mut create_rng(Some(6)));
        assert_eq!(result.stats.randomized, 20);
        assert_eq!(result.stats.copied, 10);
        assert_eq!(result.reference.slice(0..10), result.reference.slice(100..110));
    }

    #[test]
    fn test_every_aligned_coordinate_is_resolved() {
        let config =
            SimulationConfig { reference_length: 20_000, depth_of_coverage: 2.0, ..Default::default() };
        let result = simulate(&config, &mut create_rng(Some(7))).unwrap();
        let mut covered = vec![false; result.reference.len()];
        for alignment in result.primary.iter().chain(result.secondary.iter()) {
            for pos in alignment.range.clone() {
                covered[pos] = true;
                assert_ne!(result.reference.get(pos), Some(Base::N), "unresolved at {pos}");
            }
        }
        for (pos, &is_covered) in covered.iter().enumerate() {
            if !is_covered {
                assert_eq!(result.reference.get(pos), Some(Base::N));
            }
        }
    }
}
