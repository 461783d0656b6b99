//! Tiling of spots along the reference until a target depth is reached.

use crate::alignment::{Alignment, ReadNumber};
use crate::progress::ProgressTracker;
use crate::simulate::rng::uniform_int;
use crate::simulate::spots::Spot;
use log::debug;
use rand::Rng;

/// Smallest jitter window between consecutive spots.
pub const MIN_STEP: usize = 100;

/// Place spots along a reference of `reference_length` until the bases
/// sequenced exceed `depth_of_coverage` times the reference length.
///
/// A cursor starts at 0. Each spot's reads are placed relative to the cursor,
/// then the cursor advances by a uniform draw below `max(100, spot span)`,
/// wrapping at the reference length. Alignments may extend past
/// `reference_length` when a spot is placed near the end.
///
/// Returns alignments in placement order. Stops early if `spots` runs dry.
///
/// ```
/// use perfect_aligner_lib::simulate::{LibraryModel, SpotGenerator, create_rng};
/// use perfect_aligner_lib::tiling::tile;
///
/// let spots = SpotGenerator::new(LibraryModel::default(), create_rng(Some(1))).unwrap();
/// let alignments = tile(10_000, 1.0, spots, &mut create_rng(Some(2)));
/// let bases: usize = alignments.iter().map(|a| a.len()).sum();
/// assert!(bases > 10_000);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn tile<I>(
    reference_length: usize,
    depth_of_coverage: f64,
    spots: I,
    rng: &mut impl Rng,
) -> Vec<Alignment>
where
    I: IntoIterator<Item = Spot>,
{
    let progress = ProgressTracker::new("Tiled spots").with_interval(100_000);
    let mut alignments = Vec::new();
    let mut pos = 0_usize;
    let mut coverage = 0_usize;

    for spot in spots {
        let span = spot.reads.iter().map(|r| r.end()).max().unwrap_or(0);
        let step = span.max(MIN_STEP);
        for (read, read_number) in spot.reads.iter().zip([ReadNumber::First, ReadNumber::Second]) {
            let start = pos + read.position;
            alignments.push(Alignment::new(
                spot.name.clone(),
                read_number,
                start..start + read.length,
                read.reversed,
            ));
            coverage += read.length;
        }
        progress.log_if_needed(1);

        if coverage as f64 / reference_length as f64 > depth_of_coverage {
            break;
        }
        pos = (pos + uniform_int(rng, step)) % reference_length;
    }

    progress.log_final();
    debug!("Tiled {} alignments covering {coverage} bases", alignments.len());
    alignments
}
