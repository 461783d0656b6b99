//! SAM serialization of reconciled alignments.
//!
//! Every primary alignment yields one record. When the same read also has a
//! secondary placement, a second record follows it, flagged `0x100`, unless
//! the primary read's bases disagree with the reference at the secondary
//! placement in more than half of its positions.
//!
//! # Record fields
//!
//! - `FLAG` - see [`flags::pair_flags`]
//! - `POS`/`PNEXT` - 1-based starts of the read and its mate
//! - `TLEN` - [`crate::alignment::template_length`]
//! - `SEQ` - reference bases under the primary placement
//! - `QUAL` - drawn from a [`QualityModel`], shared by both records of a read

pub mod flags;
pub mod record;

pub use record::{PRIMARY_MAPQ, SECONDARY_MAPQ, SamRecord};

use crate::alignment::{Alignment, template_length};
use crate::errors::{Result, SimulationError};
use crate::reconcile::Reconciliation;
use crate::reference::ReferenceBuffer;
use crate::simulate::QualityModel;
use bstr::BString;
use noodles::sam;
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::header::record::value::Map;
use noodles::sam::header::record::value::map::ReferenceSequence;
use noodles::sam::header::record::value::map::header::{
    self as HeaderRecord, Version, tag as header_tag,
};
use perfect_aligner_dna::base::to_ascii;
use rand::Rng;
use std::io::{self, Write};
use std::num::NonZeroUsize;

/// Counts of records written by [`SamWriter::write_alignments`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamSummary {
    pub primary_records: u64,
    pub secondary_records: u64,
    /// Secondary placements too divergent to write
    pub suppressed_secondaries: u64,
}

impl SamSummary {
    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.primary_records + self.secondary_records
    }
}

/// Number of positions where `seq` differs from `reference` at `start`.
/// Positions past the end of the buffer count as mismatches.
#[must_use]
pub fn mismatch_count(seq: &[u8], reference: &ReferenceBuffer, start: usize) -> usize {
    seq.iter()
        .enumerate()
        .filter(|&(i, &b)| reference.get(start + i).is_none_or(|r| r.to_ascii() != b))
        .count()
}

/// Writes the header and records of one reference to a SAM stream.
pub struct SamWriter<W: Write> {
    writer: sam::io::Writer<W>,
    reference_name: String,
}

impl<W: Write> SamWriter<W> {
    pub fn new(inner: W, reference_name: impl Into<String>) -> Self {
        Self { writer: sam::io::Writer::new(inner), reference_name: reference_name.into() }
    }

    /// Write the `@HD` and `@SQ` header lines and return the header the
    /// records are written against.
    ///
    /// # Errors
    ///
    /// Returns an error if `reference_length` is zero or the underlying writer fails.
    pub fn write_header(&mut self, reference_length: usize) -> Result<Header> {
        let header = build_header(&self.reference_name, reference_length)?;
        self.writer.write_header(&header)?;
        Ok(header)
    }

    /// Write the header and every record of `reconciliation`.
    ///
    /// Pairing is checked for all alignments before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::SimulationError::MissingMate`] when a primary
    /// alignment, or a secondary alignment to be written, lacks a mate in its
    /// own set; or an I/O error from the underlying writer.
    pub fn write_alignments(
        &mut self,
        reconciliation: &Reconciliation,
        quality: &QualityModel,
        rng: &mut impl Rng,
    ) -> Result<SamSummary> {
        check_pairing(reconciliation)?;

        let Reconciliation { primary, secondary, reference, .. } = reconciliation;
        let header = self.write_header(reference.len())?;

        let mut summary = SamSummary::default();
        for pa in primary {
            let mate = primary.mate_of(pa, "primary")?;
            let seq = to_ascii(reference.slice(pa.range.clone()));
            let qual = quality.generate_qualities(seq.len(), rng);

            let secondary_record = match secondary.counterpart(pa) {
                Some(sa) => {
                    let nm = mismatch_count(&seq, reference, sa.start());
                    if 2 * nm > sa.len() {
                        summary.suppressed_secondaries += 1;
                        None
                    } else {
                        let smate = secondary.mate_of(sa, "secondary")?;
                        Some(secondary_record(sa, smate, &seq, &qual, nm))
                    }
                }
                None => None,
            };

            let record = primary_record(pa, mate, seq, qual).to_record_buf()?;
            self.writer.write_alignment_record(&header, &record)?;
            summary.primary_records += 1;
            if let Some(record) = secondary_record {
                self.writer.write_alignment_record(&header, &record.to_record_buf()?)?;
                summary.secondary_records += 1;
            }
        }
        Ok(summary)
    }

    /// Flush and return the inner writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> Result<W> {
        self.writer.get_mut().flush()?;
        Ok(self.writer.into_inner())
    }
}

/// Header with `VN:1.0`, `SO:unknown` and a single reference sequence.
fn build_header(reference_name: &str, reference_length: usize) -> Result<Header> {
    let length = NonZeroUsize::new(reference_length).ok_or_else(|| {
        SimulationError::invalid_parameter("reference-length", "Reference has no bases to write")
    })?;

    let header_map = Map::<HeaderRecord::Header>::builder()
        .set_version(Version::new(1, 0))
        .insert(header_tag::SORT_ORDER, BString::from("unknown"))
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    Ok(Header::builder()
        .set_header(header_map)
        .add_reference_sequence(BString::from(reference_name), Map::<ReferenceSequence>::new(length))
        .build())
}

fn primary_record(pa: &Alignment, mate: &Alignment, seq: Vec<u8>, qual: Vec<u8>) -> SamRecord {
    SamRecord {
        qname: pa.name.clone(),
        flag: flags::pair_flags(pa, mate),
        pos: pa.start() + 1,
        mapq: PRIMARY_MAPQ,
        pnext: mate.start() + 1,
        tlen: template_length(pa, mate),
        seq,
        qual,
        nm: None,
    }
}

fn secondary_record(
    sa: &Alignment,
    mate: &Alignment,
    seq: &[u8],
    qual: &[u8],
    nm: usize,
) -> SamRecord {
    SamRecord {
        qname: sa.name.clone(),
        flag: flags::pair_flags(sa, mate) | flags::SECONDARY,
        pos: sa.start() + 1,
        mapq: SECONDARY_MAPQ,
        pnext: mate.start() + 1,
        tlen: template_length(sa, mate),
        seq: seq.to_vec(),
        qual: qual.to_vec(),
        nm: Some(nm),
    }
}

/// Every primary alignment needs a mate in the primary set, and every
/// secondary counterpart of a primary needs one in the secondary set.
///
/// # Errors
///
/// Returns [`SimulationError::MissingMate`] for the first unpaired alignment.
pub fn check_pairing(reconciliation: &Reconciliation) -> Result<()> {
    let Reconciliation { primary, secondary, .. } = reconciliation;
    for pa in primary {
        primary.mate_of(pa, "primary")?;
        if let Some(sa) = secondary.counterpart(pa) {
            secondary.mate_of(sa, "secondary")?;
        }
    }
    Ok(())
}
