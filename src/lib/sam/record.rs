//! One simulated alignment and its conversion to a noodles record.

use noodles::core::Position;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::data::field::Value as BufValue;
use noodles::sam::alignment::record_buf::{QualityScores, RecordBuf, Sequence};

use crate::errors::{Result, SimulationError};

/// MAPQ of primary records.
pub const PRIMARY_MAPQ: u8 = 30;
/// MAPQ of secondary records.
pub const SECONDARY_MAPQ: u8 = 3;

/// One alignment record against the single simulated reference. Every record
/// is a full match, so the CIGAR is `<len>M` and the mate is on the same
/// reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamRecord {
    pub qname: String,
    pub flag: u16,
    /// 1-based leftmost position
    pub pos: usize,
    pub mapq: u8,
    /// 1-based leftmost position of the mate
    pub pnext: usize,
    pub tlen: i64,
    pub seq: Vec<u8>,
    /// Raw Phred scores, one per base
    pub qual: Vec<u8>,
    /// Edit distance to the reference, written as `NM`
    pub nm: Option<usize>,
}

impl SamRecord {
    /// Build the noodles record, placed on reference sequence 0.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is zero or the template length or
    /// edit distance does not fit the SAM integer types.
    pub fn to_record_buf(&self) -> Result<RecordBuf> {
        let position = |pos: usize, field: &str| {
            Position::new(pos).ok_or_else(|| invalid_record(&self.qname, format!("{field} is 0")))
        };
        let tlen = i32::try_from(self.tlen)
            .map_err(|_| invalid_record(&self.qname, format!("TLEN {} out of range", self.tlen)))?;

        let mut record = RecordBuf::default();
        *record.name_mut() = Some(self.qname.clone().into());
        *record.flags_mut() = Flags::from(self.flag);
        *record.reference_sequence_id_mut() = Some(0);
        *record.alignment_start_mut() = Some(position(self.pos, "POS")?);
        *record.mapping_quality_mut() = MappingQuality::new(self.mapq);
        *record.cigar_mut() = [Op::new(Kind::Match, self.seq.len())].into_iter().collect();
        *record.mate_reference_sequence_id_mut() = Some(0);
        *record.mate_alignment_start_mut() = Some(position(self.pnext, "PNEXT")?);
        *record.template_length_mut() = tlen;
        *record.sequence_mut() = Sequence::from(self.seq.clone());
        *record.quality_scores_mut() = QualityScores::from(self.qual.clone());

        if let Some(nm) = self.nm {
            let nm = i32::try_from(nm)
                .map_err(|_| invalid_record(&self.qname, format!("NM {nm} out of range")))?;
            record.data_mut().insert(Tag::EDIT_DISTANCE, BufValue::from(nm));
        }
        Ok(record)
    }
}

fn invalid_record(qname: &str, reason: String) -> SimulationError {
    SimulationError::invalid_parameter("reference-length", format!("record {qname}: {reason}"))
}
