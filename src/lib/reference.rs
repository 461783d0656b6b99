//! The synthetic reference: an owned buffer of bases and its FASTA writer.
//!
//! The buffer starts with every coordinate unresolved ([`Base::N`]) and is
//! filled by reconciliation. Once handed to the serializers it is only read.

use bstr::BString;
use noodles::fasta;
use noodles::fasta::record::Definition;
use perfect_aligner_dna::Base;
use rand::Rng;
use std::io::{self, Write};
use std::ops::Range;

use crate::simulate::rng::random_base;

/// Default FASTA line width.
pub const DEFAULT_LINE_WIDTH: usize = 70;

/// A mutable arena of reference bases indexed by global coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceBuffer {
    bases: Vec<Base>,
}

impl ReferenceBuffer {
    /// A buffer of `len` unresolved bases.
    #[must_use]
    pub fn unresolved(len: usize) -> Self {
        Self { bases: vec![Base::N; len] }
    }

    /// Wrap existing bases, e.g. a decoded FASTA record.
    #[must_use]
    pub fn from_bases(bases: Vec<Base>) -> Self {
        Self { bases }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// The base at `pos`, or `None` past the end.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<Base> {
        self.bases.get(pos).copied()
    }

    /// The resolved base at `pos`, or `None` when unresolved or out of range.
    #[must_use]
    pub fn resolved(&self, pos: usize) -> Option<Base> {
        self.get(pos).filter(|b| b.is_resolved())
    }

    /// Set the base at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    pub fn set(&mut self, pos: usize, base: Base) {
        self.bases[pos] = base;
    }

    /// Bases over `range`, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &[Base] {
        let end = range.end.min(self.bases.len());
        let start = range.start.min(end);
        &self.bases[start..end]
    }

    #[must_use]
    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    /// Number of resolved coordinates.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.bases.iter().filter(|b| b.is_resolved()).count()
    }

    /// Give every unresolved coordinate in `range` a random base.
    /// Returns the number of coordinates filled.
    pub fn fill_unresolved(&mut self, range: Range<usize>, rng: &mut impl Rng) -> usize {
        let end = range.end.min(self.bases.len());
        let start = range.start.min(end);
        let mut filled = 0;
        for base in &mut self.bases[start..end] {
            if !base.is_resolved() {
                *base = random_base(rng);
                filled += 1;
            }
        }
        filled
    }

    /// Give every unresolved coordinate of the whole buffer a random base.
    pub fn fill_gaps(&mut self, rng: &mut impl Rng) -> usize {
        self.fill_unresolved(0..self.bases.len(), rng)
    }
}

/// Writes sequences as FASTA with fixed-width sequence lines.
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::reference::FastaWriter;
/// use perfect_aligner_dna::decode;
///
/// let mut out = Vec::new();
/// let mut writer = FastaWriter::new(&mut out, 4);
/// let bases = decode(b">x\nACGTAC\n").unwrap().remove(0);
/// writer.write_record("R test", bases.bases()).unwrap();
/// assert_eq!(out, b">R test\nACGT\nAC\n");
/// ```
pub struct FastaWriter<W: Write> {
    writer: fasta::io::Writer<W>,
}

impl<W: Write> FastaWriter<W> {
    /// Create a writer; a `line_width` of zero writes each sequence on one line.
    pub fn new(inner: W, line_width: usize) -> Self {
        let line_base_count = if line_width == 0 { usize::MAX } else { line_width };
        let writer = fasta::io::writer::Builder::default()
            .set_line_base_count(line_base_count)
            .build_from_writer(inner);
        Self { writer }
    }

    /// Write one record. The defline splits at its first space into name and
    /// description. An empty sequence writes only the defline.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_record(&mut self, defline: &str, bases: &[Base]) -> io::Result<()> {
        let definition = match defline.split_once(' ') {
            Some((name, description)) => Definition::new(name, Some(BString::from(description))),
            None => Definition::new(defline, None),
        };
        let sequence = fasta::record::Sequence::from(perfect_aligner_dna::base::to_ascii(bases));
        self.writer.write_record(&fasta::Record::new(definition, sequence))
    }

    /// Flush and return the inner writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.get_mut().flush()?;
        Ok(self.writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::create_rng;
    use perfect_aligner_dna::decode;
    use rstest::rstest;

    #[test]
    fn test_unresolved_buffer() {
        let buffer = ReferenceBuffer::unresolved(10);
        assert_eq!(buffer.len(), 10);
        assert_eq!(buffer.resolved_count(), 0);
        assert_eq!(buffer.get(3), Some(Base::N));
        assert_eq!(buffer.resolved(3), None);
        assert_eq!(buffer.get(10), None);
    }

    #[test]
    fn test_set_and_resolved() {
        let mut buffer = ReferenceBuffer::unresolved(4);
        buffer.set(2, Base::G);
        assert_eq!(buffer.resolved(2), Some(Base::G));
        assert_eq!(buffer.resolved_count(), 1);
    }

    #[test]
    fn test_fill_unresolved_keeps_existing_bases() {
        let mut buffer = ReferenceBuffer::unresolved(20);
        buffer.set(5, Base::T);
        let mut rng = create_rng(Some(1));
        let filled = buffer.fill_unresolved(0..10, &mut rng);
        assert_eq!(filled, 9);
        assert_eq!(buffer.get(5), Some(Base::T));
        assert!(buffer.slice(0..10).iter().all(|b| b.is_resolved()));
        assert!(buffer.slice(10..20).iter().all(|b| !b.is_resolved()));
    }

    #[test]
    fn test_fill_gaps_and_clamped_ranges() {
        let mut buffer = ReferenceBuffer::unresolved(8);
        let mut rng = create_rng(Some(2));
        assert_eq!(buffer.fill_unresolved(6..100, &mut rng), 2);
        assert_eq!(buffer.fill_gaps(&mut rng), 6);
        assert_eq!(buffer.resolved_count(), 8);
        assert_eq!(buffer.slice(6..100).len(), 2);
        assert!(buffer.slice(50..60).is_empty());
    }

    #[rstest]
    #[case(70, 150, vec![70, 70, 10])]
    #[case(70, 140, vec![70, 70])]
    #[case(4, 3, vec![3])]
    #[case(0, 9, vec![9])]
    fn test_line_wrapping(
        #[case] width: usize,
        #[case] len: usize,
        #[case] expected: Vec<usize>,
    ) {
        let mut buffer = ReferenceBuffer::unresolved(len);
        buffer.fill_gaps(&mut create_rng(Some(3)));
        let mut out = Vec::new();
        FastaWriter::new(&mut out, width).write_record("R", buffer.bases()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ">R");
        assert_eq!(lines[1..].iter().map(|l| l.len()).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_round_trip_through_decoder() {
        let mut buffer = ReferenceBuffer::unresolved(333);
        buffer.fill_unresolved(0..300, &mut create_rng(Some(4)));
        let mut out = Vec::new();
        let mut writer = FastaWriter::new(&mut out, 70);
        writer.write_record("R A. randomus chromosome R", buffer.bases()).unwrap();
        writer.finish().unwrap();

        let records = decode(&out).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].defline(), "R A. randomus chromosome R");
        assert_eq!(records[0].bases(), buffer.bases());
    }

    #[test]
    fn test_empty_sequence_writes_defline_only() {
        let mut out = Vec::new();
        FastaWriter::new(&mut out, 70).write_record("R", &[]).unwrap();
        assert_eq!(out, b">R\n");
    }
}
