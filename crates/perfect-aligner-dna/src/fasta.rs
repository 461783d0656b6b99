//! Strict byte-level FASTA decoder.
//!
//! The decoder is a small state machine fed one byte at a time, so it can be
//! driven from an in-memory slice or from any buffered reader without holding
//! the whole file. It accepts:
//!
//! ```text
//! >defline text
//! ACGTacgtN
//! ACGT
//! >next record
//! ...
//! ```
//!
//! Blank characters are skipped only at the start of a line. Inside a sequence
//! line the only accepted bytes are `ACGTacgtN`; anything else fails with the
//! 1-based line number of the offending byte.
//!
//! # Example
//!
//! ```
//! use perfect_aligner_dna::{Base, decode};
//!
//! let records = decode(b">seq1\nACGT\n>seq2\nNNNN\n").unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].defline(), "seq1");
//! assert_eq!(records[1].bases(), &[Base::N; 4]);
//! ```

use crate::base::Base;
use crate::sequence::DnaSequence;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Error raised while decoding FASTA input.
#[derive(Error, Debug)]
pub enum FastaError {
    /// The input is not valid FASTA.
    #[error("Invalid FASTA at line {line}: {reason}")]
    Invalid {
        /// 1-based line of the offending byte
        line: usize,
        /// What was expected and what was found
        reason: String,
    },

    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FastaError {
    /// The failing line, for format errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Invalid { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

/// Decoder states. An invalid transition is reported as an error instead of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Before the first `>`.
    Start,
    /// Just after `>`, skipping blanks before the defline text.
    DeflineStart,
    /// Inside the defline text.
    Defline,
    /// At the first line after a defline.
    SequenceStart,
    /// Inside a sequence line.
    Sequence,
    /// At the start of a line following a sequence line.
    SequenceEnd,
}

/// Incremental FASTA decoder.
///
/// Feed bytes with [`FastaDecoder::push`] (or [`FastaDecoder::push_slice`]) and
/// collect the records with [`FastaDecoder::finish`].
#[derive(Debug)]
pub struct FastaDecoder {
    state: State,
    line: usize,
    skip_blank: bool,
    defline: Vec<u8>,
    bases: Vec<Base>,
    records: Vec<DnaSequence>,
}

impl Default for FastaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FastaDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Start,
            line: 1,
            skip_blank: true,
            defline: Vec::new(),
            bases: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Consume one byte.
    ///
    /// # Errors
    ///
    /// Returns [`FastaError::Invalid`] when the byte cannot appear in the current state.
    pub fn push(&mut self, byte: u8) -> Result<(), FastaError> {
        let line = self.line;
        if byte == b'\n' {
            self.line += 1;
        }
        if self.skip_blank && is_blank(byte) {
            return Ok(());
        }
        self.skip_blank = false;

        self.state = match self.state {
            State::Start => {
                if byte != b'>' {
                    return Err(invalid(line, format!("expected '>' but found {}", describe(byte))));
                }
                State::DeflineStart
            }
            State::DeflineStart => match byte {
                b' ' | b'\t' => State::DeflineStart,
                b'\n' => {
                    self.skip_blank = true;
                    State::SequenceStart
                }
                _ => {
                    self.defline.push(byte);
                    State::Defline
                }
            },
            State::Defline => {
                if byte == b'\n' {
                    self.skip_blank = true;
                    State::SequenceStart
                } else {
                    self.defline.push(byte);
                    State::Defline
                }
            }
            State::SequenceStart | State::SequenceEnd if byte == b'>' => {
                self.finish_record();
                State::DeflineStart
            }
            State::SequenceStart | State::SequenceEnd | State::Sequence => {
                self.sequence_byte(byte, line)?
            }
        };
        Ok(())
    }

    /// Consume a slice of bytes.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first invalid byte.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Result<(), FastaError> {
        bytes.iter().try_for_each(|&b| self.push(b))
    }

    /// Close the final record and return all records in input order.
    #[must_use]
    pub fn finish(mut self) -> Vec<DnaSequence> {
        if self.state != State::Start {
            self.finish_record();
        }
        self.records
    }

    fn sequence_byte(&mut self, byte: u8, line: usize) -> Result<State, FastaError> {
        match byte {
            b'\n' => {
                self.skip_blank = true;
                Ok(State::SequenceEnd)
            }
            b'A' | b'C' | b'G' | b'T' | b'a' | b'c' | b'g' | b't' | b'N' => {
                self.bases.push(Base::from_ascii(byte));
                Ok(State::Sequence)
            }
            _ => Err(invalid(
                line,
                format!("expected one of 'ACGTacgtN' or '>' but found {}", describe(byte)),
            )),
        }
    }

    fn finish_record(&mut self) {
        let defline = String::from_utf8_lossy(&self.defline).into_owned();
        let bases = std::mem::take(&mut self.bases);
        self.defline.clear();
        self.records.push(DnaSequence::new(defline, bases));
    }
}

/// Decode a complete FASTA buffer.
///
/// # Errors
///
/// Returns [`FastaError::Invalid`] with the line of the first invalid byte.
pub fn decode(bytes: &[u8]) -> Result<Vec<DnaSequence>, FastaError> {
    let mut decoder = FastaDecoder::new();
    decoder.push_slice(bytes)?;
    Ok(decoder.finish())
}

/// Decode FASTA from a buffered reader, one buffer at a time.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid FASTA.
pub fn decode_reader<R: BufRead>(mut reader: R) -> Result<Vec<DnaSequence>, FastaError> {
    let mut decoder = FastaDecoder::new();
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let n = buf.len();
        decoder.push_slice(buf)?;
        reader.consume(n);
    }
    Ok(decoder.finish())
}

/// Decode a FASTA file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid FASTA.
pub fn decode_path<P: AsRef<Path>>(path: P) -> Result<Vec<DnaSequence>, FastaError> {
    let file = File::open(path)?;
    decode_reader(BufReader::new(file))
}

#[inline]
fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

fn invalid(line: usize, reason: String) -> FastaError {
    FastaError::Invalid { line, reason }
}

fn describe(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}'", char::from(byte))
    } else {
        format!("byte 0x{byte:02x}")
    }
}
