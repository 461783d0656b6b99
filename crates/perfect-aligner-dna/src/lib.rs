#![deny(unsafe_code)]

//! DNA alphabet and sequence utilities.
//!
//! This crate provides the leaf types shared by the simulator:
//! - [`Base`], the five-letter alphabet with `N` doubling as "unresolved"
//! - [`DnaSequence`], an immutable defline + bases pair
//! - [`fasta`], a strict byte-level FASTA decoder that reports the failing line

pub mod base;
pub mod fasta;
pub mod sequence;

pub use base::Base;
pub use fasta::{FastaDecoder, FastaError, decode, decode_path, decode_reader};
pub use sequence::DnaSequence;

/// No-call base character.
pub const NO_CALL_BASE: u8 = b'N';
