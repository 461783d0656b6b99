//! CLI command implementations for perfect-aligner.
//!
//! # Commands
//!
//! ## Simulation
//! - [`simulate`] - Generate a random reference and paired-end SAM alignments
//!
//! ## Utilities
//! - [`check_fasta`] - Strictly decode a FASTA file and summarize its records

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::unnecessary_wraps
)]

pub mod check_fasta;
pub mod command;
pub mod common;
pub mod simulate;
