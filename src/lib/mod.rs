#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: Coordinate and statistics code intentionally casts between numeric types
// - missing_*_doc: Documentation improvements tracked separately
// - module_name_repetitions: Types such as `SamRecord` live in `sam`
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

//! # perfect-aligner - simulated reads with known true alignments
//!
//! This library synthesizes a random reference and a population of paired-end
//! reads against it, and writes both the reference (FASTA) and the alignments
//! (SAM). Because the alignments are generated rather than computed, the output
//! is a ground truth for testing aligners and downstream tools.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`simulate`]** - Configuration, random number generation, spot generation,
//!   quality model, and the [`simulate::simulate`] pipeline
//! - **[`tiling`]** - Places spots along the reference until a target depth is reached
//! - **[`reconcile`]** - Merges two tiling passes into one consistent reference
//! - **[`sam`]** - SAM records, flags, and the writer
//!
//! ### Data Types
//!
//! - **[`alignment`]** - Alignments, their pairing identity, and identity-keyed sets
//! - **[`reference`][mod@reference]** - The reference buffer and FASTA writer
//! - **[`dna`]** - Bases, sequences, and the FASTA decoder
//!
//! ### Utilities
//!
//! - **[`validation`]** - Parameter validation with consistent error messages
//! - **[`progress`]** - Progress tracking
//! - **[`logging`]** - Formatting helpers and the simulation summary
//! - **[`errors`]** - The library error type
//!
//! ## Quick Start
//!
//! ```
//! use perfect_aligner_lib::reference::FastaWriter;
//! use perfect_aligner_lib::sam::SamWriter;
//! use perfect_aligner_lib::simulate::{QualityModel, SimulationConfig, child_rng, create_rng, simulate};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SimulationConfig { reference_length: 10_000, depth_of_coverage: 1.0, ..Default::default() };
//! let mut rng = create_rng(Some(42));
//! let result = simulate(&config, &mut rng)?;
//!
//! let mut fasta = FastaWriter::new(Vec::new(), 70);
//! fasta.write_record("R A. randomus chromosome R", result.reference.bases())?;
//!
//! let mut sam = SamWriter::new(Vec::new(), "R");
//! let summary = sam.write_alignments(&result, &QualityModel::default(), &mut child_rng(&mut rng))?;
//! assert_eq!(summary.primary_records as usize, result.primary.len());
//! # Ok(())
//! # }
//! ```

pub mod alignment;
pub mod errors;
pub mod logging;
pub mod progress;
pub mod reconcile;
pub mod reference;
pub mod sam;
pub mod simulate;
pub mod tiling;
pub mod validation;

pub use perfect_aligner_dna as dna;

pub use alignment::{Alignment, AlignmentKey, AlignmentSet, ReadNumber};
pub use errors::{Result, SimulationError};
