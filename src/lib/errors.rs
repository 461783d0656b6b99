//! Custom error types for simulation operations.

use crate::alignment::ReadNumber;
use perfect_aligner_dna::FastaError;
use thiserror::Error;

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Error type for simulation operations
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Invalid parameter value or relationship between parameters
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// FASTA input could not be decoded
    #[error(transparent)]
    InvalidFasta(#[from] FastaError),

    /// An alignment has no mate in its set; pairing is broken
    #[error("Alignment {name}/{read_number} has no mate in the {set} alignment set")]
    MissingMate {
        /// Spot name of the orphaned alignment
        name: String,
        /// Read number of the orphaned alignment
        read_number: ReadNumber,
        /// Which set was searched ("primary" or "secondary")
        set: &'static str,
    },

    /// Writing an output stream failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    /// Shorthand for an [`SimulationError::InvalidParameter`].
    pub(crate) fn invalid_parameter(parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { parameter: parameter.to_string(), reason: reason.into() }
    }
}
