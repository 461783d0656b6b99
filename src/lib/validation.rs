//! Input validation utilities
//!
//! Validation functions for simulation parameters with consistent error messages.
//! Every check runs before the first random draw, so an invalid configuration
//! never produces partial output.

use crate::errors::{Result, SimulationError};
use crate::simulate::{OutputConfig, SimulationConfig};
use std::fmt::Display;

/// Validate that max >= min
///
/// # Errors
/// Returns an error if max < min
///
/// # Example
/// ```
/// use perfect_aligner_lib::validation::validate_min_max;
///
/// validate_min_max(20, 40, "min-quality", "max-quality").unwrap();
///
/// let result = validate_min_max(40, 20, "min-quality", "max-quality");
/// assert!(result.is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_min_max<T: Ord + Display>(
    min_val: T,
    max_val: T,
    min_name: &str,
    max_name: &str,
) -> Result<()> {
    if max_val < min_val {
        return Err(SimulationError::invalid_parameter(
            max_name,
            format!("{max_name} ({max_val}) must be >= {min_name} ({min_val})"),
        ));
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use perfect_aligner_lib::validation::validate_positive;
///
/// validate_positive(150_usize, "read-length").unwrap();
///
/// let result = validate_positive(0_usize, "read-length");
/// assert!(result.is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(SimulationError::invalid_parameter(
            name,
            format!("Must be positive (> 0), got: {value}"),
        ));
    }
    Ok(())
}

/// Validate that a floating point value is finite and > 0
///
/// # Errors
/// Returns an error for zero, negative, NaN, or infinite values
pub fn validate_positive_finite(value: f64, name: &str) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimulationError::invalid_parameter(
            name,
            format!("Must be a finite number > 0, got: {value}"),
        ));
    }
    Ok(())
}

/// Validate that a floating point value is finite and >= 0
///
/// # Errors
/// Returns an error for negative, NaN, or infinite values
pub fn validate_non_negative_finite(value: f64, name: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::invalid_parameter(
            name,
            format!("Must be a finite number >= 0, got: {value}"),
        ));
    }
    Ok(())
}

/// Validate that both mates fit inside the mean template with room to spare.
///
/// Spot generation redraws every insert that would put read 2 at or before
/// the end of read 1; with `2 * read_length >= template_length_avg` nearly
/// every draw is rejected.
///
/// # Errors
/// Returns an error unless `2 * read_length < template_length_avg`
///
/// # Example
/// ```
/// use perfect_aligner_lib::validation::validate_template_geometry;
///
/// validate_template_geometry(150, 1000).unwrap();
/// assert!(validate_template_geometry(500, 1000).is_err());
/// ```
pub fn validate_template_geometry(read_length: usize, template_length_avg: usize) -> Result<()> {
    validate_positive(read_length, "read-length")?;
    let both_mates = read_length.checked_mul(2).unwrap_or(usize::MAX);
    if both_mates >= template_length_avg {
        return Err(SimulationError::invalid_parameter(
            "template-length-avg",
            format!(
                "template-length-avg ({template_length_avg}) must be greater than twice \
                 read-length ({read_length})"
            ),
        ));
    }
    Ok(())
}

/// Validate the template-length standard deviation against the mean.
///
/// # Errors
/// Returns an error unless the stddev is finite, non-negative, and no larger
/// than `template_length_avg`
pub fn validate_template_stddev(stddev: f64, template_length_avg: usize) -> Result<()> {
    validate_non_negative_finite(stddev, "template-length-stddev")?;
    #[allow(clippy::cast_precision_loss)]
    let avg = template_length_avg as f64;
    if stddev > avg {
        return Err(SimulationError::invalid_parameter(
            "template-length-stddev",
            format!(
                "template-length-stddev ({stddev}) must not exceed template-length-avg \
                 ({template_length_avg})"
            ),
        ));
    }
    Ok(())
}

/// Validate that a quality score is in the valid Phred+33 range [0, 93]
///
/// # Errors
/// Returns an error if the quality is not in [0, 93]
pub fn validate_quality_score(quality: u8, name: &str) -> Result<()> {
    if quality > 93 {
        return Err(SimulationError::invalid_parameter(
            name,
            format!("{quality} exceeds the Phred+33 maximum of 93"),
        ));
    }
    Ok(())
}

/// Validate every field of a simulation configuration.
///
/// # Errors
/// Returns the first problem found
///
/// # Example
/// ```
/// use perfect_aligner_lib::simulate::SimulationConfig;
/// use perfect_aligner_lib::validation::validate_simulation_config;
///
/// validate_simulation_config(&SimulationConfig::default()).unwrap();
///
/// let config = SimulationConfig { reference_length: 0, ..SimulationConfig::default() };
/// assert!(validate_simulation_config(&config).is_err());
/// ```
pub fn validate_simulation_config(config: &SimulationConfig) -> Result<()> {
    validate_positive(config.reference_length, "reference-length")?;
    validate_positive_finite(config.depth_of_coverage, "depth")?;
    validate_template_geometry(config.read_length, config.template_length_avg)?;
    validate_template_stddev(config.template_length_stddev, config.template_length_avg)?;
    Ok(())
}

/// Validate the output options.
///
/// The reference name is both the FASTA record name and the SAM RNAME, so it
/// must be a single non-empty word.
///
/// # Errors
/// Returns an error if the reference name is empty or contains whitespace
pub fn validate_output_config(config: &OutputConfig) -> Result<()> {
    let name = &config.reference_name;
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(SimulationError::invalid_parameter(
            "ref-name",
            format!("must be a non-empty name without whitespace, got: {name:?}"),
        ));
    }
    Ok(())
}
