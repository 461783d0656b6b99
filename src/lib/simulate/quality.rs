//! Base quality score model for simulated reads.
//!
//! Qualities are drawn from a normal distribution truncated by rejection:
//! a deviate is scaled to `mean + stddev * z`, truncated toward zero, and
//! redrawn until it lands inside `[min, max]`.

use super::rng::StandardNormalPair;
use crate::errors::{Result, SimulationError};
use crate::validation::{validate_min_max, validate_quality_score};
use rand::Rng;
use rand_distr::Distribution;

/// Largest accepted ratio of stddev to the width of `[min, max]`. Beyond it
/// most draws fall outside the window and rejection sampling stalls.
pub const MAX_STDDEV_TO_WINDOW: f64 = 100.0;

/// Truncated-normal quality model.
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::simulate::{QualityModel, create_rng};
///
/// let model = QualityModel::default();
/// let mut rng = create_rng(Some(42));
///
/// let quals = model.generate_qualities(150, &mut rng);
/// assert_eq!(quals.len(), 150);
/// assert!(quals.iter().all(|&q| (20..=40).contains(&q)));
/// ```
#[derive(Debug, Clone)]
pub struct QualityModel {
    /// Center of the distribution
    pub mean: f64,
    /// Spread of the distribution
    pub stddev: f64,
    /// Lowest accepted quality
    pub min_quality: u8,
    /// Highest accepted quality
    pub max_quality: u8,
}

impl Default for QualityModel {
    fn default() -> Self {
        Self { mean: 30.0, stddev: 10.0, min_quality: 20, max_quality: 40 }
    }
}

#[allow(clippy::cast_possible_truncation)]
impl QualityModel {
    /// Create a validated quality model.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are out of order, exceed the Phred+33
    /// printable range, or the acceptance window cannot be reached in practice.
    pub fn new(mean: f64, stddev: f64, min_quality: u8, max_quality: u8) -> Result<Self> {
        let model = Self { mean, stddev, min_quality, max_quality };
        model.validate()?;
        Ok(model)
    }

    /// Check that sampling will terminate and produce printable characters.
    ///
    /// # Errors
    ///
    /// Returns an [`SimulationError::InvalidParameter`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        validate_min_max(self.min_quality, self.max_quality, "min-quality", "max-quality")?;
        validate_quality_score(self.max_quality, "max-quality")?;
        if !self.mean.is_finite() || !self.stddev.is_finite() || self.stddev < 0.0 {
            return Err(SimulationError::invalid_parameter(
                "quality-stddev",
                "mean and stddev must be finite and stddev must be >= 0",
            ));
        }
        // Values in [min, max + 1) truncate into the accepted window.
        let lo = f64::from(self.min_quality);
        let hi = f64::from(self.max_quality) + 1.0;
        if self.stddev > MAX_STDDEV_TO_WINDOW * (hi - lo) {
            return Err(SimulationError::invalid_parameter(
                "quality-stddev",
                format!(
                    "stddev ({}) must be <= {} times the width of [{}, {}]",
                    self.stddev, MAX_STDDEV_TO_WINDOW, self.min_quality, self.max_quality
                ),
            ));
        }
        let distance = if self.mean < lo {
            lo - self.mean
        } else if self.mean >= hi {
            self.mean - hi
        } else {
            0.0
        };
        if distance > 0.0 && (self.stddev == 0.0 || distance > 8.0 * self.stddev) {
            return Err(SimulationError::invalid_parameter(
                "quality-mean",
                format!(
                    "mean ({}) is too far from [{}, {}] for stddev {}",
                    self.mean, self.min_quality, self.max_quality, self.stddev
                ),
            ));
        }
        Ok(())
    }

    /// Draw one quality score in `[min_quality, max_quality]`.
    pub fn sample(&self, rng: &mut impl Rng) -> u8 {
        let min = f64::from(self.min_quality);
        let max = f64::from(self.max_quality);
        loop {
            let (_, z) = StandardNormalPair.sample(rng);
            let q = (z * self.stddev + self.mean).trunc();
            if (min..=max).contains(&q) {
                return q as u8;
            }
        }
    }

    /// Generate quality scores for an entire read.
    pub fn generate_qualities(&self, read_length: usize, rng: &mut impl Rng) -> Vec<u8> {
        (0..read_length).map(|_| self.sample(rng)).collect()
    }
}
