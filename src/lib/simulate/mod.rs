//! Simulation of a synthetic reference and paired-end alignments against it.
//!
//! # Modules
//!
//! - [`rng`] - Seeded random number generators and the polar normal sampler
//! - [`spots`] - Endless paired-end spot generation
//! - [`quality`] - Truncated-normal base quality model
//!
//! The pipeline is: two independent tiling passes ([`crate::tiling`]) collapse
//! into the primary and secondary alignment sets, which are reconciled
//! ([`crate::reconcile`]) into one consistent reference.

pub mod quality;
pub mod rng;
pub mod spots;

pub use quality::{MAX_STDDEV_TO_WINDOW, QualityModel};
pub use rng::{StandardNormalPair, child_rng, create_rng, random_base, uniform_int};
pub use spots::{LibraryModel, Read, Spot, SpotGenerator};

use crate::alignment::AlignmentSet;
use crate::errors::Result;
use crate::reconcile::{Reconciliation, reconcile};
use crate::reference::DEFAULT_LINE_WIDTH;
use crate::tiling::tile;
use crate::validation::validate_simulation_config;
use log::info;
use rand::Rng;

/// Shape of the simulated sequencing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Length of the region the tiler walks over
    pub reference_length: usize,
    /// Target mean depth; tiling stops once bases sequenced exceed this multiple of the reference
    pub depth_of_coverage: f64,
    /// Length of each mate
    pub read_length: usize,
    /// Mean template length
    pub template_length_avg: usize,
    /// Standard deviation of the template length
    pub template_length_stddev: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reference_length: 500_000,
            depth_of_coverage: 30.0,
            read_length: 150,
            template_length_avg: 1000,
            template_length_stddev: 200.0,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn library_model(&self) -> LibraryModel {
        LibraryModel {
            read_length: self.read_length,
            template_length_avg: self.template_length_avg,
            template_length_stddev: self.template_length_stddev,
        }
    }
}

/// How the reference and alignments are written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Reference sequence name; the RNAME of every record
    pub reference_name: String,
    /// Free text following the name on the FASTA defline
    pub reference_description: String,
    /// FASTA sequence line width
    pub line_width: usize,
    /// Fill coordinates no alignment touches with random bases instead of `N`
    pub fill_gaps: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reference_name: "R".to_string(),
            reference_description: "A. randomus chromosome R".to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            fill_gaps: false,
        }
    }
}

impl OutputConfig {
    /// The FASTA defline: name, then description if any.
    #[must_use]
    pub fn defline(&self) -> String {
        if self.reference_description.is_empty() {
            self.reference_name.clone()
        } else {
            format!("{} {}", self.reference_name, self.reference_description)
        }
    }
}

/// Run both tiling passes and reconcile them.
///
/// `rng` is the master generator: every stage draws from its own child of it,
/// so a seeded master reproduces the result exactly.
///
/// # Errors
///
/// Returns an error if the configuration is invalid; nothing is drawn in that case.
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::simulate::{SimulationConfig, create_rng, simulate};
///
/// let config = SimulationConfig { reference_length: 5_000, depth_of_coverage: 2.0, ..Default::default() };
/// let result = simulate(&config, &mut create_rng(Some(1))).unwrap();
/// assert!(!result.primary.is_empty());
/// assert_eq!(result.reference.len(), result.primary.max_end().max(result.secondary.max_end()));
/// ```
pub fn simulate(config: &SimulationConfig, rng: &mut impl Rng) -> Result<Reconciliation> {
    validate_simulation_config(config)?;
    let primary = tiling_pass(config, rng, "primary")?;
    let secondary = tiling_pass(config, rng, "secondary")?;
    let mut fill_rng = child_rng(rng);
    Ok(reconcile(primary, secondary, &mut fill_rng))
}

/// Tile one independent pass and collapse it into a set.
fn tiling_pass(
    config: &SimulationConfig,
    rng: &mut impl Rng,
    label: &str,
) -> Result<AlignmentSet> {
    let spots = SpotGenerator::new(config.library_model(), child_rng(rng))?;
    let mut jitter = child_rng(rng);
    let alignments = tile(config.reference_length, config.depth_of_coverage, spots, &mut jitter);
    let tiled = alignments.len();
    let set = AlignmentSet::from_alignments(alignments);
    info!("Tiled {tiled} {label} alignments ({} distinct)", set.len());
    Ok(set)
}
