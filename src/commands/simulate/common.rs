//! CLI argument groups for the simulate command.

use clap::Args;
use perfect_aligner_lib::simulate::{OutputConfig, QualityModel, SimulationConfig};

/// Shape of the simulated sequencing run.
#[derive(Args, Debug, Clone)]
pub struct SimulationArgs {
    /// Length of the region reads are tiled over
    #[arg(long = "reference-length", default_value = "500000")]
    pub reference_length: usize,

    /// Target depth of coverage
    #[arg(short = 'd', long = "depth", default_value = "30")]
    pub depth: f64,

    /// Read length in bases
    #[arg(short = 'l', long = "read-length", default_value = "150")]
    pub read_length: usize,

    /// Mean template length; must exceed twice the read length
    #[arg(long = "template-length-avg", default_value = "1000")]
    pub template_length_avg: usize,

    /// Template length standard deviation
    #[arg(long = "template-length-stddev", default_value = "200")]
    pub template_length_stddev: f64,
}

impl SimulationArgs {
    /// Convert to a [`SimulationConfig`].
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            reference_length: self.reference_length,
            depth_of_coverage: self.depth,
            read_length: self.read_length,
            template_length_avg: self.template_length_avg,
            template_length_stddev: self.template_length_stddev,
        }
    }
}

/// Base quality options.
#[derive(Args, Debug, Clone)]
pub struct QualityArgs {
    /// Mean base quality
    #[arg(long = "quality-mean", default_value = "30")]
    pub quality_mean: f64,

    /// Standard deviation of base quality
    #[arg(long = "quality-stddev", default_value = "10")]
    pub quality_stddev: f64,

    /// Lowest base quality emitted
    #[arg(long = "min-quality", default_value = "20")]
    pub min_quality: u8,

    /// Highest base quality emitted
    #[arg(long = "max-quality", default_value = "40")]
    pub max_quality: u8,
}

impl QualityArgs {
    /// Convert to a validated [`QualityModel`].
    pub fn to_quality_model(&self) -> anyhow::Result<QualityModel> {
        Ok(QualityModel::new(
            self.quality_mean,
            self.quality_stddev,
            self.min_quality,
            self.max_quality,
        )?)
    }
}

/// Reference naming and layout options.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Reference sequence name
    #[arg(long = "ref-name", default_value = "R")]
    pub ref_name: String,

    /// Description written after the name on the FASTA defline
    #[arg(long = "ref-description", default_value = "A. randomus chromosome R")]
    pub ref_description: String,

    /// FASTA line width; 0 writes the sequence on a single line
    #[arg(long = "line-width", default_value = "70")]
    pub line_width: usize,

    /// Fill reference positions no read covers with random bases instead of N
    #[arg(long = "fill-gaps")]
    pub fill_gaps: bool,
}

impl OutputArgs {
    /// Convert to an [`OutputConfig`].
    pub fn to_output_config(&self) -> OutputConfig {
        OutputConfig {
            reference_name: self.ref_name.clone(),
            reference_description: self.ref_description.clone(),
            line_width: self.line_width,
            fill_gaps: self.fill_gaps,
        }
    }
}
