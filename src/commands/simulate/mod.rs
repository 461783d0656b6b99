//! Simulate a random reference and paired-end alignments against it.

pub mod common;

use crate::commands::command::Command;
use crate::commands::common::create_output;
use anyhow::{Context, Result};
use clap::Parser;
use common::{OutputArgs, QualityArgs, SimulationArgs};
use log::info;
use perfect_aligner_lib::logging::{OperationTimer, format_count, log_simulation_summary};
use perfect_aligner_lib::reference::FastaWriter;
use perfect_aligner_lib::sam::{SamWriter, check_pairing};
use perfect_aligner_lib::simulate::{child_rng, create_rng, simulate};
use perfect_aligner_lib::validation::{validate_output_config, validate_simulation_config};
use std::path::PathBuf;

/// Generate a synthetic reference and SAM alignments with known truth.
#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "\x1b[38;5;166m[SIMULATION]\x1b[0m     \x1b[36mGenerate a random reference and paired-end alignments\x1b[0m",
    long_about = r#"
Generate a random reference and a population of paired-end alignments against it.

Spots are tiled along the reference twice, independently. The first pass gives
each read's primary alignment; a read placed again by the second pass also gets
a secondary alignment (FLAG 0x100, MAPQ 3, NM tag), unless its bases disagree
with the reference there at more than half of its positions. The reference is
filled so that both placements of a read agree wherever possible.

Reference positions no read covers are written as N unless --fill-gaps is given.
"#
)]
pub struct Simulate {
    /// Output reference FASTA
    #[arg(short = 'r', long = "reference-out", default_value = "R.fasta")]
    pub reference_out: PathBuf,

    /// Output SAM file, or - for standard output
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: PathBuf,

    /// Random seed for reproducibility
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    #[command(flatten)]
    pub quality: QualityArgs,

    #[command(flatten)]
    pub output_options: OutputArgs,
}

impl Command for Simulate {
    fn execute(&self, command_line: &str) -> Result<()> {
        let config = self.simulation.to_simulation_config();
        let quality = self.quality.to_quality_model()?;
        let output = self.output_options.to_output_config();
        validate_simulation_config(&config)?;
        validate_output_config(&output)?;

        info!("Simulating alignments");
        info!("  Command: {command_line}");
        info!("  Reference: {}", self.reference_out.display());
        info!("  Output: {}", self.output.display());
        info!("  Reference length: {}", format_count(config.reference_length as u64));
        info!("  Depth: {}", config.depth_of_coverage);
        info!("  Read length: {}", config.read_length);
        info!(
            "  Template length: {} +/- {}",
            config.template_length_avg, config.template_length_stddev
        );
        if let Some(seed) = self.seed {
            info!("  Seed: {seed}");
        }

        let timer = OperationTimer::new("Simulating");
        let mut rng = create_rng(self.seed);
        let mut result = simulate(&config, &mut rng)?;
        check_pairing(&result)?;
        let mut gap_rng = child_rng(&mut rng);
        let mut quality_rng = child_rng(&mut rng);

        if output.fill_gaps {
            let filled = result.reference.fill_gaps(&mut gap_rng);
            info!("Filled {} uncovered reference positions", format_count(filled as u64));
        }

        let fasta_out = create_output(&self.reference_out, "reference FASTA")?;
        let mut fasta = FastaWriter::new(fasta_out, output.line_width);
        fasta
            .write_record(&output.defline(), result.reference.bases())
            .with_context(|| format!("Failed to write {}", self.reference_out.display()))?;
        fasta.finish()?;

        let sam_out = create_output(&self.output, "SAM output")?;
        let mut sam = SamWriter::new(sam_out, output.reference_name.clone());
        let summary = sam.write_alignments(&result, &quality, &mut quality_rng)?;
        sam.finish()?;

        log_simulation_summary(&result, &summary);
        timer.log_completion(summary.total_records());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfect_aligner_lib::dna::fasta::decode_path;
    use tempfile::TempDir;

    fn command(dir: &TempDir, seed: u64) -> Simulate {
        Simulate::parse_from([
            "simulate",
            "--reference-out",
            dir.path().join("R.fasta").to_str().unwrap(),
            "--output",
            dir.path().join("out.sam").to_str().unwrap(),
            "--seed",
            seed.to_string().as_str(),
            "--reference-length",
            "5000",
            "--depth",
            "2",
        ])
    }

    #[test]
    fn test_defaults() {
        let cmd = Simulate::parse_from(["simulate"]);
        assert_eq!(cmd.reference_out, PathBuf::from("R.fasta"));
        assert_eq!(cmd.output, PathBuf::from("-"));
        let config = cmd.simulation.to_simulation_config();
        assert_eq!(config.reference_length, 500_000);
        assert!((config.depth_of_coverage - 30.0).abs() < f64::EPSILON);
        assert_eq!(cmd.output_options.to_output_config().defline(), "R A. randomus chromosome R");
    }

    #[test]
    fn test_writes_both_outputs() {
        let dir = TempDir::new().unwrap();
        command(&dir, 7).execute("test").unwrap();

        let records = decode_path(dir.path().join("R.fasta")).unwrap();
        assert_eq!(records.len(), 1);
        let sam = std::fs::read_to_string(dir.path().join("out.sam")).unwrap();
        assert!(sam.starts_with("@HD\tVN:1.0\tSO:unknown\n"));
        assert!(sam.contains(&format!("@SQ\tSN:R\tLN:{}\n", records[0].len())));
    }

    #[test]
    fn test_empty_reference_name_creates_no_files() {
        let dir = TempDir::new().unwrap();
        let mut cmd = command(&dir, 1);
        cmd.output_options.ref_name = String::new();
        let err = cmd.execute("test").unwrap_err();
        assert!(format!("{err:#}").contains("ref-name"), "{err:#}");
        assert!(!dir.path().join("R.fasta").exists());
        assert!(!dir.path().join("out.sam").exists());
    }

    #[test]
    fn test_invalid_geometry_creates_no_files() {
        let dir = TempDir::new().unwrap();
        let mut cmd = command(&dir, 1);
        cmd.simulation.read_length = 600;
        assert!(cmd.execute("test").is_err());
        assert!(!dir.path().join("R.fasta").exists());
        assert!(!dir.path().join("out.sam").exists());
    }
}
