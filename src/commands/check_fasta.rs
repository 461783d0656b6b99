//! Validate a FASTA file and summarize its records.

use crate::commands::command::Command;
use anyhow::{Context, Result};
use clap::Parser;
use fgoxide::io::DelimFile;
use log::info;
use perfect_aligner_lib::dna::{DnaSequence, decode_path};
use perfect_aligner_lib::logging::{format_count, format_percent};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Strictly decode a FASTA file, reporting the first invalid line.
#[derive(Parser, Debug)]
#[command(
    name = "check-fasta",
    about = "\x1b[38;5;173m[UTILITIES]\x1b[0m      \x1b[36mValidate a FASTA file and summarize its records\x1b[0m",
    long_about = r#"
Decode a FASTA file with a strict decoder.

Sequence lines may contain only A, C, G, T (either case) and N. Blank characters
are allowed only at the start of a line. On the first invalid byte the command
fails and reports its 1-based line number.

With --output, a tab-separated summary is written with one row per record:
defline, length, n_count, gc_fraction.
"#
)]
pub struct CheckFasta {
    /// Input FASTA file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Optional output TSV summary
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl Command for CheckFasta {
    fn execute(&self, _command_line: &str) -> Result<()> {
        info!("Checking FASTA {}", self.input.display());
        let records = decode_path(&self.input)
            .with_context(|| format!("Failed to decode FASTA {}", self.input.display()))?;

        let total: usize = records.iter().map(DnaSequence::len).sum();
        let n_total: usize = records.iter().map(DnaSequence::n_count).sum();
        info!(
            "Read {} records with {} bases",
            format_count(records.len() as u64),
            format_count(total as u64)
        );
        if total > 0 {
            info!(
                "  N bases: {} ({})",
                format_count(n_total as u64),
                format_percent(n_total as f64 / total as f64, 2)
            );
        }

        if let Some(path) = &self.output {
            write_summary(path, &records)?;
            info!("Wrote summary to {}", path.display());
        }
        Ok(())
    }
}

/// One row of the summary TSV.
#[derive(Debug, Serialize)]
struct RecordSummary<'a> {
    defline: &'a str,
    length: usize,
    n_count: usize,
    #[serde(serialize_with = "serialize_fraction")]
    gc_fraction: f64,
}

impl<'a> From<&'a DnaSequence> for RecordSummary<'a> {
    fn from(record: &'a DnaSequence) -> Self {
        Self {
            defline: record.defline(),
            length: record.len(),
            n_count: record.n_count(),
            gc_fraction: record.gc_fraction(),
        }
    }
}

/// Fractions are written with four decimal places.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_fraction<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{value:.4}"))
}

/// Write one TSV row per record.
fn write_summary(path: &Path, records: &[DnaSequence]) -> Result<()> {
    let rows: Vec<RecordSummary> = records.iter().map(RecordSummary::from).collect();
    DelimFile::default()
        .write_tsv(&path, rows)
        .with_context(|| format!("Failed to write summary TSV: {}", path.display()))
}
