//! Parsing and process helpers for checking command output.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// The fields of one SAM alignment line.
#[derive(Debug, Clone)]
pub struct SamLine {
    pub qname: String,
    pub flag: u16,
    pub rname: String,
    pub pos: usize,
    pub mapq: u8,
    pub cigar: String,
    pub rnext: String,
    pub pnext: usize,
    pub tlen: i64,
    pub seq: String,
    pub qual: String,
    pub nm: Option<usize>,
}

impl SamLine {
    /// Parse a tab-separated alignment line.
    ///
    /// # Panics
    ///
    /// Panics if the line does not have the expected fields.
    pub fn parse(line: &str) -> Self {
        let f: Vec<&str> = line.split('\t').collect();
        assert!(f.len() == 11 || f.len() == 12, "unexpected field count in {line:?}");
        let nm = f.get(11).map(|tag| {
            tag.strip_prefix("NM:i:").expect("only NM tags are written").parse().unwrap()
        });
        Self {
            qname: f[0].to_string(),
            flag: f[1].parse().unwrap(),
            rname: f[2].to_string(),
            pos: f[3].parse().unwrap(),
            mapq: f[4].parse().unwrap(),
            cigar: f[5].to_string(),
            rnext: f[6].to_string(),
            pnext: f[7].parse().unwrap(),
            tlen: f[8].parse().unwrap(),
            seq: f[9].to_string(),
            qual: f[10].to_string(),
            nm,
        }
    }

    pub fn is_secondary(&self) -> bool {
        self.flag & 0x100 != 0
    }
}

/// Split SAM text into header lines and parsed alignment lines.
pub fn parse_sam(text: &str) -> (Vec<String>, Vec<SamLine>) {
    let mut header = Vec::new();
    let mut records = Vec::new();
    for line in text.lines() {
        if line.starts_with('@') {
            header.push(line.to_string());
        } else {
            records.push(SamLine::parse(line));
        }
    }
    (header, records)
}

/// Run the binary with `args`.
pub fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_perfect-aligner"))
        .args(args)
        .output()
        .expect("Failed to run perfect-aligner")
}

/// Run `simulate` on a small reference with a fixed seed, writing into `dir`.
pub fn run_small_simulation(dir: &Path, seed: u64, extra: &[&str]) -> Output {
    let reference = dir.join("R.fasta");
    let sam = dir.join("out.sam");
    let seed = seed.to_string();
    let mut args = vec![
        "simulate",
        "--reference-out",
        reference.to_str().unwrap(),
        "--output",
        sam.to_str().unwrap(),
        "--seed",
        seed.as_str(),
        "--reference-length",
        "10000",
        "--depth",
        "1",
    ];
    args.extend_from_slice(extra);
    run(&args)
}
