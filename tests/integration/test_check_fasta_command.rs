//! Integration tests for the check-fasta command.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::{run, run_small_simulation};

#[test]
fn test_summary_of_valid_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.fa");
    let summary = dir.path().join("summary.tsv");
    fs::write(&input, ">seq1\nACGT\n>seq2\nNNNN\n").unwrap();

    let output = run(&[
        "check-fasta",
        "--input",
        input.to_str().unwrap(),
        "--output",
        summary.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        fs::read_to_string(&summary).unwrap(),
        "defline\tlength\tn_count\tgc_fraction\nseq1\t4\t0\t0.5000\nseq2\t4\t4\t0.0000\n"
    );
}

#[rstest]
#[case(b"ACGT\n".as_slice(), 1)]
#[case(b">seq1\nACGT\nACGU\n".as_slice(), 3)]
#[case(b">seq1\nAC GT\n".as_slice(), 2)]
#[case(b">seq1\nACGT\n\n>seq2\nnnnn\n".as_slice(), 5)]
fn test_invalid_input_reports_line(#[case] content: &[u8], #[case] line: usize) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.fa");
    fs::write(&input, content).unwrap();

    let output = run(&["check-fasta", "--input", input.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("line {line}")), "{stderr}");
}

#[test]
fn test_simulated_reference_passes() {
    let dir = TempDir::new().unwrap();
    assert!(run_small_simulation(dir.path(), 11, &[]).status.success());
    let summary = dir.path().join("summary.tsv");
    let output = run(&[
        "check-fasta",
        "--input",
        dir.path().join("R.fasta").to_str().unwrap(),
        "--output",
        summary.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let text = fs::read_to_string(&summary).unwrap();
    let row: Vec<&str> = text.lines().nth(1).unwrap().split('\t').collect();
    assert_eq!(row[0], "R A. randomus chromosome R");
    assert!(row[1].parse::<usize>().unwrap() > 10_000);
}
