//! Integration tests for the simulate command.

use std::collections::HashMap;
use std::fs;

use perfect_aligner_lib::dna::{DnaSequence, decode_path};
use tempfile::TempDir;

use crate::helpers::{SamLine, parse_sam, run, run_small_simulation};

fn read_outputs(dir: &TempDir) -> (DnaSequence, Vec<String>, Vec<SamLine>) {
    let mut records = decode_path(dir.path().join("R.fasta")).expect("reference should decode");
    assert_eq!(records.len(), 1);
    let sam = fs::read_to_string(dir.path().join("out.sam")).expect("SAM output should exist");
    let (header, lines) = parse_sam(&sam);
    (records.remove(0), header, lines)
}

fn reference_window(reference: &DnaSequence, pos: usize, len: usize) -> String {
    let ascii = reference.to_ascii();
    String::from_utf8(ascii[pos - 1..pos - 1 + len].to_vec()).unwrap()
}

#[test]
fn test_small_simulation_records() {
    let dir = TempDir::new().unwrap();
    let output = run_small_simulation(dir.path(), 42, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let (reference, header, lines) = read_outputs(&dir);
    assert_eq!(header.len(), 2);
    assert_eq!(header[0], "@HD\tVN:1.0\tSO:unknown");
    assert_eq!(header[1], format!("@SQ\tSN:R\tLN:{}", reference.len()));

    let primaries: Vec<&SamLine> = lines.iter().filter(|l| !l.is_secondary()).collect();
    assert!(!primaries.is_empty());
    for line in &primaries {
        assert_eq!(line.flag & 0x3, 0x3, "{line:?}");
        assert!(line.pos >= 1);
        let digits = line.cigar.strip_suffix('M').expect("CIGAR must end in M");
        assert!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()), "{}", line.cigar);
        assert_eq!(line.cigar, "150M");
        assert_eq!(line.rname, "R");
        assert_eq!(line.rnext, "=");
        assert_eq!(line.mapq, 30);
        assert_eq!(line.seq.len(), 150);
        assert_eq!(line.qual.len(), 150);
        assert!(line.qual.bytes().all(|q| (b'5'..=b'I').contains(&q)), "{}", line.qual);
        assert!(!line.seq.contains('N'), "covered bases must be resolved");
        assert_eq!(line.seq, reference_window(&reference, line.pos, 150));
        assert!(line.nm.is_none());
    }
}

#[test]
fn test_mates_agree() {
    let dir = TempDir::new().unwrap();
    assert!(run_small_simulation(dir.path(), 7, &[]).status.success());
    let (_, _, lines) = read_outputs(&dir);

    let mut primaries: HashMap<(String, bool), &SamLine> = HashMap::new();
    for line in lines.iter().filter(|l| !l.is_secondary()) {
        let first = line.flag & 0x40 != 0;
        assert_ne!(first, line.flag & 0x80 != 0);
        assert!(primaries.insert((line.qname.clone(), first), line).is_none(), "duplicate primary");
    }
    for ((name, first), line) in &primaries {
        let mate = primaries.get(&(name.clone(), !first)).expect("every read has a mate");
        assert_eq!(line.pnext, mate.pos);
        assert_eq!(line.tlen, -mate.tlen);
        assert_ne!(line.tlen, 0);
        assert_eq!(line.flag & 0x10 != 0, mate.flag & 0x20 != 0);
        let left = line.pos.min(mate.pos);
        let right = (line.pos + 150).max(mate.pos + 150);
        assert_eq!(line.tlen.unsigned_abs() as usize, right - left);
    }
}

#[test]
fn test_secondary_records() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("R.fasta");
    let sam = dir.path().join("out.sam");
    let output = run(&[
        "simulate",
        "--reference-out",
        reference.to_str().unwrap(),
        "--output",
        sam.to_str().unwrap(),
        "--seed",
        "3",
        "--reference-length",
        "10000",
        "--depth",
        "3",
    ]);
    assert!(output.status.success());
    let (reference, _, lines) = read_outputs(&dir);

    let mut secondaries = 0;
    for (i, line) in lines.iter().enumerate() {
        if !line.is_secondary() {
            continue;
        }
        secondaries += 1;
        let primary = &lines[i - 1];
        assert!(!primary.is_secondary(), "secondary must follow its primary");
        assert_eq!(primary.qname, line.qname);
        assert_eq!(primary.flag & 0xC0, line.flag & 0xC0);
        assert_eq!(line.mapq, 3);
        assert_eq!(line.seq, primary.seq);
        assert_eq!(line.qual, primary.qual);

        let nm = line.nm.expect("secondary records carry NM");
        let window = reference_window(&reference, line.pos, line.seq.len());
        let mismatches = window.bytes().zip(line.seq.bytes()).filter(|(a, b)| a != b).count();
        assert_eq!(nm, mismatches);
        assert!(2 * nm <= line.seq.len(), "divergent secondary written: NM {nm}");
    }
    assert!(secondaries > 0, "expected some secondary records");
}

#[test]
fn test_reproducible_with_seed() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    assert!(run_small_simulation(a.path(), 99, &[]).status.success());
    assert!(run_small_simulation(b.path(), 99, &[]).status.success());
    for file in ["R.fasta", "out.sam"] {
        assert_eq!(
            fs::read(a.path().join(file)).unwrap(),
            fs::read(b.path().join(file)).unwrap(),
            "{file} differs between runs with the same seed"
        );
    }
}

#[test]
fn test_reference_layout() {
    let dir = TempDir::new().unwrap();
    assert!(run_small_simulation(dir.path(), 5, &["--line-width", "60"]).status.success());
    let text = fs::read_to_string(dir.path().join("R.fasta")).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(">R A. randomus chromosome R"));
    let body: Vec<&str> = lines.collect();
    assert!(body[..body.len() - 1].iter().all(|l| l.len() == 60));
    assert!(!body.last().unwrap().is_empty() && body.last().unwrap().len() <= 60);
}

#[test]
fn test_fill_gaps_removes_ns() {
    let dir = TempDir::new().unwrap();
    assert!(run_small_simulation(dir.path(), 5, &["--fill-gaps"]).status.success());
    let (reference, _, _) = read_outputs(&dir);
    assert_eq!(reference.n_count(), 0);
}

#[test]
fn test_custom_reference_name() {
    let dir = TempDir::new().unwrap();
    let args = ["--ref-name", "chrSim", "--ref-description", "test contig"];
    assert!(run_small_simulation(dir.path(), 8, &args).status.success());
    let (reference, header, lines) = read_outputs(&dir);
    assert_eq!(reference.defline(), "chrSim test contig");
    assert!(header[1].starts_with("@SQ\tSN:chrSim\t"));
    assert!(lines.iter().all(|l| l.rname == "chrSim"));
}

#[test]
fn test_writes_sam_to_stdout() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("R.fasta");
    let output = run(&[
        "simulate",
        "--reference-out",
        reference.to_str().unwrap(),
        "--seed",
        "1",
        "--reference-length",
        "2000",
        "--depth",
        "1",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("@HD\tVN:1.0\tSO:unknown\n"));
    let (_, lines) = parse_sam(&stdout);
    assert!(!lines.is_empty());
}

#[test]
fn test_invalid_template_geometry_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_small_simulation(dir.path(), 1, &["--read-length", "500"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("template-length-avg"), "{stderr}");
    assert!(!dir.path().join("R.fasta").exists());
}

#[test]
fn test_invalid_quality_bounds_fail() {
    let dir = TempDir::new().unwrap();
    let output =
        run_small_simulation(dir.path(), 1, &["--min-quality", "40", "--max-quality", "20"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max-quality"));
}
