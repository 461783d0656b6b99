//! Integration tests for the perfect-aligner binary.
//!
//! These tests run the built executable and check the files it writes.

mod helpers;
mod test_check_fasta_command;
mod test_simulate_command;
