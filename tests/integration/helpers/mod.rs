//! Helper utilities for integration tests.

pub mod sam_lines;

pub use sam_lines::*;
