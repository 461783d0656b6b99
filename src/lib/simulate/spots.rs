//! Paired-end spot generation.
//!
//! A spot is one simulated DNA fragment read from both ends. Read 1 starts at
//! the fragment origin; read 2 starts after a normally distributed insert and
//! lies on the opposite strand.

use super::rng::StandardNormalPair;
use crate::errors::Result;
use crate::validation::{validate_template_geometry, validate_template_stddev};
use rand::Rng;
use rand_distr::Distribution;

/// One read of a spot, positioned relative to the spot origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Read {
    pub position: usize,
    pub length: usize,
    pub reversed: bool,
}

impl Read {
    /// Offset one past the last base of this read, relative to the spot origin.
    #[must_use]
    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

/// A read pair drawn from one fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spot {
    /// Serial name, unique within one generator
    pub name: String,
    /// Read 1 and read 2
    pub reads: [Read; 2],
}

impl Spot {
    /// Span from the start of read 1 to the end of read 2.
    #[must_use]
    pub fn template_length(&self) -> usize {
        self.reads[1].end()
    }
}

/// Read length and insert size parameters of a paired-end library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryModel {
    /// Length of each mate
    pub read_length: usize,
    /// Mean template length
    pub template_length_avg: usize,
    /// Standard deviation of the template length
    pub template_length_stddev: f64,
}

impl Default for LibraryModel {
    fn default() -> Self {
        Self { read_length: 150, template_length_avg: 1000, template_length_stddev: 200.0 }
    }
}

/// An endless stream of spots.
///
/// The generator never ends on its own; consumers decide when they have
/// enough (see [`crate::tiling::tile`]).
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::simulate::{LibraryModel, SpotGenerator, create_rng};
///
/// let spots = SpotGenerator::new(LibraryModel::default(), create_rng(Some(42))).unwrap();
/// let first: Vec<_> = spots.take(3).collect();
/// assert_eq!(first[0].name, "1");
/// assert_eq!(first[2].name, "3");
/// assert!(first.iter().all(|s| s.reads[1].position > 150));
/// ```
#[derive(Debug)]
pub struct SpotGenerator<R> {
    model: LibraryModel,
    rng: R,
    serial: u64,
}

impl<R: Rng> SpotGenerator<R> {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// Returns an error unless `2 * read_length < template_length_avg`; otherwise
    /// the insert would be rejected forever. Also rejects a stddev that is
    /// negative, not finite, or larger than the mean template length.
    pub fn new(model: LibraryModel, rng: R) -> Result<Self> {
        validate_template_geometry(model.read_length, model.template_length_avg)?;
        validate_template_stddev(model.template_length_stddev, model.template_length_avg)?;
        Ok(Self { model, rng, serial: 0 })
    }

    /// Number of spots emitted so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.serial
    }

    /// Draw read 2's start offset, redrawing implausibly short templates.
    /// Returns the offset and whether read 1 is on the reverse strand.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn draw_insert(&mut self) -> (usize, bool) {
        let read_length = self.model.read_length as i64;
        let gap = self.model.template_length_avg as i64 - 2 * read_length;
        loop {
            let (x, sign) = StandardNormalPair.sample(&mut self.rng);
            let dif = (self.model.template_length_stddev * x).round() as i64;
            let s2 = (read_length + gap).saturating_add(dif);
            if s2 > read_length {
                return (s2 as usize, sign < 0.0);
            }
        }
    }
}

impl<R: Rng> Iterator for SpotGenerator<R> {
    type Item = Spot;

    fn next(&mut self) -> Option<Spot> {
        let (s2, reversed) = self.draw_insert();
        self.serial += 1;
        let length = self.model.read_length;
        Some(Spot {
            name: self.serial.to_string(),
            reads: [
                Read { position: 0, length, reversed },
                Read { position: s2, length, reversed: !reversed },
            ],
        })
    }
}
