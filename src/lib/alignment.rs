//! Simulated alignments and identity-keyed alignment sets.
//!
//! An [`Alignment`] places one read of a spot on the reference. Two alignments
//! are the *same read* when they share a spot name and read number, wherever
//! they land; [`AlignmentSet`] indexes alignments by that identity.

use crate::errors::{Result, SimulationError};
use ahash::AHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Which mate of a pair a read is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReadNumber {
    First,
    Second,
}

impl ReadNumber {
    /// The other read of the pair.
    #[must_use]
    pub const fn mate(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for ReadNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("1"),
            Self::Second => f.write_str("2"),
        }
    }
}

/// Pairing identity of an alignment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlignmentKey {
    pub name: String,
    pub read_number: ReadNumber,
}

impl AlignmentKey {
    #[must_use]
    pub fn new(name: impl Into<String>, read_number: ReadNumber) -> Self {
        Self { name: name.into(), read_number }
    }

    /// Key of the other read of the same spot.
    #[must_use]
    pub fn mate(&self) -> Self {
        Self { name: self.name.clone(), read_number: self.read_number.mate() }
    }
}

/// One read placed on the reference over the half-open range `[start, end)`.
///
/// Equality and hashing consider only the spot name and read number; the
/// range and strand are ignored so a read placed twice compares equal to
/// itself.
#[derive(Clone, Debug)]
pub struct Alignment {
    pub name: String,
    pub read_number: ReadNumber,
    pub range: Range<usize>,
    pub reversed: bool,
}

impl Alignment {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        read_number: ReadNumber,
        range: Range<usize>,
        reversed: bool,
    ) -> Self {
        Self { name: name.into(), read_number, range, reversed }
    }

    #[must_use]
    pub fn key(&self) -> AlignmentKey {
        AlignmentKey::new(self.name.clone(), self.read_number)
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Half-open interval overlap; ranges that merely touch do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.range.start < other.range.end && other.range.start < self.range.end
    }

    /// Order by `(start, end)`.
    #[must_use]
    pub fn cmp_by_position(&self, other: &Self) -> Ordering {
        (self.range.start, self.range.end).cmp(&(other.range.start, other.range.end))
    }

    /// True when `self` is the rightmost read of the pair formed with `mate`.
    ///
    /// The read ending furthest right is rightmost; ties fall to the larger
    /// start and then to read 2.
    #[must_use]
    pub fn is_rightmost_of(&self, mate: &Self) -> bool {
        let rank = |a: &Self| (a.range.end, a.range.start, a.read_number);
        rank(self) > rank(mate)
    }
}

impl PartialEq for Alignment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.read_number == other.read_number
    }
}

impl Eq for Alignment {}

impl Hash for Alignment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.read_number.hash(state);
    }
}

/// Signed template length of `read` paired with `mate`.
///
/// The magnitude is the outer span of both reads; the sign is negative for
/// the rightmost read.
///
/// ```
/// use perfect_aligner_lib::alignment::{Alignment, ReadNumber, template_length};
///
/// let r1 = Alignment::new("1", ReadNumber::First, 0..150, false);
/// let r2 = Alignment::new("1", ReadNumber::Second, 900..1050, true);
/// assert_eq!(template_length(&r1, &r2), 1050);
/// assert_eq!(template_length(&r2, &r1), -1050);
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn template_length(read: &Alignment, mate: &Alignment) -> i64 {
    let left = read.range.start.min(mate.range.start);
    let right = read.range.end.max(mate.range.end);
    let span = (right - left) as i64;
    if read.is_rightmost_of(mate) { -span } else { span }
}

/// A collection of alignments deduplicated by pairing identity.
///
/// Iteration follows first-insertion order. Inserting an alignment whose
/// identity is already present keeps the existing one.
#[derive(Clone, Debug, Default)]
pub struct AlignmentSet {
    alignments: Vec<Alignment>,
    index: AHashMap<AlignmentKey, usize>,
}

impl AlignmentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse a list of alignments into a set.
    #[must_use]
    pub fn from_alignments(alignments: impl IntoIterator<Item = Alignment>) -> Self {
        let mut set = Self::new();
        for alignment in alignments {
            set.insert(alignment);
        }
        set
    }

    /// Add an alignment. Returns false if its identity was already present.
    pub fn insert(&mut self, alignment: Alignment) -> bool {
        let key = alignment.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.alignments.len());
        self.alignments.push(alignment);
        true
    }

    #[must_use]
    pub fn get(&self, key: &AlignmentKey) -> Option<&Alignment> {
        self.index.get(key).map(|&i| &self.alignments[i])
    }

    /// Whether an alignment with the same identity as `alignment` is present.
    #[must_use]
    pub fn contains(&self, alignment: &Alignment) -> bool {
        self.index.contains_key(&alignment.key())
    }

    /// The member sharing `alignment`'s identity, whatever its range.
    #[must_use]
    pub fn counterpart(&self, alignment: &Alignment) -> Option<&Alignment> {
        self.get(&alignment.key())
    }

    /// The other read of `alignment`'s spot.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::MissingMate`] when the set holds no mate;
    /// `set` names this set in the message.
    pub fn mate_of(&self, alignment: &Alignment, set: &'static str) -> Result<&Alignment> {
        let key = AlignmentKey::new(alignment.name.clone(), alignment.read_number.mate());
        self.get(&key).ok_or_else(|| SimulationError::MissingMate {
            name: alignment.name.clone(),
            read_number: alignment.read_number,
            set,
        })
    }

    /// Members of `self` whose identity is also present in `other`, in the
    /// iteration order of `self`.
    pub fn intersection<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = &'a Alignment> {
        self.alignments.iter().filter(move |a| other.contains(a))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alignment> {
        self.alignments.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    /// Largest range end over the set, or 0 when empty.
    #[must_use]
    pub fn max_end(&self) -> usize {
        self.alignments.iter().map(Alignment::end).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a AlignmentSet {
    type Item = &'a Alignment;
    type IntoIter = std::slice::Iter<'a, Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.alignments.iter()
    }
}

impl FromIterator<Alignment> for AlignmentSet {
    fn from_iter<I: IntoIterator<Item = Alignment>>(iter: I) -> Self {
        Self::from_alignments(iter)
    }
}
