//! Random number generator utilities for simulation.
//!
//! Provides seeded RNG creation for reproducible simulations, the polar
//! (Marsaglia) normal sampler, and the small uniform helpers the simulator
//! draws from.

use perfect_aligner_dna::Base;
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use rand_distr::{Distribution, OpenClosed01};

/// Create a random number generator, optionally seeded for reproducibility.
///
/// # Arguments
///
/// * `seed` - Optional seed value. If `None`, uses OS entropy for randomness.
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::simulate::create_rng;
///
/// // Reproducible simulation
/// let mut rng1 = create_rng(Some(42));
/// let mut rng2 = create_rng(Some(42));
/// // rng1 and rng2 will produce identical sequences
///
/// // Random simulation (different each run)
/// let mut rng3 = create_rng(None);
/// ```
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Derive an independent child generator from a parent.
///
/// Each consumer of randomness gets its own child so that the draws of one
/// stage never shift the draws of another.
pub fn child_rng(parent: &mut impl Rng) -> StdRng {
    create_rng(Some(parent.random()))
}

/// Pairs of independent standard-normal deviates from the polar method.
///
/// Two uniforms `x1, x2` are drawn from `(-1, 1]`; the pair is rejected until
/// `w = x1² + x2²` lies in `(0, 1]`, then both are scaled by `sqrt(-2 ln(w) / w)`.
///
/// ```
/// use perfect_aligner_lib::simulate::{StandardNormalPair, create_rng};
/// use rand_distr::Distribution;
///
/// let mut rng = create_rng(Some(7));
/// let (z0, z1) = StandardNormalPair.sample(&mut rng);
/// assert!(z0.is_finite() && z1.is_finite());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardNormalPair;

impl Distribution<(f64, f64)> for StandardNormalPair {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        loop {
            let x1 = signed_unit(rng);
            let x2 = signed_unit(rng);
            let w = x1 * x1 + x2 * x2;
            if w > 0.0 && w <= 1.0 {
                let s = ((-2.0 * w.ln()) / w).sqrt();
                return (x1 * s, x2 * s);
            }
        }
    }
}

/// A uniform value in `(-1, 1]`.
#[inline]
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = OpenClosed01.sample(rng);
    2.0 * u - 1.0
}

/// A uniform integer in `[0, bound)`.
///
/// # Panics
///
/// Panics if `bound` is zero.
#[inline]
pub fn uniform_int(rng: &mut impl Rng, bound: usize) -> usize {
    rng.random_range(0..bound)
}

/// A uniform concrete base; never [`Base::N`].
#[inline]
pub fn random_base(rng: &mut impl Rng) -> Base {
    Base::ACGT[rng.random_range(0..4)]
}
