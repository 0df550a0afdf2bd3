//! Numeric and boolean value generators.

use rand::Rng;

/// Generate a random integer in [0, 100].
pub fn random_integer<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(0..=100)
}

/// Generate a random long in [0, 10000].
pub fn random_long<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(0..=10_000)
}

/// Generate a random double in [0, 1000000).
pub fn random_double<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1_000_000.0)
}
