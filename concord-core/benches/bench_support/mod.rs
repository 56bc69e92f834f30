//! Deterministic synthetic ratings for the ranking benchmarks.

use std::collections::BTreeMap;

use concord_core::Preferences;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Size of the item catalogue subjects draw from.
const CATALOGUE_SIZE: usize = 200;

/// Probability that a subject rated any given catalogue item.
const RATING_DENSITY: f64 = 0.1;

/// Name of the `index`th generated subject.
#[must_use]
pub fn subject_name(index: usize) -> String {
    format!("subject-{index:05}")
}

/// Generate `subjects` sparse rating mappings over a shared catalogue.
///
/// Scores fall on the half-star scale between 1.0 and 5.0. Uses a seeded RNG
/// so every run benchmarks the same dataset.
#[must_use]
#[expect(clippy::expect_used, reason = "generated scores are always finite")]
#[expect(
    clippy::float_arithmetic,
    reason = "half-star scores are derived by halving"
)]
pub fn generate_preferences(subjects: usize, seed: u64) -> Preferences {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scores: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for subject in 0..subjects {
        let ratings = scores.entry(subject_name(subject)).or_default();
        for item in 0..CATALOGUE_SIZE {
            if rng.gen_bool(RATING_DENSITY) {
                let half_stars: u8 = rng.gen_range(2..=10);
                ratings.insert(format!("item-{item:04}"), f64::from(half_stars) / 2.0);
            }
        }
    }
    Preferences::try_from(scores).expect("generated scores are finite")
}
