//! Randomized "featured videos" selection for the home page.
//!
//! Kept apart from the filter engine so that filtering stays deterministic.
//! Callers choose between a seeded (reproducible) and an unseeded pick.

use folio_models::{CategoryFilter, VideoRecord};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Number of cards shown in the home page carousel.
pub const DEFAULT_FEATURED_COUNT: usize = 4;

/// Pick up to `count` distinct videos of a category using the given RNG.
///
/// Unlike the grid filter, a named category also admits compound categories
/// that contain it.
pub fn select_featured<'a, R: Rng + ?Sized>(
    videos: &'a [VideoRecord],
    category: &CategoryFilter,
    count: usize,
    rng: &mut R,
) -> Vec<&'a VideoRecord> {
    let mut candidates: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| category.includes(&v.category))
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}

/// Reproducible selection: the same seed always yields the same videos.
pub fn select_featured_seeded<'a>(
    videos: &'a [VideoRecord],
    category: &CategoryFilter,
    count: usize,
    seed: u64,
) -> Vec<&'a VideoRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    select_featured(videos, category, count, &mut rng)
}

/// Selection from the thread-local RNG; differs between calls.
pub fn select_featured_random<'a>(
    videos: &'a [VideoRecord],
    category: &CategoryFilter,
    count: usize,
) -> Vec<&'a VideoRecord> {
    select_featured(videos, category, count, &mut rand::rng())
}
