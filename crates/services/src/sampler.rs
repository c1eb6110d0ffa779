//! Uniform sampling of distinct elements.

use rand::Rng;
use rand::seq::SliceRandom;

/// Pick up to `count` distinct elements in uniformly random order.
///
/// The input is copied and Fisher-Yates shuffled, so every permutation of the
/// result is equally likely and the input is never mutated. When `count`
/// exceeds the input length, the whole input is returned shuffled.
#[must_use]
pub fn sample<T: Clone>(items: &[T], count: usize) -> Vec<T> {
    let mut rng = rand::rng();
    sample_with(&mut rng, items, count)
}

/// Like [`sample`], but drawing from the given random source.
///
/// Tests pass a seeded `StdRng` here to make selection deterministic.
#[must_use]
pub fn sample_with<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}
