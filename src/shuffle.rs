use rand::seq::SliceRandom;
use rand::RngCore;

/// Uniformly permuted copy of `items` (Fisher-Yates); the input is left untouched
pub fn shuffle<T: Clone>(items: &[T], rng: &mut dyn RngCore) -> Vec<T> {
    shuffle_owned(items.to_vec(), rng)
}

/// Same as [`shuffle`] for a vector the caller no longer needs
pub fn shuffle_owned<T>(mut items: Vec<T>, rng: &mut dyn RngCore) -> Vec<T> {
    items.shuffle(rng);
    items
}
