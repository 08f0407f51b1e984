//! Uniform random choice over candidate lists.
//!
//! Each successful pick consumes exactly one `gen_range` draw; picking from
//! an empty list consumes nothing. Seeded runs stay reproducible as long as
//! candidate lists are built in the same order.

use rand::Rng;

/// Uniform index into a list of `len` items.
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}

/// Uniform choice among borrowed candidates.
pub fn pick<'a, T: ?Sized, R: Rng + ?Sized>(items: &[&'a T], rng: &mut R) -> Option<&'a T> {
    pick_index(items.len(), rng).map(|i| items[i])
}
