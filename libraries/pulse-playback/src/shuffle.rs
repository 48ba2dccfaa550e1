//! Shuffle selection
//!
//! Picks the next index uniformly at random, never repeating the current one.

use rand::Rng;

/// Pick a random playlist index different from `current`
///
/// Rejection sampling: draw from `[0, len)` until the draw differs from
/// `current`. Returns `None` when there is nothing else to pick
/// (`len <= 1`), in which case shuffle is a no-op.
pub fn pick_shuffle_index<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    current: usize,
) -> Option<usize> {
    if len <= 1 {
        return None;
    }

    loop {
        let candidate = rng.gen_range(0..len);
        if candidate != current {
            return Some(candidate);
        }
    }
}
