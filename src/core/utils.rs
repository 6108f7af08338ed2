//! Random-source helpers.
//!
//! Every random decision in a battle is drawn from an injected
//! `FnMut() -> f64` yielding values in `[0, 1)`, so tests and replays can
//! feed fixed sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer in `[min, max]` inclusive.
pub fn roll_range(rng: &mut dyn FnMut() -> f64, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    let span = (max - min + 1) as f64;
    let r = rng().clamp(0.0, 1.0);
    let offset = (r * span).floor() as i32;
    (min + offset).min(max)
}

/// Uniform index into a collection of `len` items.
pub fn pick_index(rng: &mut dyn FnMut() -> f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let r = rng().clamp(0.0, 1.0);
    Some(((r * len as f64).floor() as usize).min(len - 1))
}

/// Production random source; seeded when `seed` is given.
pub fn rng_source(seed: Option<u64>) -> impl FnMut() -> f64 {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    move || rng.gen::<f64>()
}

/// Replays `values` in order, then keeps returning `fallback`.
pub fn sequence_source(values: Vec<f64>, fallback: f64) -> impl FnMut() -> f64 {
    let mut idx = 0usize;
    move || {
        let v = values.get(idx).copied().unwrap_or(fallback);
        idx += 1;
        v
    }
}
