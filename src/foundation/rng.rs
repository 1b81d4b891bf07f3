//! Stateless, integer-seeded pseudo-random helpers.
//!
//! Every function here is a pure function of its inputs. The arithmetic is 32-bit wrapping so
//! results are reproducible across processes and platforms: the same seed always yields the same
//! value, which is what lets look-ahead preloading and "now playing" agree on a clip.

/// Mulberry32-style bit mix of `seed` mapped to `[0, 1)`.
///
/// Only the low 32 bits of `seed` participate.
pub fn random(seed: i64) -> f64 {
    let mut h = (seed as u32).wrapping_add(0x6d2b_79f5);
    h = (h ^ (h >> 15)).wrapping_mul(h | 1);
    h ^= h.wrapping_add((h ^ (h >> 7)).wrapping_mul(h | 61));
    f64::from(h ^ (h >> 14)) / 4_294_967_296.0
}

/// Integer in `[min, max)` derived from [`random`].
pub fn rand_int(seed: i64, min: i64, max: i64) -> i64 {
    (random(seed) * (max - min) as f64).floor() as i64 + min
}

/// Pick one element of `items`; `None` when `items` is empty.
///
/// The choice depends on the order of `items`, not only on its contents.
pub fn sample<T>(seed: i64, items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let idx = rand_int(seed, 0, items.len() as i64);
    items.get(idx as usize)
}

/// Polynomial rolling hash (`h * 31 + unit`) over UTF-16 code units, wrapped to `i32`.
pub fn hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
