use rand::Rng;

use crate::{
    catalog::clip::{Clip, ClipCatalog},
    foundation::rng,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Seeded clip chooser shared by "now playing" and look-ahead preloading.
///
/// The session seed is fixed at construction, so two calls with the same arguments against the
/// same catalog always agree.
pub struct ClipSelector {
    global_seed: i64,
}

impl ClipSelector {
    /// Upper bound (exclusive) for seeds drawn by [`ClipSelector::from_rng`].
    pub const SEED_RANGE: i64 = 1_000_000;

    /// Selector with a fixed session seed.
    pub fn new(global_seed: i64) -> Self {
        Self { global_seed }
    }

    /// Draw the session seed once from `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0..Self::SEED_RANGE))
    }

    /// The session seed.
    pub fn global_seed(&self) -> i64 {
        self.global_seed
    }

    /// Pick one clip at least `min_duration` long, optionally restricted to urls containing
    /// `filter`. Returns `None` when nothing qualifies.
    pub fn select<'a>(
        &self,
        catalog: &'a ClipCatalog,
        seed: i64,
        min_duration: f64,
        filter: Option<&str>,
    ) -> Option<&'a Clip> {
        let candidates = catalog.candidates(min_duration, filter);
        let picked = rng::sample(self.global_seed.wrapping_add(seed), &candidates).copied();
        if picked.is_none() {
            tracing::trace!(seed, min_duration, ?filter, "no clip candidates");
        }
        picked
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/selector.rs"]
mod tests;
