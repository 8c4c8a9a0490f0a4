use rand::seq::SliceRandom;
use rand::Rng;

/// Draws a subset of candidates
pub trait RandomPicker {
    /// Pick `count` entries from `list`; with `allow_repeats` an entry may be
    /// drawn more than once. Returns fewer than `count` only when `list` is
    /// too short for a draw without repeats.
    fn pick(&mut self, list: &[String], count: usize, allow_repeats: bool) -> Vec<String>;
}

/// Uniform picker over any `rand` generator
///
/// Seed it (e.g. with `ChaCha8Rng::seed_from_u64`) for reproducible presets.
#[derive(Debug, Clone)]
pub struct RngPicker<R: Rng> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomPicker for RngPicker<R> {
    fn pick(&mut self, list: &[String], count: usize, allow_repeats: bool) -> Vec<String> {
        if list.is_empty() {
            return Vec::new();
        }
        if allow_repeats {
            (0..count)
                .filter_map(|_| list.choose(&mut self.rng).cloned())
                .collect()
        } else {
            list.choose_multiple(&mut self.rng, count).cloned().collect()
        }
    }
}
