//! Recommendation cycle
//!
//! Walks a conversation through the catalog in shuffled order so every entry
//! is shown once per pass before anything repeats.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct RecommendationCycle {
    order: Vec<usize>,
    pos: usize,
    last: Option<usize>,
}

impl RecommendationCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next entry to recommend, or `None` for an empty catalog.
    ///
    /// The permutation is rebuilt whenever the catalog size changes. When a
    /// pass is exhausted the order is reshuffled, and the first entry of the
    /// new pass is never the entry that ended the previous one.
    pub fn next_index<R: Rng + ?Sized>(&mut self, catalog_len: usize, rng: &mut R) -> Option<usize> {
        if catalog_len == 0 {
            return None;
        }

        if self.order.len() != catalog_len {
            self.order = (0..catalog_len).collect();
            self.order.shuffle(rng);
            self.pos = 0;
            self.last = None;
        }

        if self.pos >= self.order.len() {
            self.order.shuffle(rng);
            self.pos = 0;
            self.avoid_boundary_repeat(rng);
        }

        let idx = self.order[self.pos];
        self.pos += 1;
        self.last = Some(idx);
        Some(idx)
    }

    fn avoid_boundary_repeat<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.order.len() > 1 && self.last == self.order.first().copied() {
            let swap_with = rng.gen_range(1..self.order.len());
            self.order.swap(0, swap_with);
        }
    }
}
