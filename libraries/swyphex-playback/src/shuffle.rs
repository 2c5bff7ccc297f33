//! Shuffle selection for the queue
//!
//! Shuffle never reorders the queue. Instead a cycle tracks which indices
//! have been visited and picks the next one at random from the rest, so every
//! item plays exactly once per cycle and turning shuffle off simply resumes
//! sequential order from the current item.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// Visit-all-before-repeat shuffle state
#[derive(Debug, Clone)]
pub struct ShuffleCycle {
    rng: StdRng,

    /// Indices in the order they were played this cycle (last = current)
    played: Vec<usize>,

    /// Indices visited this cycle
    visited: HashSet<usize>,
}

impl ShuffleCycle {
    /// Create a cycle; a fixed seed makes the pick sequence reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            played: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Start a fresh cycle with `current` already visited
    pub fn restart(&mut self, current: usize) {
        self.clear();
        self.mark_played(current);
    }

    /// Forget the cycle entirely
    pub fn clear(&mut self) {
        self.played.clear();
        self.visited.clear();
    }

    /// Record an explicit jump to `index`
    pub fn mark_played(&mut self, index: usize) {
        self.played.push(index);
        self.visited.insert(index);
    }

    /// Pick an index not yet visited in this cycle
    ///
    /// Returns `None` once every index in `0..len` has been visited.
    pub fn pick_next(&mut self, len: usize) -> Option<usize> {
        let remaining: Vec<usize> = (0..len).filter(|i| !self.visited.contains(i)).collect();
        let next = *remaining.choose(&mut self.rng)?;
        self.mark_played(next);
        Some(next)
    }

    /// Begin the next cycle, avoiding an immediate repeat of `current`
    ///
    /// `current` is not counted as visited in the new cycle; it will come
    /// around again later in it.
    pub fn start_new_cycle(&mut self, len: usize, current: usize) -> usize {
        self.clear();

        let candidates: Vec<usize> = (0..len).filter(|&i| i != current || len == 1).collect();
        let next = candidates.choose(&mut self.rng).copied().unwrap_or(current);
        self.mark_played(next);
        next
    }

    /// Step back to the previously played index of this cycle
    ///
    /// The current index becomes unvisited again so a later forward pick can
    /// return to it.
    pub fn step_back(&mut self) -> Option<usize> {
        if self.played.len() < 2 {
            return None;
        }

        if let Some(left) = self.played.pop() {
            if !self.played.contains(&left) {
                self.visited.remove(&left);
            }
        }
        self.played.last().copied()
    }

    #[cfg(test)]
    fn is_complete(&self, len: usize) -> bool {
        (0..len).all(|i| self.visited.contains(&i))
    }

    #[cfg(test)]
    fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl Default for ShuffleCycle {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_never_repeats_within_cycle() {
        let mut cycle = ShuffleCycle::new(Some(7));
        cycle.restart(0);

        let mut seen = HashSet::from([0]);
        for _ in 1..10 {
            let next = cycle.pick_next(10).unwrap();
            assert!(seen.insert(next), "index {} picked twice", next);
        }

        assert!(cycle.is_complete(10));
        assert_eq!(cycle.pick_next(10), None);
    }

    #[test]
    fn new_cycle_avoids_current() {
        let mut cycle = ShuffleCycle::new(Some(3));
        for _ in 0..50 {
            cycle.restart(2);
            let next = cycle.start_new_cycle(3, 2);
            assert_ne!(next, 2);
            assert_eq!(cycle.visited_count(), 1);
        }
    }

    #[test]
    fn single_item_cycle_returns_same_index() {
        let mut cycle = ShuffleCycle::new(Some(1));
        cycle.restart(0);
        assert_eq!(cycle.pick_next(1), None);
        assert_eq!(cycle.start_new_cycle(1, 0), 0);
    }

    #[test]
    fn step_back_walks_play_order() {
        let mut cycle = ShuffleCycle::new(Some(11));
        cycle.restart(4);
        let a = cycle.pick_next(6).unwrap();
        let b = cycle.pick_next(6).unwrap();

        assert_eq!(cycle.step_back(), Some(a));
        assert_eq!(cycle.step_back(), Some(4));
        assert_eq!(cycle.step_back(), None);

        // b was un-visited by stepping back and can be picked again
        assert!(!cycle.visited.contains(&b));
        assert_eq!(cycle.visited_count(), 1);
    }

    #[test]
    fn seeded_cycles_are_reproducible() {
        let mut first = ShuffleCycle::new(Some(42));
        let mut second = ShuffleCycle::new(Some(42));
        first.restart(0);
        second.restart(0);

        let a: Vec<usize> = (0..7).filter_map(|_| first.pick_next(8)).collect();
        let b: Vec<usize> = (0..7).filter_map(|_| second.pick_next(8)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_length_has_nothing_to_pick() {
        let mut cycle = ShuffleCycle::new(Some(5));
        assert_eq!(cycle.pick_next(0), None);
        assert!(cycle.is_complete(0));
    }
}
