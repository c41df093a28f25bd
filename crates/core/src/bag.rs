//! Bag module - 7-bag random piece generation
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L), shuffled with
//! Fisher-Yates. Pieces are popped from the end until the bag is empty, then
//! a new bag is generated.
//!
//! The bag is a plain value: the caller owns it and passes it to every engine
//! operation that spawns a piece. Seed it for deterministic games.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::TetrominoType;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag<R = StdRng> {
    pool: ArrayVec<TetrominoType, 7>,
    rng: R,
}

impl Bag<StdRng> {
    /// Bag seeded from operating-system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic bag: the same seed always yields the same sequence
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Bag<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Bag<R> {
    /// Bag driven by a caller-supplied generator
    pub fn with_rng(rng: R) -> Self {
        Self {
            pool: ArrayVec::new(),
            rng,
        }
    }

    /// Draw the next piece type, refilling the bag when it runs out
    pub fn draw(&mut self) -> TetrominoType {
        loop {
            if let Some(kind) = self.pool.pop() {
                return kind;
            }
            self.refill();
        }
    }

    /// Types still waiting in the current bag, in pop order reversed
    pub fn remaining(&self) -> &[TetrominoType] {
        &self.pool
    }

    fn refill(&mut self) {
        self.pool.clear();
        self.pool.extend(TetrominoType::ALL);
        for i in (1..self.pool.len()).rev() {
            let j = self.rng.random_range(0..=i);
            self.pool.swap(i, j);
        }
    }
}

impl<R: Rng> Iterator for Bag<R> {
    type Item = TetrominoType;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.draw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_bag_yields_permutation() {
        let mut bag = Bag::seeded(12345);
        let drawn: HashSet<_> = (0..7).map(|_| bag.draw()).collect();
        assert_eq!(drawn.len(), 7);
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_every_bag_is_complete() {
        let mut bag = Bag::seeded(7);
        for _ in 0..20 {
            let mut chunk: Vec<_> = bag.by_ref().take(7).collect();
            chunk.sort_by_key(|k| k.as_str());
            let mut all = TetrominoType::ALL.to_vec();
            all.sort_by_key(|k| k.as_str());
            assert_eq!(chunk, all);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<_> = Bag::seeded(42).take(21).collect();
        let b: Vec<_> = Bag::seeded(42).take(21).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_remaining_shrinks() {
        let mut bag = Bag::seeded(1);
        assert!(bag.remaining().is_empty());
        bag.draw();
        assert_eq!(bag.remaining().len(), 6);
        bag.draw();
        assert_eq!(bag.remaining().len(), 5);
    }
}
