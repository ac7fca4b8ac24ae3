//! RNG module - deterministic food placement
//!
//! Food goes to a uniformly chosen free cell. A small LCG keeps games reproducible
//! for a given seed, which is what tests and benchmarks rely on.

use crate::snake::Snake;
use crate::types::Cell;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle quickly; use the high half.
        let high = (self.next_u32() >> 16) as u64;
        ((high * max as u64) >> 16) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Chooses food cells among the cells the snake leaves free.
#[derive(Debug, Clone, Default)]
pub struct FoodSpawner {
    rng: SimpleRng,
}

impl FoodSpawner {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick a free cell uniformly; `None` when the snake fills the board.
    pub fn place(&mut self, snake: &Snake) -> Option<Cell> {
        let free = snake.free_cells();
        if free == 0 {
            return None;
        }
        let pick = self.rng.next_range(free.min(u32::MAX as usize) as u32) as usize;
        snake.nth_free_cell(pick)
    }
}
