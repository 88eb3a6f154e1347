//! RNG module - uniform random draws for tile generation
//!
//! The engine never reaches for a global RNG. Every draw goes through the
//! [`TileRng`] trait so callers can inject a seeded generator for reproducible
//! sessions or a scripted one for tests.
//!
//! - [`SimpleRng`]: seeded LCG, the default source
//! - [`SequenceRng`]: replays a fixed list of draws, cycling when exhausted

/// Source of uniform random draws
pub trait TileRng {
    /// Generate random value in range [0, max)
    ///
    /// `max` is never zero when called by the engine.
    fn next_range(&mut self, max: u32) -> u32;
}

impl<R: TileRng + ?Sized> TileRng for &mut R {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

impl<R: TileRng + ?Sized> TileRng for Box<R> {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Get the current RNG state (for restarting with the same stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TileRng for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle with a short period; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Scripted draws, replayed in order and cycled when exhausted
///
/// Each stored value is reduced modulo the requested range, so a script of
/// catalog indices drives [`crate::TileCatalog::draw`] directly.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl TileRng for SequenceRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v % max.max(1)
    }
}
