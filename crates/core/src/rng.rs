//! RNG module - injectable randomness for token draws and bonus rolls
//!
//! Every random decision in the engine goes through [`rand::Rng`], so callers choose the
//! source: production sessions use `StdRng::from_entropy()`, tests use [`SimpleRng`]
//! (or any other seedable generator) to pin outcomes.
//!
//! Also provides the uniform token draw shared by the generator and the refill step.

use rand::{Error, Rng, RngCore, SeedableRng};

use crate::types::TokenKind;

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

    /// Current state (re-seeding with it reproduces the remaining sequence)
    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // The low bits of a power-of-two LCG cycle quickly; fold the high half in.
        let x = self.step();
        x ^ (x >> 16)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimpleRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Draw a token kind uniformly from the six kinds
pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> TokenKind {
    TokenKind::ALL[rng.gen_range(0..TokenKind::ALL.len())]
}
