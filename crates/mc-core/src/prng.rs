//! Seeded, cross-implementation-stable PRNG.
//!
//! A mulberry32-compatible generator. The exact bit operations below must
//! match byte-for-byte across implementations (JS, C++, Rust): MC
//! determinism and cross-implementation replay validation both depend on
//! producing the identical draw sequence for a given seed.

use serde::{Deserialize, Serialize};

/// Mulberry32 generator, 32-bit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Construct a generator seeded with the given 32-bit value.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Reseed in place (used when starting a new MC run).
    pub fn set_seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Next draw in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        ((t ^ (t >> 14)) as u32 as f64) / 4_294_967_296.0
    }

    /// Bernoulli trial with success probability `p`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.random() < p
    }

    /// Uniform draw in `[a, b)`.
    pub fn uniform(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.random()
    }

    /// Gaussian draw with mean `mu` and standard deviation `sigma`, via
    /// Box-Muller. Consumes exactly two `random()` draws per call (one
    /// value returned, the paired value discarded), keeping PRNG
    /// consumption order simple and auditable.
    pub fn gaussian(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.random().max(f64::MIN_POSITIVE);
        let u2 = self.random();
        let r = (-2.0 * u1.ln()).sqrt();
        let z0 = r * (std::f64::consts::TAU * u2).cos();
        mu + sigma * z0
    }
}
