//! Seeded one-dimensional value noise.
//!
//! Drives the continuous-arc headings of exploring foragers and the wobble
//! added when they home on a target. Consecutive samples are close together,
//! so headings bend instead of jumping.

use serde::{Deserialize, Serialize};

/// A noise stream that advances a fixed step per sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothNoise {
    seed: u64,
    offset: f64,
    increment: f64,
}

impl SmoothNoise {
    #[must_use]
    pub fn new(seed: u64, offset: f64, increment: f64) -> Self {
        Self {
            seed,
            offset,
            increment,
        }
    }

    /// Returns the value at the current offset in `[0, 1]`, then advances.
    pub fn sample(&mut self) -> f64 {
        let value = value_noise(self.offset, self.seed);
        self.offset += self.increment;
        value
    }

    /// Unit heading from the next sample, spun `frequency` full turns across
    /// the noise range.
    pub fn heading(&mut self, frequency: f64) -> f64 {
        self.sample() * std::f64::consts::TAU * frequency
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_increment(&mut self, increment: f64) {
        self.increment = increment;
    }
}

/// Three octaves of smoothed lattice noise, clamped to `[0, 1]`.
#[must_use]
pub fn value_noise(x: f64, seed: u64) -> f64 {
    let n1 = hash_noise(x, seed) * 0.5;
    let n2 = hash_noise(x * 0.5, seed.wrapping_add(1)) * 0.3;
    let n3 = hash_noise(x * 0.25, seed.wrapping_add(2)) * 0.2;
    (n1 + n2 + n3).clamp(0.0, 1.0)
}

fn hash_noise(x: f64, seed: u64) -> f64 {
    let ix = x.floor() as i64;
    let fx = x - x.floor();
    let u = fx * fx * (3.0 - 2.0 * fx);
    let v0 = hash(ix, seed);
    let v1 = hash(ix.wrapping_add(1), seed);
    v0 + u * (v1 - v0)
}

fn hash(x: i64, seed: u64) -> f64 {
    let n = (x.wrapping_mul(127) as u64) ^ seed;
    let n = n.wrapping_mul(0x517cc1b727220a95);
    let n = n ^ (n >> 32);
    (n & 0xFFFFFF) as f64 / 0xFFFFFF as f64
}
