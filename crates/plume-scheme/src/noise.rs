//! Seeded Wiener-increment generation.
//!
//! All draws come from ChaCha8. Standard-normal samples are produced with
//! the Box-Muller transform (cosine branch only), so every sample consumes
//! exactly two uniforms and stream positions stay predictable.
//!
//! Two stream layouts are supported:
//!
//! - [`StreamMode::Shared`]: one generator, consumed in particle order
//!   `0..N`. Trajectories depend on iteration order, so stepping is always
//!   sequential.
//! - [`StreamMode::PerParticle`]: particle `i` at step `k` draws from a
//!   generator whose 256-bit key holds `seed` and `k` in separate words,
//!   on stream `i`. Each particle's draws are independent of how the
//!   particle range is partitioned, and no two `(seed, k)` pairs share a
//!   key.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a standard-normal sample using the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Layout of the random streams feeding a scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamMode {
    /// A single stream consumed in particle order.
    #[default]
    Shared,
    /// An independent stream per particle per step.
    PerParticle,
}

/// Source of the Gaussian increments used by the integration schemes.
///
/// Seeded once; identical seeds and modes reproduce identical draws.
#[derive(Clone, Debug)]
pub struct NoiseSource {
    seed: u64,
    mode: StreamMode,
    shared: ChaCha8Rng,
    step: u64,
}

impl NoiseSource {
    /// Create a noise source with the given seed and stream layout.
    pub fn new(seed: u64, mode: StreamMode) -> Self {
        Self {
            seed,
            mode,
            shared: ChaCha8Rng::seed_from_u64(seed),
            step: 0,
        }
    }

    /// Single shared stream (see [`StreamMode::Shared`]).
    pub fn shared(seed: u64) -> Self {
        Self::new(seed, StreamMode::Shared)
    }

    /// Independent per-particle streams (see [`StreamMode::PerParticle`]).
    pub fn per_particle(seed: u64) -> Self {
        Self::new(seed, StreamMode::PerParticle)
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The stream layout.
    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// Number of completed steps (advanced by the schemes).
    pub fn steps_completed(&self) -> u64 {
        self.step
    }

    /// Draw the next standard-normal sample from the shared stream.
    pub fn standard_normal(&mut self) -> f64 {
        standard_normal(&mut self.shared)
    }

    pub(crate) fn shared_rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.shared
    }

    pub(crate) fn step_streams(&self) -> StepStreams {
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&self.seed.to_le_bytes());
        key[8..16].copy_from_slice(&self.step.to_le_bytes());
        StepStreams { key }
    }

    pub(crate) fn finish_step(&mut self) {
        self.step += 1;
    }
}

/// Per-particle generator factory for one step.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StepStreams {
    key: [u8; 32],
}

impl StepStreams {
    pub(crate) fn particle_rng(self, particle: usize) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(self.key);
        rng.set_stream(particle as u64);
        rng
    }
}
