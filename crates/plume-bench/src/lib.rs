//! Benchmark profiles and utilities for the Plume particle transport simulator.
//!
//! Provides pre-built fields and [`SolverConfig`] profiles for benchmarking:
//!
//! - [`channel_field`]: sheared channel with height-dependent diffusivity
//! - [`reference_profile`]: 10K particles, backward-Itô, shared stream
//! - [`stress_profile`]: 1M particles, per-particle streams, all cores
//! - [`scattered_ensemble`]: deterministic particle placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use plume_core::{AdvectionDiffusionField, Domain, ParticleEnsemble};
use plume_scheme::{IntegrationScheme, StreamMode};
use plume_solver::{SolverConfig, StartPositions};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Channel length (horizontal extent).
pub const LENGTH: f64 = 10.0;
/// Channel height (vertical extent).
pub const HEIGHT: f64 = 1.0;

/// Linear shear `v = 0.5 z`, `Kh = 0.01`, `Kv = 0.01 (0.1 + z)`, dt = 0.01.
#[derive(Clone, Copy, Debug)]
pub struct ChannelField {
    domain: Domain,
}

impl AdvectionDiffusionField for ChannelField {
    fn v(&self, _y: f64, z: f64) -> f64 {
        0.5 * z / HEIGHT
    }

    fn w(&self, _y: f64, _z: f64) -> f64 {
        0.0
    }

    fn kh(&self, _y: f64, _z: f64) -> f64 {
        0.01
    }

    fn kv(&self, _y: f64, z: f64) -> f64 {
        0.01 * (0.1 + z / HEIGHT)
    }

    fn dt(&self) -> f64 {
        0.01
    }

    fn domain(&self) -> Domain {
        self.domain
    }
}

/// The benchmark channel on `[0, LENGTH] × [0, HEIGHT]`.
pub fn channel_field() -> ChannelField {
    ChannelField {
        domain: Domain::from_extent(LENGTH, HEIGHT).expect("channel extent is valid"),
    }
}

/// 10K particles released mid-channel, backward-Itô, shared stream, 1 time unit.
pub fn reference_profile(seed: u64) -> SolverConfig {
    SolverConfig::new(
        StartPositions::Uniform {
            count: 10_000,
            y: 1.0,
            z: HEIGHT / 2.0,
        },
        IntegrationScheme::backward_ito(),
        1.0,
    )
    .with_seed(seed)
}

/// 1M particles, per-particle streams on every available core, 0.1 time units.
pub fn stress_profile(seed: u64) -> SolverConfig {
    SolverConfig::new(
        StartPositions::Uniform {
            count: 1_000_000,
            y: 1.0,
            z: HEIGHT / 2.0,
        },
        IntegrationScheme::backward_ito(),
        0.1,
    )
    .with_seed(seed)
    .with_streams(StreamMode::PerParticle)
}

/// `count` particles spread uniformly over the channel by a seeded ChaCha8 stream.
pub fn scattered_ensemble(count: usize, seed: u64) -> ParticleEnsemble {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ys = Vec::with_capacity(count);
    let mut zs = Vec::with_capacity(count);
    for _ in 0..count {
        ys.push(rng.random::<f64>() * LENGTH);
        zs.push(rng.random::<f64>() * HEIGHT);
    }
    ParticleEnsemble::from_positions(ys, zs).expect("axes have equal length")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile(1).validate().is_ok());
        assert!(stress_profile(1).validate().is_ok());
    }

    #[test]
    fn scattered_is_deterministic_and_inside() {
        let a = scattered_ensemble(1000, 5);
        assert_eq!(a, scattered_ensemble(1000, 5));
        let d = channel_field().domain();
        assert!(a.iter().all(|(y, z)| d.contains(y, z)));
        assert_eq!(a.len(), 1000);
        assert_ne!(a, scattered_ensemble(1000, 6));
    }
}
