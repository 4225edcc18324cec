//! Finite-value check for ensembles.
//!
//! The schemes never inspect their output: a pathological field can drive
//! positions to NaN or infinity and the sweep carries on. This check lets
//! a driver detect that after the fact.

use std::error::Error;
use std::fmt;

use plume_core::ParticleEnsemble;

/// At least one particle has a NaN or infinite coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonFinite {
    /// Index of the first offending particle.
    pub first_index: usize,
    /// Total number of offending particles.
    pub count: usize,
}

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} particle(s) with non-finite position, first at index {}",
            self.count, self.first_index
        )
    }
}

impl Error for NonFinite {}

/// Check that every particle position is finite.
pub fn check_finite(ensemble: &ParticleEnsemble) -> Result<(), NonFinite> {
    let mut bad = ensemble
        .iter()
        .enumerate()
        .filter(|(_, (y, z))| !(y.is_finite() && z.is_finite()))
        .map(|(i, _)| i);

    match bad.next() {
        None => Ok(()),
        Some(first_index) => Err(NonFinite {
            first_index,
            count: 1 + bad.count(),
        }),
    }
}
