//! Box (histogram) density estimator.
//!
//! Each particle adds one count to the cell containing it; the grid is
//! then divided by the particle count so the cells hold occupancy
//! fractions. Cell indices are clamped into range, which places particles
//! sitting exactly on the upper walls (or pushed slightly outside by the
//! single-bounce reflection) in the last row/column.

use plume_core::ParticleEnsemble;

use crate::error::EstimateError;
use crate::grid::DensityGrid;

/// Estimates particle density on a regular grid over `[0, L] × [0, H]`.
///
/// Owns its output grid; every call to [`estimate`](Self::estimate)
/// overwrites it rather than accumulating.
#[derive(Clone, Debug)]
pub struct DensityEstimator {
    height: f64,
    length: f64,
    grid: DensityGrid,
}

impl DensityEstimator {
    /// Create an estimator with `nbox_y` horizontal and `nbox_z` vertical
    /// cells over a domain of height `height` (H) and length `length` (L).
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidGrid`] if a cell count is zero or
    /// if `height`/`length` is not finite and positive.
    pub fn new(
        nbox_y: usize,
        nbox_z: usize,
        height: f64,
        length: f64,
    ) -> Result<Self, EstimateError> {
        for (name, value) in [("height", height), ("length", length)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::InvalidGrid {
                    reason: format!("{name} must be finite and positive, got {value}"),
                });
            }
        }
        Ok(Self {
            height,
            length,
            grid: DensityGrid::zeros(nbox_y, nbox_z)?,
        })
    }

    /// Horizontal cell width `L / nbox_y`.
    pub fn dy(&self) -> f64 {
        self.length / self.grid.nbox_y() as f64
    }

    /// Vertical cell height `H / nbox_z`.
    pub fn dz(&self) -> f64 {
        self.height / self.grid.nbox_z() as f64
    }

    /// Cell `(i, j)` that position `(y, z)` is counted in.
    pub fn cell_of(&self, y: f64, z: f64) -> (usize, usize) {
        (
            bin(y, self.dy(), self.grid.nbox_y()),
            bin(z, self.dz(), self.grid.nbox_z()),
        )
    }

    /// Bin `ensemble` and normalize by its particle count.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::NoParticles`] for an empty ensemble; the
    /// grid is left all-zero in that case.
    pub fn estimate(&mut self, ensemble: &ParticleEnsemble) -> Result<&DensityGrid, EstimateError> {
        self.grid.clear();
        if ensemble.is_empty() {
            return Err(EstimateError::NoParticles);
        }
        for (y, z) in ensemble.iter() {
            let (i, j) = self.cell_of(y, z);
            self.grid.add_at(i, j, 1.0);
        }
        self.grid.scale(1.0 / ensemble.len() as f64);
        Ok(&self.grid)
    }

    /// The most recent estimate.
    pub fn grid(&self) -> &DensityGrid {
        &self.grid
    }

    /// Consume the estimator and return its grid.
    pub fn into_grid(self) -> DensityGrid {
        self.grid
    }
}

/// `floor(x / width)` clamped to `[0, n - 1]`. NaN lands in cell 0.
#[inline]
fn bin(x: f64, width: f64, n: usize) -> usize {
    let k = (x / width).floor();
    if k >= 1.0 {
        (k as usize).min(n - 1)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn new_rejects_bad_extent() {
        assert!(DensityEstimator::new(4, 4, 0.0, 1.0).is_err());
        assert!(DensityEstimator::new(4, 4, 1.0, -1.0).is_err());
        assert!(DensityEstimator::new(4, 4, f64::NAN, 1.0).is_err());
        assert!(DensityEstimator::new(0, 4, 1.0, 1.0).is_err());
    }

    #[test]
    fn single_particle_fills_one_cell() {
        let mut est = DensityEstimator::new(4, 2, 1.0, 2.0).unwrap();
        let e = ParticleEnsemble::uniform(1, 1.1, 0.7);
        let g = est.estimate(&e).unwrap();
        // dy = 0.5 -> i = 2, dz = 0.5 -> j = 1
        assert_eq!(g.get(2, 1), 1.0);
        assert_eq!(g.total(), 1.0);
    }

    #[test]
    fn upper_corner_counts_in_last_cell() {
        let (h, l) = (3.0, 7.0);
        let mut est = DensityEstimator::new(5, 6, h, l).unwrap();
        let e = ParticleEnsemble::uniform(3, l, h);
        let g = est.estimate(&e).unwrap();
        assert_eq!(g.get(4, 5), 1.0);
    }

    #[test]
    fn outside_particles_are_clamped() {
        let mut est = DensityEstimator::new(3, 3, 1.0, 1.0).unwrap();
        let e = ParticleEnsemble::from_positions(vec![-0.5, 1.5], vec![2.0, -3.0]).unwrap();
        let g = est.estimate(&e).unwrap();
        assert_eq!(g.get(0, 2), 0.5);
        assert_eq!(g.get(2, 0), 0.5);
    }

    #[test]
    fn empty_ensemble_reports_no_particles() {
        let mut est = DensityEstimator::new(2, 2, 1.0, 1.0).unwrap();
        est.estimate(&ParticleEnsemble::uniform(4, 0.1, 0.1)).unwrap();
        let err = est.estimate(&ParticleEnsemble::uniform(0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err, EstimateError::NoParticles);
        assert_eq!(est.grid().total(), 0.0);
        assert!(est.grid().cells().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn estimates_overwrite_rather_than_accumulate() {
        let mut est = DensityEstimator::new(2, 2, 1.0, 1.0).unwrap();
        est.estimate(&ParticleEnsemble::uniform(10, 0.1, 0.1)).unwrap();
        let g = est.estimate(&ParticleEnsemble::uniform(10, 0.9, 0.9)).unwrap();
        assert_eq!(g.get(0, 0), 0.0);
        assert_eq!(g.get(1, 1), 1.0);
    }

    #[test]
    fn fractions_match_counts() {
        let mut est = DensityEstimator::new(2, 1, 1.0, 1.0).unwrap();
        let e = ParticleEnsemble::from_positions(vec![0.1, 0.2, 0.3, 0.9], vec![0.5; 4]).unwrap();
        let g = est.estimate(&e).unwrap();
        assert_eq!(g.get(0, 0), 0.75);
        assert_eq!(g.get(1, 0), 0.25);
    }

    proptest! {
        #[test]
        fn total_mass_is_one(
            n in 1usize..2000,
            nbox_y in 1usize..40,
            nbox_z in 1usize..40,
            h in 0.1f64..100.0,
            l in 0.1f64..100.0,
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let ys: Vec<f64> = (0..n).map(|_| rng.random::<f64>() * l).collect();
            let zs: Vec<f64> = (0..n).map(|_| rng.random::<f64>() * h).collect();
            let e = ParticleEnsemble::from_positions(ys, zs).unwrap();
            let mut est = DensityEstimator::new(nbox_y, nbox_z, h, l).unwrap();
            let g = est.estimate(&e).unwrap();
            prop_assert!((g.total() - 1.0).abs() < 1e-9);
            prop_assert!(g.cells().iter().all(|&c| c >= 0.0));
        }
    }
}
