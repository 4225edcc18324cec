//! Particle ensemble: positions of N particles and their shared clock.
//!
//! Positions are stored as one contiguous buffer per axis (structure of
//! arrays), which keeps the per-axis update loops cache-friendly and lets
//! integration schemes split both axes into matching disjoint chunks.

use std::fmt;

use crate::error::EnsembleError;

/// Positions `(y, z)` of N particles plus the elapsed simulation time.
///
/// The particle count is fixed at construction. All particles advance
/// synchronously, so a single time value is shared by the ensemble.
/// `Clone` produces a fully independent copy of both coordinate buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleEnsemble {
    y: Vec<f64>,
    z: Vec<f64>,
    time: f64,
}

impl ParticleEnsemble {
    /// Create `count` particles all located at `(y, z)`, at time 0.
    pub fn uniform(count: usize, y: f64, z: f64) -> Self {
        Self {
            y: vec![y; count],
            z: vec![z; count],
            time: 0.0,
        }
    }

    /// Create one particle per `(y[i], z[i])` pair, at time 0.
    ///
    /// # Errors
    ///
    /// Returns [`EnsembleError::LengthMismatch`] if the two lists differ
    /// in length.
    pub fn from_positions(y: Vec<f64>, z: Vec<f64>) -> Result<Self, EnsembleError> {
        if y.len() != z.len() {
            return Err(EnsembleError::LengthMismatch {
                y_len: y.len(),
                z_len: z.len(),
            });
        }
        Ok(Self { y, z, time: 0.0 })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Returns `true` if the ensemble holds no particles.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.y.len(),
            "particle index {index} out of range for ensemble of {}",
            self.y.len()
        );
    }

    /// Horizontal coordinate of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn y(&self, index: usize) -> f64 {
        self.check_index(index);
        self.y[index]
    }

    /// Vertical coordinate of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn z(&self, index: usize) -> f64 {
        self.check_index(index);
        self.z[index]
    }

    /// Position `(y, z)` of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn position(&self, index: usize) -> (f64, f64) {
        self.check_index(index);
        (self.y[index], self.z[index])
    }

    /// Mutable handle to the horizontal coordinate of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn y_mut(&mut self, index: usize) -> &mut f64 {
        self.check_index(index);
        &mut self.y[index]
    }

    /// Mutable handle to the vertical coordinate of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn z_mut(&mut self, index: usize) -> &mut f64 {
        self.check_index(index);
        &mut self.z[index]
    }

    /// Overwrite the position of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set_position(&mut self, index: usize, y: f64, z: f64) {
        self.check_index(index);
        self.y[index] = y;
        self.z[index] = z;
    }

    /// All horizontal coordinates, in particle order.
    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    /// All vertical coordinates, in particle order.
    pub fn zs(&self) -> &[f64] {
        &self.z
    }

    /// Both coordinate buffers, mutably and simultaneously.
    ///
    /// The two slices always have length [`len()`](Self::len).
    pub fn axes_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.y, &mut self.z)
    }

    /// Iterate over `(y, z)` positions in particle order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.y.iter().copied().zip(self.z.iter().copied())
    }

    /// Elapsed simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Overwrite the elapsed simulation time.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Add `dt` to the elapsed simulation time.
    pub fn advance_time(&mut self, dt: f64) {
        self.time += dt;
    }
}

impl fmt::Display for ParticleEnsemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (y, z)) in self.iter().enumerate() {
            writeln!(f, "{i} : ({y}, {z})")?;
        }
        Ok(())
    }
}
