//! Row-major 2D grid of cell values.

use crate::error::EstimateError;

/// `nbox_y × nbox_z` grid of non-negative cell values.
///
/// Row `i` indexes the horizontal (`y`) cell, column `j` the vertical
/// (`z`) cell. Storage is row-major: cell `(i, j)` lives at
/// `i * nbox_z + j`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    nbox_y: usize,
    nbox_z: usize,
    cells: Vec<f64>,
}

impl DensityGrid {
    /// All-zero grid.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidGrid`] if either dimension is zero
    /// or the cell count overflows `usize`.
    pub fn zeros(nbox_y: usize, nbox_z: usize) -> Result<Self, EstimateError> {
        let len = checked_len(nbox_y, nbox_z)?;
        Ok(Self {
            nbox_y,
            nbox_z,
            cells: vec![0.0; len],
        })
    }

    /// Grid from row-major cell values.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidGrid`] if a dimension is zero or
    /// `cells.len() != nbox_y * nbox_z`.
    pub fn from_cells(nbox_y: usize, nbox_z: usize, cells: Vec<f64>) -> Result<Self, EstimateError> {
        let len = checked_len(nbox_y, nbox_z)?;
        if cells.len() != len {
            return Err(EstimateError::InvalidGrid {
                reason: format!(
                    "{} cells supplied for a {nbox_y}x{nbox_z} grid",
                    cells.len()
                ),
            });
        }
        Ok(Self {
            nbox_y,
            nbox_z,
            cells,
        })
    }

    /// Number of horizontal cells (rows).
    pub fn nbox_y(&self) -> usize {
        self.nbox_y
    }

    /// Number of vertical cells (columns).
    pub fn nbox_z(&self) -> usize {
        self.nbox_z
    }

    /// Value of cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nbox_y` or `j >= nbox_z`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.nbox_y && j < self.nbox_z,
            "cell ({i}, {j}) out of range for {}x{} grid",
            self.nbox_y,
            self.nbox_z
        );
        self.cells[i * self.nbox_z + j]
    }

    /// Row `i` as a slice of `nbox_z` values.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nbox_y`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.nbox_y, "row {i} out of range for {} rows", self.nbox_y);
        &self.cells[i * self.nbox_z..(i + 1) * self.nbox_z]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks_exact(self.nbox_z)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Sum over all cells.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub(crate) fn add_at(&mut self, i: usize, j: usize, value: f64) {
        self.cells[i * self.nbox_z + j] += value;
    }

    pub(crate) fn scale(&mut self, factor: f64) {
        for c in &mut self.cells {
            *c *= factor;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(0.0);
    }
}

fn checked_len(nbox_y: usize, nbox_z: usize) -> Result<usize, EstimateError> {
    if nbox_y == 0 || nbox_z == 0 {
        return Err(EstimateError::InvalidGrid {
            reason: format!("grid dimensions must be non-zero, got {nbox_y}x{nbox_z}"),
        });
    }
    nbox_y
        .checked_mul(nbox_z)
        .ok_or_else(|| EstimateError::InvalidGrid {
            reason: format!("{nbox_y}x{nbox_z} cells overflow usize"),
        })
}
