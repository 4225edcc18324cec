//! The rectangular simulation domain.

use crate::error::DomainError;

/// Axis-aligned rectangle `[l0, l1] × [h0, h1]` in (y, z) coordinates.
///
/// Construction through [`Domain::new`] guarantees finite bounds and a
/// non-degenerate extent on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    l0: f64,
    l1: f64,
    h0: f64,
    h1: f64,
}

impl Domain {
    /// The unit square `[0, 1] × [0, 1]` used by dimensionless fields.
    pub const UNIT: Domain = Domain {
        l0: 0.0,
        l1: 1.0,
        h0: 0.0,
        h1: 1.0,
    };

    /// Create a domain from its horizontal (`l0..l1`) and vertical
    /// (`h0..h1`) bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if any bound is non-finite or if a low
    /// bound is not strictly below its high bound.
    pub fn new(l0: f64, l1: f64, h0: f64, h1: f64) -> Result<Self, DomainError> {
        for (name, value) in [("l0", l0), ("l1", l1), ("h0", h0), ("h1", h1)] {
            if !value.is_finite() {
                return Err(DomainError::NonFiniteBound { name, value });
            }
        }
        if l0 >= l1 {
            return Err(DomainError::Degenerate {
                axis: "y",
                low: l0,
                high: l1,
            });
        }
        if h0 >= h1 {
            return Err(DomainError::Degenerate {
                axis: "z",
                low: h0,
                high: h1,
            });
        }
        Ok(Self { l0, l1, h0, h1 })
    }

    /// Domain anchored at the origin: `[0, length] × [0, height]`.
    pub fn from_extent(length: f64, height: f64) -> Result<Self, DomainError> {
        Self::new(0.0, length, 0.0, height)
    }

    /// Lower horizontal bound.
    pub fn l0(&self) -> f64 {
        self.l0
    }

    /// Upper horizontal bound.
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// Lower vertical bound.
    pub fn h0(&self) -> f64 {
        self.h0
    }

    /// Upper vertical bound.
    pub fn h1(&self) -> f64 {
        self.h1
    }

    /// Horizontal extent `l1 - l0`.
    pub fn width(&self) -> f64 {
        self.l1 - self.l0
    }

    /// Vertical extent `h1 - h0`.
    pub fn height(&self) -> f64 {
        self.h1 - self.h0
    }

    /// Whether `(y, z)` lies in the closed rectangle.
    pub fn contains(&self, y: f64, z: f64) -> bool {
        (self.l0..=self.l1).contains(&y) && (self.h0..=self.h1).contains(&z)
    }
}
