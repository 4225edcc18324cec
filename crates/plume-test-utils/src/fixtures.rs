//! Reusable fixture fields.
//!
//! - [`uniform_field`]: constant coefficients on the unit square.
//! - [`LinearDiffusivityField`]: diffusivity growing linearly away from
//!   the low walls, no advection.
//! - [`DimensionlessConstant`]: constant dimensionless coefficients.
//! - [`NanField`]: returns NaN velocity once a particle passes a
//!   threshold; drives ensembles to divergence on purpose.

use plume_core::{
    AdvectionDiffusionField, ConstantField, DimensionlessField, Domain,
};

/// Constant velocity and diffusivity on [`Domain::UNIT`].
pub fn uniform_field(v: f64, w: f64, kh: f64, kv: f64, dt: f64) -> ConstantField {
    ConstantField {
        v,
        w,
        kh,
        kv,
        dt,
        domain: Domain::UNIT,
    }
}

/// `Kh = slope_h * y`, `Kv = slope_v * z` (clamped at zero), no advection,
/// on `[0, length] × [0, height]`.
#[derive(Clone, Copy, Debug)]
pub struct LinearDiffusivityField {
    pub slope_h: f64,
    pub slope_v: f64,
    pub dt: f64,
    pub domain: Domain,
}

impl LinearDiffusivityField {
    /// # Panics
    ///
    /// Panics if `length` or `height` is not finite and positive.
    pub fn new(slope_h: f64, slope_v: f64, dt: f64, length: f64, height: f64) -> Self {
        Self {
            slope_h,
            slope_v,
            dt,
            domain: Domain::from_extent(length, height).expect("fixture extent must be valid"),
        }
    }
}

impl AdvectionDiffusionField for LinearDiffusivityField {
    fn v(&self, _y: f64, _z: f64) -> f64 {
        0.0
    }

    fn w(&self, _y: f64, _z: f64) -> f64 {
        0.0
    }

    fn kh(&self, y: f64, _z: f64) -> f64 {
        (self.slope_h * y).max(0.0)
    }

    fn kv(&self, _y: f64, z: f64) -> f64 {
        (self.slope_v * z).max(0.0)
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn domain(&self) -> Domain {
        self.domain
    }
}

/// Constant dimensionless coefficients.
#[derive(Clone, Copy, Debug)]
pub struct DimensionlessConstant {
    pub v_prime: f64,
    pub w_prime: f64,
    pub peh_inv: f64,
    pub pev_inv: f64,
    pub dt_prime: f64,
}

impl DimensionlessField for DimensionlessConstant {
    fn v_prime(&self, _y: f64, _z: f64) -> f64 {
        self.v_prime
    }

    fn w_prime(&self, _y: f64, _z: f64) -> f64 {
        self.w_prime
    }

    fn peh_inv(&self, _y: f64, _z: f64) -> f64 {
        self.peh_inv
    }

    fn pev_inv(&self, _y: f64, _z: f64) -> f64 {
        self.pev_inv
    }

    fn dt_prime(&self) -> f64 {
        self.dt_prime
    }
}

/// Unit drift in `y` until `y > threshold`, NaN velocity beyond it.
#[derive(Clone, Copy, Debug)]
pub struct NanField {
    pub threshold: f64,
    pub dt: f64,
}

impl AdvectionDiffusionField for NanField {
    fn v(&self, y: f64, _z: f64) -> f64 {
        if y > self.threshold {
            f64::NAN
        } else {
            1.0
        }
    }

    fn w(&self, _y: f64, _z: f64) -> f64 {
        0.0
    }

    fn kh(&self, _y: f64, _z: f64) -> f64 {
        0.0
    }

    fn kv(&self, _y: f64, _z: f64) -> f64 {
        0.0
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn domain(&self) -> Domain {
        Domain::UNIT
    }
}

/// Sample mean and (population) variance.
///
/// Returns `(NaN, NaN)` for an empty slice.
pub fn mean_and_variance(xs: &[f64]) -> (f64, f64) {
    if xs.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var)
}
