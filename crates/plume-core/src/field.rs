//! Advection-diffusion field contract.
//!
//! Integration schemes never own a field; they borrow one per step and
//! only issue pure queries against it. Fields are `Send + Sync` so that a
//! scheme can evaluate them from several worker threads at once.
//!
//! Two flavours exist:
//!
//! - [`AdvectionDiffusionField`]: dimensional velocities `(v, w)`,
//!   diffusivities `(Kh, Kv)`, an arbitrary [`Domain`] and time step `dt`.
//! - [`DimensionlessField`]: scaled velocities `(V', W')`, inverse Peclet
//!   numbers `(1/Pe_h, 1/Pe_v)` on the unit square, time step `dt'`.
//!
//! [`Dimensionless`] adapts the second onto the first so both run through
//! exactly the same scheme code.

use crate::domain::Domain;

/// Velocity and diffusivity queries over a rectangular domain.
pub trait AdvectionDiffusionField: Send + Sync {
    /// Horizontal velocity at `(y, z)`.
    fn v(&self, y: f64, z: f64) -> f64;

    /// Vertical velocity at `(y, z)`.
    fn w(&self, y: f64, z: f64) -> f64;

    /// Horizontal diffusivity at `(y, z)`. Must be non-negative.
    fn kh(&self, y: f64, z: f64) -> f64;

    /// Vertical diffusivity at `(y, z)`. Must be non-negative.
    fn kv(&self, y: f64, z: f64) -> f64;

    /// Fixed integration time step.
    fn dt(&self) -> f64;

    /// Domain the particles are confined to.
    fn domain(&self) -> Domain;

    /// Lower horizontal bound of [`domain()`](Self::domain).
    fn l0(&self) -> f64 {
        self.domain().l0()
    }

    /// Upper horizontal bound of [`domain()`](Self::domain).
    fn l1(&self) -> f64 {
        self.domain().l1()
    }

    /// Lower vertical bound of [`domain()`](Self::domain).
    fn h0(&self) -> f64 {
        self.domain().h0()
    }

    /// Upper vertical bound of [`domain()`](Self::domain).
    fn h1(&self) -> f64 {
        self.domain().h1()
    }
}

/// Non-dimensionalized field on the unit square.
pub trait DimensionlessField: Send + Sync {
    /// Scaled horizontal velocity `V'` at `(y, z)`.
    fn v_prime(&self, y: f64, z: f64) -> f64;

    /// Scaled vertical velocity `W'` at `(y, z)`.
    fn w_prime(&self, y: f64, z: f64) -> f64;

    /// Inverse horizontal Peclet number at `(y, z)`.
    fn peh_inv(&self, y: f64, z: f64) -> f64;

    /// Inverse vertical Peclet number at `(y, z)`.
    fn pev_inv(&self, y: f64, z: f64) -> f64;

    /// Scaled time step `dt'`.
    fn dt_prime(&self) -> f64;
}

/// Views a [`DimensionlessField`] as an [`AdvectionDiffusionField`] on
/// [`Domain::UNIT`].
#[derive(Debug)]
pub struct Dimensionless<'a, F: ?Sized>(pub &'a F);

impl<F: DimensionlessField + ?Sized> AdvectionDiffusionField for Dimensionless<'_, F> {
    #[inline]
    fn v(&self, y: f64, z: f64) -> f64 {
        self.0.v_prime(y, z)
    }

    #[inline]
    fn w(&self, y: f64, z: f64) -> f64 {
        self.0.w_prime(y, z)
    }

    #[inline]
    fn kh(&self, y: f64, z: f64) -> f64 {
        self.0.peh_inv(y, z)
    }

    #[inline]
    fn kv(&self, y: f64, z: f64) -> f64 {
        self.0.pev_inv(y, z)
    }

    fn dt(&self) -> f64 {
        self.0.dt_prime()
    }

    fn domain(&self) -> Domain {
        Domain::UNIT
    }
}

/// Spatially uniform velocity and diffusivity.
///
/// The simplest field: handy for free-diffusion experiments and for
/// checking schemes against closed-form moments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField {
    /// Horizontal velocity.
    pub v: f64,
    /// Vertical velocity.
    pub w: f64,
    /// Horizontal diffusivity.
    pub kh: f64,
    /// Vertical diffusivity.
    pub kv: f64,
    /// Time step.
    pub dt: f64,
    /// Particle domain.
    pub domain: Domain,
}

impl AdvectionDiffusionField for ConstantField {
    fn v(&self, _y: f64, _z: f64) -> f64 {
        self.v
    }

    fn w(&self, _y: f64, _z: f64) -> f64 {
        self.w
    }

    fn kh(&self, _y: f64, _z: f64) -> f64 {
        self.kh
    }

    fn kv(&self, _y: f64, _z: f64) -> f64 {
        self.kv
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn domain(&self) -> Domain {
        self.domain
    }
}
