//! Closure-backed field, assembled through a builder.
//!
//! Lets callers describe velocity and diffusivity profiles inline without
//! declaring a new type. Constructed via [`ClosureField::builder`].

use std::fmt;

use crate::domain::Domain;
use crate::error::FieldError;
use crate::field::AdvectionDiffusionField;

type Coefficient = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// An [`AdvectionDiffusionField`] whose coefficients are closures.
pub struct ClosureField {
    v: Coefficient,
    w: Coefficient,
    kh: Coefficient,
    kv: Coefficient,
    dt: f64,
    domain: Domain,
}

/// Builder for [`ClosureField`].
///
/// Required: `kh`, `kv`, `dt`, `domain`. Velocities default to zero.
pub struct ClosureFieldBuilder {
    v: Option<Coefficient>,
    w: Option<Coefficient>,
    kh: Option<Coefficient>,
    kv: Option<Coefficient>,
    dt: Option<f64>,
    domain: Option<Domain>,
}

impl ClosureField {
    /// Create a new builder.
    pub fn builder() -> ClosureFieldBuilder {
        ClosureFieldBuilder {
            v: None,
            w: None,
            kh: None,
            kv: None,
            dt: None,
            domain: None,
        }
    }
}

impl ClosureFieldBuilder {
    /// Horizontal velocity profile `v(y, z)`.
    pub fn v(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.v = Some(Box::new(f));
        self
    }

    /// Vertical velocity profile `w(y, z)`.
    pub fn w(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.w = Some(Box::new(f));
        self
    }

    /// Horizontal diffusivity profile `Kh(y, z)`.
    pub fn kh(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.kh = Some(Box::new(f));
        self
    }

    /// Vertical diffusivity profile `Kv(y, z)`.
    pub fn kv(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.kv = Some(Box::new(f));
        self
    }

    /// Time step.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Particle domain.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Build the field, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `kh` or `kv` is not set
    /// - `dt` is not set, or is not finite and positive
    /// - `domain` is not set
    pub fn build(self) -> Result<ClosureField, FieldError> {
        let kh = self
            .kh
            .ok_or(FieldError::MissingCoefficient { name: "kh" })?;
        let kv = self
            .kv
            .ok_or(FieldError::MissingCoefficient { name: "kv" })?;
        let dt = self.dt.unwrap_or(f64::NAN);
        if !dt.is_finite() || dt <= 0.0 {
            return Err(FieldError::InvalidDt { value: dt });
        }
        let domain = self.domain.ok_or(FieldError::MissingDomain)?;

        Ok(ClosureField {
            v: self.v.unwrap_or_else(|| Box::new(|_, _| 0.0)),
            w: self.w.unwrap_or_else(|| Box::new(|_, _| 0.0)),
            kh,
            kv,
            dt,
            domain,
        })
    }
}

impl AdvectionDiffusionField for ClosureField {
    fn v(&self, y: f64, z: f64) -> f64 {
        (self.v)(y, z)
    }

    fn w(&self, y: f64, z: f64) -> f64 {
        (self.w)(y, z)
    }

    fn kh(&self, y: f64, z: f64) -> f64 {
        (self.kh)(y, z)
    }

    fn kv(&self, y: f64, z: f64) -> f64 {
        (self.kv)(y, z)
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn domain(&self) -> Domain {
        self.domain
    }
}

impl fmt::Debug for ClosureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureField")
            .field("dt", &self.dt)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
