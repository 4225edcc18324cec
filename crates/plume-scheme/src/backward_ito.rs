//! Backward-Itô (predictor-corrector) single-particle update.
//!
//! The diffusion amplitude is evaluated at a provisional position reached
//! by the noise alone, which captures the Itô drift induced by a spatially
//! varying diffusivity without needing its gradient:
//!
//! ```text
//! dY = sqrt(2 Kh(y,z) dt) R1            dZ = sqrt(2 Kv(y,z) dt) R2
//! N1 = sqrt(2 Kh(y+dY, z+dZ) dt)        N2 = sqrt(2 Kv(y+dY, z+dZ) dt)
//! y' = y + v(y,z) dt + N1 R1            z' = z + w(y,z) dt + N2 R2
//! ```
//!
//! The tentative position is then passed through the [`BoundaryPolicy`]
//! on each axis.

use plume_core::{AdvectionDiffusionField, Domain};

use crate::boundary::BoundaryPolicy;

/// Advance one particle given its two standard-normal draws.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn advance<F: AdvectionDiffusionField + ?Sized>(
    field: &F,
    dt: f64,
    domain: &Domain,
    boundary: BoundaryPolicy,
    y: f64,
    z: f64,
    r1: f64,
    r2: f64,
) -> (f64, f64) {
    let v = field.v(y, z);
    let w = field.w(y, z);

    // Predictor
    let dy = (2.0 * field.kh(y, z) * dt).sqrt() * r1;
    let dz = (2.0 * field.kv(y, z) * dt).sqrt() * r2;

    // Corrector amplitudes at the predicted point
    let n1 = (2.0 * field.kh(y + dy, z + dz) * dt).sqrt();
    let n2 = (2.0 * field.kv(y + dy, z + dz) * dt).sqrt();

    let y_new = y + v * dt + n1 * r1;
    let z_new = z + w * dt + n2 * r2;

    (
        boundary.apply(y_new, domain.l0(), domain.l1()),
        boundary.apply(z_new, domain.h0(), domain.h1()),
    )
}
