//! Euler-Maruyama single-particle update.
//!
//! ```text
//! y' = y + v(y,z) dt + sqrt(2 Kh(y,z) dt) ξ_y
//! z' = z + w(y,z) dt + sqrt(2 Kv(y,z) dt) ξ_z
//! ```
//!
//! Both coordinates are advanced from the pre-step position. The gradient
//! of the diffusivity is not taken into account: with spatially varying
//! `Kh`/`Kv` the scheme misses the Itô drift term `∇K` and particles
//! accumulate in low-diffusivity regions. No wall treatment is applied.

use plume_core::AdvectionDiffusionField;

/// Advance one particle given its two standard-normal draws.
#[inline]
pub fn advance<F: AdvectionDiffusionField + ?Sized>(
    field: &F,
    dt: f64,
    y: f64,
    z: f64,
    xi_y: f64,
    xi_z: f64,
) -> (f64, f64) {
    let y_new = y + field.v(y, z) * dt + (2.0 * field.kh(y, z) * dt).sqrt() * xi_y;
    let z_new = z + field.w(y, z) * dt + (2.0 * field.kv(y, z) * dt).sqrt() * xi_z;
    (y_new, z_new)
}
