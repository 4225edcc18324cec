//! Stochastic integration schemes for Plume particle ensembles.
//!
//! Each scheme advances every particle of a
//! [`ParticleEnsemble`](plume_core::ParticleEnsemble) by one time step of
//! the advection-diffusion SDE
//!
//! ```text
//! dY = v dt + sqrt(2 Kh) dW_y
//! dZ = w dt + sqrt(2 Kv) dW_z
//! ```
//!
//! # Schemes
//!
//! - [`IntegrationScheme::EulerMaruyama`]: explicit first-order step, no
//!   boundary handling and no drift correction for varying diffusivity.
//! - [`IntegrationScheme::BackwardIto`]: predictor-corrector step that
//!   samples diffusivity at a provisional position, then applies a
//!   [`BoundaryPolicy`] at the domain walls.
//!
//! Randomness comes from a seeded [`NoiseSource`]. With per-particle
//! streams the update loop can be split across worker threads without
//! changing a single bit of the result.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod backward_ito;
pub mod boundary;
pub mod diagnostics;
pub mod euler_maruyama;
pub mod histogram;
pub mod noise;
pub mod scheme;

pub use boundary::BoundaryPolicy;
pub use diagnostics::{check_finite, NonFinite};
pub use histogram::WienerHistogram;
pub use noise::{standard_normal, NoiseSource, StreamMode};
pub use scheme::IntegrationScheme;
