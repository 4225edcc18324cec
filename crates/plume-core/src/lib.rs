//! Core types and traits for the Plume particle transport simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the particle ensemble, the rectangular domain, the advection-diffusion
//! field contract consumed by the integration schemes, and the error
//! types shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod ensemble;
pub mod error;
pub mod field;
pub mod field_builder;

pub use domain::Domain;
pub use ensemble::ParticleEnsemble;
pub use error::{DomainError, EnsembleError, FieldError};
pub use field::{AdvectionDiffusionField, ConstantField, Dimensionless, DimensionlessField};
pub use field_builder::{ClosureField, ClosureFieldBuilder};
