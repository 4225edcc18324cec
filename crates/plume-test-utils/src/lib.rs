//! Test utilities and fixture fields for Plume development.
//!
//! Provides small, fully deterministic [`AdvectionDiffusionField`] and
//! [`DimensionlessField`] implementations plus a few ensemble statistics
//! helpers used across the workspace's tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{
    mean_and_variance, uniform_field, DimensionlessConstant, LinearDiffusivityField, NanField,
};

pub use plume_core::{AdvectionDiffusionField, DimensionlessField};
