//! Grid density estimation and grid I/O for Plume particle ensembles.
//!
//! [`DensityEstimator`] bins a particle ensemble onto a regular
//! `nbox_y × nbox_z` grid over `[0, L] × [0, H]` and normalizes by the
//! particle count, producing a [`DensityGrid`] whose cells sum to one.
//!
//! # Grid formats
//!
//! - Text: one grid row per line, cells in C-style scientific notation
//!   with ten digits after the point (`1.2500000000e-01`).
//! - Binary:
//!
//! ```text
//! [MAGIC "PLMG"] [VERSION u8] [nbox_y u32] [nbox_z u32] [cells f64 × nbox_y·nbox_z]
//! ```
//!
//! All integers and floats are little-endian; cells are row-major.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod estimator;
pub mod grid;

pub use codec::{format_sci, GridFormat};
pub use error::{CodecError, EstimateError};
pub use estimator::DensityEstimator;
pub use grid::DensityGrid;

/// Magic bytes at the start of every binary grid file.
pub const MAGIC: [u8; 4] = *b"PLMG";

/// Current binary grid format version.
pub const FORMAT_VERSION: u8 = 1;
