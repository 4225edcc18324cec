//! Run driver for Plume simulations.
//!
//! [`Solver`] ties together a [`ParticleEnsemble`](plume_core::ParticleEnsemble),
//! an [`IntegrationScheme`](plume_scheme::IntegrationScheme) and a seeded
//! [`NoiseSource`](plume_scheme::NoiseSource). It is configured once from a
//! validated [`SolverConfig`] and then driven by borrowed fields:
//!
//! - [`Solver::run`] steps until the horizon;
//! - [`Solver::run_recorded`] also appends snapshots to a
//!   [`TrajectoryRecorder`];
//! - `*_dimensionless` variants accept a
//!   [`DimensionlessField`](plume_core::DimensionlessField).
//!
//! Progress is reported through the [`log`] facade at `debug` level;
//! divergence is reported at `error`, unwritable output at `warn`. No
//! logger is installed by this crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod recorder;
pub mod solver;

pub use config::{ConfigError, SolverConfig, StartPositions};
pub use metrics::RunSummary;
pub use recorder::TrajectoryRecorder;
pub use solver::{RunError, Solver};
