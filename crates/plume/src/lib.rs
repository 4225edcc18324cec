//! Plume: Lagrangian particle transport in a 2D channel.
//!
//! Particles are advected and diffused by integrating the SDE
//! `dY = v dt + sqrt(2 Kh) dW_y`, `dZ = w dt + sqrt(2 Kv) dW_z` per
//! particle, with no-flux walls, and the resulting cloud is binned into a
//! normalized density grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Plume sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use plume::prelude::*;
//!
//! let field = ConstantField {
//!     v: 0.0,
//!     w: 0.0,
//!     kh: 1.0,
//!     kv: 1.0,
//!     dt: 0.01,
//!     domain: Domain::from_extent(100.0, 100.0).unwrap(),
//! };
//! let start = StartPositions::Uniform { count: 1000, y: 50.0, z: 50.0 };
//! let config = SolverConfig::new(start, IntegrationScheme::EulerMaruyama, 1.0).with_seed(1);
//!
//! let mut solver = Solver::new(config).unwrap();
//! let summary = solver.run(&field).unwrap();
//! assert_eq!(summary.steps, 100);
//!
//! let mut estimator = DensityEstimator::new(20, 20, 100.0, 100.0).unwrap();
//! let grid = estimator.estimate(solver.ensemble()).unwrap();
//! assert!((grid.total() - 1.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plume-core` | Ensemble, domain, field traits, closure fields |
//! | [`scheme`] | `plume-scheme` | Integration schemes, boundary policies, noise |
//! | [`estimate`] | `plume-estimate` | Density estimator, grid, grid file formats |
//! | [`solver`] | `plume-solver` | Run driver, configuration, trajectory output |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`plume-core`).
///
/// The particle container [`types::ParticleEnsemble`], the
/// [`types::Domain`] rectangle and the [`types::AdvectionDiffusionField`]
/// contract implemented by user fields.
pub use plume_core as types;

/// Integration schemes (`plume-scheme`).
///
/// [`scheme::IntegrationScheme`] with its [`scheme::BoundaryPolicy`] and
/// the seeded [`scheme::NoiseSource`].
pub use plume_scheme as scheme;

/// Density estimation and grid I/O (`plume-estimate`).
pub use plume_estimate as estimate;

/// Run driver (`plume-solver`).
///
/// [`solver::Solver`] configured by [`solver::SolverConfig`]; snapshots
/// go to a [`solver::TrajectoryRecorder`].
pub use plume_solver as solver;

/// Common imports for typical Plume usage.
///
/// ```rust
/// use plume::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use plume_core::{
        AdvectionDiffusionField, ClosureField, ConstantField, DimensionlessField, Domain,
        ParticleEnsemble,
    };

    // Schemes
    pub use plume_scheme::{BoundaryPolicy, IntegrationScheme, NoiseSource, StreamMode};

    // Estimation
    pub use plume_estimate::{DensityEstimator, DensityGrid, GridFormat};

    // Solver
    pub use plume_solver::{
        RunSummary, Solver, SolverConfig, StartPositions, TrajectoryRecorder,
    };

    // Errors
    pub use plume_core::{DomainError, EnsembleError, FieldError};
    pub use plume_estimate::{CodecError, EstimateError};
    pub use plume_solver::{ConfigError, RunError};
}
