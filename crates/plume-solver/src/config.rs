//! Solver configuration, validation, and error types.
//!
//! [`SolverConfig`] carries every run parameter that is not a property of
//! the field: starting positions, scheme, horizon, seed, stream layout and
//! parallelism. [`validate()`](SolverConfig::validate) checks it once at
//! solver construction.

use std::error::Error;
use std::fmt;

use plume_core::{EnsembleError, ParticleEnsemble};
use plume_scheme::{IntegrationScheme, StreamMode};

// ── StartPositions ──────────────────────────────────────────────

/// Initial particle positions.
#[derive(Clone, Debug, PartialEq)]
pub enum StartPositions {
    /// `count` particles released from a single point.
    Uniform {
        /// Number of particles.
        count: usize,
        /// Horizontal release coordinate.
        y: f64,
        /// Vertical release coordinate.
        z: f64,
    },
    /// One release point per particle. Both lists must have equal length.
    PerParticle {
        /// Horizontal coordinates.
        y: Vec<f64>,
        /// Vertical coordinates.
        z: Vec<f64>,
    },
}

impl StartPositions {
    /// Number of particles this start describes.
    pub fn count(&self) -> usize {
        match self {
            Self::Uniform { count, .. } => *count,
            Self::PerParticle { y, .. } => y.len(),
        }
    }

    /// Build the ensemble at time zero.
    pub fn to_ensemble(&self) -> Result<ParticleEnsemble, EnsembleError> {
        match self {
            Self::Uniform { count, y, z } => Ok(ParticleEnsemble::uniform(*count, *y, *z)),
            Self::PerParticle { y, z } => ParticleEnsemble::from_positions(y.clone(), z.clone()),
        }
    }

    fn first_non_finite(&self) -> Option<usize> {
        match self {
            Self::Uniform { count, y, z } => {
                if *count > 0 && !(y.is_finite() && z.is_finite()) {
                    Some(0)
                } else {
                    None
                }
            }
            Self::PerParticle { y, z } => y
                .iter()
                .zip(z)
                .position(|(y, z)| !(y.is_finite() && z.is_finite())),
        }
    }
}

// ── ConfigError ─────────────────────────────────────────────────

/// Errors detected while validating a solver configuration or run request.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Horizon is NaN, infinite, or negative.
    InvalidHorizon {
        /// The invalid value.
        value: f64,
    },
    /// The field's time step is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The invalid value.
        value: f64,
    },
    /// A shared noise stream was combined with more than one worker.
    SharedStreamParallelism {
        /// Requested worker count.
        workers: usize,
    },
    /// Per-particle start lists could not form an ensemble.
    InvalidStart(EnsembleError),
    /// A start coordinate is NaN or infinite.
    NonFiniteStart {
        /// Index of the first offending particle.
        index: usize,
    },
    /// Trajectory recording interval of zero steps.
    ZeroRecordInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHorizon { value } => {
                write!(f, "horizon must be finite and non-negative, got {value}")
            }
            Self::InvalidTimeStep { value } => {
                write!(f, "time step must be finite and positive, got {value}")
            }
            Self::SharedStreamParallelism { workers } => write!(
                f,
                "a shared noise stream is order-dependent and cannot use {workers} workers"
            ),
            Self::InvalidStart(e) => write!(f, "invalid start positions: {e}"),
            Self::NonFiniteStart { index } => {
                write!(f, "start position of particle {index} is not finite")
            }
            Self::ZeroRecordInterval => write!(f, "record interval must be at least 1 step"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidStart(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EnsembleError> for ConfigError {
    fn from(e: EnsembleError) -> Self {
        Self::InvalidStart(e)
    }
}

// ── SolverConfig ────────────────────────────────────────────────

/// Complete configuration for a [`Solver`](crate::Solver).
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Initial positions.
    pub start: StartPositions,
    /// Integration scheme.
    pub scheme: IntegrationScheme,
    /// Simulated time to run for in [`run`](crate::Solver::run).
    pub horizon: f64,
    /// Seed for the noise source.
    pub seed: u64,
    /// Noise stream layout. Default: [`StreamMode::Shared`].
    pub streams: StreamMode,
    /// Worker threads per step. `None` = one for shared streams,
    /// `available_parallelism` (clamped to `[1, 64]`) for per-particle
    /// streams.
    pub workers: Option<usize>,
    /// Check every position for NaN/infinity after each step. Default: off.
    pub check_finite: bool,
}

impl SolverConfig {
    /// Configuration with a shared stream, seed 0, one worker and no
    /// finite-value check.
    pub fn new(start: StartPositions, scheme: IntegrationScheme, horizon: f64) -> Self {
        Self {
            start,
            scheme,
            horizon,
            seed: 0,
            streams: StreamMode::Shared,
            workers: None,
            check_finite: false,
        }
    }

    /// Set the noise seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the noise stream layout.
    pub fn with_streams(mut self, streams: StreamMode) -> Self {
        self.streams = streams;
        self
    }

    /// Set an explicit worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Enable or disable the per-step finite-value check.
    pub fn with_finite_check(mut self, enabled: bool) -> Self {
        self.check_finite = enabled;
        self
    }

    /// Validate all run parameters and the start positions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_run()?;
        if let StartPositions::PerParticle { y, z } = &self.start {
            if y.len() != z.len() {
                return Err(EnsembleError::LengthMismatch {
                    y_len: y.len(),
                    z_len: z.len(),
                }
                .into());
            }
        }
        if let Some(index) = self.start.first_non_finite() {
            return Err(ConfigError::NonFiniteStart { index });
        }
        Ok(())
    }

    /// Validate everything except `start`.
    pub(crate) fn validate_run(&self) -> Result<(), ConfigError> {
        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(ConfigError::InvalidHorizon {
                value: self.horizon,
            });
        }
        if self.streams == StreamMode::Shared {
            if let Some(n) = self.workers {
                if n > 1 {
                    return Err(ConfigError::SharedStreamParallelism { workers: n });
                }
            }
        }
        Ok(())
    }

    /// Resolve the worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_workers(&self) -> usize {
        match (self.workers, self.streams) {
            (Some(n), _) => n.clamp(1, 64),
            (None, StreamMode::Shared) => 1,
            (None, StreamMode::PerParticle) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        }
    }
}

/// Reject time steps that would stall or reverse the run loop.
pub(crate) fn check_time_step(dt: f64) -> Result<(), ConfigError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(ConfigError::InvalidTimeStep { value: dt });
    }
    Ok(())
}
