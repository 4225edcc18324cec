//! The run driver.
//!
//! [`Solver`] owns the particle ensemble and the noise source and
//! repeatedly applies the configured [`IntegrationScheme`] until the
//! horizon is reached. Fields are borrowed per call, so one solver can be
//! driven by different fields over its lifetime.
//!
//! # Run loop
//!
//! A run executes step `i = 0, 1, 2, ...` while `i * dt < horizon`, with
//! `i` counted from zero on every call. A horizon of zero therefore runs no
//! steps, and a horizon that is not a multiple of `dt` rounds up.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use plume_core::{AdvectionDiffusionField, Dimensionless, DimensionlessField, ParticleEnsemble};
use plume_scheme::{check_finite, IntegrationScheme, NoiseSource};

use crate::config::{check_time_step, ConfigError, SolverConfig};
use crate::metrics::RunSummary;
use crate::recorder::TrajectoryRecorder;

// ── RunError ────────────────────────────────────────────────────

/// Errors that stop a run.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The run request was invalid (time step, record interval).
    Config(ConfigError),
    /// A particle position became NaN or infinite.
    Diverged {
        /// Solver step count at which divergence was detected.
        step: u64,
        /// Index of the first non-finite particle.
        particle: usize,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Diverged { step, particle } => {
                write!(f, "particle {particle} diverged at step {step}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Diverged { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Solver ──────────────────────────────────────────────────────

/// Drives an ensemble through an integration scheme.
///
/// # Example
///
/// ```
/// use plume_core::ConstantField;
/// use plume_core::Domain;
/// use plume_scheme::IntegrationScheme;
/// use plume_solver::{Solver, SolverConfig, StartPositions};
///
/// let field = ConstantField { v: 0.1, w: 0.0, kh: 1e-3, kv: 1e-3, dt: 0.01, domain: Domain::UNIT };
/// let start = StartPositions::Uniform { count: 100, y: 0.5, z: 0.5 };
/// let config = SolverConfig::new(start, IntegrationScheme::backward_ito(), 1.0).with_seed(7);
///
/// let mut solver = Solver::new(config).unwrap();
/// let summary = solver.run(&field).unwrap();
/// assert_eq!(summary.steps, 100);
/// ```
pub struct Solver {
    ensemble: ParticleEnsemble,
    scheme: IntegrationScheme,
    noise: NoiseSource,
    horizon: f64,
    workers: usize,
    check_finite: bool,
    steps_taken: u64,
}

impl Solver {
    /// Create a solver with the ensemble described by `config.start`.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ensemble = config.start.to_ensemble()?;
        Ok(Self::assemble(ensemble, &config))
    }

    /// Create a solver that continues from an existing ensemble.
    ///
    /// `config.start` is ignored; the ensemble's time is kept.
    pub fn from_ensemble(
        ensemble: ParticleEnsemble,
        config: SolverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate_run()?;
        Ok(Self::assemble(ensemble, &config))
    }

    fn assemble(ensemble: ParticleEnsemble, config: &SolverConfig) -> Self {
        Self {
            ensemble,
            scheme: config.scheme,
            noise: NoiseSource::new(config.seed, config.streams),
            horizon: config.horizon,
            workers: config.resolved_workers(),
            check_finite: config.check_finite,
            steps_taken: 0,
        }
    }

    /// Advance one step of `field.dt()`.
    ///
    /// # Errors
    ///
    /// With the finite-value check enabled, returns
    /// [`RunError::Diverged`] if any position is NaN or infinite after the
    /// step. The step is not rolled back.
    pub fn step<F: AdvectionDiffusionField + ?Sized>(&mut self, field: &F) -> Result<(), RunError> {
        self.scheme
            .step_with_workers(&mut self.ensemble, field, &mut self.noise, self.workers);
        self.steps_taken += 1;
        if self.check_finite {
            if let Err(bad) = check_finite(&self.ensemble) {
                log::error!(
                    "run diverged at step {} (t = {}): {bad}",
                    self.steps_taken,
                    self.ensemble.time()
                );
                return Err(RunError::Diverged {
                    step: self.steps_taken,
                    particle: bad.first_index,
                });
            }
        }
        Ok(())
    }

    /// Advance one step of a dimensionless field on the unit square.
    pub fn step_dimensionless<F: DimensionlessField + ?Sized>(
        &mut self,
        field: &F,
    ) -> Result<(), RunError> {
        self.step(&Dimensionless(field))
    }

    /// Step until the horizon is reached.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTimeStep`] if `field.dt()` is not finite and
    /// positive; [`RunError::Diverged`] as for [`step`](Self::step).
    pub fn run<F: AdvectionDiffusionField + ?Sized>(
        &mut self,
        field: &F,
    ) -> Result<RunSummary, RunError> {
        let dt = field.dt();
        check_time_step(dt)?;
        self.log_start(dt);

        let started = Instant::now();
        let mut i: u64 = 0;
        while (i as f64) * dt < self.horizon {
            self.step(field)?;
            i += 1;
        }
        Ok(self.finish(i, 0, started))
    }

    /// Dimensionless counterpart of [`run`](Self::run). The horizon is
    /// interpreted in dimensionless time.
    pub fn run_dimensionless<F: DimensionlessField + ?Sized>(
        &mut self,
        field: &F,
    ) -> Result<RunSummary, RunError> {
        self.run(&Dimensionless(field))
    }

    /// Step until the horizon, recording the initial state and then the
    /// state after every `every` steps.
    ///
    /// Steps are taken in whole blocks of `every`, so the run may overshoot
    /// the horizon by up to `every - 1` steps.
    pub fn run_recorded<F: AdvectionDiffusionField + ?Sized>(
        &mut self,
        field: &F,
        recorder: &mut TrajectoryRecorder,
        every: usize,
    ) -> Result<RunSummary, RunError> {
        if every == 0 {
            return Err(ConfigError::ZeroRecordInterval.into());
        }
        let dt = field.dt();
        check_time_step(dt)?;
        self.log_start(dt);

        let started = Instant::now();
        let before = recorder.records();
        recorder.record(&self.ensemble);
        let mut i: u64 = 0;
        while (i as f64) * dt < self.horizon {
            for _ in 0..every {
                self.step(field)?;
                i += 1;
            }
            recorder.record(&self.ensemble);
        }
        Ok(self.finish(i, recorder.records() - before, started))
    }

    /// Dimensionless counterpart of [`run_recorded`](Self::run_recorded).
    pub fn run_recorded_dimensionless<F: DimensionlessField + ?Sized>(
        &mut self,
        field: &F,
        recorder: &mut TrajectoryRecorder,
        every: usize,
    ) -> Result<RunSummary, RunError> {
        self.run_recorded(&Dimensionless(field), recorder, every)
    }

    fn log_start(&self, dt: f64) {
        log::debug!(
            "run start: {} particles, scheme {}, dt {dt}, horizon {}, {} worker(s)",
            self.ensemble.len(),
            self.scheme.name(),
            self.horizon,
            self.workers
        );
    }

    fn finish(&self, steps: u64, records: u64, started: Instant) -> RunSummary {
        let summary = RunSummary {
            steps,
            elapsed: self.ensemble.time(),
            wall_us: started.elapsed().as_micros() as u64,
            records,
        };
        log::debug!(
            "run end: {} steps, t = {}, {} us",
            summary.steps,
            summary.elapsed,
            summary.wall_us
        );
        summary
    }

    /// The particle ensemble.
    pub fn ensemble(&self) -> &ParticleEnsemble {
        &self.ensemble
    }

    /// Consume the solver and return its ensemble.
    pub fn into_ensemble(self) -> ParticleEnsemble {
        self.ensemble
    }

    /// Elapsed simulation time of the ensemble.
    pub fn elapsed(&self) -> f64 {
        self.ensemble.time()
    }

    /// Total steps taken over the solver's lifetime.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// The configured scheme.
    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }

    /// Resolved worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The configured horizon.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("particles", &self.ensemble.len())
            .field("time", &self.ensemble.time())
            .field("scheme", &self.scheme)
            .field("seed", &self.noise.seed())
            .field("workers", &self.workers)
            .field("steps_taken", &self.steps_taken)
            .finish()
    }
}
