//! Scheme selection and the per-step ensemble sweep.
//!
//! [`IntegrationScheme`] is a closed set chosen at construction time. A
//! step sweeps every particle once, drawing two standard-normal samples
//! per particle (`y` first, then `z`), and then advances the ensemble
//! clock by the field's `dt` exactly once.

use std::thread;

use plume_core::{
    AdvectionDiffusionField, Dimensionless, DimensionlessField, Domain, ParticleEnsemble,
};

use crate::boundary::BoundaryPolicy;
use crate::noise::{standard_normal, NoiseSource, StepStreams, StreamMode};
use crate::{backward_ito, euler_maruyama};

/// SDE discretization used to advance the ensemble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegrationScheme {
    /// Explicit Euler-Maruyama. No wall treatment, no Itô correction.
    EulerMaruyama,
    /// Backward-Itô predictor-corrector with no-flux walls.
    BackwardIto {
        /// Treatment of particles crossing a wall.
        boundary: BoundaryPolicy,
    },
}

impl IntegrationScheme {
    /// Backward-Itô with the default [`BoundaryPolicy::Bounce`].
    pub fn backward_ito() -> Self {
        Self::BackwardIto {
            boundary: BoundaryPolicy::Bounce,
        }
    }

    /// Human-readable scheme name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EulerMaruyama => "EulerMaruyama",
            Self::BackwardIto { .. } => "BackwardIto",
        }
    }

    /// Boundary policy, if the scheme applies one.
    pub fn boundary(&self) -> Option<BoundaryPolicy> {
        match self {
            Self::EulerMaruyama => None,
            Self::BackwardIto { boundary } => Some(*boundary),
        }
    }

    /// Advance every particle by one step of `field.dt()` on the calling
    /// thread.
    pub fn step<F: AdvectionDiffusionField + ?Sized>(
        &self,
        ensemble: &mut ParticleEnsemble,
        field: &F,
        noise: &mut NoiseSource,
    ) {
        self.step_with_workers(ensemble, field, noise, 1);
    }

    /// Advance every particle by one step, splitting the particle range
    /// across up to `workers` scoped threads.
    ///
    /// Only [`StreamMode::PerParticle`] sources are split; a shared stream
    /// is always consumed sequentially in particle order, whatever
    /// `workers` is. With per-particle streams the result does not depend
    /// on `workers`.
    pub fn step_with_workers<F: AdvectionDiffusionField + ?Sized>(
        &self,
        ensemble: &mut ParticleEnsemble,
        field: &F,
        noise: &mut NoiseSource,
        workers: usize,
    ) {
        let kernel = Kernel {
            scheme: *self,
            dt: field.dt(),
            domain: field.domain(),
        };

        match noise.mode() {
            StreamMode::Shared => {
                let rng = noise.shared_rng();
                let (ys, zs) = ensemble.axes_mut();
                for (y, z) in ys.iter_mut().zip(zs.iter_mut()) {
                    let r1 = standard_normal(rng);
                    let r2 = standard_normal(rng);
                    (*y, *z) = kernel.advance(field, *y, *z, r1, r2);
                }
            }
            StreamMode::PerParticle => {
                let streams = noise.step_streams();
                let (ys, zs) = ensemble.axes_mut();
                let n = ys.len();
                let workers = workers.clamp(1, n.max(1));
                if workers == 1 {
                    sweep_chunk(&kernel, field, streams, 0, ys, zs);
                } else {
                    let chunk = n.div_ceil(workers);
                    thread::scope(|s| {
                        for (k, (yc, zc)) in
                            ys.chunks_mut(chunk).zip(zs.chunks_mut(chunk)).enumerate()
                        {
                            let kernel = &kernel;
                            s.spawn(move || sweep_chunk(kernel, field, streams, k * chunk, yc, zc));
                        }
                    });
                }
            }
        }

        noise.finish_step();
        ensemble.advance_time(kernel.dt);
    }

    /// Advance every particle by one step of a dimensionless field on the
    /// unit square.
    pub fn step_dimensionless<F: DimensionlessField + ?Sized>(
        &self,
        ensemble: &mut ParticleEnsemble,
        field: &F,
        noise: &mut NoiseSource,
    ) {
        self.step(ensemble, &Dimensionless(field), noise);
    }

    /// Dimensionless counterpart of
    /// [`step_with_workers`](Self::step_with_workers).
    pub fn step_dimensionless_with_workers<F: DimensionlessField + ?Sized>(
        &self,
        ensemble: &mut ParticleEnsemble,
        field: &F,
        noise: &mut NoiseSource,
        workers: usize,
    ) {
        self.step_with_workers(ensemble, &Dimensionless(field), noise, workers);
    }
}

/// Step-invariant inputs to the single-particle update.
struct Kernel {
    scheme: IntegrationScheme,
    dt: f64,
    domain: Domain,
}

impl Kernel {
    #[inline]
    fn advance<F: AdvectionDiffusionField + ?Sized>(
        &self,
        field: &F,
        y: f64,
        z: f64,
        r1: f64,
        r2: f64,
    ) -> (f64, f64) {
        match self.scheme {
            IntegrationScheme::EulerMaruyama => euler_maruyama::advance(field, self.dt, y, z, r1, r2),
            IntegrationScheme::BackwardIto { boundary } => {
                backward_ito::advance(field, self.dt, &self.domain, boundary, y, z, r1, r2)
            }
        }
    }
}

/// Update a contiguous run of particles starting at global index `offset`.
fn sweep_chunk<F: AdvectionDiffusionField + ?Sized>(
    kernel: &Kernel,
    field: &F,
    streams: StepStreams,
    offset: usize,
    ys: &mut [f64],
    zs: &mut [f64],
) {
    for (i, (y, z)) in ys.iter_mut().zip(zs.iter_mut()).enumerate() {
        let mut rng = streams.particle_rng(offset + i);
        let r1 = standard_normal(&mut rng);
        let r2 = standard_normal(&mut rng);
        (*y, *z) = kernel.advance(field, *y, *z, r1, r2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_test_utils::{uniform_field, DimensionlessConstant, LinearDiffusivityField};

    fn run(
        scheme: IntegrationScheme,
        field: &dyn AdvectionDiffusionField,
        noise: &mut NoiseSource,
        ensemble: &mut ParticleEnsemble,
        steps: usize,
        workers: usize,
    ) {
        for _ in 0..steps {
            scheme.step_with_workers(ensemble, field, noise, workers);
        }
    }

    #[test]
    fn zero_steps_leaves_start_point() {
        let e = ParticleEnsemble::uniform(50, 0.3, 0.7);
        for (y, z) in e.iter() {
            assert_eq!((y, z), (0.3, 0.7));
        }
        assert_eq!(e.time(), 0.0);
    }

    #[test]
    fn euler_zero_diffusivity_is_exact_advection() {
        let field = uniform_field(0.5, -0.25, 0.0, 0.0, 0.125);
        let mut e = ParticleEnsemble::uniform(20, 0.0, 1.0);
        let mut noise = NoiseSource::shared(3);
        let k = 8;
        for _ in 0..k {
            IntegrationScheme::EulerMaruyama.step(&mut e, &field, &mut noise);
        }
        // dt and velocities are dyadic, so every partial sum is exact.
        for (y, z) in e.iter() {
            assert_eq!(y, k as f64 * 0.125 * 0.5);
            assert_eq!(z, 1.0 - k as f64 * 0.125 * 0.25);
        }
        assert_eq!(e.time(), 1.0);
    }

    #[test]
    fn time_advances_once_per_step() {
        let field = uniform_field(0.0, 0.0, 0.1, 0.1, 0.01);
        let mut e = ParticleEnsemble::uniform(10, 0.5, 0.5);
        let mut noise = NoiseSource::per_particle(1);
        run(IntegrationScheme::backward_ito(), &field, &mut noise, &mut e, 100, 4);
        assert!((e.time() - 1.0).abs() < 1e-12);
        assert_eq!(noise.steps_completed(), 100);
    }

    #[test]
    fn shared_stream_is_reproducible() {
        let field = uniform_field(0.1, 0.0, 0.05, 0.05, 0.01);
        let go = || {
            let mut e = ParticleEnsemble::uniform(64, 0.5, 0.5);
            let mut noise = NoiseSource::shared(42);
            run(IntegrationScheme::backward_ito(), &field, &mut noise, &mut e, 25, 1);
            e
        };
        assert_eq!(go(), go());
    }

    #[test]
    fn per_particle_streams_independent_of_worker_count() {
        let field = LinearDiffusivityField::new(0.02, 0.01, 0.01, 1.0, 1.0);
        let go = |workers: usize| {
            let mut e = ParticleEnsemble::uniform(103, 0.5, 0.5);
            let mut noise = NoiseSource::per_particle(7);
            run(IntegrationScheme::backward_ito(), &field, &mut noise, &mut e, 20, workers);
            e
        };
        let sequential = go(1);
        for workers in [2, 3, 8, 200] {
            assert_eq!(go(workers), sequential, "workers = {workers}");
        }
    }

    #[test]
    fn shared_stream_ignores_workers() {
        let field = uniform_field(0.0, 0.0, 0.05, 0.05, 0.01);
        let go = |workers: usize| {
            let mut e = ParticleEnsemble::uniform(30, 0.5, 0.5);
            let mut noise = NoiseSource::shared(5);
            run(IntegrationScheme::EulerMaruyama, &field, &mut noise, &mut e, 10, workers);
            e
        };
        assert_eq!(go(1), go(4));
    }

    #[test]
    fn empty_ensemble_steps_clock_only() {
        let field = uniform_field(1.0, 1.0, 1.0, 1.0, 0.5);
        let mut e = ParticleEnsemble::uniform(0, 0.0, 0.0);
        let mut noise = NoiseSource::per_particle(0);
        IntegrationScheme::backward_ito().step_with_workers(&mut e, &field, &mut noise, 8);
        assert!(e.is_empty());
        assert_eq!(e.time(), 0.5);
    }

    #[test]
    fn backward_ito_bounce_keeps_particles_inside() {
        let field = uniform_field(0.3, -0.2, 0.01, 0.01, 0.01);
        let mut e = ParticleEnsemble::uniform(500, 0.5, 0.5);
        let mut noise = NoiseSource::shared(11);
        run(IntegrationScheme::backward_ito(), &field, &mut noise, &mut e, 400, 1);
        let d = field.domain();
        for (y, z) in e.iter() {
            assert!(d.contains(y, z), "({y}, {z}) escaped {d:?}");
        }
    }

    #[test]
    fn backward_ito_stick_keeps_particles_inside() {
        let field = uniform_field(2.0, -2.0, 0.01, 0.01, 0.01);
        let mut e = ParticleEnsemble::uniform(200, 0.5, 0.5);
        let mut noise = NoiseSource::shared(12);
        let scheme = IntegrationScheme::BackwardIto {
            boundary: BoundaryPolicy::Stick,
        };
        run(scheme, &field, &mut noise, &mut e, 100, 1);
        let d = field.domain();
        let on_wall = e.iter().filter(|&(y, z)| y == d.l1() || z == d.h0()).count();
        assert!(e.iter().all(|(y, z)| d.contains(y, z)));
        assert!(on_wall > 0, "strong drift should pin particles to the walls");
    }

    #[test]
    fn dimensionless_step_reflects_about_unit_square() {
        let field = DimensionlessConstant {
            v_prime: -5.0,
            w_prime: 5.0,
            peh_inv: 0.0,
            pev_inv: 0.0,
            dt_prime: 0.1,
        };
        let mut e = ParticleEnsemble::uniform(3, 0.2, 0.8);
        let mut noise = NoiseSource::shared(0);
        IntegrationScheme::backward_ito().step_dimensionless(&mut e, &field, &mut noise);
        // y: 0.2 - 0.5 = -0.3 -> 0.3; z: 0.8 + 0.5 = 1.3 -> 0.7
        for (y, z) in e.iter() {
            assert!((y - 0.3).abs() < 1e-12);
            assert!((z - 0.7).abs() < 1e-12);
        }
        assert_eq!(e.time(), 0.1);
    }

    #[test]
    fn dimensionless_matches_equivalent_dimensional_field() {
        let adim = DimensionlessConstant {
            v_prime: 0.1,
            w_prime: -0.1,
            peh_inv: 0.02,
            pev_inv: 0.03,
            dt_prime: 0.01,
        };
        let dim = uniform_field(0.1, -0.1, 0.02, 0.03, 0.01);
        let mut a = ParticleEnsemble::uniform(40, 0.5, 0.5);
        let mut b = a.clone();
        let mut na = NoiseSource::shared(77);
        let mut nb = NoiseSource::shared(77);
        for _ in 0..30 {
            IntegrationScheme::backward_ito().step_dimensionless(&mut a, &adim, &mut na);
            IntegrationScheme::backward_ito().step(&mut b, &dim, &mut nb);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn scheme_metadata() {
        assert_eq!(IntegrationScheme::EulerMaruyama.name(), "EulerMaruyama");
        assert_eq!(IntegrationScheme::EulerMaruyama.boundary(), None);
        assert_eq!(IntegrationScheme::backward_ito().name(), "BackwardIto");
        assert_eq!(
            IntegrationScheme::backward_ito().boundary(),
            Some(BoundaryPolicy::Bounce)
        );
    }
}
