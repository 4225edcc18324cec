//! Summary of a completed run.

/// Counters and timing for one call to a `run*` method.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Steps executed by this run.
    pub steps: u64,
    /// Ensemble elapsed time when the run finished.
    pub elapsed: f64,
    /// Wall-clock time spent stepping, in microseconds.
    pub wall_us: u64,
    /// Trajectory records written (zero for unrecorded runs).
    pub records: u64,
}
