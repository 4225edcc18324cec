//! Trajectory output to three parallel text files.
//!
//! A record appends one line to each of `time.out`, `Y.out` and `Z.out`
//! in the target directory. `time.out` holds the ensemble time; the other
//! two hold every particle's coordinate, each value followed by a single
//! space. Values use [`format_sci`].
//!
//! Output problems never stop a simulation: a directory that cannot be
//! opened, or a write that fails, is logged at `warn` level and the
//! recorder disables itself.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use plume_core::ParticleEnsemble;
use plume_estimate::format_sci;

/// File name for recorded times.
pub const TIME_FILE: &str = "time.out";
/// File name for recorded horizontal coordinates.
pub const Y_FILE: &str = "Y.out";
/// File name for recorded vertical coordinates.
pub const Z_FILE: &str = "Z.out";

struct Sinks {
    time: File,
    y: File,
    z: File,
}

fn coordinate_line(values: &[f64]) -> String {
    let mut line = String::with_capacity(values.len() * 18 + 1);
    for &v in values {
        line.push_str(&format_sci(v));
        line.push(' ');
    }
    line.push('\n');
    line
}

impl Sinks {
    fn open(dir: &Path) -> io::Result<Self> {
        let open = |name: &str| -> io::Result<File> {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(name))
        };
        Ok(Self {
            time: open(TIME_FILE)?,
            y: open(Y_FILE)?,
            z: open(Z_FILE)?,
        })
    }

    fn files(&mut self) -> [&mut File; 3] {
        [&mut self.time, &mut self.y, &mut self.z]
    }

    /// Append one complete line to each file, or none at all.
    ///
    /// If any write fails, every file is truncated back to its length
    /// before the record.
    fn write(&mut self, ensemble: &ParticleEnsemble) -> io::Result<()> {
        let lines = [
            format!("{}\n", format_sci(ensemble.time())),
            coordinate_line(ensemble.ys()),
            coordinate_line(ensemble.zs()),
        ];
        let mut lengths = [0u64; 3];
        for (len, file) in lengths.iter_mut().zip(self.files()) {
            *len = file.metadata()?.len();
        }
        let result = self
            .files()
            .into_iter()
            .zip(&lines)
            .try_for_each(|(file, line)| file.write_all(line.as_bytes()));
        if result.is_err() {
            for (file, len) in self.files().into_iter().zip(lengths) {
                if let Err(e) = file.set_len(len) {
                    log::warn!("unable to roll back partial trajectory record: {e}");
                }
            }
        }
        result
    }
}

/// Appends ensemble snapshots to `time.out`, `Y.out` and `Z.out`.
pub struct TrajectoryRecorder {
    dir: PathBuf,
    sinks: Option<Sinks>,
    records: u64,
}

impl TrajectoryRecorder {
    /// Open (creating or appending to) the three output files in `dir`.
    ///
    /// On failure the error is logged and a disabled recorder is returned;
    /// use [`try_open`](Self::try_open) to handle the error instead.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        match Self::try_open(dir) {
            Ok(r) => r,
            Err(e) => {
                log::warn!(
                    "unable to open trajectory output in {}: {e}; recording disabled",
                    dir.display()
                );
                Self::disabled_at(dir.to_path_buf())
            }
        }
    }

    /// Open the three output files in `dir`, propagating I/O errors.
    pub fn try_open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            dir: dir.to_path_buf(),
            sinks: Some(Sinks::open(dir)?),
            records: 0,
        })
    }

    /// A recorder that discards every record.
    pub fn disabled() -> Self {
        Self::disabled_at(PathBuf::new())
    }

    fn disabled_at(dir: PathBuf) -> Self {
        Self {
            dir,
            sinks: None,
            records: 0,
        }
    }

    /// Whether records are still being written.
    pub fn is_enabled(&self) -> bool {
        self.sinks.is_some()
    }

    /// Number of records successfully written.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append the ensemble's current time and positions.
    ///
    /// Returns `true` if the record was written.
    pub fn record(&mut self, ensemble: &ParticleEnsemble) -> bool {
        let Some(sinks) = self.sinks.as_mut() else {
            return false;
        };
        match sinks.write(ensemble) {
            Ok(()) => {
                self.records += 1;
                true
            }
            Err(e) => {
                log::warn!(
                    "trajectory write to {} failed: {e}; recording disabled",
                    self.dir.display()
                );
                self.sinks = None;
                false
            }
        }
    }
}

impl std::fmt::Debug for TrajectoryRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrajectoryRecorder")
            .field("dir", &self.dir)
            .field("enabled", &self.is_enabled())
            .field("records", &self.records)
            .finish()
    }
}
