//! Text histogram of the Gaussian generator.
//!
//! A quick visual sanity check of [`standard_normal`]: draw a batch of
//! samples, bin them into unit-width bins and render one row of stars
//! per bin.

use std::fmt::Write;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::noise::standard_normal;

/// Counts of standard-normal draws in unit-width bins.
///
/// Bin `i` is centred on the integer `i - width/2` (integer division) and
/// collects draws that round to it. Only draws in `(-width/2, width/2]`
/// are considered; those rounding past the last bin are not counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WienerHistogram {
    rolls: usize,
    counts: Vec<usize>,
}

impl WienerHistogram {
    /// Draw `rolls` samples from a generator seeded with `seed` and bin
    /// them into `width` bins.
    pub fn sample(seed: u64, rolls: usize, width: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let half = width as f64 / 2.0;
        let offset = (width / 2) as f64;
        let mut counts = vec![0usize; width];
        for _ in 0..rolls {
            let x = standard_normal(&mut rng);
            if x > -half && x <= half {
                // x.round() + offset lies in [0, width]
                let bin = (x.round() + offset) as usize;
                if let Some(c) = counts.get_mut(bin) {
                    *c += 1;
                }
            }
        }
        Self { rolls, counts }
    }

    /// Number of draws taken.
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    /// Per-bin counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Render as rows of `lo -> hi: ****`, scaled so that a bin holding
    /// every draw gets `stars` stars.
    pub fn render(&self, stars: usize) -> String {
        let offset = (self.counts.len() / 2) as f64;
        let mut out = String::from("normal_distribution (0.0,1.0):\n");
        for (i, &count) in self.counts.iter().enumerate() {
            let lo = i as f64 - offset - 0.5;
            let n = if self.rolls == 0 {
                0
            } else {
                count * stars / self.rolls
            };
            let _ = writeln!(out, "{:>4} -> {:>4}: {}", lo, lo + 1.0, "*".repeat(n));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_are_symmetric_and_peaked() {
        let h = WienerHistogram::sample(1, 100_000, 7);
        let c = h.counts();
        assert_eq!(c.len(), 7);
        // Bin 3 covers (-0.5, 0.5]: about 38% of the mass.
        let centre = c[3] as f64 / h.rolls() as f64;
        assert!((centre - 0.383).abs() < 0.01, "centre fraction {centre}");
        assert!(c[3] > c[2] && c[2] > c[1] && c[1] > c[0]);
        let asym = (c[2] as f64 - c[4] as f64).abs() / c[2] as f64;
        assert!(asym < 0.05, "asymmetry {asym}");
        let total: usize = c.iter().sum();
        assert!(total <= h.rolls());
    }

    #[test]
    fn render_has_one_row_per_bin() {
        let h = WienerHistogram::sample(2, 10_000, 7);
        let text = h.render(100);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[1].starts_with("-3.5 -> -2.5:"));
        assert!(lines[4].contains("*"));
    }

    #[test]
    fn even_width_bins_are_centred_on_integers() {
        let h = WienerHistogram::sample(3, 100_000, 10);
        let c = h.counts();
        assert_eq!(c.len(), 10);
        // Bin 5 is centred on 0 and holds draws in [-0.5, 0.5).
        let centre = c[5] as f64 / h.rolls() as f64;
        assert!((centre - 0.383).abs() < 0.01, "centre fraction {centre}");
        let asym = (c[4] as f64 - c[6] as f64).abs() / c[4] as f64;
        assert!(asym < 0.05, "asymmetry {asym}");

        let text = h.render(100);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("-5.5 -> -4.5:"));
        assert!(lines[6].starts_with("-0.5 ->  0.5:"));
    }

    #[test]
    fn zero_rolls_renders_empty_bars() {
        let h = WienerHistogram::sample(0, 0, 3);
        assert_eq!(h.counts(), &[0, 0, 0]);
        assert!(!h.render(10).contains('*'));
    }
}
