//! No-flux wall treatment for the reflecting scheme.

/// What happens to a particle that crosses a domain wall during a step.
///
/// Applied independently per axis. The two policies produce different
/// stationary distributions near the walls: `Stick` piles probability
/// mass onto the wall itself, `Bounce` does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Mirror the overshoot back into the domain: `x < lo` becomes
    /// `2 lo - x`, `x > hi` becomes `2 hi - x`.
    ///
    /// Exactly one reflection is performed. An overshoot larger than the
    /// domain extent leaves the particle outside after the bounce; with a
    /// time step small relative to the domain this does not occur.
    #[default]
    Bounce,
    /// Clamp the coordinate onto the wall it crossed.
    Stick,
}

impl BoundaryPolicy {
    /// Apply the policy to coordinate `x` against the interval `[lo, hi]`.
    ///
    /// NaN passes through unchanged.
    #[inline]
    pub fn apply(self, x: f64, lo: f64, hi: f64) -> f64 {
        match self {
            Self::Bounce => {
                if x < lo {
                    2.0 * lo - x
                } else if x > hi {
                    2.0 * hi - x
                } else {
                    x
                }
            }
            Self::Stick => {
                if x < lo {
                    lo
                } else if x > hi {
                    hi
                } else {
                    x
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bounce_mirrors_about_wall() {
        let p = BoundaryPolicy::Bounce;
        assert_eq!(p.apply(-0.25, 0.0, 1.0), 0.25);
        assert_eq!(p.apply(1.25, 0.0, 1.0), 0.75);
        assert_eq!(p.apply(0.5, 0.0, 1.0), 0.5);
        assert_eq!(p.apply(1.5, 1.0, 3.0), 1.5);
        assert_eq!(p.apply(0.5, 1.0, 3.0), 1.5);
        assert_eq!(p.apply(3.5, 1.0, 3.0), 2.5);
    }

    #[test]
    fn bounce_keeps_wall_points() {
        let p = BoundaryPolicy::Bounce;
        assert_eq!(p.apply(0.0, 0.0, 1.0), 0.0);
        assert_eq!(p.apply(1.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn bounce_single_reflection_can_leave_domain() {
        // Overshoot of 2.5 on a unit-wide domain: one mirror is not enough.
        let out = BoundaryPolicy::Bounce.apply(3.5, 0.0, 1.0);
        assert_eq!(out, -1.5);
        assert!(out < 0.0);
    }

    #[test]
    fn stick_clamps_to_wall() {
        let p = BoundaryPolicy::Stick;
        assert_eq!(p.apply(-0.25, 0.0, 1.0), 0.0);
        assert_eq!(p.apply(1.25, 0.0, 1.0), 1.0);
        assert_eq!(p.apply(0.5, 0.0, 1.0), 0.5);
        assert_eq!(p.apply(1e9, 0.0, 1.0), 1.0);
    }

    #[test]
    fn nan_passes_through() {
        assert!(BoundaryPolicy::Bounce.apply(f64::NAN, 0.0, 1.0).is_nan());
        assert!(BoundaryPolicy::Stick.apply(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn default_is_bounce() {
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::Bounce);
    }

    proptest! {
        #[test]
        fn bounce_stays_inside_when_overshoot_below_extent(
            lo in -100.0f64..100.0,
            extent in 0.01f64..50.0,
            frac in -0.999f64..1.999,
        ) {
            let hi = lo + extent;
            let x = lo + frac * extent;
            let out = BoundaryPolicy::Bounce.apply(x, lo, hi);
            let tol = 1e-9 * (1.0 + lo.abs() + hi.abs());
            prop_assert!(out >= lo - tol && out <= hi + tol, "{x} -> {out} not in [{lo}, {hi}]");
        }

        #[test]
        fn stick_always_inside(lo in -100.0f64..100.0, extent in 0.01f64..50.0, x in -1e6f64..1e6) {
            let hi = lo + extent;
            let out = BoundaryPolicy::Stick.apply(x, lo, hi);
            prop_assert!(out >= lo && out <= hi);
        }
    }
}
