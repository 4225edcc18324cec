//! Error types for the core data model.
//!
//! Organized by the value that failed to construct: the domain rectangle,
//! the particle ensemble, and fields assembled through the builder.

use std::error::Error;
use std::fmt;

/// Errors from [`Domain::new`](crate::Domain::new).
#[derive(Clone, Debug, PartialEq)]
pub enum DomainError {
    /// A bound is NaN or infinite.
    NonFiniteBound {
        /// Which bound (`"l0"`, `"l1"`, `"h0"`, `"h1"`).
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The low bound is not strictly below the high bound on an axis.
    Degenerate {
        /// Axis name (`"y"` or `"z"`).
        axis: &'static str,
        /// Low bound.
        low: f64,
        /// High bound.
        high: f64,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteBound { name, value } => {
                write!(f, "domain bound {name} must be finite, got {value}")
            }
            Self::Degenerate { axis, low, high } => {
                write!(f, "degenerate {axis} extent: [{low}, {high}]")
            }
        }
    }
}

impl Error for DomainError {}

/// Errors from [`ParticleEnsemble`](crate::ParticleEnsemble) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnsembleError {
    /// The per-particle start lists have different lengths.
    LengthMismatch {
        /// Number of y start positions.
        y_len: usize,
        /// Number of z start positions.
        z_len: usize,
    },
}

impl fmt::Display for EnsembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { y_len, z_len } => {
                write!(f, "start lists differ in length: y has {y_len}, z has {z_len}")
            }
        }
    }
}

impl Error for EnsembleError {}

/// Errors from [`ClosureFieldBuilder::build`](crate::ClosureFieldBuilder::build).
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// A required coefficient closure was never supplied.
    MissingCoefficient {
        /// Name of the missing coefficient.
        name: &'static str,
    },
    /// The time step is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// No domain was supplied.
    MissingDomain,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCoefficient { name } => write!(f, "{name} is required"),
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::MissingDomain => write!(f, "domain is required"),
        }
    }
}

impl Error for FieldError {}
