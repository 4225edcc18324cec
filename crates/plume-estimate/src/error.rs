//! Error types for density estimation and grid I/O.

use std::fmt;
use std::io;

/// Errors from building or filling a [`DensityGrid`](crate::DensityGrid).
#[derive(Clone, Debug, PartialEq)]
pub enum EstimateError {
    /// The ensemble is empty; normalization by N is undefined.
    NoParticles,
    /// Grid dimensions or domain extent are unusable.
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoParticles => write!(f, "no particles to estimate density from"),
            Self::InvalidGrid { reason } => write!(f, "invalid grid: {reason}"),
        }
    }
}

impl std::error::Error for EstimateError {}

/// Errors from encoding or decoding a grid.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The binary stream does not start with `b"PLMG"`.
    InvalidMagic,
    /// The binary format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the stream.
        found: u8,
    },
    /// The content could not be decoded.
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"PLMG\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported grid format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed grid: {detail}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
