//! Text and binary encode/decode for density grids.
//!
//! The text form prints every cell in C-style scientific notation with
//! ten digits after the point, one grid row per line. The binary form is
//! a short header followed by the raw little-endian `f64` cells; it is
//! lossless.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::CodecError;
use crate::grid::DensityGrid;
use crate::{FORMAT_VERSION, MAGIC};

/// Number of digits after the decimal point in text output.
pub const TEXT_PRECISION: usize = 10;

/// On-disk encoding of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridFormat {
    /// Human-readable scientific notation.
    #[default]
    Text,
    /// Header plus raw little-endian `f64` cells.
    Binary,
}

/// Format `x` like C's `%.10e`: a mantissa with ten fractional digits and
/// a signed exponent of at least two digits (`1.2500000000e-01`).
///
/// Non-finite values are written as `NaN`, `inf`, `-inf`.
pub fn format_sci(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let s = format!("{:.*e}", TEXT_PRECISION, x);
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s;
    };
    match exp.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        Err(_) => s,
    }
}

// ── Text ────────────────────────────────────────────────────────

/// Write `grid` as text, one row per line.
pub fn write_text(w: &mut dyn Write, grid: &DensityGrid) -> Result<(), CodecError> {
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|&c| format_sci(c)).collect();
        writeln!(w, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Parse a text grid. Dimensions are taken from the number of non-empty
/// lines and the number of values on each.
pub fn read_text(r: &mut dyn Read) -> Result<DensityGrid, CodecError> {
    let reader = BufReader::new(r);
    let mut cells = Vec::new();
    let mut nbox_z = None;
    let mut nbox_y = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let before = cells.len();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|e| CodecError::Malformed {
                detail: format!("line {}: bad value {token:?}: {e}", lineno + 1),
            })?;
            cells.push(value);
        }
        let width = cells.len() - before;
        match nbox_z {
            None => nbox_z = Some(width),
            Some(expected) if expected != width => {
                return Err(CodecError::Malformed {
                    detail: format!(
                        "line {}: expected {expected} values, found {width}",
                        lineno + 1
                    ),
                });
            }
            Some(_) => {}
        }
        nbox_y += 1;
    }

    let nbox_z = nbox_z.ok_or_else(|| CodecError::Malformed {
        detail: "empty grid".to_string(),
    })?;
    DensityGrid::from_cells(nbox_y, nbox_z, cells).map_err(|e| CodecError::Malformed {
        detail: e.to_string(),
    })
}

// ── Binary ──────────────────────────────────────────────────────

fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn read_u32_le(r: &mut dyn Read) -> Result<u32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f64_le(r: &mut dyn Read) -> Result<f64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

fn dim_to_u32(name: &str, v: usize) -> Result<u32, CodecError> {
    u32::try_from(v).map_err(|_| CodecError::Malformed {
        detail: format!("{name} {v} exceeds u32::MAX"),
    })
}

/// Write `grid` in the binary format.
pub fn write_binary(w: &mut dyn Write, grid: &DensityGrid) -> Result<(), CodecError> {
    w.write_all(&MAGIC)?;
    w.write_all(&[FORMAT_VERSION])?;
    write_u32_le(w, dim_to_u32("nbox_y", grid.nbox_y())?)?;
    write_u32_le(w, dim_to_u32("nbox_z", grid.nbox_z())?)?;
    for &c in grid.cells() {
        w.write_all(&c.to_le_bytes())?;
    }
    Ok(())
}

/// Decode a binary grid, validating magic and version.
pub fn read_binary(r: &mut dyn Read) -> Result<DensityGrid, CodecError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(CodecError::InvalidMagic);
    }
    let mut version = [0u8; 1];
    r.read_exact(&mut version)?;
    if version[0] != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion { found: version[0] });
    }

    let nbox_y = read_u32_le(r)? as usize;
    let nbox_z = read_u32_le(r)? as usize;
    let len = nbox_y
        .checked_mul(nbox_z)
        .ok_or_else(|| CodecError::Malformed {
            detail: format!("{nbox_y}x{nbox_z} cells overflow usize"),
        })?;

    // Grow incrementally so a corrupt header cannot force a huge allocation.
    let mut cells = Vec::new();
    for _ in 0..len {
        cells.push(read_f64_le(r)?);
    }
    DensityGrid::from_cells(nbox_y, nbox_z, cells).map_err(|e| CodecError::Malformed {
        detail: e.to_string(),
    })
}

// ── Files ───────────────────────────────────────────────────────

impl DensityGrid {
    /// Encode into `w` using `format`.
    pub fn write_to(&self, w: &mut dyn Write, format: GridFormat) -> Result<(), CodecError> {
        match format {
            GridFormat::Text => write_text(w, self),
            GridFormat::Binary => write_binary(w, self),
        }
    }

    /// Decode from `r` using `format`.
    pub fn read_from(r: &mut dyn Read, format: GridFormat) -> Result<Self, CodecError> {
        match format {
            GridFormat::Text => read_text(r),
            GridFormat::Binary => read_binary(r),
        }
    }

    /// Write the grid to `path`, truncating any existing file.
    pub fn save(&self, path: impl AsRef<Path>, format: GridFormat) -> Result<(), CodecError> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w, format)?;
        w.flush()?;
        Ok(())
    }

    /// Read a grid from `path`.
    pub fn load(path: impl AsRef<Path>, format: GridFormat) -> Result<Self, CodecError> {
        let mut r = BufReader::new(File::open(path)?);
        Self::read_from(&mut r, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> DensityGrid {
        DensityGrid::from_cells(
            2,
            3,
            vec![0.125, 0.0, 1.0 / 3.0, 0.2, 2.5e-7, 0.341_666_666_666_666_7],
        )
        .unwrap()
    }

    #[test]
    fn format_sci_matches_c_style() {
        assert_eq!(format_sci(0.125), "1.2500000000e-01");
        assert_eq!(format_sci(0.0), "0.0000000000e+00");
        assert_eq!(format_sci(1.0), "1.0000000000e+00");
        assert_eq!(format_sci(-12345.678), "-1.2345678000e+04");
        assert_eq!(format_sci(1e-300), "1.0000000000e-300");
        assert_eq!(format_sci(6.02214076e23), "6.0221407600e+23");
        assert_eq!(format_sci(-4.5e-7), "-4.5000000000e-07");
        assert_eq!(format_sci(f64::MAX), "1.7976931349e+308");
        assert_eq!(format_sci(f64::NAN), "NaN");
    }

    #[test]
    fn text_layout_one_row_per_line() {
        let mut buf = Vec::new();
        write_text(&mut buf, &sample_grid()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "1.2500000000e-01 0.0000000000e+00 3.3333333333e-01"
        );
        assert_eq!(lines[1].split(' ').count(), 3);
    }

    #[test]
    fn text_round_trip_within_precision() {
        let grid = sample_grid();
        let mut buf = Vec::new();
        write_text(&mut buf, &grid).unwrap();
        let back = read_text(&mut buf.as_slice()).unwrap();
        assert_eq!((back.nbox_y(), back.nbox_z()), (2, 3));
        for (a, b) in grid.cells().iter().zip(back.cells()) {
            let tol = 1e-10 * a.abs().max(f64::MIN_POSITIVE);
            assert!((a - b).abs() <= tol, "{a} vs {b}");
        }
    }

    #[test]
    fn binary_round_trip_is_exact() {
        let grid = sample_grid();
        let mut buf = Vec::new();
        write_binary(&mut buf, &grid).unwrap();
        assert_eq!(buf.len(), 4 + 1 + 4 + 4 + 6 * 8);
        assert_eq!(&buf[..4], b"PLMG");
        let back = read_binary(&mut buf.as_slice()).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn text_and_binary_agree() {
        let grid = sample_grid();
        let mut text = Vec::new();
        let mut bin = Vec::new();
        grid.write_to(&mut text, GridFormat::Text).unwrap();
        grid.write_to(&mut bin, GridFormat::Binary).unwrap();
        let a = DensityGrid::read_from(&mut text.as_slice(), GridFormat::Text).unwrap();
        let b = DensityGrid::read_from(&mut bin.as_slice(), GridFormat::Binary).unwrap();
        for (x, y) in a.cells().iter().zip(b.cells()) {
            assert!((x - y).abs() <= 1e-10 * y.abs());
        }
    }

    #[test]
    fn binary_rejects_bad_magic() {
        let mut buf = Vec::new();
        write_binary(&mut buf, &sample_grid()).unwrap();
        buf[0] = b'X';
        assert!(matches!(
            read_binary(&mut buf.as_slice()),
            Err(CodecError::InvalidMagic)
        ));
    }

    #[test]
    fn binary_rejects_future_version() {
        let mut buf = Vec::new();
        write_binary(&mut buf, &sample_grid()).unwrap();
        buf[4] = 99;
        match read_binary(&mut buf.as_slice()) {
            Err(CodecError::UnsupportedVersion { found: 99 }) => {}
            other => panic!("expected UnsupportedVersion(99), got {other:?}"),
        }
    }

    #[test]
    fn binary_truncated_is_io_error() {
        let mut buf = Vec::new();
        write_binary(&mut buf, &sample_grid()).unwrap();
        buf.truncate(buf.len() - 3);
        assert!(matches!(read_binary(&mut buf.as_slice()), Err(CodecError::Io(_))));
    }

    #[test]
    fn text_rejects_ragged_rows() {
        let text = "1.0 2.0\n3.0\n";
        assert!(matches!(
            read_text(&mut text.as_bytes()),
            Err(CodecError::Malformed { .. })
        ));
    }

    #[test]
    fn text_rejects_garbage_and_empty() {
        assert!(read_text(&mut "1.0 abc\n".as_bytes()).is_err());
        assert!(read_text(&mut "\n\n".as_bytes()).is_err());
    }

    #[test]
    fn save_and_load_files() {
        let dir = std::env::temp_dir().join(format!("plume-codec-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let grid = sample_grid();
        for (name, format) in [("grid.txt", GridFormat::Text), ("grid.bin", GridFormat::Binary)] {
            let path = dir.join(name);
            grid.save(&path, format).unwrap();
            let back = DensityGrid::load(&path, format).unwrap();
            assert_eq!((back.nbox_y(), back.nbox_z()), (2, 3));
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("plume-no-such-dir-7f3a")
            .join("deeper")
            .join("grid.txt");
        assert!(matches!(
            sample_grid().save(&path, GridFormat::Text),
            Err(CodecError::Io(_))
        ));
    }
}
