//! Plain-text point files.
//!
//! One point per line, formatted as `"<x>, <y>"` with six fractional digits and without header row.
//! This is the format exchanged with the external k-means program, for observations as well as
//! for the emitted centroid stream.

use crate::{error::{Error, Result}, Point, Primitive};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::{fs::File, io::{BufWriter, Read, Write}, path::Path};

/// Parse points from a reader.
///
/// A line is accepted only if it consists of exactly two comma-separated tokens, which both parse as
/// real numbers. Every other line (blank, different token count, non-numeric) is skipped. Quotes carry no
/// meaning, so a malformed line never affects the lines that follow it.
///
/// ## Returns
/// The accepted points (in input order) and the amount of skipped lines.
pub fn read_points_from<T: Primitive, R: Read>(reader: R) -> (Vec<Point<T>>, usize) {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut skipped = 0;
    let mut points = Vec::new();
    for record in rdr.records() {
        let parsed = record.ok()
            .filter(|r| r.len() == 2)
            .and_then(|r| Some(Point::new(r[0].parse::<T>().ok()?, r[1].parse::<T>().ok()?)));
        match parsed {
            Some(p) => points.push(p),
            None => skipped += 1
        }
    }
    (points, skipped)
}

/// Read a point file.
///
/// Malformed lines are silently dropped (see [`read_points_from`]). A file that can not be opened
/// is reported as warning, and results in an empty point list.
pub fn read_points<T: Primitive>(path: &Path) -> Vec<Point<T>> {
    match File::open(path) {
        Ok(file) => {
            let (points, skipped) = read_points_from(file);
            if skipped > 0 {
                debug!("Skipped {} malformed lines in {}", skipped, path.display());
            }
            points
        },
        Err(e) => {
            warn!("Could not open file for reading: {} ({})", path.display(), e);
            Vec::new()
        }
    }
}

/// Write points to a writer, one `"<x>, <y>"` line per point.
pub fn write_points_to<T: Primitive, W: Write>(points: &[Point<T>], writer: W) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for p in points {
        writeln!(writer, "{:.6}, {:.6}", p.x, p.y)?;
    }
    writer.flush()
}

/// Write a point file, replacing existing content.
///
/// No rollback is done on failure, a partially written file is left behind.
pub fn write_points<T: Primitive>(points: &[Point<T>], path: &Path) -> Result<()> {
    let io_err = |source| Error::Io { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(io_err)?;
    write_points_to(points, file).map_err(io_err)
}
