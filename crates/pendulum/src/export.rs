//! CSV export of recorded playback samples.

use std::{io, path::Path};

use serde::Serialize;

use crate::{Error, trajectory::Sample};

/// Column names written as the first CSV record.
pub const CSV_HEADER: [&str; 5] = ["time", "theta1", "theta2", "omega1", "omega2"];

#[derive(Serialize)]
struct Row {
    time: f64,
    theta1: f64,
    theta2: f64,
    omega1: f64,
    omega2: f64,
}

impl From<&Sample> for Row {
    fn from(sample: &Sample) -> Self {
        Self {
            time: sample.time,
            theta1: sample.theta1,
            theta2: sample.theta2,
            omega1: sample.omega1,
            omega2: sample.omega2,
        }
    }
}

/// Writes the header followed by one row per sample.
///
/// The header is written even when `samples` is empty.
///
/// # Errors
///
/// Returns an error if writing or flushing fails.
pub fn write_csv<W: io::Write>(writer: W, samples: &[Sample]) -> Result<(), Error> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    out.write_record(CSV_HEADER)?;
    for sample in samples {
        out.serialize(Row::from(sample))?;
    }
    out.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the samples to it as CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_csv(path: impl AsRef<Path>, samples: &[Sample]) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write_csv(io::BufWriter::new(file), samples)
}
