/// Forcing CSV input and result CSV output.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hydrobucket_core::{BucketError, DailyResult, DailyResultTimeseries, ForcingRecord, ForcingSeries};
use serde::de::IgnoredAny;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("could not open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Forcing(#[from] BucketError),
    #[error("{results} results for {days} forcing days")]
    ResultLength { results: usize, days: usize },
}

/// One forcing row, read by column position; header names are not checked.
#[derive(Debug, Deserialize)]
struct ForcingRow {
    julian_day: u32,
    precipitation: f64,
    _temperature: IgnoredAny,
    potential_evapotranspiration: f64,
    #[serde(default)]
    observed_streamflow: Option<f64>,
}

impl From<ForcingRow> for ForcingRecord {
    fn from(row: ForcingRow) -> Self {
        ForcingRecord {
            day: row.julian_day,
            precipitation: row.precipitation,
            potential_evapotranspiration: row.potential_evapotranspiration,
            observed_streamflow: row.observed_streamflow,
        }
    }
}

/// Read a forcing CSV: a header row, then
/// `julian_day, precipitation, temperature, pet[, observed]`.
///
/// Errors carry the 1-based data line of the offending row.
pub fn read_forcing(path: &Path) -> Result<ForcingSeries, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 1;
        let record = result?;
        let row: ForcingRow = record.deserialize(None).map_err(|e| BucketError::MalformedForcing {
            index: line,
            reason: e.to_string(),
        })?;
        records.push(row.into());
    }

    Ok(ForcingSeries::new(records)?)
}

/// Write one row per day: `day` followed by every result column.
pub fn write_results(
    path: &Path,
    forcing: &ForcingSeries,
    results: &DailyResultTimeseries,
) -> Result<(), DataError> {
    if results.len() != forcing.len() {
        return Err(DataError::ResultLength {
            results: results.len(),
            days: forcing.len(),
        });
    }

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(std::iter::once("day").chain(DailyResult::field_names().iter().copied()))?;

    for (t, record) in forcing.iter().enumerate() {
        let Some(day) = results.get(t) else { break };
        let row = std::iter::once(record.day.to_string())
            .chain(day.values().into_iter().map(|v| v.to_string()));
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
