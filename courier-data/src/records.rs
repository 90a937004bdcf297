//! CSV persistence for edge records.

use camino::Utf8Path;
use courier_core::EdgeRecord;
use courier_fs::{create_utf8_file, open_utf8_file};
use log::debug;

use crate::DataError;

/// Column order written by [`write_edge_records`].
pub const CSV_HEADER: [&str; 7] = [
    "start_location",
    "end_location",
    "distance_km",
    "delivery_demand",
    "fuel_cost_per_km",
    "traffic_factor",
    "time_of_day",
];

/// Read every edge record from the CSV file at `path`.
///
/// Columns are matched by header name, so extra columns such as coordinates
/// are ignored. An empty `fuel_cost_per_km` cell reads as "not recorded".
///
/// # Errors
/// Returns [`DataError::OpenFile`] when the file cannot be opened and
/// [`DataError::ReadCsv`] when a row cannot be decoded.
pub fn read_edge_records(path: &Utf8Path) -> Result<Vec<EdgeRecord>, DataError> {
    let file = open_utf8_file(path).map_err(|source| DataError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let records = reader
        .deserialize::<EdgeRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| DataError::ReadCsv {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("read {} edge records from {path}", records.len());
    Ok(records)
}

/// Write `records` to `path` as CSV, creating parent directories as needed.
///
/// # Errors
/// Returns [`DataError::CreateFile`] when the file cannot be created and
/// [`DataError::WriteCsv`] when serialisation or flushing fails.
pub fn write_edge_records(path: &Utf8Path, records: &[EdgeRecord]) -> Result<(), DataError> {
    let file = create_utf8_file(path).map_err(|source| DataError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;
    let write_error = |source| DataError::WriteCsv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(CSV_HEADER).map_err(write_error)?;
    for record in records {
        writer.serialize(record).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|source| write_error(csv::Error::from(source)))?;
    debug!("wrote {} edge records to {path}", records.len());
    Ok(())
}
