//! JSON reports written by the commands.

use std::io::Write;

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::CliError;

/// Summary printed after a dataset is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DatasetSummary {
    pub(crate) output: Utf8PathBuf,
    pub(crate) records: usize,
}

/// Write `report` as pretty JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, report: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
