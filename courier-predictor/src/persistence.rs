//! `bincode` model files.

use std::io::{BufReader, BufWriter, Write};

use bincode::Options;
use camino::Utf8Path;
use courier_fs::{create_utf8_file, open_utf8_file};
use log::info;

use crate::{ModelFileError, TrafficRegression};

/// Bincode options used for model files.
pub(crate) fn bincode_options() -> impl bincode::Options {
    bincode::DefaultOptions::new()
}

/// Persist `model` to `path`, creating the parent directory when missing.
///
/// # Errors
/// Returns [`ModelFileError::Create`] when the file cannot be created,
/// [`ModelFileError::Encode`] when serialisation fails and
/// [`ModelFileError::Write`] when the buffered bytes cannot be flushed.
pub fn write_model_file(path: &Utf8Path, model: &TrafficRegression) -> Result<(), ModelFileError> {
    let file = create_utf8_file(path).map_err(|source| ModelFileError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    encode_model(file, path, model)?;
    info!("model saved to {path}");
    Ok(())
}

/// Encode `model` through a buffer into `sink` and flush it.
pub(crate) fn encode_model<W>(
    sink: W,
    path: &Utf8Path,
    model: &TrafficRegression,
) -> Result<(), ModelFileError>
where
    W: Write,
{
    let mut writer = BufWriter::new(sink);
    bincode_options()
        .serialize_into(&mut writer, model)
        .map_err(|source| ModelFileError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|source| ModelFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a model previously written by [`write_model_file`].
///
/// # Errors
/// Returns [`ModelFileError::Open`] when the file cannot be opened,
/// [`ModelFileError::Decode`] when it is not a model file, and
/// [`ModelFileError::Corrupt`] when it decodes to unusable parameters.
pub fn read_model_file(path: &Utf8Path) -> Result<TrafficRegression, ModelFileError> {
    let file = open_utf8_file(path).map_err(|source| ModelFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let model: TrafficRegression = bincode_options()
        .deserialize_from(BufReader::new(file))
        .map_err(|source| ModelFileError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    if !model.is_finite() {
        return Err(ModelFileError::Corrupt {
            path: path.to_path_buf(),
        });
    }
    Ok(model)
}
