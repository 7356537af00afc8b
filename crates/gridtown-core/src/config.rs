//! Loading and saving gameplay parameters as JSON.
//!
//! Every field of `GameParams` is optional in the file; anything missing
//! falls back to the default tuning.

use std::io::{Read, Write};

use gridtown_logic::params::GameParams;

/// Errors that can occur while reading or writing a parameter file
#[derive(Debug)]
pub enum ParamsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::Io(e)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Json(e)
    }
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "IO error: {}", e),
            ParamsError::Json(e) => write!(f, "Parameter file error: {}", e),
        }
    }
}

impl std::error::Error for ParamsError {}

/// Read parameters from a JSON reader.
pub fn load_params<R: Read>(reader: R) -> Result<GameParams, ParamsError> {
    let params = serde_json::from_reader(reader)?;
    Ok(params)
}

/// Write parameters as pretty JSON.
pub fn save_params<W: Write>(writer: W, params: &GameParams) -> Result<(), ParamsError> {
    serde_json::to_writer_pretty(writer, params)?;
    Ok(())
}
