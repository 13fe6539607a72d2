use std::fmt;

use crate::model::Source;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad rate, empty marker, etc.).
    ConfigValidation(String),
    /// Required column missing from an input extract.
    MissingColumn { source: Source, column: String },
    /// A quantity or price cell that cannot be read as a number.
    /// `row` is the 1-based data row (header excluded).
    NumberParse { source: Source, row: usize, column: String, value: String },
    /// Malformed CSV input.
    Csv(String),
    /// IO error (file read, export write).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source} extract: missing column '{column}'")
            }
            Self::NumberParse { source, row, column, value } => {
                write!(f, "{source} extract, row {row}: cannot parse '{column}' value '{value}' as a number")
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
