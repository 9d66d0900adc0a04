use thiserror::Error;

/// Errors raised by the import pipeline.
///
/// Deliberately small: malformed rows, missing join keys, bad numbers, and
/// unparseable dates all degrade to skips or fallback values instead of
/// failing the surrounding operation. Only structurally unusable input is a
/// hard error.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("base product file needs a header row and at least one data row (found {lines} lines)")]
    MissingData { lines: usize },
}
