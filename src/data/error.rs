use thiserror::Error;

/// Failure while turning raw rows into a [`Dataset`](super::model::Dataset).
///
/// Row indices are zero-based and count data rows only (the header is not
/// row 0).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("record set contains no or malformed data")]
    EmptyOrMalformed,

    #[error("header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("record {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("record {row} has malformed dob: {value}")]
    MalformedDob { row: usize, value: String },

    #[error("record {row} has unparseable dob: {value}")]
    UnparseableDob { row: usize, value: String },
}

/// Rejected query input. The filter is left untouched, so the caller can
/// retry with a corrected value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("year must be exactly 4 characters, got {0:?}")]
    YearLength(String),

    #[error("year is not a valid integer: {0:?}")]
    YearNotInteger(String),
}
