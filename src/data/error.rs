//! Data layer error types

use thiserror::Error;

/// Errors raised while generating or parsing tables
#[derive(Error, Debug)]
pub enum DataError {
    /// Underlying CSV reader or writer failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Upload is not valid UTF-8 text
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Nothing to parse
    #[error("No columns to parse from file")]
    Empty,

    /// A data row has more fields than the header
    #[error("Error tokenizing data. Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Year outside the calendar range chrono supports
    #[error("Invalid sample year: {0}")]
    InvalidYear(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::RaggedRow {
            line: 3,
            expected: 2,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "Error tokenizing data. Expected 2 fields in line 3, saw 4"
        );
        assert_eq!(DataError::Empty.to_string(), "No columns to parse from file");
    }
}
