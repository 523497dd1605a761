use thiserror::Error;

/// Record-level parsing errors for raw visit records.
///
/// Variants
/// -----------------
/// * `WrongFieldCount` – The record does not hold exactly seven fields; payload is the field count found.
/// * `InvalidTimestamp` – The start time does not follow `YYYY-MM-DD HH:MM:SS`; payload carries the offending text.
/// * `InvalidLatitude` – The latitude is not a finite decimal number; payload carries the offending text.
/// * `InvalidLongitude` – The longitude is not a finite decimal number; payload carries the offending text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRecordError {
    #[error("Expected 7 fields, found {0}")]
    WrongFieldCount(usize),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid latitude: {0}")]
    InvalidLatitude(String),
    #[error("Invalid longitude: {0}")]
    InvalidLongitude(String),
}

#[derive(Error, Debug)]
pub enum FootprintError {
    #[error("Error while parsing record at line {line}: {source}")]
    RecordParsing {
        line: u64,
        #[source]
        source: ParseRecordError,
    },

    #[error("No observation available: {0}")]
    EmptyInput(String),

    #[error("Invalid grid shape: {0}")]
    Shape(String),

    #[error("Trace is not sorted by timestamp at index {index}")]
    UnsortedTrace { index: usize },

    #[error("Non-finite coordinate at index {index}")]
    InvalidCoordinate { index: usize },

    #[error("Invalid grid parameter: {0}")]
    InvalidGridParameter(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for FootprintError {
    fn eq(&self, other: &Self) -> bool {
        use FootprintError::*;
        match (self, other) {
            (
                RecordParsing {
                    line: la,
                    source: sa,
                },
                RecordParsing {
                    line: lb,
                    source: sb,
                },
            ) => la == lb && sa == sb,
            (EmptyInput(a), EmptyInput(b)) => a == b,
            (Shape(a), Shape(b)) => a == b,
            (UnsortedTrace { index: a }, UnsortedTrace { index: b }) => a == b,
            (InvalidCoordinate { index: a }, InvalidCoordinate { index: b }) => a == b,
            (InvalidGridParameter(a), InvalidGridParameter(b)) => a == b,
            (DateOutOfRange(a), DateOutOfRange(b)) => a == b,

            // Not comparable: equal when the variant matches
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod footprint_errors_test {
    use super::*;

    #[test]
    fn test_record_parsing_display() {
        let err = FootprintError::RecordParsing {
            line: 3,
            source: ParseRecordError::InvalidLatitude("north".into()),
        };
        assert_eq!(
            err.to_string(),
            "Error while parsing record at line 3: Invalid latitude: north"
        );
    }

    #[test]
    fn test_partial_eq_by_variant() {
        let a = FootprintError::IoError(std::io::Error::other("a"));
        let b = FootprintError::IoError(std::io::Error::other("b"));
        assert_eq!(a, b);
        assert_ne!(
            FootprintError::Shape("x".into()),
            FootprintError::EmptyInput("x".into())
        );
    }
}
