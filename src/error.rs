use chrono::NaiveDateTime;
use std::fmt;

/// Custom error types for CSV-to-DAT conversion
#[derive(Debug)]
pub enum ConvertError {
    /// I/O errors
    Io(std::io::Error),
    /// CSV-level read errors
    Csv(csv::Error),
    /// Format identifier not recognized by the dispatcher
    UnknownFormat(String),
    /// Header row does not match the vendor's column layout
    InvalidHeader(String),
    /// No data rows after the header
    NoData,
    /// A date/time field that could not be parsed; fatal for the whole file
    InvalidTimestamp { line: u64, value: String },
    /// A data row with fewer columns than the vendor's schema
    MissingField { line: u64, field: &'static str },
    /// Consecutive readings whose spacing does not fit the sample interval
    TimingViolation {
        index: usize,
        expected_secs: u32,
        actual_secs: i64,
    },
    /// More readings than the DAT record-count field can hold
    TooManyRecords(usize),
    /// Timestamp outside the range the DAT year byte can encode
    DateOutOfRange(NaiveDateTime),
    /// A reading value the DAT format cannot represent
    ValueOutOfRange { field: &'static str, value: u32 },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Io(err) => write!(f, "I/O error: {}", err),
            ConvertError::Csv(err) => write!(f, "CSV error: {}", err),
            ConvertError::UnknownFormat(name) => write!(f, "Unknown input format: '{}'", name),
            ConvertError::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
            ConvertError::NoData => write!(f, "No data found in input file"),
            ConvertError::InvalidTimestamp { line, value } => {
                write!(f, "Invalid date/time '{}' on line {}", value, line)
            }
            ConvertError::MissingField { line, field } => {
                write!(f, "Missing {} value on line {}", field, line)
            }
            ConvertError::TimingViolation {
                index,
                expected_secs,
                actual_secs,
            } => write!(
                f,
                "Reading {} is {}s after the previous one, expected a multiple of {}s",
                index, actual_secs, expected_secs
            ),
            ConvertError::TooManyRecords(count) => {
                write!(f, "Too many readings for a DAT file: {} (maximum 65535)", count)
            }
            ConvertError::DateOutOfRange(timestamp) => write!(
                f,
                "Timestamp {} is outside the range a DAT file can encode (2000-2099)",
                timestamp
            ),
            ConvertError::ValueOutOfRange { field, value } => {
                write!(f, "Invalid {} value: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Io(err) => Some(err),
            ConvertError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err)
    }
}

impl From<csv::Error> for ConvertError {
    fn from(err: csv::Error) -> Self {
        ConvertError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
