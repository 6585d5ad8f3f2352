//! Input parsers: one module per supported vendor CSV schema, plus the
//! format dispatcher that selects between them.

pub mod datetime;
pub mod emay;
pub mod o2insight;

use crate::error::{ConvertError, Result};
use crate::types::{Session, PULSE_MAX, SPO2_MAX};
use std::path::Path;

/// Supported input CSV schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// EMAY pulse oximeter app export
    Emay,
    /// Wellue O2 Insight Pro export (O2Ring and related devices)
    O2Insight,
}

impl InputFormat {
    /// Look up a format by its command-line identifier
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "emay" => Ok(InputFormat::Emay),
            "o2insight" => Ok(InputFormat::O2Insight),
            _ => Err(ConvertError::UnknownFormat(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InputFormat::Emay => "emay",
            InputFormat::O2Insight => "o2insight",
        }
    }
}

/// Parse CSV text already read into memory
pub fn parse_csv_str(text: &str, format: InputFormat, debug: bool) -> Result<Session> {
    match format {
        InputFormat::Emay => emay::parse_str(text, debug),
        InputFormat::O2Insight => o2insight::parse_str(text, debug),
    }
}

/// Read a CSV file fully into memory and parse it as the given format
pub fn parse_csv_file(file_path: &Path, format: InputFormat, debug: bool) -> Result<Session> {
    if debug {
        let metadata = std::fs::metadata(file_path)?;
        println!("File size: {} bytes", metadata.len());
    }

    let text = std::fs::read_to_string(file_path)?;
    parse_csv_str(&text, format, debug)
}

/// Parse an SpO2 percentage field. Empty, non-numeric, zero, and
/// out-of-range values all mean "no reading".
pub(crate) fn parse_spo2_field(raw: &str) -> Option<u8> {
    parse_bounded(raw, SPO2_MAX)
}

/// Parse a pulse-rate field, with the same no-reading mapping
pub(crate) fn parse_pulse_field(raw: &str) -> Option<u8> {
    parse_bounded(raw, PULSE_MAX)
}

fn parse_bounded(raw: &str, max: u8) -> Option<u8> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value >= 1 && value <= u32::from(max) => Some(value as u8),
        _ => None,
    }
}
