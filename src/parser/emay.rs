//! Read CSV files produced by the EMAY pulse oximeter app.
//!
//! The app exports one header row followed by one row per sample:
//!
//! ```text
//! Date,Time,SpO2(%),PR(bpm)
//! 2/26/2024,9:10:35 PM,93,83
//! ```
//!
//! Date and time follow the phone's locale (USA month-first order and
//! 12-hour times in the wild, but ISO dates and 24-hour times have been
//! reported too), so both fields go through [`FuzzyDateTimeParser`]. The
//! device samples once per second.

use crate::error::{ConvertError, Result};
use crate::parser::datetime::FuzzyDateTimeParser;
use crate::parser::{parse_pulse_field, parse_spo2_field};
use crate::types::{Reading, Session, SessionStats};

/// Samples per the device clock when the file carries a single row and the
/// interval cannot be inferred
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u32 = 1;

const COLUMNS: [&str; 4] = ["Date", "Time", "SpO2(%)", "PR(bpm)"];

/// Parse the text of an EMAY CSV export into a [`Session`]
pub fn parse_str(text: &str, debug: bool) -> Result<Session> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header = reader.headers()?.clone();
    if header.len() != COLUMNS.len() {
        return Err(ConvertError::InvalidHeader(format!(
            "expected {} columns (Date,Time,SpO2(%),PR(bpm)), found {}",
            COLUMNS.len(),
            header.len()
        )));
    }

    let mut dt_parser = FuzzyDateTimeParser::from_env();
    let mut readings = Vec::new();
    let mut stats = SessionStats::default();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());

        if record.len() < COLUMNS.len() {
            return Err(ConvertError::MissingField {
                line,
                field: COLUMNS[record.len()],
            });
        }

        let date = dt_parser.parse_date(&record[0]);
        let time = dt_parser.parse_time(&record[1]);
        let timestamp = match (date, time) {
            (Some(date), Some(time)) => date.and_time(time),
            _ => {
                return Err(ConvertError::InvalidTimestamp {
                    line,
                    value: format!("{} {}", &record[0], &record[1]),
                })
            }
        };

        let spo2 = parse_spo2_field(&record[2]);
        let pulse = parse_pulse_field(&record[3]);
        if spo2.is_none() {
            stats.missing_spo2 += 1;
            if debug {
                println!("Empty/invalid SpO2(%) value line {}", line);
            }
        }
        if pulse.is_none() {
            stats.missing_pulse += 1;
            if debug {
                println!("Empty/invalid PR(bpm) value line {}", line);
            }
        }

        stats.rows += 1;
        readings.push(Reading::new(timestamp, spo2, pulse));
    }

    Session::from_readings(readings, DEFAULT_SAMPLE_INTERVAL_SECS, stats)
}
