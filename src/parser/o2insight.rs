//! Read CSV files produced by Wellue's O2 Insight Pro app.
//!
//! Tested with data from the O2Ring oximeter. The export carries one header
//! row followed by one row per sample:
//!
//! ```text
//! Time,SpO2(%),Pulse Rate(bpm),Motion,SpO2 Reminder,PR Reminder
//! 09:31:51PM May 05, 2024,98,61,3,,
//! ```
//!
//! The combined timestamp field is locale-independent 12-hour time followed
//! by the month name, which may be full or abbreviated. Motion and the
//! Reminder columns are not used. When the device closes a collection it
//! appends marker rows carrying SpO2 255 and pulse 65535; those are not
//! measurements and are skipped.

use crate::error::{ConvertError, Result};
use crate::parser::{parse_pulse_field, parse_spo2_field};
use crate::types::{Reading, Session, SessionStats};
use chrono::NaiveDateTime;

/// O2Ring default recording interval, used when the file carries a single
/// row and the interval cannot be inferred
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u32 = 4;

/// Month name may be full or abbreviated depending on the app release
const TIME_FORMATS: [&str; 2] = ["%I:%M:%S%p %B %d, %Y", "%I:%M:%S%p %b %d, %Y"];

/// End-of-collection marker values
const MARKER_SPO2: u32 = 255;
const MARKER_PULSE: u32 = 65535;

const COLUMNS: usize = 6;
const FIELDS: [&str; 3] = ["Time", "SpO2(%)", "Pulse Rate(bpm)"];

/// Parse the text of an O2 Insight Pro CSV export into a [`Session`]
pub fn parse_str(text: &str, debug: bool) -> Result<Session> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header = reader.headers()?.clone();
    if header.len() < COLUMNS {
        return Err(ConvertError::InvalidHeader(format!(
            "expected at least {} columns (Time,SpO2(%),Pulse Rate(bpm),...), found {}",
            COLUMNS,
            header.len()
        )));
    }

    let mut readings = Vec::new();
    let mut stats = SessionStats::default();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());

        if record.len() < FIELDS.len() {
            return Err(ConvertError::MissingField {
                line,
                field: FIELDS[record.len()],
            });
        }

        let timestamp = match parse_timestamp(&record[0]) {
            Some(timestamp) => timestamp,
            None => {
                return Err(ConvertError::InvalidTimestamp {
                    line,
                    value: record[0].to_string(),
                })
            }
        };

        let raw_spo2 = record[1].trim().parse::<u32>().ok();
        let raw_pulse = record[2].trim().parse::<u32>().ok();
        if raw_spo2 == Some(MARKER_SPO2) && raw_pulse == Some(MARKER_PULSE) {
            if debug {
                println!("End-of-collection marker on line {}, skip", line);
            }
            continue;
        }

        let spo2 = parse_spo2_field(&record[1]);
        let pulse = parse_pulse_field(&record[2]);
        if spo2.is_none() {
            stats.missing_spo2 += 1;
            if debug {
                println!("Empty/invalid SpO2(%) value line {}", line);
            }
        }
        if pulse.is_none() {
            stats.missing_pulse += 1;
            if debug {
                println!("Empty/invalid Pulse Rate(bpm) value line {}", line);
            }
        }

        stats.rows += 1;
        readings.push(Reading::new(timestamp, spo2, pulse));
    }

    Session::from_readings(readings, DEFAULT_SAMPLE_INTERVAL_SECS, stats)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    for fmt in TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(timestamp);
        }
    }
    None
}
