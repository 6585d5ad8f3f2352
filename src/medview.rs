//! Write session data in MedView DAT format.
//!
//! MedView is the software that ships with ChoiceMMed pulse oximeters;
//! OSCAR imports its DAT files as an MD300W1 recording. The layout is
//! reverse-engineered and must be treated as a fixed external contract.
//!
//! A file starts with an ID byte (always zero) and the record count as a
//! 16-bit little-endian integer, so a file holds at most 65535 records.
//! Each record is 11 bytes:
//!
//! ```text
//! 0      - purpose unknown
//! 0      - purpose unknown
//! 0      - purpose unknown
//! year   - 2 digits only (year - 2000)
//! month
//! day
//! hour   - 0-23
//! minute
//! second
//! SpO2   - percent, 0xFF when there was no reading
//! pulse  - bpm, 0xFF when there was no reading
//! ```
//!
//! There is no trailer, padding, or checksum.

use crate::error::{ConvertError, Result};
use crate::types::{Session, PULSE_MAX, SPO2_MAX};
use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{Datelike, Timelike};
use std::io::Write;
use std::path::{Path, PathBuf};

/// ID byte plus 16-bit record count
pub const HEADER_SIZE: usize = 3;

/// Fixed size of one encoded reading
pub const RECORD_SIZE: usize = 11;

/// Largest count the 16-bit header field can hold
pub const MAX_RECORDS: usize = 65535;

/// DAT encoding of the "no data" sentinel, for both SpO2 and pulse
pub const NO_DATA: u8 = 0xff;

/// Canonical extension for derived output paths
pub const FILE_EXTENSION: &str = "dat";

/// The year byte holds year - 2000
const YEAR_MIN: i32 = 2000;
const YEAR_MAX: i32 = 2099;

/// Encode a session into a complete DAT byte buffer.
///
/// All validation happens here, before the caller flushes anything, so a
/// failed conversion never leaves a partial output file.
pub fn encode_session(session: &Session) -> Result<Vec<u8>> {
    let count = session.readings.len();
    if count == 0 {
        return Err(ConvertError::NoData);
    }
    if count > MAX_RECORDS {
        return Err(ConvertError::TooManyRecords(count));
    }

    let mut buf = Vec::with_capacity(HEADER_SIZE + count * RECORD_SIZE);
    buf.write_u8(0)?;
    buf.write_u16::<LittleEndian>(count as u16)?;

    for reading in &session.readings {
        let timestamp = reading.timestamp;
        if timestamp.year() < YEAR_MIN || timestamp.year() > YEAR_MAX {
            return Err(ConvertError::DateOutOfRange(timestamp));
        }
        if let Some(spo2) = reading.spo2 {
            if spo2 > SPO2_MAX {
                return Err(ConvertError::ValueOutOfRange {
                    field: "SpO2",
                    value: u32::from(spo2),
                });
            }
        }
        if let Some(pulse) = reading.pulse {
            if pulse > PULSE_MAX {
                return Err(ConvertError::ValueOutOfRange {
                    field: "pulse rate",
                    value: u32::from(pulse),
                });
            }
        }

        buf.write_all(&[0, 0, 0])?;
        buf.write_u8((timestamp.year() - YEAR_MIN) as u8)?;
        buf.write_u8(timestamp.month() as u8)?;
        buf.write_u8(timestamp.day() as u8)?;
        buf.write_u8(timestamp.hour() as u8)?;
        buf.write_u8(timestamp.minute() as u8)?;
        buf.write_u8(timestamp.second() as u8)?;
        buf.write_u8(reading.spo2.unwrap_or(NO_DATA))?;
        buf.write_u8(reading.pulse.unwrap_or(NO_DATA))?;
    }

    Ok(buf)
}

/// Encode a session and write it to an open byte sink in one pass
pub fn write_session<W: Write>(sink: &mut W, session: &Session) -> Result<()> {
    let bytes = encode_session(session)?;
    sink.write_all(&bytes)?;
    Ok(())
}

/// Derive an output path from the input path by swapping the extension
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(FILE_EXTENSION)
}
