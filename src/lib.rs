//! oxi2medview
//!
//! A Rust library for converting pulse oximeter session recordings exported
//! as CSV (EMAY, Wellue O2 Insight Pro) into the MedView DAT binary format
//! that OSCAR imports as an MD300W1 recording.
//!
//! # Features
//!
//! - **`cli`** (default): Build the `oxi2medview` and `o2insight2medview`
//!   command-line binaries
//! - **`serde`**: Enable serialization/deserialization of the data model
//!
//! # Quick Start
//!
//! Parse a CSV export and inspect the session:
//! ```rust,no_run
//! use oxi2medview::{parse_csv_file, InputFormat};
//! use std::path::Path;
//!
//! let session = parse_csv_file(Path::new("overnight.csv"), InputFormat::Emay, false).unwrap();
//! println!("Parsed {} readings at {}s spacing", session.readings.len(), session.sample_interval_secs);
//! ```
//!
//! Convert to a DAT file:
//! ```rust,no_run
//! use oxi2medview::{medview, parse_csv_file, InputFormat};
//! use std::fs::File;
//! use std::path::Path;
//!
//! let session = parse_csv_file(Path::new("session.csv"), InputFormat::O2Insight, false).unwrap();
//! let mut out = File::create("session.dat").unwrap();
//! medview::write_session(&mut out, &session).unwrap();
//! ```
//!
//! # Public API
//!
//! ## Parsing
//! - [`parse_csv_file`] - Read and parse a CSV export from disk
//! - [`parse_csv_str`] - Parse CSV text already in memory
//! - [`InputFormat`] - Format dispatcher selecting the vendor schema
//! - [`parser::datetime::FuzzyDateTimeParser`] - Locale-tolerant date/time parsing
//!
//! ## Data Types
//! - [`Session`] - One complete recording: ordered readings plus metadata
//! - [`Reading`] - One timestamped SpO2/pulse-rate sample
//! - [`SessionStats`] - Parse and gap-fill counters
//!
//! ## Writing
//! - [`medview::encode_session`] - Encode a session into a DAT byte buffer
//! - [`medview::write_session`] - Encode and write to an open sink
//! - [`medview::output_path_for`] - Derive the `.dat` output path

pub mod error;
pub mod medview;
pub mod parser;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{ConvertError, Result};
pub use parser::{parse_csv_file, parse_csv_str, InputFormat};
pub use types::{Reading, Session, SessionStats, PULSE_MAX, SPO2_MAX};
