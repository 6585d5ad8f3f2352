//! Command-line driver shared by the `oxi2medview` and `o2insight2medview`
//! binaries. The two differ only in which input format they assume when
//! `--input-format` and the `CSV_FORMAT` environment variable are absent.

use crate::medview;
use crate::parser::{parse_csv_file, InputFormat};
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

pub fn build_command(name: &'static str, default_format: InputFormat) -> Command {
    Command::new(name)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert pulse oximeter CSV exports into MedView DAT files that OSCAR can import")
        .arg(
            Arg::new("csv")
                .help("CSV file exported by the oximeter app")
                .value_name("CSV")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output-file")
                .long("output-file")
                .short('o')
                .help("Output DAT file (default: the input path with a .dat extension)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("input-format")
                .long("input-format")
                .short('f')
                .env("CSV_FORMAT")
                .value_parser(["emay", "o2insight"])
                .default_value(default_format.name())
                .help("CSV file data format")
                .value_name("FORMAT"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable detailed parsing diagnostics")
                .action(ArgAction::SetTrue),
        )
}

/// Run one conversion according to the command line.
///
/// The output file is only written once the whole DAT buffer has been
/// encoded and validated, so a failure leaves no partial file behind.
pub fn run(name: &'static str, default_format: InputFormat) -> Result<()> {
    let matches = build_command(name, default_format).get_matches();

    let debug = matches.get_flag("debug");
    let input = matches
        .get_one::<String>("csv")
        .map(PathBuf::from)
        .context("missing required CSV argument")?;
    let format_name = matches
        .get_one::<String>("input-format")
        .map(String::as_str)
        .unwrap_or_else(|| default_format.name());
    let format = InputFormat::from_name(format_name)?;

    let output = match matches.get_one::<String>("output-file") {
        Some(path) => PathBuf::from(path),
        None => medview::output_path_for(&input),
    };

    println!("Converting {} into {} ...", input.display(), output.display());

    let session = parse_csv_file(&input, format, debug)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    let bytes = medview::encode_session(&session)?;
    std::fs::write(&output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Readings   {:6}", session.readings.len());
    println!("Interval   {:6} s", session.sample_interval_secs);
    if session.stats.gaps_filled > 0 {
        println!("Gap-filled {:6}", session.stats.gaps_filled);
    }
    if session.stats.missing_spo2 > 0 || session.stats.missing_pulse > 0 {
        println!(
            "Missing    {:6} SpO2, {} pulse",
            session.stats.missing_spo2, session.stats.missing_pulse
        );
    }

    Ok(())
}
