//! Minimal crate-usage demo: parse an EMAY CSV from memory and encode a
//! DAT buffer without touching the filesystem.

use oxi2medview::{medview, parse_csv_str, InputFormat};

fn main() -> oxi2medview::Result<()> {
    let csv = "Date,Time,SpO2(%),PR(bpm)\n\
               2/26/2024,9:10:35 PM,93,83\n\
               2/26/2024,9:10:36 PM,94,92\n\
               2/26/2024,9:10:37 PM,93,90\n";

    let session = parse_csv_str(csv, InputFormat::Emay, false)?;
    println!(
        "Parsed {} readings starting {} at {}s spacing",
        session.readings.len(),
        session.start_time,
        session.sample_interval_secs
    );

    let bytes = medview::encode_session(&session)?;
    println!("Encoded {} DAT bytes", bytes.len());

    Ok(())
}
