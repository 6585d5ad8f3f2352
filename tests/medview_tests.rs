use chrono::{Duration, NaiveDate, NaiveDateTime};
use oxi2medview::medview::{self, HEADER_SIZE, MAX_RECORDS, NO_DATA, RECORD_SIZE};
use oxi2medview::{ConvertError, Reading, Session, SessionStats};

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

/// Bypass parser-side validation so the writer's own checks are exercised
fn raw_session(readings: Vec<Reading>) -> Session {
    let start_time = readings
        .first()
        .map(|reading| reading.timestamp)
        .unwrap_or_else(|| dt(2024, 3, 1, 0, 0, 0));
    Session {
        start_time,
        sample_interval_secs: 1,
        readings,
        stats: SessionStats::default(),
    }
}

fn second_spaced(base: NaiveDateTime, count: usize) -> Vec<Reading> {
    (0..count)
        .map(|i| {
            Reading::new(
                base + Duration::seconds(i as i64),
                Some(97),
                Some(82),
            )
        })
        .collect()
}

#[test]
fn test_single_record() {
    let session = Session::from_readings(
        vec![Reading::new(dt(2024, 3, 1, 23, 25, 0), Some(97), Some(82))],
        4,
        SessionStats::default(),
    )
    .unwrap();
    let bytes = medview::encode_session(&session).unwrap();

    assert_eq!(bytes.len(), HEADER_SIZE + RECORD_SIZE);
    assert_eq!(&bytes[..3], b"\x00\x01\x00");
    assert_eq!(
        &bytes[3..],
        b"\x00\x00\x00\x18\x03\x01\x17\x19\x00\x61\x52"
    );
}

#[test]
fn test_multiple_records() {
    let session = Session::from_readings(
        second_spaced(dt(2024, 3, 1, 23, 25, 0), 10),
        1,
        SessionStats::default(),
    )
    .unwrap();
    let bytes = medview::encode_session(&session).unwrap();

    assert_eq!(&bytes[..3], b"\x00\x0a\x00");
    assert_eq!(bytes.len(), HEADER_SIZE + 10 * RECORD_SIZE);
}

#[test]
fn test_sentinel_bytes_for_blank_reading() {
    let session = Session::from_readings(
        vec![
            Reading::new(dt(2024, 3, 1, 23, 25, 0), Some(97), Some(82)),
            Reading::blank(dt(2024, 3, 1, 23, 25, 1)),
        ],
        1,
        SessionStats::default(),
    )
    .unwrap();
    let bytes = medview::encode_session(&session).unwrap();

    let second = &bytes[HEADER_SIZE + RECORD_SIZE..];
    assert_eq!(second[9], NO_DATA);
    assert_eq!(second[10], NO_DATA);
}

#[test]
fn test_write_session_matches_encode() {
    let session = Session::from_readings(
        second_spaced(dt(2024, 3, 1, 23, 25, 0), 3),
        1,
        SessionStats::default(),
    )
    .unwrap();

    let mut sink = Vec::new();
    medview::write_session(&mut sink, &session).unwrap();
    assert_eq!(sink, medview::encode_session(&session).unwrap());
}

#[test]
fn test_file_full() {
    // 65535 records is the most the 16-bit count can describe
    let session = raw_session(second_spaced(dt(2024, 3, 1, 0, 0, 0), MAX_RECORDS));
    let bytes = medview::encode_session(&session).unwrap();

    assert_eq!(bytes.len(), 720888);
    assert_eq!(&bytes[..3], b"\x00\xff\xff");
}

#[test]
fn test_file_overfull() {
    let session = raw_session(second_spaced(dt(2024, 3, 1, 0, 0, 0), MAX_RECORDS + 1));
    let result = medview::encode_session(&session);
    assert!(matches!(
        result,
        Err(ConvertError::TooManyRecords(count)) if count == MAX_RECORDS + 1
    ));
}

#[test]
fn test_empty_session_rejected() {
    let session = raw_session(Vec::new());
    assert!(matches!(
        medview::encode_session(&session),
        Err(ConvertError::NoData)
    ));
}

#[test]
fn test_year_out_of_range() {
    let session = raw_session(vec![Reading::new(
        dt(1999, 12, 31, 23, 59, 58),
        Some(97),
        Some(82),
    )]);
    assert!(matches!(
        medview::encode_session(&session),
        Err(ConvertError::DateOutOfRange(_))
    ));

    let session = raw_session(vec![Reading::new(
        dt(2100, 1, 1, 0, 0, 0),
        Some(97),
        Some(82),
    )]);
    assert!(matches!(
        medview::encode_session(&session),
        Err(ConvertError::DateOutOfRange(_))
    ));
}

#[test]
fn test_values_the_format_cannot_hold() {
    let session = raw_session(vec![Reading::new(
        dt(2024, 3, 1, 0, 0, 0),
        Some(101),
        Some(82),
    )]);
    assert!(matches!(
        medview::encode_session(&session),
        Err(ConvertError::ValueOutOfRange { field: "SpO2", .. })
    ));

    let session = raw_session(vec![Reading::new(
        dt(2024, 3, 1, 0, 0, 0),
        Some(97),
        Some(255),
    )]);
    assert!(matches!(
        medview::encode_session(&session),
        Err(ConvertError::ValueOutOfRange { .. })
    ));
}
