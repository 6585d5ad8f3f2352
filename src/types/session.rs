use crate::error::{ConvertError, Result};
use crate::medview;
use crate::types::Reading;
use chrono::{Duration, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters accumulated while parsing and normalizing a session
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionStats {
    /// Data rows taken from the CSV file
    pub rows: usize,
    /// Rows whose SpO2 field was empty or unusable
    pub missing_spo2: usize,
    /// Rows whose pulse field was empty or unusable
    pub missing_pulse: usize,
    /// Blank readings inserted to keep the sequence uniformly spaced
    pub gaps_filled: usize,
}

/// One complete oximetry recording: ordered readings plus start time and
/// sampling interval.
///
/// Constructed once by a parser, consumed once by the DAT writer. After
/// construction the readings are strictly increasing in time and spaced by
/// exactly `sample_interval_secs`.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Session {
    pub start_time: NaiveDateTime,
    pub sample_interval_secs: u32,
    pub readings: Vec<Reading>,
    pub stats: SessionStats,
}

impl Session {
    /// Build a session from readings in file order.
    ///
    /// The sample interval is inferred from the first two readings; a
    /// single-reading session falls back to `fallback_interval_secs`. A gap
    /// whose length is an exact multiple of the interval is filled with
    /// blank readings so position still implies time; any other spacing
    /// (backwards, duplicate, or off-grid) fails the conversion.
    pub fn from_readings(
        readings: Vec<Reading>,
        fallback_interval_secs: u32,
        mut stats: SessionStats,
    ) -> Result<Self> {
        let first = match readings.first() {
            Some(reading) => *reading,
            None => return Err(ConvertError::NoData),
        };

        let interval_secs = if readings.len() >= 2 {
            let delta = (readings[1].timestamp - first.timestamp).num_seconds();
            if delta <= 0 {
                return Err(ConvertError::TimingViolation {
                    index: 1,
                    expected_secs: fallback_interval_secs,
                    actual_secs: delta,
                });
            }
            delta as u32
        } else {
            fallback_interval_secs
        };

        let step = Duration::seconds(i64::from(interval_secs));
        let mut normalized = Vec::with_capacity(readings.len());
        normalized.push(first);
        let mut prev = first;

        for (index, reading) in readings.into_iter().enumerate().skip(1) {
            let delta = (reading.timestamp - prev.timestamp).num_seconds();
            if delta <= 0 || delta % i64::from(interval_secs) != 0 {
                return Err(ConvertError::TimingViolation {
                    index,
                    expected_secs: interval_secs,
                    actual_secs: delta,
                });
            }

            let missing = (delta / i64::from(interval_secs) - 1) as usize;
            // A gap that cannot fit in a DAT file is a data error, not
            // something to fill.
            if normalized.len() + missing + 1 > medview::MAX_RECORDS {
                return Err(ConvertError::TooManyRecords(
                    normalized.len() + missing + 1,
                ));
            }

            let mut fill_time = prev.timestamp + step;
            while fill_time < reading.timestamp {
                normalized.push(Reading::blank(fill_time));
                stats.gaps_filled += 1;
                fill_time += step;
            }

            normalized.push(reading);
            prev = reading;
        }

        Ok(Self {
            start_time: first.timestamp,
            sample_interval_secs: interval_secs,
            readings: normalized,
            stats,
        })
    }

    /// Timestamp of the last reading
    pub fn end_time(&self) -> NaiveDateTime {
        self.readings
            .last()
            .map(|reading| reading.timestamp)
            .unwrap_or(self.start_time)
    }

    /// Get the duration of the session in seconds
    pub fn duration_secs(&self) -> i64 {
        (self.end_time() - self.start_time).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(23, 25, second)
            .unwrap()
    }

    fn sample(second: u32) -> Reading {
        Reading::new(at(second), Some(97), Some(82))
    }

    #[test]
    fn test_interval_inferred_from_first_pair() {
        let session =
            Session::from_readings(vec![sample(0), sample(4), sample(8)], 1, SessionStats::default())
                .unwrap();
        assert_eq!(session.sample_interval_secs, 4);
        assert_eq!(session.readings.len(), 3);
        assert_eq!(session.start_time, at(0));
        assert_eq!(session.end_time(), at(8));
        assert_eq!(session.duration_secs(), 8);
    }

    #[test]
    fn test_single_reading_uses_fallback_interval() {
        let session = Session::from_readings(vec![sample(0)], 4, SessionStats::default()).unwrap();
        assert_eq!(session.sample_interval_secs, 4);
        assert_eq!(session.readings.len(), 1);
    }

    #[test]
    fn test_gap_filled_with_blank_readings() {
        // 8s hole in a 4s sequence: one blank reading fills it
        let session =
            Session::from_readings(vec![sample(0), sample(4), sample(12)], 1, SessionStats::default())
                .unwrap();
        assert_eq!(session.readings.len(), 4);
        assert_eq!(session.readings[2], Reading::blank(at(8)));
        assert!(!session.readings[2].has_data());
        assert_eq!(session.stats.gaps_filled, 1);

        // Spacing is uniform end-to-end after filling
        for pair in session.readings.windows(2) {
            assert_eq!((pair[1].timestamp - pair[0].timestamp).num_seconds(), 4);
        }
    }

    #[test]
    fn test_empty_readings_rejected() {
        let result = Session::from_readings(Vec::new(), 4, SessionStats::default());
        assert!(matches!(result, Err(ConvertError::NoData)));
    }

    #[test]
    fn test_off_grid_delta_rejected() {
        // 6s is not a multiple of the inferred 4s interval
        let result =
            Session::from_readings(vec![sample(0), sample(4), sample(10)], 1, SessionStats::default());
        assert!(matches!(
            result,
            Err(ConvertError::TimingViolation {
                index: 2,
                expected_secs: 4,
                actual_secs: 6,
            })
        ));
    }

    #[test]
    fn test_backwards_timestamp_rejected() {
        let result =
            Session::from_readings(vec![sample(4), sample(0)], 1, SessionStats::default());
        assert!(matches!(result, Err(ConvertError::TimingViolation { .. })));
    }

    #[test]
    fn test_duplicate_timestamp_rejected() {
        let result = Session::from_readings(
            vec![sample(0), sample(4), sample(4)],
            1,
            SessionStats::default(),
        );
        assert!(matches!(result, Err(ConvertError::TimingViolation { .. })));
    }

    #[test]
    fn test_oversized_gap_rejected() {
        // A bogus far-future timestamp must not balloon the session
        let far = NaiveDate::from_ymd_opt(2031, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = Session::from_readings(
            vec![sample(0), sample(1), Reading::new(far, Some(97), Some(82))],
            1,
            SessionStats::default(),
        );
        assert!(matches!(result, Err(ConvertError::TooManyRecords(_))));
    }
}
