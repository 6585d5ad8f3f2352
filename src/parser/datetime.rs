//! Heuristic date and time string parsing.
//!
//! The vendor apps format timestamps with whatever the phone's locale says,
//! so the year, month, or day can come first and the separators range from
//! plain punctuation to CJK date characters. Rather than guessing the locale,
//! a string is simplified to digit groups separated by single spaces (times
//! additionally keep any AM/PM letters) and a short list of candidate formats
//! is tried in order. A format that parses successfully is promoted to the
//! front of the list, so a whole file pays the search cost once.
//!
//! Users can short-circuit the heuristics by setting `D_FMT` and/or `T_FMT`
//! in the environment to a strftime-style format string; those are always
//! tried first, unsimplified.

use chrono::{Datelike, NaiveDate, NaiveTime};

const DAY_FIRST_DATE_FORMATS: [&str; 5] =
    ["%d %m %Y", "%d %m %y", "%m %d %Y", "%m %d %y", "%Y %m %d"];
const MONTH_FIRST_DATE_FORMATS: [&str; 5] =
    ["%m %d %Y", "%m %d %y", "%Y %m %d", "%d %m %Y", "%d %m %y"];
const TIME_FORMATS: [&str; 3] = ["%H %M %S", "%I %M %S %p", "%p %I %M %S"];

/// Candidate-list date/time parser with move-to-front promotion.
///
/// One instance per file parse; the promoted format order is not shared
/// between files.
#[derive(Debug)]
pub struct FuzzyDateTimeParser {
    date_formats: Vec<&'static str>,
    time_formats: Vec<&'static str>,
    d_fmt: Option<String>,
    t_fmt: Option<String>,
}

impl FuzzyDateTimeParser {
    /// Build a parser honoring the `D_FMT`/`T_FMT` environment variables.
    ///
    /// When `D_FMT` is set, it also decides whether the day-first or the
    /// month-first candidate order is used as the fallback.
    pub fn from_env() -> Self {
        let d_fmt = std::env::var("D_FMT").ok();
        let t_fmt = std::env::var("T_FMT").ok();
        let day_first = d_fmt.as_deref().map_or(false, is_day_first);
        Self::new(day_first, d_fmt, t_fmt)
    }

    pub fn new(day_first: bool, d_fmt: Option<String>, t_fmt: Option<String>) -> Self {
        let date_formats = if day_first {
            DAY_FIRST_DATE_FORMATS.to_vec()
        } else {
            MONTH_FIRST_DATE_FORMATS.to_vec()
        };
        Self {
            date_formats,
            time_formats: TIME_FORMATS.to_vec(),
            d_fmt,
            t_fmt,
        }
    }

    /// Parse a date string, trying the user-supplied format first.
    ///
    /// Returns `None` when nothing matches; the caller decides whether that
    /// is fatal.
    pub fn parse_date(&mut self, date_str: &str) -> Option<NaiveDate> {
        if let Some(fmt) = &self.d_fmt {
            if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
                return Some(date);
            }
        }

        let simplified = simplify_date_string(date_str);
        for idx in 0..self.date_formats.len() {
            let fmt = self.date_formats[idx];
            let date = match NaiveDate::parse_from_str(&simplified, fmt) {
                Ok(date) => date,
                Err(_) => continue,
            };
            // chrono's %Y also matches 1- and 2-digit years; those must fall
            // through to the %y candidates instead
            if fmt.contains("%Y") && date.year() < 1000 {
                continue;
            }
            self.date_formats.remove(idx);
            self.date_formats.insert(0, fmt);
            return Some(date);
        }
        None
    }

    /// Parse a time string. Same logic as `parse_date`, with AM/PM preserved
    /// through simplification.
    pub fn parse_time(&mut self, time_str: &str) -> Option<NaiveTime> {
        if let Some(fmt) = &self.t_fmt {
            if let Ok(time) = NaiveTime::parse_from_str(time_str, fmt) {
                return Some(time);
            }
        }

        let simplified = simplify_time_string(time_str);
        for idx in 0..self.time_formats.len() {
            if let Ok(time) = NaiveTime::parse_from_str(&simplified, self.time_formats[idx]) {
                let fmt = self.time_formats.remove(idx);
                self.time_formats.insert(0, fmt);
                return Some(time);
            }
        }
        None
    }
}

/// Check if the day specifier (`d` or `e`) comes before the month specifier
/// (`m`) in a strftime-style format string
pub fn is_day_first(d_fmt: &str) -> bool {
    for ch in d_fmt.chars() {
        match ch {
            'd' | 'e' => return true,
            'm' => return false,
            _ => {}
        }
    }
    false
}

/// Replace every run of non-digits with a single space.
///
/// "2024. 05. 11", "11.5.2024 г." and "2024年05月11日" all simplify to
/// digit groups a plain numeric format can parse.
pub fn simplify_date_string(date_str: &str) -> String {
    date_str
        .split(|ch: char| !ch.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Like [`simplify_date_string`], but keeps `A`/`P`/`M` in either case so a
/// trailing or leading AM/PM marker survives
pub fn simplify_time_string(time_str: &str) -> String {
    time_str
        .split(|ch: char| !(ch.is_ascii_digit() || matches!(ch, 'A' | 'P' | 'M' | 'a' | 'p' | 'm')))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
