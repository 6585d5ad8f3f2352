use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest SpO2 percentage a reading can carry
pub const SPO2_MAX: u8 = 100;

/// Highest pulse rate a reading can carry; 255 is reserved as the DAT
/// no-data byte
pub const PULSE_MAX: u8 = 254;

/// One timestamped SpO2/pulse-rate sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Absolute point in time, second resolution
    pub timestamp: NaiveDateTime,
    /// Blood-oxygen saturation in percent, `None` when the device had no reading
    pub spo2: Option<u8>,
    /// Pulse rate in beats per minute, `None` when the device had no reading
    pub pulse: Option<u8>,
}

impl Reading {
    pub fn new(timestamp: NaiveDateTime, spo2: Option<u8>, pulse: Option<u8>) -> Self {
        Self {
            timestamp,
            spo2,
            pulse,
        }
    }

    /// A synthetic reading carrying no measurements, used to fill gaps
    pub fn blank(timestamp: NaiveDateTime) -> Self {
        Self::new(timestamp, None, None)
    }

    /// Check if at least one of the two measurements is present
    pub fn has_data(&self) -> bool {
        self.spo2.is_some() || self.pulse.is_some()
    }
}
