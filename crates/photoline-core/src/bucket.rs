//! Hour-granularity time buckets (`"09:00"`).

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BucketParseError {
    #[error("Time bucket must look like \"HH:00\", got {0:?}")]
    Format(String),

    #[error("Hour out of range (0-23): {0}")]
    HourOutOfRange(u32),
}

/// One hour of a day. Photos and notes in the same bucket share a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeBucket(u8);

impl TimeBucket {
    pub fn new(hour: u32) -> Result<Self, BucketParseError> {
        match u8::try_from(hour) {
            Ok(h) if h < 24 => Ok(Self(h)),
            _ => Err(BucketParseError::HourOutOfRange(hour)),
        }
    }

    /// Bucket containing the given time of day.
    pub fn of<T: Timelike>(time: &T) -> Self {
        // Timelike::hour is always 0..24
        Self(time.hour() as u8)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0)
    }

    /// Every bucket of a day in order.
    pub fn all() -> impl Iterator<Item = TimeBucket> {
        (0u8..24).map(TimeBucket)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeBucket {
    type Err = BucketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || BucketParseError::Format(s.to_string());
        let (hour, minutes) = s.trim().split_once(':').ok_or_else(format_err)?;
        if minutes != "00" || hour.is_empty() || hour.len() > 2 {
            return Err(format_err());
        }
        let hour: u32 = hour.parse().map_err(|_| format_err())?;
        Self::new(hour)
    }
}

impl TryFrom<String> for TimeBucket {
    type Error = BucketParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeBucket> for String {
    fn from(bucket: TimeBucket) -> Self {
        bucket.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(TimeBucket::new(9).unwrap().to_string(), "09:00");
        assert_eq!(TimeBucket::new(23).unwrap().to_string(), "23:00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("09:00".parse::<TimeBucket>().unwrap().hour(), 9);
        assert_eq!("7:00".parse::<TimeBucket>().unwrap().hour(), 7);
        assert!(matches!(
            "24:00".parse::<TimeBucket>(),
            Err(BucketParseError::HourOutOfRange(24))
        ));
        assert!(matches!("09:30".parse::<TimeBucket>(), Err(BucketParseError::Format(_))));
        assert!(matches!("nine".parse::<TimeBucket>(), Err(BucketParseError::Format(_))));
    }

    #[test]
    fn test_of_time() {
        let t = NaiveTime::from_hms_opt(14, 59, 59).unwrap();
        assert_eq!(TimeBucket::of(&t).to_string(), "14:00");
    }

    #[test]
    fn test_serde_as_string() {
        let bucket = TimeBucket::new(8).unwrap();
        let json = serde_json::to_string(&bucket).unwrap();
        assert_eq!(json, "\"08:00\"");
        let back: TimeBucket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bucket);
        assert!(serde_json::from_str::<TimeBucket>("\"25:00\"").is_err());
    }

    #[test]
    fn test_all_is_ordered() {
        let all: Vec<_> = TimeBucket::all().collect();
        assert_eq!(all.len(), 24);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }
}
