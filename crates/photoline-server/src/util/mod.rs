use chrono::{DateTime, NaiveDate, NaiveDateTime};
use photoline_core::TimeBucket;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

macro_rules! inner_tonic_uuid {
    ($s:expr) => {
        uuid::Uuid::parse_str($s)
            .map_err(|cause| tonic::Status::invalid_argument(format!("Invalid UUID: {}", cause)))
    };
    ($s:expr, $msg:expr) => {
        uuid::Uuid::parse_str($s)
            .map_err(|cause| tonic::Status::invalid_argument(format!($msg, cause)))
    };
}
pub(crate) use inner_tonic_uuid as tonic_uuid;

macro_rules! inner_tonic_required {
    ($opt:expr) => {
        match $opt {
            std::option::Option::Some(value) => std::result::Result::Ok(value),
            std::option::Option::None => std::result::Result::Err(tonic::Status::invalid_argument(
                format!("Required field '{}' missing ", stringify!($opt)),
            )),
        }
    };
    ($opt:expr, $msg:expr) => {
        match $opt {
            std::option::Option::Some(value) => std::result::Result::Ok(value),
            std::option::Option::None => {
                std::result::Result::Err(tonic::Status::invalid_argument($msg))
            }
        }
    };
}
pub(crate) use inner_tonic_required as tonic_required;

pub fn required_str(s: &str, msg: &'static str) -> Result<(), tonic::Status> {
    if s.trim().is_empty() {
        Err(tonic::Status::invalid_argument(msg))
    } else {
        Ok(())
    }
}

pub fn parse_day(s: &str) -> Result<NaiveDate, tonic::Status> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|cause| {
        tonic::Status::invalid_argument(format!("Invalid day {s:?} (expected YYYY-MM-DD): {cause}"))
    })
}

pub fn parse_bucket(s: &str) -> Result<TimeBucket, tonic::Status> {
    s.parse()
        .map_err(|cause: photoline_core::BucketParseError| tonic::Status::invalid_argument(cause.to_string()))
}

/// Capture time as sent by the client: RFC 3339 (offset dropped, the wall
/// clock time is kept) or a naive `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_taken_at(s: &str) -> Result<NaiveDateTime, tonic::Status> {
    let s = s.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(s) {
        return Ok(with_offset.naive_local());
    }
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| tonic::Status::invalid_argument(format!("Invalid taken_at timestamp: {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_taken_at_formats() {
        let rfc = parse_taken_at("2024-06-01T08:15:00+09:00").unwrap();
        assert_eq!(rfc.hour(), 8);
        let naive = parse_taken_at("2024-06-01T21:04:59").unwrap();
        assert_eq!(naive.hour(), 21);
        let short = parse_taken_at("2024-06-01T07:30").unwrap();
        assert_eq!(short.minute(), 30);
        let err = parse_taken_at("yesterday").unwrap_err();
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_parse_day_and_bucket() {
        assert_eq!(parse_day("2024-06-01").unwrap().to_string(), "2024-06-01");
        assert!(parse_day("06/01/2024").is_err());
        assert_eq!(parse_bucket("13:00").unwrap().hour(), 13);
        assert_eq!(parse_bucket("13:30").unwrap_err().code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_required_helpers() {
        assert!(required_str("  ", "empty").is_err());
        assert!(required_str("x", "empty").is_ok());
        let missing: Option<u32> = None;
        let err = tonic_required!(missing).unwrap_err();
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
        assert!(tonic_uuid!("not-a-uuid").is_err());
    }
}
