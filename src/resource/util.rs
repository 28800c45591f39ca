//! Small conversions shared by the mappers

use chrono::{DateTime, SecondsFormat, Utc};

/// Clone a string only when it is present and non-empty
pub fn present_string(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Parse a base-10 integer carried as text in a model.
///
/// Unparseable input yields 0 instead of an error, which callers cannot tell
/// apart from an explicit zero.
pub fn parse_int_lossy(field: &str, value: &str) -> i64 {
    match value.parse::<i64>() {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("{} value {:?} is not an integer ({}), using 0", field, value, e);
            0
        }
    }
}

/// RFC 3339 in UTC with a `Z` suffix; fractional seconds only when non-zero
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_int_lossy() {
        assert_eq!(parse_int_lossy("DiskIOPS", "120"), 120);
        assert_eq!(parse_int_lossy("DiskIOPS", " 42 "), 0);
        assert_eq!(parse_int_lossy("DiskIOPS", "not-a-number"), 0);
        assert_eq!(parse_int_lossy("DiskIOPS", ""), 0);
        assert_eq!(parse_int_lossy("DiskIOPS", "-7"), -7);
    }

    #[test]
    fn test_format_timestamp() {
        let t = Utc.with_ymd_and_hms(2023, 11, 2, 10, 20, 30).unwrap();
        assert_eq!(format_timestamp(&t), "2023-11-02T10:20:30Z");

        let with_millis = t + chrono::Duration::milliseconds(250);
        assert_eq!(format_timestamp(&with_millis), "2023-11-02T10:20:30.250Z");
    }
}
