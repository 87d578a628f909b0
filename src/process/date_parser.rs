use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse an ISO-8601 style literal into a naive timestamp.
///
/// Accepts date-only (`2021-01-01`, midnight), `T`- or space-separated
/// date-times with optional fractional seconds, RFC 3339 with an offset
/// (normalised to UTC), and the slash form `YYYY/MM/DD[ HH:MM:SS]`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Nanoseconds since the Unix epoch; `None` outside the i64 range (~1677..2262).
pub fn parse_timestamp_nanos(s: &str) -> Option<i64> {
    parse_timestamp(s)?.and_utc().timestamp_nanos_opt()
}

/// Date component of a full timestamp parse.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_timestamp(s).map(|dt| dt.date())
}

/// Time-of-day component of a full timestamp parse.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    parse_timestamp(s).map(|dt| dt.time())
}

/// Days since 1970-01-01, the Date32 encoding.
pub fn date_to_days(d: NaiveDate) -> i32 {
    (d - NaiveDate::default()).num_days() as i32
}

/// Microseconds since midnight, the Time64(µs) encoding. Digits past the
/// microsecond are truncated, the same way the date and time components are
/// cut from a full timestamp.
pub fn time_to_micros(t: NaiveTime) -> i64 {
    t.num_seconds_from_midnight() as i64 * 1_000_000 + (t.nanosecond() / 1_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_and_time_derive_from_timestamp() {
        let lit = "2021-01-01T00:00:00";
        assert_eq!(
            parse_date(lit),
            NaiveDate::from_ymd_opt(2021, 1, 1)
        );
        assert_eq!(parse_time(lit), NaiveTime::from_hms_opt(0, 0, 0));
    }

    #[test]
    fn malformed_literal_fails_for_every_temporal_kind() {
        let lit = "2021-13-01T00:00:00";
        assert!(parse_timestamp(lit).is_none());
        assert!(parse_date(lit).is_none());
        assert!(parse_time(lit).is_none());
    }

    #[test]
    fn accepted_shapes() {
        let midnight = NaiveDate::from_ymd_opt(1998, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("1998-12-01"), Some(midnight));
        assert_eq!(parse_timestamp(" 1998-12-01 "), Some(midnight));
        assert_eq!(parse_timestamp("1998/12/01"), Some(midnight));
        assert_eq!(parse_timestamp("1998-12-01 00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("1998-12-01T10:00:00+10:00"), Some(midnight));

        let frac = parse_timestamp("1998-12-01T12:34:56.789").unwrap();
        assert_eq!(time_to_micros(frac.time()), 45_296_789_000);
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn time_of_day_truncates_below_the_microsecond() {
        let lit = "2021-01-01T12:00:00.123456789";
        let t = parse_time(lit).unwrap();
        assert_eq!(time_to_micros(t), 43_200_123_456);
        assert_eq!(
            parse_timestamp_nanos(lit).map(|n| n % 1_000_000_000),
            Some(123_456_789)
        );
        let last_instant = parse_time("2021-01-01T23:59:59.999999999").unwrap();
        assert_eq!(time_to_micros(last_instant), 86_399_999_999);
    }

    #[test]
    fn epoch_encodings() {
        assert_eq!(date_to_days(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        assert_eq!(date_to_days(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()), 18_628);
        assert_eq!(
            parse_timestamp_nanos("1970-01-01T00:00:01"),
            Some(1_000_000_000)
        );
        assert_eq!(parse_timestamp_nanos("2500-01-01"), None);
    }
}
