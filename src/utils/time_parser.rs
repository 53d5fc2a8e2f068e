use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::errors::{AgencyError, Result};

pub struct TimeParser;

impl TimeParser {
    /// Parse a link expiry. Accepted forms:
    /// - RFC3339: `2026-10-01T12:00:00Z`
    /// - calendar date: `2026-10-01` (expires at the end of that day, UTC)
    /// - relative: `7d`, `2w`, `12h`, `3mo`, `1y`, or combined like `1d12h`
    pub fn parse_expire_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AgencyError::date_parse("Expiry is empty"));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(dt.with_timezone(&Utc));
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return date
                .and_hms_opt(23, 59, 59)
                .map(|dt| dt.and_utc())
                .ok_or_else(|| AgencyError::date_parse(format!("Invalid date: '{}'", input)));
        }

        Self::parse_relative_time(input, now)
    }

    fn parse_relative_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let mut total = Duration::zero();
        let mut remaining = input;

        while !remaining.is_empty() {
            let digits = remaining
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(remaining.len());
            if digits == 0 {
                return Err(AgencyError::date_parse(format!(
                    "Invalid expiry format: '{}'",
                    input
                )));
            }
            let num: i64 = remaining[..digits].parse().map_err(|_| {
                AgencyError::date_parse(format!("Invalid number in expiry: '{}'", input))
            })?;
            remaining = &remaining[digits..];

            let unit_len = remaining
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(remaining.len());
            if unit_len == 0 {
                return Err(AgencyError::date_parse(format!(
                    "Missing time unit after '{}'",
                    num
                )));
            }
            let unit = remaining[..unit_len].to_ascii_lowercase();
            remaining = &remaining[unit_len..];

            // Months and years are approximated as 30 and 365 days
            let step = match unit.as_str() {
                "s" | "sec" | "secs" | "second" | "seconds" => Duration::try_seconds(num),
                "m" | "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(num),
                "h" | "hr" | "hour" | "hours" => Duration::try_hours(num),
                "d" | "day" | "days" => Duration::try_days(num),
                "w" | "week" | "weeks" => Duration::try_weeks(num),
                "mo" | "month" | "months" => num.checked_mul(30).and_then(Duration::try_days),
                "y" | "year" | "years" => num.checked_mul(365).and_then(Duration::try_days),
                _ => {
                    return Err(AgencyError::date_parse(format!(
                        "Unsupported time unit: '{}'",
                        unit
                    )));
                }
            };
            total = step
                .and_then(|d| total.checked_add(&d))
                .ok_or_else(|| AgencyError::date_parse("Expiry is out of range"))?;
        }

        if total.is_zero() {
            return Err(AgencyError::date_parse("Expiry interval cannot be zero"));
        }

        now.checked_add_signed(total)
            .ok_or_else(|| AgencyError::date_parse("Expiry is out of range"))
    }

    /// Short human form of the time left until `to`, e.g. `3d 4h`
    pub fn format_remaining(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        let secs = to.signed_duration_since(from).num_seconds();
        if secs <= 0 {
            return "expired".to_string();
        }

        let days = secs / 86_400;
        let hours = (secs % 86_400) / 3_600;
        let minutes = (secs % 3_600) / 60;

        match (days, hours, minutes) {
            (0, 0, 0) => format!("{}s", secs),
            (0, 0, m) => format!("{}m", m),
            (0, h, 0) => format!("{}h", h),
            (0, h, m) => format!("{}h {}m", h, m),
            (d, 0, _) => format!("{}d", d),
            (d, h, _) => format!("{}d {}h", d, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_relative_time() {
        let now = fixed_now();

        let result = TimeParser::parse_expire_time("7d", now).unwrap();
        assert_eq!((result - now).num_days(), 7);

        let result = TimeParser::parse_expire_time("2w", now).unwrap();
        assert_eq!((result - now).num_days(), 14);

        let result = TimeParser::parse_expire_time("1d12h", now).unwrap();
        assert_eq!((result - now).num_hours(), 36);

        let result = TimeParser::parse_expire_time("3mo", now).unwrap();
        assert_eq!((result - now).num_days(), 90);
    }

    #[test]
    fn test_parse_rfc3339_and_date() {
        let now = fixed_now();
        let result = TimeParser::parse_expire_time("2026-10-01T12:00:00Z", now).unwrap();
        assert_eq!(result, Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap());

        let result = TimeParser::parse_expire_time("2026-04-30", now).unwrap();
        assert_eq!(result, Utc.with_ymd_and_hms(2026, 4, 30, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_invalid_format() {
        let now = fixed_now();
        for bad in ["invalid", "1x", "abc", "", "0d", "d7", "2026-13-01"] {
            assert!(
                matches!(
                    TimeParser::parse_expire_time(bad, now),
                    Err(AgencyError::DateParse(_))
                ),
                "expected error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_format_remaining() {
        let now = fixed_now();
        assert_eq!(
            TimeParser::format_remaining(now, now + Duration::hours(50)),
            "2d 2h"
        );
        assert_eq!(
            TimeParser::format_remaining(now, now + Duration::minutes(90)),
            "1h 30m"
        );
        assert_eq!(
            TimeParser::format_remaining(now, now - Duration::minutes(1)),
            "expired"
        );
    }
}
