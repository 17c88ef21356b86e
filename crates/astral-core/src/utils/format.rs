use chrono::{DateTime, Utc};

use crate::models::Series;

/// Format a quote the way the instrument is usually quoted:
/// four decimals for FX pairs, whole dollars with separators for crypto.
pub fn format_price(series: Series, value: f64) -> String {
    match series {
        Series::EurUsd => format!("{:.4}", value),
        Series::BtcUsd => format!("${}", group_thousands(value.round() as i64)),
    }
}

/// Insert a comma between every group of three digits
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional timestamp as a short date, or `default` if absent
pub fn format_date(date: Option<DateTime<Utc>>, default: &str) -> String {
    date.map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Series::EurUsd, 1.0921), "1.0921");
        assert_eq!(format_price(Series::EurUsd, 1.09), "1.0900");
        assert_eq!(format_price(Series::BtcUsd, 52400.0), "$52,400");
        assert_eq!(format_price(Series::BtcUsd, 999.6), "$1,000");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-52000), "-52,000");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("trader@astralpips.com", 10), "trader@...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 2), "He");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 2, 10, 14, 0).unwrap();
        assert_eq!(format_date(Some(date), "-"), "Mar 02, 2024");
        assert_eq!(format_date(None, "never"), "never");
    }
}
