use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Which side of an ambiguous `A/B/YYYY` date is the month.
///
/// Only consulted when both components are <= 12; a component > 12 is
/// always taken as the day regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    #[default]
    MonthFirst,
    DayFirst,
}

impl DateOrder {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mdy" => Some(Self::MonthFirst),
            "dmy" => Some(Self::DayFirst),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::MonthFirst => "mdy",
            Self::DayFirst => "dmy",
        }
    }
}

fn resolve_day_month(first: u32, second: u32, order: DateOrder) -> (u32, u32) {
    if first > 12 {
        (second, first)
    } else if second > 12 {
        (first, second)
    } else {
        match order {
            DateOrder::MonthFirst => (first, second),
            DateOrder::DayFirst => (second, first),
        }
    }
}

/// Parse a raw date token into a calendar date. Returns `None` on anything
/// unrecognizable; never panics. Accepted, in priority order: ISO
/// `YYYY-MM-DD` (with or without a trailing time), slash/dash triples with
/// a 4-digit or 2-digit year, compact `YYYYMMDD`, then a few spelled-out
/// fallbacks. Two-digit years > 50 map to the 1900s.
pub fn parse_date(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    let raw = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    if raw.is_empty() {
        return None;
    }

    if raw.len() >= 10 && raw.is_char_boundary(10) && raw.as_bytes()[4] == b'-' {
        if let Ok(d) = NaiveDate::parse_from_str(&raw[..10], "%Y-%m-%d") {
            return Some(d);
        }
    }

    let sep = if raw.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = raw.split(sep).collect();
    if parts.len() == 3 {
        if let (Ok(first), Ok(second), Ok(year)) = (
            parts[0].parse::<u32>(),
            parts[1].parse::<u32>(),
            parts[2].parse::<i32>(),
        ) {
            if parts[2].len() == 4 {
                let (m, d) = resolve_day_month(first, second, order);
                return NaiveDate::from_ymd_opt(year, m, d);
            }
            if parts[2].len() == 2 {
                let year = if year > 50 { 1900 + year } else { 2000 + year };
                let (m, d) = resolve_day_month(first, second, order);
                return NaiveDate::from_ymd_opt(year, m, d);
            }
        }
    }

    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y%m%d") {
            return Some(d);
        }
    }

    for fmt in ["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }

    None
}

fn european_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d{1,3}(?:\.\d{3})+,\d{2}$").unwrap())
}

fn thousands_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d{1,3}(?:,\d{3})+(?:\.\d+)?$").unwrap())
}

fn decimal_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+,\d{1,2}$").unwrap())
}

/// Parse a raw amount token, keeping the polarity expressed in the source
/// (leading/trailing minus, parentheses). `f64::NAN` on failure.
pub fn parse_amount_signed(raw: &str) -> f64 {
    // Currency symbols, whitespace, quotes and unit suffixes all drop out here.
    let mut cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '(' | ')'))
        .collect();
    if cleaned.is_empty() {
        return f64::NAN;
    }

    let mut negative = false;
    if let Some(inner) = cleaned
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
    {
        negative = true;
        cleaned = inner.to_string();
    }
    if let Some(body) = cleaned.strip_suffix('-') {
        negative = true;
        cleaned = body.to_string();
    }

    // Normalize separator conventions to a bare decimal point.
    let normalized = if european_re().is_match(&cleaned) {
        cleaned.replace('.', "").replace(',', ".")
    } else if thousands_comma_re().is_match(&cleaned) {
        cleaned.replace(',', "")
    } else if decimal_comma_re().is_match(&cleaned) {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    match normalized.parse::<f64>() {
        Ok(v) if negative => -v.abs(),
        Ok(v) => v,
        Err(_) => f64::NAN,
    }
}

/// Parse a raw amount token to its magnitude. Direction of money flow is
/// business data, not lexical data, so the sign is discarded here; callers
/// that need source polarity use [`parse_amount_signed`].
pub fn parse_amount(raw: &str) -> f64 {
    parse_amount_signed(raw).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_date_iso_roundtrip() {
        for s in ["2024-01-15", "1999-12-31", "2025-06-01"] {
            let parsed = parse_date(s, DateOrder::MonthFirst).unwrap();
            assert_eq!(parsed.format("%Y-%m-%d").to_string(), s);
        }
    }

    #[test]
    fn test_parse_date_iso_with_time_suffix() {
        assert_eq!(
            parse_date("2024-01-15T10:30:00", DateOrder::MonthFirst),
            Some(d(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_date_slash_month_first_default() {
        assert_eq!(parse_date("01/15/2024", DateOrder::MonthFirst), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("3/4/2024", DateOrder::MonthFirst), Some(d(2024, 3, 4)));
    }

    #[test]
    fn test_parse_date_magnitude_overrides_order() {
        // A component > 12 is the day no matter the configured order.
        assert_eq!(parse_date("15/01/2024", DateOrder::MonthFirst), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("01/15/2024", DateOrder::DayFirst), Some(d(2024, 1, 15)));
    }

    #[test]
    fn test_parse_date_day_first_configured() {
        assert_eq!(parse_date("03/04/2024", DateOrder::DayFirst), Some(d(2024, 4, 3)));
    }

    #[test]
    fn test_parse_date_dash_separated() {
        assert_eq!(parse_date("15-01-2024", DateOrder::MonthFirst), Some(d(2024, 1, 15)));
    }

    #[test]
    fn test_parse_date_two_digit_years() {
        assert_eq!(parse_date("01/15/24", DateOrder::MonthFirst), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("01/15/99", DateOrder::MonthFirst), Some(d(1999, 1, 15)));
        assert_eq!(parse_date("01/15/51", DateOrder::MonthFirst), Some(d(1951, 1, 15)));
        assert_eq!(parse_date("01/15/50", DateOrder::MonthFirst), Some(d(2050, 1, 15)));
    }

    #[test]
    fn test_parse_date_compact() {
        assert_eq!(parse_date("20240115", DateOrder::MonthFirst), Some(d(2024, 1, 15)));
    }

    #[test]
    fn test_parse_date_spelled_out_fallback() {
        assert_eq!(parse_date("Jan 15, 2024", DateOrder::MonthFirst), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("15 January 2024", DateOrder::MonthFirst), Some(d(2024, 1, 15)));
    }

    #[test]
    fn test_parse_date_rejects_garbage_and_invalid() {
        assert_eq!(parse_date("", DateOrder::MonthFirst), None);
        assert_eq!(parse_date("not a date", DateOrder::MonthFirst), None);
        assert_eq!(parse_date("02/30/2024", DateOrder::MonthFirst), None);
        assert_eq!(parse_date("13/13/2024", DateOrder::MonthFirst), None);
    }

    #[test]
    fn test_parse_amount_european_format() {
        assert_eq!(parse_amount("1.234,56"), 1234.56);
        assert_eq!(parse_amount("12.345.678,90"), 12345678.9);
    }

    #[test]
    fn test_parse_amount_us_format() {
        assert_eq!(parse_amount("1,234.56"), 1234.56);
        assert_eq!(parse_amount("1,234"), 1234.0);
    }

    #[test]
    fn test_parse_amount_decimal_comma() {
        assert_eq!(parse_amount("123,45"), 123.45);
        assert_eq!(parse_amount("4,5"), 4.5);
    }

    #[test]
    fn test_parse_amount_strips_currency_and_whitespace() {
        assert_eq!(parse_amount("$1,234.56"), 1234.56);
        assert_eq!(parse_amount("  342,50 kr "), 342.5);
        assert_eq!(parse_amount("\u{20ac}99.95"), 99.95);
        assert_eq!(parse_amount("\"500.00\""), 500.0);
    }

    #[test]
    fn test_parse_amount_returns_magnitude() {
        assert_eq!(parse_amount("-42.50"), 42.5);
        assert_eq!(parse_amount("(500.00)"), 500.0);
        assert_eq!(parse_amount("42.50-"), 42.5);
    }

    #[test]
    fn test_parse_amount_signed_polarity() {
        assert_eq!(parse_amount_signed("-42.50"), -42.5);
        assert_eq!(parse_amount_signed("(1,234.56)"), -1234.56);
        assert_eq!(parse_amount_signed("42.50-"), -42.5);
        assert_eq!(parse_amount_signed("500.00"), 500.0);
    }

    #[test]
    fn test_parse_amount_invalid_is_nan() {
        assert!(parse_amount("").is_nan());
        assert!(parse_amount("abc").is_nan());
        assert!(parse_amount("--").is_nan());
    }
}
