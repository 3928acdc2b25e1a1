//! Age resolution: direct age values, birth dates in several formats, epoch
//! timestamps, bare years and textual ranges all funnel into one of the four
//! report buckets.

use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;

use crate::types::AgeBucket;

/// Map a resolved age to its bracket. Zero, negative and out-of-band values
/// produce no bucket.
pub fn age_to_bucket(age: i64) -> Option<AgeBucket> {
    if age <= 0 {
        return None;
    }
    Some(match age {
        1..=30 => AgeBucket::From20To30,
        31..=40 => AgeBucket::From31To40,
        41..=50 => AgeBucket::From41To50,
        _ => AgeBucket::Over50,
    })
}

/// Completed years between `born` and `today`: the year difference drops by
/// one when the birthday has not yet occurred this year.
pub fn age_from_date(born: NaiveDate, today: NaiveDate) -> Option<i64> {
    let mut age = i64::from(today.year()) - i64::from(born.year());
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    if (0..=150).contains(&age) {
        Some(age)
    } else {
        None
    }
}

/// Interpret a bare number as a date: millisecond epoch if very large, second
/// epoch if large, plausible 4-digit year otherwise.
fn date_from_number(n: f64, today: NaiveDate) -> Option<NaiveDate> {
    if !n.is_finite() {
        return None;
    }
    if n > 1_000_000_000_000.0 {
        return DateTime::from_timestamp_millis(n as i64).map(|dt| dt.date_naive());
    }
    if n > 1_000_000_000.0 {
        return DateTime::from_timestamp(n as i64, 0).map(|dt| dt.date_naive());
    }
    let year = n as i64;
    if year >= 1900 && year <= i64::from(today.year()) + 1 {
        return NaiveDate::from_ymd_opt(year as i32, 1, 1);
    }
    None
}

/// Recognize a strict `YYYY-MM-DD` prefix, so full ISO timestamps like
/// `1990-05-12T00:00:00Z` parse by their date part.
fn iso_prefix(raw: &str) -> Option<NaiveDate> {
    let b = raw.as_bytes();
    if b.len() < 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    let digits = b[..4]
        .iter()
        .chain(b[5..7].iter())
        .chain(b[8..10].iter())
        .all(|c| c.is_ascii_digit());
    if !digits {
        return None;
    }
    NaiveDate::parse_from_str(&raw[..10], "%Y-%m-%d").ok()
}

/// The date-parsing cascade: ISO first, then day-first forms, then year-first
/// forms, then RFC 3339 as a last resort.
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    if let Some(date) = iso_prefix(raw) {
        return Some(date);
    }
    const FORMATS: &[&str] = &[
        "%d/%m/%Y",
        "%d-%m-%Y",
        "%d.%m.%Y",
        "%Y/%m/%d",
        "%Y-%m-%d",
        "%Y.%m.%d",
    ];
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Find an explicit "<n> tahun/thn/th" phrase and return its count.
fn explicit_year_count(raw: &str) -> Option<i64> {
    let lower = raw.to_lowercase();
    let b = lower.as_bytes();
    let mut i = 0;
    while i < b.len() {
        if !b[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i - start > 3 {
            continue;
        }
        let mut j = i;
        while j < b.len() && b[j].is_ascii_whitespace() {
            j += 1;
        }
        for unit in [&b"tahun"[..], &b"thn"[..], &b"th"[..]] {
            if b[j..].starts_with(unit) {
                let end = j + unit.len();
                let bounded = b.get(end).map_or(true, |c| !c.is_ascii_alphanumeric());
                if bounded {
                    return lower[start..i].parse().ok();
                }
            }
        }
    }
    None
}

/// Accept "20-30" style values only when the whole string is a range, so ISO
/// birth dates are never mistaken for one.
fn range_start(raw: &str) -> Option<i64> {
    let mut parts = raw.splitn(2, '-');
    let lo = parts.next()?.trim();
    let hi = parts.next()?.trim();
    let plain_digits = |s: &str| (1..=3).contains(&s.len()) && s.bytes().all(|c| c.is_ascii_digit());
    if plain_digits(lo) && plain_digits(hi) {
        lo.parse().ok()
    } else {
        None
    }
}

/// Resolve an age from a direct age-like value: a plausible number is taken
/// as-is, everything else is attempted as a date and converted to completed
/// years as of `today`.
pub fn parse_age_value(value: &Value, today: NaiveDate) -> Option<i64> {
    match value {
        Value::Number(n) => {
            let v = n.as_f64()?;
            if v.is_finite() && v > 0.0 && v <= 150.0 {
                return Some(v.floor() as i64);
            }
            date_from_number(v, today).and_then(|d| age_from_date(d, today))
        }
        Value::String(s) => {
            let raw = s.trim();
            if raw.is_empty() {
                return None;
            }
            if let Some(age) = explicit_year_count(raw) {
                return if age > 0 && age <= 150 { Some(age) } else { None };
            }
            if raw.len() <= 3 && raw.bytes().all(|c| c.is_ascii_digit()) {
                let age: i64 = raw.parse().ok()?;
                return if age > 0 && age <= 150 { Some(age) } else { None };
            }
            if raw.len() == 4 && raw.bytes().all(|c| c.is_ascii_digit()) {
                let year: i32 = raw.parse().ok()?;
                let born = NaiveDate::from_ymd_opt(year, 1, 1)?;
                return age_from_date(born, today);
            }
            parse_date_text(raw).and_then(|d| age_from_date(d, today))
        }
        _ => None,
    }
}

/// Full bucket resolution for one field value. Textual ranges and trailing
/// "+" forms are recognized directly; anything else goes through
/// [`parse_age_value`].
pub fn normalize_age_bucket(value: &Value, today: NaiveDate) -> Option<AgeBucket> {
    if let Value::String(s) = value {
        let raw = s.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.ends_with('+') {
            return Some(AgeBucket::Over50);
        }
        if let Some(start) = range_start(raw) {
            return age_to_bucket(start);
        }
    }
    parse_age_value(value, today).and_then(age_to_bucket)
}
