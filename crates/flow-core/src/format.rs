//! Display formatting for trade fields.
//!
//! All functions here are pure. Absent or zero inputs never fail; they
//! fall back to a literal placeholder (`$0` for money, `0` for IV).

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Premium / value formatting with magnitude abbreviation.
///
/// - `>= 1,000,000` => `$2.50M`
/// - `>= 1,000`     => `$1.5K`
/// - otherwise      => `$999`
pub fn format_money(value: Option<f64>) -> String {
    let num = match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => return "$0".to_string(),
    };

    let magnitude = num.abs();
    if magnitude >= 1_000_000.0 {
        format!("${:.2}M", num / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("${:.1}K", num / 1_000.0)
    } else if num.round() == 0.0 {
        "$0".to_string()
    } else {
        format!("${:.0}", num.round())
    }
}

/// Strike / spot formatting: fixed two decimals.
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format!("${:.2}", v),
        _ => "$0".to_string(),
    }
}

/// Implied volatility as sent by the server, or `0` when absent.
pub fn format_iv(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v.to_string(),
        _ => "0".to_string(),
    }
}

/// Normalize an expiration date to `MM/DD/YY`.
///
/// Accepted inputs:
/// - all-digit epoch milliseconds (rendered in UTC)
/// - RFC 3339 timestamps
/// - `YYYY-M-D` (separators `-`, `/`, `.`)
/// - `M/D/YYYY` and `M/D/YY` (separators `-`, `/`)
///
/// Anything else is returned trimmed but otherwise unchanged.
pub fn format_expiration(exp: &str) -> String {
    let trimmed = exp.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(dt) = trimmed
            .parse::<i64>()
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        {
            return mm_dd_yy(&dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return mm_dd_yy(&dt.with_timezone(&Utc));
    }

    if let Some([year, month, day]) = split_date(trimmed, &['-', '/', '.']) {
        if year.len() == 4 && is_short(month) && is_short(day) {
            return format!("{:0>2}/{:0>2}/{}", month, day, &year[2..]);
        }
    }

    if let Some([month, day, year]) = split_date(trimmed, &['-', '/']) {
        if is_short(month) && is_short(day) && (year.len() == 4 || year.len() == 2) {
            return format!("{:0>2}/{:0>2}/{}", month, day, &year[year.len() - 2..]);
        }
    }

    trimmed.to_string()
}

fn mm_dd_yy(dt: &DateTime<Utc>) -> String {
    format!("{:02}/{:02}/{:02}", dt.month(), dt.day(), dt.year().rem_euclid(100))
}

/// Split into exactly three all-digit parts on any of `seps`.
fn split_date<'a>(s: &'a str, seps: &[char]) -> Option<[&'a str; 3]> {
    let mut parts = s.split(|c| seps.contains(&c));
    let a = parts.next()?;
    let b = parts.next()?;
    let c = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if all_digits(a) && all_digits(b) && all_digits(c) {
        Some([a, b, c])
    } else {
        None
    }
}

fn is_short(part: &str) -> bool {
    part.len() == 1 || part.len() == 2
}
