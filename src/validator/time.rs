use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{ArcValidator, new};
use crate::types::{ValidateError, Value};

// Translate a Go-style reference layout ("2006-01-02 15:04:05") into a
// strftime format string, noting which components it mentions.
fn translate_layout(layout: &str) -> (String, bool, bool) {
    const TOKENS: &[(&str, &str, bool)] = &[
        ("2006", "%Y", true),
        ("01", "%m", true),
        ("02", "%d", true),
        ("15", "%H", false),
        ("04", "%M", false),
        ("05", "%S", false),
    ];

    let mut fmt = String::with_capacity(layout.len());
    let mut has_date = false;
    let mut has_time = false;
    let mut rest = layout;

    'outer: while !rest.is_empty() {
        for (token, repl, is_date) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                fmt.push_str(repl);
                if *is_date {
                    has_date = true;
                } else {
                    has_time = true;
                }
                rest = after;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        match chars.next() {
            Some('%') => fmt.push_str("%%"),
            Some(c) => fmt.push(c),
            None => break,
        }
        rest = chars.as_str();
    }

    (fmt, has_date, has_time)
}

fn parses(s: &str, fmt: &str, has_date: bool, has_time: bool, layout: &str) -> bool {
    match (has_date, has_time) {
        (true, true) => NaiveDateTime::parse_from_str(s, fmt).is_ok(),
        (true, false) => NaiveDate::parse_from_str(s, fmt).is_ok(),
        (false, true) => NaiveTime::parse_from_str(s, fmt).is_ok(),
        // No tokens at all: the input must equal the layout literally.
        (false, false) => s == layout,
    }
}

/// Passes iff the string value conforms to the given reference layout, e.g.
/// `15:04:05` or `2006-01-02`.
///
/// The validator rule is `time("layout")`.
pub fn time(layout: &str) -> ArcValidator {
    let layout = layout.to_owned();
    let (fmt, has_date, has_time) = translate_layout(&layout);
    let message = format!("invalid time for '{layout}'");

    new(format!("time(\"{layout}\")"), move |value| {
        let ok = match value {
            Value::String(s) => parses(s, &fmt, has_date, has_time, &layout),
            Value::Null => false,
            Value::Custom(c) => match c.as_text() {
                Some(s) => parses(&s, &fmt, has_date, has_time, &layout),
                None => {
                    return Err(ValidateError::new(format!(
                        "unsupported type {}",
                        value.kind()
                    )));
                }
            },
            other => {
                return Err(ValidateError::new(format!(
                    "unsupported type {}",
                    other.kind()
                )));
            }
        };
        if ok {
            Ok(())
        } else {
            Err(ValidateError::new(message.clone()))
        }
    })
}

/// Passes iff the string value is a duration such as `1s`, `1h2m`, `300ms`
/// or `1.5h` (units ns, us, µs, ms, s, m, h; an optional sign; bare `0`).
///
/// The validator rule is `duration`.
pub fn duration() -> ArcValidator {
    new("duration", |value| {
        let ok = match value {
            Value::String(s) => parse_duration(s),
            Value::Null => false,
            Value::Custom(c) => match c.as_text() {
                Some(s) => parse_duration(&s),
                None => {
                    return Err(ValidateError::new(format!(
                        "unsupported type {}",
                        value.kind()
                    )));
                }
            },
            other => {
                return Err(ValidateError::new(format!(
                    "unsupported type {}",
                    other.kind()
                )));
            }
        };
        if ok {
            Ok(())
        } else {
            Err(ValidateError::new("invalid duration"))
        }
    })
}

// Recognizer for Go-style duration strings: [+-]?(number unit)+ with an
// optional fraction in each number, or a bare "0".
fn parse_duration(s: &str) -> bool {
    let mut rest = s;
    if let Some(r) = rest.strip_prefix(['+', '-']) {
        rest = r;
    }
    if rest == "0" {
        return true;
    }
    if rest.is_empty() {
        return false;
    }

    const UNITS: &[&str] = &["ns", "us", "µs", "μs", "ms", "h", "m", "s"];

    while !rest.is_empty() {
        let int_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let mut digits = int_len > 0;
        rest = &rest[int_len..];

        if let Some(r) = rest.strip_prefix('.') {
            let frac_len = r.find(|c: char| !c.is_ascii_digit()).unwrap_or(r.len());
            digits = digits || frac_len > 0;
            rest = &r[frac_len..];
        }
        if !digits {
            return false;
        }

        let Some(unit) = UNITS.iter().find(|u| rest.starts_with(**u)) else {
            return false;
        };
        rest = &rest[unit.len()..];
    }

    true
}
