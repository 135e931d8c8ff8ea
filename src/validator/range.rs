use super::{ArcValidator, new};
use crate::types::{ValidateError, Value};

// What a numeric bound applies to: numbers compare by value, strings by
// character count, aggregates by element count.
enum Measured {
    Integer(f64),
    Float(f64),
    StrLen(f64),
    Len(f64),
}

impl Measured {
    fn magnitude(&self) -> f64 {
        match self {
            Measured::Integer(v)
            | Measured::Float(v)
            | Measured::StrLen(v)
            | Measured::Len(v) => *v,
        }
    }

    // The subject of the error message ("the integer", "the string length").
    fn subject(&self) -> &'static str {
        match self {
            Measured::Integer(_) => "the integer",
            Measured::Float(_) => "the float",
            Measured::StrLen(_) => "the string length",
            Measured::Len(_) => "the length",
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn measure(value: &Value) -> Option<Measured> {
    match value {
        Value::Int(i) => Some(Measured::Integer(*i as f64)),
        Value::Float(f) => Some(Measured::Float(*f)),
        Value::String(s) => Some(Measured::StrLen(s.chars().count() as f64)),
        Value::Array(a) => Some(Measured::Len(a.len() as f64)),
        Value::Map(m) => Some(Measured::Len(m.len() as f64)),
        _ => None,
    }
}

fn unsupported(value: &Value) -> ValidateError {
    ValidateError::new(format!("unsupported type {}", value.kind()))
}

/// Passes iff the value (or its length) is at least `limit`, inclusive.
///
/// The validator rule is `min(limit)`.
pub fn min(limit: f64) -> ArcValidator {
    new(format!("min({limit})"), move |value| match measure(value) {
        Some(m) if m.magnitude() < limit => Err(ValidateError::new(format!(
            "{} is less than {limit}",
            m.subject()
        ))),
        Some(_) => Ok(()),
        None => Err(unsupported(value)),
    })
}

/// Passes iff the value (or its length) is at most `limit`, inclusive.
///
/// The validator rule is `max(limit)`.
pub fn max(limit: f64) -> ArcValidator {
    new(format!("max({limit})"), move |value| match measure(value) {
        Some(m) if m.magnitude() > limit => Err(ValidateError::new(format!(
            "{} is greater than {limit}",
            m.subject()
        ))),
        Some(_) => Ok(()),
        None => Err(unsupported(value)),
    })
}

/// Passes iff the value (or its length) lies in `[lo, hi]`, inclusive.
///
/// The validator rule is `ranger(lo, hi)`.
pub fn ranger(lo: f64, hi: f64) -> ArcValidator {
    new(format!("ranger({lo},{hi})"), move |value| {
        match measure(value) {
            Some(m) if m.magnitude() < lo || m.magnitude() > hi => Err(ValidateError::new(
                format!("{} is not in range [{lo}, {hi}]", m.subject()),
            )),
            Some(_) => Ok(()),
            None => Err(unsupported(value)),
        }
    })
}

/// Passes iff the integer value equals `base^k` for some `k` in
/// `[start_exp, end_exp]`.
///
/// The validator rule is `exp(base, startExp, endExp)`.
pub fn exp(base: i64, start_exp: i64, end_exp: i64) -> ArcValidator {
    let mut members = Vec::new();
    for k in start_exp..=end_exp {
        let Ok(power) = u32::try_from(k) else {
            continue;
        };
        if let Some(v) = base.checked_pow(power) {
            members.push(v);
        }
    }

    let listed = members
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!("the integer is not in range [{listed}]");

    new(format!("exp({base},{start_exp},{end_exp})"), move |value| {
        match value {
            Value::Int(i) if members.contains(i) => Ok(()),
            Value::Int(_) => Err(ValidateError::new(message.clone())),
            other => Err(unsupported(other)),
        }
    })
}
