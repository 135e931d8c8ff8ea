use super::{ArcValidator, new};
use crate::types::{BuildError, ValidateError, Value};

/// Passes iff the string value equals one of `values`.
///
/// Equal to [`one_of_with_name`] with the name `oneof`; the validator rule is
/// `oneof(values...)`.
///
/// # Errors
///
/// Returns a [`BuildError`] if `values` is empty.
pub fn one_of(values: Vec<String>) -> Result<ArcValidator, BuildError> {
    one_of_with_name("oneof", values)
}

/// Passes iff the string value equals one of `values`, described under the
/// given name.
///
/// # Errors
///
/// Returns a [`BuildError`] if `values` is empty.
pub fn one_of_with_name(name: &str, values: Vec<String>) -> Result<ArcValidator, BuildError> {
    if values.is_empty() {
        return Err(BuildError::Constructor {
            name: name.to_owned(),
            reason: "the values must not be empty".to_owned(),
        });
    }

    let quoted = values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(",");
    let desc = format!("{name}({quoted})");
    let listed = values.join(" ");

    Ok(new(desc, move |value| {
        let s = match value {
            Value::String(s) => s.as_str(),
            // A null string pointer checks as the empty string.
            Value::Null => "",
            Value::Custom(c) => {
                return match c.as_text() {
                    Some(text) if values.iter().any(|v| *v == text) => Ok(()),
                    Some(text) => Err(not_one_of(&text, &listed)),
                    None => Err(expect_string(value)),
                };
            }
            other => return Err(expect_string(other)),
        };
        if values.iter().any(|v| v == s) {
            Ok(())
        } else {
            Err(not_one_of(s, &listed))
        }
    }))
}

fn not_one_of(s: &str, listed: &str) -> ValidateError {
    ValidateError::new(format!("the string '{s}' is not one of [{listed}]"))
}

fn expect_string(value: &Value) -> ValidateError {
    ValidateError::new(format!("expect a string, but got {}", value.kind()))
}

/// Passes iff the string value parses as a number (integer or float).
///
/// The validator rule is `isnumber`.
pub fn is_number() -> ArcValidator {
    string_parses("isnumber", "the string is not a number", |s| {
        s.parse::<f64>().is_ok()
    })
}

/// Passes iff the string value parses as a 64-bit signed integer.
///
/// The validator rule is `isinteger`.
pub fn is_integer() -> ArcValidator {
    string_parses("isinteger", "the string is not an integer", |s| {
        s.parse::<i64>().is_ok()
    })
}

fn string_parses(
    name: &'static str,
    message: &'static str,
    parses: impl Fn(&str) -> bool + Send + Sync + 'static,
) -> ArcValidator {
    new(name, move |value| {
        let ok = match value {
            Value::String(s) => parses(s),
            Value::Null => false,
            Value::Custom(c) => match c.as_text() {
                Some(s) => parses(&s),
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
            Err(ValidateError::new(message))
        }
    })
}
