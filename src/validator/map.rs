use super::{ArcValidator, and, new};
use crate::types::{BuildError, MapEntry, ValidateError, Value};

// AND-fold the sub-validators and derive the container description:
// `name(inner)` for a single child, `name(a && b)` when the inner
// description is already parenthesized.
pub(super) fn compose_validators(
    name: &str,
    validators: Vec<ArcValidator>,
) -> Result<(ArcValidator, String), BuildError> {
    if validators.is_empty() {
        return Err(BuildError::Constructor {
            name: name.to_owned(),
            reason: "need at least one validator".to_owned(),
        });
    }

    let inner = and(validators)?;
    let d = inner.describe();
    let desc = if d.starts_with('(') {
        format!("{name}{d}")
    } else {
        format!("{name}({d})")
    };
    Ok((inner, desc))
}

fn expect_map(value: &Value) -> ValidateError {
    ValidateError::new(format!("expect the value is a map, but got {}", value.kind()))
}

/// Apply the AND of `validators` to every key of a mapping.
///
/// The validator rule is `mapk(validators...)`.
///
/// # Errors
///
/// Returns a [`BuildError`] if `validators` is empty.
pub fn mapk(validators: Vec<ArcValidator>) -> Result<ArcValidator, BuildError> {
    let (inner, desc) = compose_validators("mapk", validators)?;
    Ok(new(desc, move |value| match value {
        Value::Map(entries) => {
            for key in entries.keys() {
                if let Err(err) = inner.check(&Value::String(key.clone())) {
                    return Err(ValidateError::new(format!(
                        "map key '{key}' is invalid: {err}"
                    )));
                }
            }
            Ok(())
        }
        other => Err(expect_map(other)),
    }))
}

/// Apply the AND of `validators` to every value of a mapping.
///
/// The validator rule is `mapv(validators...)`.
///
/// # Errors
///
/// Returns a [`BuildError`] if `validators` is empty.
pub fn mapv(validators: Vec<ArcValidator>) -> Result<ArcValidator, BuildError> {
    let (inner, desc) = compose_validators("mapv", validators)?;
    Ok(new(desc, move |value| match value {
        Value::Map(entries) => {
            for entry in entries.values() {
                if let Err(err) = inner.check(entry) {
                    return Err(ValidateError::new(format!(
                        "map value '{entry}' is invalid: {err}"
                    )));
                }
            }
            Ok(())
        }
        other => Err(expect_map(other)),
    }))
}

/// Apply the AND of `validators` to every key/value pair of a mapping.
///
/// Sub-validators receive a [`Value::Entry`] exposing the key and the value.
/// The validator rule is `mapkv(validators...)`.
///
/// # Errors
///
/// Returns a [`BuildError`] if `validators` is empty.
pub fn mapkv(validators: Vec<ArcValidator>) -> Result<ArcValidator, BuildError> {
    let (inner, desc) = compose_validators("mapkv", validators)?;
    Ok(new(desc, move |value| match value {
        Value::Map(entries) => {
            for (key, val) in entries {
                let pair = Value::Entry(Box::new(MapEntry {
                    key: Value::String(key.clone()),
                    value: val.clone(),
                }));
                if let Err(err) = inner.check(&pair) {
                    return Err(ValidateError::new(format!(
                        "map from key '{key}' is invalid: {err}"
                    )));
                }
            }
            Ok(())
        }
        other => Err(expect_map(other)),
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::validator::{max, min};

    fn string_map(pairs: &[(&str, i64)]) -> Value {
        let mut m = BTreeMap::new();
        for (k, v) in pairs {
            m.insert((*k).to_owned(), *v);
        }
        Value::from(m)
    }

    #[test]
    fn mapk_checks_keys() {
        let v = mapk(vec![min(1.0), max(3.0)]).unwrap();
        assert!(v.check(&string_map(&[("a", 123)])).is_ok());
        assert_eq!(
            v.check(&string_map(&[("abcd", 123)]))
                .unwrap_err()
                .message(),
            "map key 'abcd' is invalid: the string length is greater than 3"
        );
    }

    #[test]
    fn mapv_checks_values() {
        let v = mapv(vec![min(10.0), max(100.0)]).unwrap();
        assert!(v.check(&string_map(&[("a", 10)])).is_ok());
        assert_eq!(
            v.check(&string_map(&[("abcd", 123)]))
                .unwrap_err()
                .message(),
            "map value '123' is invalid: the integer is greater than 100"
        );
    }

    #[test]
    fn mapkv_hands_out_entries() {
        let pair_ok = crate::validator::new("kv", |value| match value {
            Value::Entry(e) => {
                if e.value.is_zero() {
                    Err(ValidateError::new("the value is zero"))
                } else {
                    Ok(())
                }
            }
            other => Err(ValidateError::new(format!(
                "expect an entry, but got {}",
                other.kind()
            ))),
        });
        let v = mapkv(vec![pair_ok]).unwrap();
        assert!(v.check(&string_map(&[("a", 1)])).is_ok());
        assert_eq!(
            v.check(&string_map(&[("b", 0)])).unwrap_err().message(),
            "map from key 'b' is invalid: the value is zero"
        );
    }

    #[test]
    fn describe_composes() {
        assert_eq!(
            mapv(vec![min(10.0), max(100.0)]).unwrap().describe(),
            "mapv(min(10) && max(100))"
        );
        assert_eq!(mapk(vec![min(1.0)]).unwrap().describe(), "mapk(min(1))");
    }

    #[test]
    fn rejects_non_maps() {
        let v = mapk(vec![min(1.0)]).unwrap();
        assert_eq!(
            v.check(&Value::Int(3)).unwrap_err().message(),
            "expect the value is a map, but got int"
        );
    }

    #[test]
    fn empty_validators_is_error() {
        assert!(mapk(Vec::new()).is_err());
        assert!(mapv(Vec::new()).is_err());
        assert!(mapkv(Vec::new()).is_err());
    }
}
