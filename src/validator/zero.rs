use super::{ArcValidator, new};
use crate::types::ValidateError;

const SHOULD_BE_EMPTY: &str = "the value should be empty";
const CANNOT_BE_EMPTY: &str = "the value cannot be empty";

fn zero_with_name(name: &'static str) -> ArcValidator {
    new(name, |value| {
        if value.is_zero() {
            Ok(())
        } else {
            Err(ValidateError::new(SHOULD_BE_EMPTY))
        }
    })
}

fn not_zero_with_name(name: &'static str) -> ArcValidator {
    new(name, |value| {
        if value.is_zero() {
            Err(ValidateError::new(CANNOT_BE_EMPTY))
        } else {
            Ok(())
        }
    })
}

/// Passes iff the value is the zero value of its type.
///
/// The validator rule is `zero`.
pub fn zero() -> ArcValidator {
    zero_with_name("zero")
}

/// Same check as [`zero`]; the validator rule is `empty`.
pub fn empty() -> ArcValidator {
    zero_with_name("empty")
}

/// Passes iff the value is not the zero value of its type.
///
/// The validator rule is `notzero`.
pub fn not_zero() -> ArcValidator {
    not_zero_with_name("notzero")
}

/// Same check as [`not_zero`]; the validator rule is `notempty`.
pub fn not_empty() -> ArcValidator {
    not_zero_with_name("notempty")
}

/// Same check as [`not_zero`]; the validator rule is `required`.
pub fn required() -> ArcValidator {
    not_zero_with_name("required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn zero_accepts_zero_values() {
        let v = zero();
        assert!(v.check(&Value::from("")).is_ok());
        assert!(v.check(&Value::Int(0)).is_ok());
        assert!(v.check(&Value::Null).is_ok());
        assert!(v.check(&Value::from(Vec::<i64>::new())).is_ok());
    }

    #[test]
    fn zero_rejects_nonzero() {
        let v = zero();
        assert_eq!(
            v.check(&Value::from("a")).unwrap_err().message(),
            "the value should be empty"
        );
        assert!(v.check(&Value::Int(1)).is_err());
    }

    #[test]
    fn required_rejects_zero() {
        let v = required();
        assert_eq!(
            v.check(&Value::from("")).unwrap_err().message(),
            "the value cannot be empty"
        );
        assert!(v.check(&Value::from("x")).is_ok());
    }

    #[test]
    fn describes() {
        assert_eq!(zero().describe(), "zero");
        assert_eq!(empty().describe(), "empty");
        assert_eq!(not_zero().describe(), "notzero");
        assert_eq!(not_empty().describe(), "notempty");
        assert_eq!(required().describe(), "required");
    }
}
