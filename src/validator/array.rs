use super::map::compose_validators;
use super::{ArcValidator, new};
use crate::types::{BuildError, ValidateError, Value};

/// Apply the AND of `validators` to every element of a sequence, in index
/// order.
///
/// The validator rule is `array(validators...)`.
///
/// # Errors
///
/// Returns a [`BuildError`] if `validators` is empty.
pub fn array(validators: Vec<ArcValidator>) -> Result<ArcValidator, BuildError> {
    let (inner, desc) = compose_validators("array", validators)?;
    Ok(new(desc, move |value| match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if let Err(err) = inner.check(item) {
                    return Err(ValidateError::new(format!(
                        "{i}th element is invalid: {err}"
                    )));
                }
            }
            Ok(())
        }
        other => Err(ValidateError::new(format!(
            "expect the value is a slice or array, but got {}",
            other.kind()
        ))),
    }))
}
