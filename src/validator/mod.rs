mod array;
mod map;
mod net;
mod range;
mod regexp;
mod strings;
mod time;
mod zero;

pub use array::array;
pub use map::{mapk, mapkv, mapv};
pub use net::{addr, cidr, ip, mac, url};
pub use range::{exp, max, min, ranger};
pub use regexp::{posix_regexp, regexp};
pub use strings::{is_integer, is_number, one_of, one_of_with_name};
pub use time::{duration, time};
pub use zero::{empty, not_empty, not_zero, required, zero};

use std::fmt;
use std::sync::Arc;

use crate::types::{BuildError, ValidateError, Value};

/// A compiled validator.
///
/// Validators are immutable once built and safe to share across threads;
/// `check` never mutates the value.
pub trait Validator: Send + Sync {
    /// The canonical textual rendering of this validator. It parses back to
    /// an equivalent validator.
    fn describe(&self) -> &str;

    /// Check the value, returning a [`ValidateError`] describing the first
    /// failure.
    fn check(&self, value: &Value) -> Result<(), ValidateError>;

    /// Sub-validators when this node is an AND composer; lets [`and`] flatten
    /// nested chains.
    fn and_children(&self) -> Option<&[ArcValidator]> {
        None
    }

    /// Sub-validators when this node is an OR composer; lets [`or`] flatten
    /// nested chains.
    fn or_children(&self) -> Option<&[ArcValidator]> {
        None
    }
}

/// The shared-ownership form every composer works with.
pub type ArcValidator = Arc<dyn Validator>;

impl fmt::Debug for dyn Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

struct FnValidator<F> {
    desc: String,
    run: F,
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value) -> Result<(), ValidateError> + Send + Sync,
{
    fn describe(&self) -> &str {
        &self.desc
    }

    fn check(&self, value: &Value) -> Result<(), ValidateError> {
        (self.run)(value)
    }
}

/// Build a leaf validator from a description and a check function.
pub fn new(
    desc: impl Into<String>,
    check: impl Fn(&Value) -> Result<(), ValidateError> + Send + Sync + 'static,
) -> ArcValidator {
    Arc::new(FnValidator {
        desc: desc.into(),
        run: check,
    })
}

/// Build a string-oriented boolean leaf validator.
///
/// The value adapter runs first: strings check directly, null behaves like a
/// null string pointer (the predicate fails with its own message), custom
/// values go through their textual form, and everything else reports an
/// unsupported type.
pub fn new_text_bool(
    desc: impl Into<String>,
    message: impl Into<String>,
    check: impl Fn(&str) -> bool + Send + Sync + 'static,
) -> ArcValidator {
    let message = message.into();
    new(desc, move |value| {
        let ok = match value {
            Value::String(s) => check(s),
            Value::Null => false,
            Value::Custom(c) => match c.as_text() {
                Some(s) => check(&s),
                None => {
                    return Err(ValidateError::new(format!(
                        "unsupported type '{}'",
                        value.kind()
                    )));
                }
            },
            other => {
                return Err(ValidateError::new(format!(
                    "unsupported type '{}'",
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

fn format_validators(sep: &str, validators: &[ArcValidator]) -> String {
    match validators {
        [] => String::new(),
        [v] => v.describe().to_owned(),
        _ => {
            let mut s = String::with_capacity(32);
            s.push('(');
            for (i, v) in validators.iter().enumerate() {
                if i > 0 {
                    s.push_str(sep);
                }
                s.push_str(v.describe());
            }
            s.push(')');
            s
        }
    }
}

// ---------------------------------------------------------------------------

struct And {
    children: Vec<ArcValidator>,
    desc: String,
}

impl Validator for And {
    fn describe(&self) -> &str {
        &self.desc
    }

    fn check(&self, value: &Value) -> Result<(), ValidateError> {
        for child in &self.children {
            child.check(value)?;
        }
        Ok(())
    }

    fn and_children(&self) -> Option<&[ArcValidator]> {
        Some(&self.children)
    }
}

/// Compose validators so that every one of them must pass.
///
/// Short-circuits at the first failing child and returns that child's error
/// unchanged. A single validator is returned as-is; nested AND composers are
/// flattened into one N-ary node.
///
/// # Errors
///
/// Returns [`BuildError::NoValidators`] for an empty list.
pub fn and(validators: Vec<ArcValidator>) -> Result<ArcValidator, BuildError> {
    let mut validators = validators;
    if validators.is_empty() {
        return Err(BuildError::NoValidators);
    }
    if validators.len() == 1 {
        return Ok(validators.remove(0));
    }

    let mut children = Vec::with_capacity(validators.len());
    for v in validators {
        match v.and_children().map(<[ArcValidator]>::to_vec) {
            Some(inner) => children.extend(inner),
            None => children.push(v),
        }
    }

    let desc = format_validators(" && ", &children);
    Ok(Arc::new(And { children, desc }))
}

// ---------------------------------------------------------------------------

struct Or {
    children: Vec<ArcValidator>,
    desc: String,
}

impl Validator for Or {
    fn describe(&self) -> &str {
        &self.desc
    }

    fn check(&self, value: &Value) -> Result<(), ValidateError> {
        let mut result = Ok(());
        for child in &self.children {
            result = child.check(value);
            if result.is_ok() {
                return Ok(());
            }
        }
        // All children failed: the last child's error, unchanged.
        result
    }

    fn or_children(&self) -> Option<&[ArcValidator]> {
        Some(&self.children)
    }
}

/// Compose validators so that at least one of them must pass.
///
/// Short-circuits at the first succeeding child. If every child fails, the
/// last child's error is returned. A single validator is returned as-is;
/// nested OR composers are flattened into one N-ary node.
///
/// # Errors
///
/// Returns [`BuildError::NoValidators`] for an empty list.
pub fn or(validators: Vec<ArcValidator>) -> Result<ArcValidator, BuildError> {
    let mut validators = validators;
    if validators.is_empty() {
        return Err(BuildError::NoValidators);
    }
    if validators.len() == 1 {
        return Ok(validators.remove(0));
    }

    let mut children = Vec::with_capacity(validators.len());
    for v in validators {
        match v.or_children().map(<[ArcValidator]>::to_vec) {
            Some(inner) => children.extend(inner),
            None => children.push(v),
        }
    }

    let desc = format_validators(" || ", &children);
    Ok(Arc::new(Or { children, desc }))
}
