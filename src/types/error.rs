use thiserror::Error;

use crate::parse::ParseError;

/// Errors produced while compiling a rule into a validator.
#[derive(Debug, Error)]
pub enum BuildError {
    /// `build` was called with an empty rule.
    #[error("the validation rule must not be empty")]
    EmptyRule,

    /// The rule text is not valid rule syntax.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An identifier resolved to neither a function nor a symbol.
    #[error("{name} is not defined")]
    Undefined {
        /// The unresolved identifier.
        name: String,
    },

    /// A bare literal or symbol was used where a validator is required.
    #[error("{token} is not a validator")]
    NotAValidator {
        /// The offending literal or symbol spelling.
        token: String,
    },

    /// Neither (or both) operands of `==` resolved to a builder function.
    #[error("left or right is not a builder function: {left}, {right}")]
    EqOperands {
        /// What the left operand resolved to.
        left: &'static str,
        /// What the right operand resolved to.
        right: &'static str,
    },

    /// A zero-argument function was called with arguments.
    #[error("{name} must not have any arguments")]
    NoArgsExpected {
        /// The function name.
        name: String,
    },

    /// A function was called with the wrong number of arguments.
    #[error("{name} must have and only have {want}")]
    ArgCount {
        /// The function name.
        name: String,
        /// The required count, spelled out ("one argument", "two arguments").
        want: &'static str,
    },

    /// A container function was called with no sub-validators.
    #[error("{name} validator has no arguments")]
    NoValidatorArgs {
        /// The function name.
        name: String,
    },

    /// A single-argument function received an argument of the wrong type.
    #[error("{name} does not support the argument type {got}")]
    UnsupportedArg {
        /// The function name.
        name: String,
        /// The actual argument type.
        got: &'static str,
    },

    /// An argument has the wrong type (no positional index).
    #[error("{name} expects {want}, but got {got}")]
    ArgType {
        /// The function name.
        name: String,
        /// The required type, with article ("a string").
        want: &'static str,
        /// The actual argument type.
        got: &'static str,
    },

    /// An argument at a known position has the wrong type.
    #[error("{name} expects {index}th argument is {want}, but got {got}")]
    ArgTypeAt {
        /// The function name.
        name: String,
        /// Zero-based argument position.
        index: usize,
        /// The required type, with article ("an int", "a validator").
        want: &'static str,
        /// The actual argument type.
        got: &'static str,
    },

    /// A leaf validator constructor rejected its arguments.
    #[error("{name}: {reason}")]
    Constructor {
        /// The validator name.
        name: String,
        /// What the constructor objected to.
        reason: String,
    },

    /// Composing an empty list of validators.
    #[error("the rule produced no validator")]
    NoValidators,
}

/// A validation failure: the compiled validator rejected a value.
///
/// Carries a stable, human-readable message; compares by message so tests
/// can assert exact phrasing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidateError {
    message: String,
}

impl ValidateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
