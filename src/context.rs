use crate::types::BuildError;
use crate::validator::{self, ArcValidator};

/// The transient accumulator populated during one compile.
///
/// Builder functions append validators here; sibling validators fold with
/// AND when the context finalizes. Parenthesized sub-expressions and
/// validator-valued call arguments build in a [`child`](Context::child)
/// context of their own.
#[derive(Debug, Default)]
pub struct Context {
    validators: Vec<ArcValidator>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one built validator.
    pub fn append(&mut self, validator: ArcValidator) {
        self.validators.push(validator);
    }

    /// A fresh nested context for a sub-expression.
    #[must_use]
    pub fn child(&self) -> Context {
        Context::new()
    }

    /// How many validators have accumulated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// AND-fold the accumulated validators into the root validator.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoValidators`] if nothing was appended.
    pub fn finalize(self) -> Result<ArcValidator, BuildError> {
        validator::and(self.validators)
    }
}
