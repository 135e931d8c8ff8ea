use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};

use crate::compile;
use crate::context::Context;
use crate::function::{self, ArcFunction};
use crate::parse;
use crate::types::{BuildError, Literal, ValidateError, Value};
use crate::validator::{self, ArcValidator};

/// Compiles rule text into validators, with a per-rule compilation cache.
///
/// Functions and symbols share one namespace: an identifier resolves to a
/// function first, then to a symbol. Registration is last-write-wins and is
/// expected to happen during setup, before concurrent validation begins.
///
/// # Example
///
/// ```
/// use ruleval::Builder;
///
/// let builder = Builder::with_defaults();
/// let validator = builder.build("zero || (min(3) && max(10))").unwrap();
/// assert!(validator.check(&"".into()).is_ok());
/// assert!(validator.check(&"abc".into()).is_ok());
/// assert!(validator.check(&"ab".into()).is_err());
/// ```
pub struct Builder {
    functions: RwLock<HashMap<String, ArcFunction>>,
    symbols: RwLock<HashMap<String, Literal>>,
    /// Master cache, guarded by the single-writer compile lock.
    cache: Mutex<HashMap<String, ArcValidator>>,
    /// Lock-free snapshot of `cache` for readers.
    snapshot: ArcSwap<HashMap<String, ArcValidator>>,
}

impl Builder {
    /// An empty builder with no registered functions or symbols.
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: RwLock::new(HashMap::new()),
            symbols: RwLock::new(HashMap::new()),
            cache: Mutex::new(HashMap::new()),
            snapshot: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// A builder pre-populated with the standard catalog; see
    /// [`register_defaults`](crate::register_defaults).
    #[must_use]
    pub fn with_defaults() -> Self {
        let builder = Self::new();
        crate::default::register_defaults(&builder);
        builder
    }

    pub(crate) fn function(&self, name: &str) -> Option<ArcFunction> {
        self.functions.read().get(name).cloned()
    }

    pub(crate) fn symbol(&self, name: &str) -> Option<Literal> {
        self.symbols.read().get(name).cloned()
    }

    /// Register a symbol; identifiers in rules substitute its value.
    ///
    /// Replaces any prior binding of the name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn register_symbol(&self, name: &str, value: impl Into<Literal>) {
        assert!(!name.is_empty(), "the symbol name must not be empty");
        self.symbols.write().insert(name.to_owned(), value.into());
    }

    /// Register symbols whose values equal their names, so an identifier
    /// literally stands for its spelling.
    pub fn register_symbol_names<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.register_symbol(name.as_ref(), name.as_ref());
        }
    }

    /// Register a builder function under its own name.
    ///
    /// Replaces any prior binding of the name.
    pub fn register_function(&self, function: ArcFunction) {
        self.functions
            .write()
            .insert(function.name().to_owned(), function);
    }

    /// Register a validator as a zero-argument builder function.
    pub fn register_validator(&self, name: &str, validator: ArcValidator) {
        self.register_function(function::validator_function(name, validator));
    }

    /// Register a check function as a validator named and described `name`.
    pub fn register_validator_func(
        &self,
        name: &str,
        check: impl Fn(&Value) -> Result<(), ValidateError> + Send + Sync + 'static,
    ) {
        self.register_validator(name, validator::new(name, check));
    }

    /// Register a validator that passes iff the value equals one of `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn register_validator_oneof(&self, name: &str, values: &[&str]) {
        let values = values.iter().map(|s| (*s).to_owned()).collect();
        match validator::one_of_with_name(name, values) {
            Ok(v) => self.register_validator(name, v),
            Err(err) => panic!("{err}"),
        }
    }

    /// The names of all registered builder functions, sorted.
    #[must_use]
    pub fn validator_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Compile the rule into a validator, reusing the cache.
    ///
    /// Every call with the same rule text returns the same validator; under
    /// concurrent callers a novel rule compiles exactly once.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] for an empty rule, a syntax error, an
    /// unresolved identifier, or an argument mismatch.
    pub fn build(&self, rule: &str) -> Result<ArcValidator, BuildError> {
        if rule.is_empty() {
            return Err(BuildError::EmptyRule);
        }

        if let Some(validator) = self.snapshot.load().get(rule) {
            return Ok(validator.clone());
        }

        let mut cache = self.cache.lock();
        if let Some(validator) = cache.get(rule) {
            return Ok(validator.clone());
        }

        let expr = parse::parse(rule)?;
        let mut ctx = Context::new();
        compile::build_into(self, &expr, &mut ctx)?;
        let validator = ctx.finalize()?;

        cache.insert(rule.to_owned(), validator.clone());
        self.snapshot.store(Arc::new(cache.clone()));
        Ok(validator)
    }

    /// Validate the value against the rule; an empty rule always passes.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidateError`] produced by the compiled validator.
    ///
    /// # Panics
    ///
    /// Panics if the rule fails to compile: rule texts are typically
    /// constants, so a compile failure is a programming error. Use
    /// [`build`](Builder::build) to handle it as a value instead.
    pub fn validate(&self, value: impl Into<Value>, rule: &str) -> Result<(), ValidateError> {
        if rule.is_empty() {
            return Ok(());
        }
        match self.build(rule) {
            Ok(validator) => validator.check(&value.into()),
            Err(err) => panic!("{err}"),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT: Lazy<Builder> = Lazy::new(Builder::with_defaults);

/// The process-global default builder, pre-populated with the standard
/// catalog and the three time-format symbols.
pub fn default_builder() -> &'static Builder {
    &DEFAULT
}

/// Validate with the default builder; see [`Builder::validate`].
///
/// # Errors
///
/// Returns the [`ValidateError`] produced by the compiled validator.
///
/// # Panics
///
/// Panics if the rule fails to compile.
pub fn validate(value: impl Into<Value>, rule: &str) -> Result<(), ValidateError> {
    DEFAULT.validate(value, rule)
}

/// Register a symbol with the default builder; see
/// [`Builder::register_symbol`].
pub fn register_symbol(name: &str, value: impl Into<Literal>) {
    DEFAULT.register_symbol(name, value);
}

/// Register a validator with the default builder; see
/// [`Builder::register_validator`].
pub fn register_validator(name: &str, validator: ArcValidator) {
    DEFAULT.register_validator(name, validator);
}

/// Register a check function with the default builder; see
/// [`Builder::register_validator_func`].
pub fn register_validator_func(
    name: &str,
    check: impl Fn(&Value) -> Result<(), ValidateError> + Send + Sync + 'static,
) {
    DEFAULT.register_validator_func(name, check);
}

/// Register a one-of validator with the default builder; see
/// [`Builder::register_validator_oneof`].
pub fn register_validator_oneof(name: &str, values: &[&str]) {
    DEFAULT.register_validator_oneof(name, values);
}
