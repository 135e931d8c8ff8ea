use std::sync::Arc;

use crate::context::Context;
use crate::types::BuildError;
use crate::validator::ArcValidator;

/// A parsed argument handed to a builder function.
///
/// Literals arrive as themselves; call arguments that are sub-expressions
/// (nested calls, boolean chains, parenthesized groups, zero-argument
/// function identifiers) arrive pre-built as validators.
#[derive(Debug, Clone)]
pub enum Arg {
    Int(i64),
    Float(f64),
    Str(String),
    Validator(ArcValidator),
}

impl Arg {
    /// A short type label used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Int(_) => "int",
            Arg::Float(_) => "float",
            Arg::Str(_) => "string",
            Arg::Validator(_) => "validator",
        }
    }
}

/// A named builder function: called by the compiler with the parsed
/// arguments, it validates them and appends one validator to the context.
pub trait Function: Send + Sync {
    /// The name the function registers under.
    fn name(&self) -> &str;

    /// Consume the arguments and append a validator to `ctx`.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] on arity or argument-type mismatch.
    fn call(&self, ctx: &mut Context, args: Vec<Arg>) -> Result<(), BuildError>;
}

/// The shared-ownership form the registry stores.
pub type ArcFunction = Arc<dyn Function>;

struct FnFunction<F> {
    name: String,
    call: F,
}

impl<F> Function for FnFunction<F>
where
    F: Fn(&mut Context, Vec<Arg>) -> Result<(), BuildError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, ctx: &mut Context, args: Vec<Arg>) -> Result<(), BuildError> {
        (self.call)(ctx, args)
    }
}

/// Build a [`Function`] from a name and a closure.
pub fn new(
    name: impl Into<String>,
    call: impl Fn(&mut Context, Vec<Arg>) -> Result<(), BuildError> + Send + Sync + 'static,
) -> ArcFunction {
    Arc::new(FnFunction {
        name: name.into(),
        call,
    })
}

/// A zero-argument function that always appends the given validator.
pub fn validator_function(name: &str, validator: ArcValidator) -> ArcFunction {
    with_no_args(name, move || validator.clone())
}

// ---------------------------------------------------------------------------
// Typed adapters: each checks arity and argument types, then hands the
// normalized arguments to the constructor.
// ---------------------------------------------------------------------------

/// A builder function taking no arguments.
pub fn with_no_args(
    name: &str,
    newf: impl Fn() -> ArcValidator + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        if !args.is_empty() {
            return Err(BuildError::NoArgsExpected { name: name.clone() });
        }
        ctx.append(newf());
        Ok(())
    })
}

fn get_float(name: &str, index: Option<usize>, arg: &Arg) -> Result<f64, BuildError> {
    match arg {
        Arg::Int(i) => {
            #[allow(clippy::cast_precision_loss)]
            Ok(*i as f64)
        }
        Arg::Float(f) => Ok(*f),
        other => match index {
            Some(index) => Err(BuildError::ArgTypeAt {
                name: name.to_owned(),
                index,
                want: "an int or float",
                got: other.kind(),
            }),
            None => Err(BuildError::UnsupportedArg {
                name: name.to_owned(),
                got: other.kind(),
            }),
        },
    }
}

fn get_int(name: &str, index: usize, arg: &Arg) -> Result<i64, BuildError> {
    match arg {
        Arg::Int(i) => Ok(*i),
        other => Err(BuildError::ArgTypeAt {
            name: name.to_owned(),
            index,
            want: "an int",
            got: other.kind(),
        }),
    }
}

/// A builder function taking exactly one real number (integers coerce).
pub fn with_one_float(
    name: &str,
    newf: impl Fn(f64) -> ArcValidator + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        if args.len() != 1 {
            return Err(BuildError::ArgCount {
                name: name.clone(),
                want: "one argument",
            });
        }
        let v = get_float(&name, None, &args[0])?;
        ctx.append(newf(v));
        Ok(())
    })
}

/// A builder function taking exactly two real numbers.
pub fn with_two_floats(
    name: &str,
    newf: impl Fn(f64, f64) -> ArcValidator + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        if args.len() != 2 {
            return Err(BuildError::ArgCount {
                name: name.clone(),
                want: "two arguments",
            });
        }
        let first = get_float(&name, Some(0), &args[0])?;
        let second = get_float(&name, Some(1), &args[1])?;
        ctx.append(newf(first, second));
        Ok(())
    })
}

/// A builder function taking any number of real numbers.
pub fn with_floats(
    name: &str,
    newf: impl Fn(Vec<f64>) -> ArcValidator + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        let mut values = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            values.push(get_float(&name, Some(i), arg)?);
        }
        ctx.append(newf(values));
        Ok(())
    })
}

/// A builder function taking exactly three integers.
pub fn with_three_ints(
    name: &str,
    newf: impl Fn(i64, i64, i64) -> ArcValidator + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        if args.len() != 3 {
            return Err(BuildError::ArgCount {
                name: name.clone(),
                want: "three arguments",
            });
        }
        let first = get_int(&name, 0, &args[0])?;
        let second = get_int(&name, 1, &args[1])?;
        let third = get_int(&name, 2, &args[2])?;
        ctx.append(newf(first, second, third));
        Ok(())
    })
}

/// A builder function taking exactly one string literal.
///
/// The constructor is fallible so pattern-style validators can reject their
/// argument at compile time.
pub fn with_one_string(
    name: &str,
    newf: impl Fn(&str) -> Result<ArcValidator, BuildError> + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        if args.len() != 1 {
            return Err(BuildError::ArgCount {
                name: name.clone(),
                want: "one argument",
            });
        }
        match &args[0] {
            Arg::Str(s) => {
                ctx.append(newf(s)?);
                Ok(())
            }
            other => Err(BuildError::ArgType {
                name: name.clone(),
                want: "a string",
                got: other.kind(),
            }),
        }
    })
}

/// A builder function taking any number of string literals.
pub fn with_strings(
    name: &str,
    newf: impl Fn(Vec<String>) -> Result<ArcValidator, BuildError> + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        let mut values = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            match arg {
                Arg::Str(s) => values.push(s.clone()),
                other => {
                    return Err(BuildError::ArgTypeAt {
                        name: name.clone(),
                        index: i,
                        want: "a string",
                        got: other.kind(),
                    });
                }
            }
        }
        ctx.append(newf(values)?);
        Ok(())
    })
}

/// A builder function taking one or more sub-validators.
pub fn with_validators(
    name: &str,
    newf: impl Fn(Vec<ArcValidator>) -> Result<ArcValidator, BuildError> + Send + Sync + 'static,
) -> ArcFunction {
    let name = name.to_owned();
    new(name.clone(), move |ctx, args| {
        if args.is_empty() {
            return Err(BuildError::NoValidatorArgs { name: name.clone() });
        }
        let mut validators = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            match arg {
                Arg::Validator(v) => validators.push(v.clone()),
                other => {
                    return Err(BuildError::ArgTypeAt {
                        name: name.clone(),
                        index: i,
                        want: "a validator",
                        got: other.kind(),
                    });
                }
            }
        }
        ctx.append(newf(validators)?);
        Ok(())
    })
}
