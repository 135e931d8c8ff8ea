mod builder;
mod compile;
mod context;
mod default;
pub mod function;
mod parse;
mod types;
pub mod validator;

#[cfg(feature = "json")]
mod json;

pub use builder::{
    Builder, default_builder, register_symbol, register_validator, register_validator_func,
    register_validator_oneof, validate,
};
pub use context::Context;
pub use default::{register_defaults, register_string_predicates};
pub use function::{ArcFunction, Arg, Function};
pub use parse::{ParseError, parse};
pub use types::{BuildError, CustomValue, Expr, Literal, MapEntry, ValidateError, Value};
pub use validator::{ArcValidator, Validator};
