mod error;
mod expr;
mod value;

pub use error::{BuildError, ValidateError};
pub use expr::{Expr, Literal};
pub use value::{CustomValue, MapEntry, Value};
