//! Extend a builder with custom symbols, validators, and functions.

use ruleval::{Builder, ValidateError, Value, function, validator};

fn main() {
    let builder = Builder::with_defaults();

    // Symbols substitute their value when used as arguments.
    builder.register_symbol("v1", "a");
    builder.register_symbol("v2", "b");
    println!("{:?}", builder.validate("a", r#"oneof(v1, v2, "c")"#));
    println!("{:?}", builder.validate("x", r#"oneof(v1, v2, "c")"#));

    // A custom leaf validator from a plain check function.
    builder.register_validator_func("even", |value| match value {
        Value::Int(i) if i % 2 == 0 => Ok(()),
        Value::Int(_) => Err(ValidateError::new("the integer is not even")),
        other => Err(ValidateError::new(format!(
            "unsupported type {}",
            other.kind()
        ))),
    });
    println!("{:?}", builder.validate(4_i64, "even && min(2)"));
    println!("{:?}", builder.validate(3_i64, "even && min(2)"));

    // A custom builder function with one numeric argument.
    builder.register_function(function::with_one_float("step", |n| {
        validator::new(format!("step({n})"), move |value| match value {
            Value::Int(i) if (*i as f64) % n == 0.0 => Ok(()),
            Value::Int(_) => Err(ValidateError::new(format!(
                "the integer is not a multiple of {n}"
            ))),
            other => Err(ValidateError::new(format!(
                "unsupported type {}",
                other.kind()
            ))),
        })
    }));
    println!("{:?}", builder.validate(15_i64, "step(5)"));
    println!("{:?}", builder.validate(16_i64, "step == 5"));
}
