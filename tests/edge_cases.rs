use ruleval::{BuildError, Builder};

fn build_err(rule: &str) -> String {
    Builder::with_defaults().build(rule).unwrap_err().to_string()
}

#[test]
fn unknown_identifier() {
    assert_eq!(build_err("noexist"), "noexist is not defined");
    assert_eq!(build_err("noexist(1)"), "noexist is not defined");
    assert_eq!(build_err("zero && noexist"), "noexist is not defined");
}

#[test]
fn empty_rule() {
    let err = Builder::with_defaults().build("").unwrap_err();
    assert!(matches!(err, BuildError::EmptyRule));
}

#[test]
fn syntax_errors_are_fatal() {
    let b = Builder::with_defaults();
    for rule in ["min(", "min(1))", "&& zero", "zero ||", "min == ", "((zero)"] {
        let err = b.build(rule).unwrap_err();
        assert!(
            matches!(err, BuildError::Parse(_)),
            "expected parse error for {rule:?}, got {err}"
        );
    }
}

#[test]
fn arity_mismatches() {
    assert_eq!(build_err("zero(1)"), "zero must not have any arguments");
    assert_eq!(build_err("min()"), "min must have and only have one argument");
    assert_eq!(
        build_err("min(1, 2)"),
        "min must have and only have one argument"
    );
    assert_eq!(
        build_err("ranger(1)"),
        "ranger must have and only have two arguments"
    );
    assert_eq!(
        build_err("exp(2, 1)"),
        "exp must have and only have three arguments"
    );
}

#[test]
fn argument_type_mismatches() {
    assert_eq!(
        build_err(r#"min("x")"#),
        "min does not support the argument type string"
    );
    assert_eq!(
        build_err(r#"ranger(1, "x")"#),
        "ranger expects 1th argument is an int or float, but got string"
    );
    assert_eq!(
        build_err("exp(2, 1.5, 4)"),
        "exp expects 1th argument is an int, but got float"
    );
    assert_eq!(build_err("regexp(1)"), "regexp expects a string, but got int");
    assert_eq!(
        build_err(r#"oneof("a", 2)"#),
        "oneof expects 1th argument is a string, but got int"
    );
    assert_eq!(
        build_err("array(1)"),
        "array expects 0th argument is a validator, but got int"
    );
}

#[test]
fn container_requires_sub_validators() {
    assert_eq!(build_err("array()"), "array validator has no arguments");
    assert_eq!(build_err("mapk()"), "mapk validator has no arguments");
}

#[test]
fn oneof_requires_values() {
    assert_eq!(build_err("oneof()"), "oneof: the values must not be empty");
}

#[test]
fn eq_requires_one_function_and_one_literal() {
    assert_eq!(
        build_err("3 == 3"),
        "left or right is not a builder function: int, int"
    );
    assert_eq!(
        build_err("min == max"),
        "left or right is not a builder function: function, function"
    );
    assert_eq!(
        build_err("min(1) == 3"),
        "left or right is not a builder function: call, int"
    );
}

#[test]
fn bare_literals_and_symbols_are_not_validators() {
    assert_eq!(build_err("3"), "3 is not a validator");
    assert_eq!(build_err("timelayout"), "timelayout is not a validator");
}

#[test]
fn bad_regexp_pattern_is_a_compile_error() {
    let err = build_err(r#"regexp("[unclosed")"#);
    assert!(err.starts_with("regexp: "), "unexpected error: {err}");
}

#[test]
fn function_identifier_as_container_arg() {
    // A zero-argument function identifier in argument position becomes a
    // sub-validator.
    let b = Builder::with_defaults();
    let v = b.build("array(url)").unwrap();
    assert_eq!(v.describe(), "array(url)");

    // One that requires arguments fails with its own arity error.
    assert_eq!(
        b.build("array(min)").unwrap_err().to_string(),
        "min must have and only have one argument"
    );
}

#[test]
fn symbol_as_string_argument() {
    let b = Builder::with_defaults();
    let v = b.build("time(timelayout)").unwrap();
    assert_eq!(v.describe(), "time(\"15:04:05\")");
}

#[test]
fn registered_symbol_names_stand_for_themselves() {
    let b = Builder::with_defaults();
    b.register_symbol_names(["red", "green", "blue"]);
    assert!(b.validate("green", "oneof(red, green, blue)").is_ok());
    assert_eq!(
        b.validate("pink", "oneof(red, green, blue)")
            .unwrap_err()
            .message(),
        "the string 'pink' is not one of [red green blue]"
    );
}

#[test]
fn deeply_nested_rule() {
    let b = Builder::with_defaults();
    let v = b
        .build("zero || (notzero && (min(1) || (max(10) && required)))")
        .unwrap();
    assert!(v.check(&0_i64.into()).is_ok());
    assert!(v.check(&5_i64.into()).is_ok());
}

#[test]
fn unsupported_value_types_are_validation_errors() {
    let b = Builder::with_defaults();
    assert_eq!(
        b.validate(true, "min(1)").unwrap_err().message(),
        "unsupported type bool"
    );
    assert_eq!(
        b.validate(1_i64, "array(min(1))").unwrap_err().message(),
        "expect the value is a slice or array, but got int"
    );
    assert_eq!(
        b.validate(1_i64, "mapk(min(1))").unwrap_err().message(),
        "expect the value is a map, but got int"
    );
}
