//! Compile a few rules with the default builder and check values against
//! them.

use ruleval::{Builder, validate};

fn main() {
    // Package-level validation with the default catalog.
    println!("{:?}", validate(5_i64, "ranger(1,10)"));
    println!("{:?}", validate(0_i64, "ranger(1,10)"));

    // The identifier-and-operator short form.
    const RULE: &str = "zero || (min==3 && max==10)";
    for input in ["", "a", "abc", "abcdefghijklmn"] {
        match validate(input, RULE) {
            Ok(()) => println!("{input:?}: ok"),
            Err(err) => println!("{input:?}: {err}"),
        }
    }

    // Compiled validators are cached and shareable; describe() prints the
    // canonical rendering.
    let builder = Builder::with_defaults();
    let validator = builder.build("array(min(1), max(10))").unwrap();
    println!("rule: {}", validator.describe());
    println!("{:?}", validator.check(&vec![1_i64, 2, 3].into()));
    println!("{:?}", validator.check(&vec![0_i64].into()));
}
