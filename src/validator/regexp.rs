use regex::Regex;

use super::{ArcValidator, new_text_bool};
use crate::types::BuildError;

/// Passes iff the string value matches the pattern.
///
/// A pattern anchored at neither end is anchored at both automatically; the
/// description shows the anchored form. The pattern compiles once, here.
///
/// The validator rule is `regexp("pattern")`.
///
/// # Errors
///
/// Returns a [`BuildError`] if the pattern does not compile.
pub fn regexp(pattern: &str) -> Result<ArcValidator, BuildError> {
    anchored("regexp", "the regexp", pattern)
}

/// Same contract as [`regexp`] under the `posixregexp` name.
///
/// POSIX leftmost-longest matching cannot differ from the default engine for
/// the anchored whole-string matches performed here, so the same engine
/// backs both rules.
///
/// # Errors
///
/// Returns a [`BuildError`] if the pattern does not compile.
pub fn posix_regexp(pattern: &str) -> Result<ArcValidator, BuildError> {
    anchored("posixregexp", "the posix regexp", pattern)
}

fn anchored(name: &str, label: &str, pattern: &str) -> Result<ArcValidator, BuildError> {
    let pattern = if !pattern.starts_with('^') && !pattern.ends_with('$') {
        format!("^{pattern}$")
    } else {
        pattern.to_owned()
    };

    let re = Regex::new(&pattern).map_err(|err| BuildError::Constructor {
        name: name.to_owned(),
        reason: err.to_string(),
    })?;

    let message = format!("invalid string for {label}: {pattern}");
    Ok(new_text_bool(
        format!("{name}(\"{pattern}\")"),
        message,
        move |s| re.is_match(s),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn matches_whole_string() {
        let v = regexp("[a-z]+").unwrap();
        assert!(v.check(&Value::from("abc")).is_ok());
        assert!(v.check(&Value::from("abc1")).is_err());
        assert!(v.check(&Value::from("")).is_err());
    }

    #[test]
    fn auto_anchors_unanchored_patterns() {
        assert_eq!(regexp("[a-z]+").unwrap().describe(), "regexp(\"^[a-z]+$\")");
        // Anchored at either end: left alone.
        assert_eq!(regexp("^[a-z]+").unwrap().describe(), "regexp(\"^[a-z]+\")");
        assert_eq!(regexp("[a-z]+$").unwrap().describe(), "regexp(\"[a-z]+$\")");
    }

    #[test]
    fn failure_message_names_pattern() {
        let v = regexp("[0-9]+").unwrap();
        assert_eq!(
            v.check(&Value::from("abc")).unwrap_err().message(),
            "invalid string for the regexp: ^[0-9]+$"
        );
    }

    #[test]
    fn posix_variant_describe() {
        let v = posix_regexp("[a-z]+").unwrap();
        assert_eq!(v.describe(), "posixregexp(\"^[a-z]+$\")");
        assert_eq!(
            v.check(&Value::from("123")).unwrap_err().message(),
            "invalid string for the posix regexp: ^[a-z]+$"
        );
    }

    #[test]
    fn bad_pattern_is_build_error() {
        assert!(regexp("[unclosed").is_err());
    }
}
