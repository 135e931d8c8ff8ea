use std::net::{Ipv4Addr, Ipv6Addr};

use regex::Regex;

use crate::builder::Builder;
use crate::function;
use crate::types::{ValidateError, Value};
use crate::validator;

/// Register the standard catalog into the builder.
///
/// The registered symbols:
///
/// ```text
/// timelayout:     15:04:05
/// datelayout:     2006-01-02
/// datetimelayout: 2006-01-02 15:04:05
/// ```
///
/// The signatures of the registered validator functions:
///
/// ```text
/// ip() or ip                      mac() or mac
/// url() or url                    addr() or addr
/// cidr() or cidr                  zero() or zero
/// empty() or empty                notzero() or notzero
/// notempty() or notempty          required() or required
/// isinteger() or isinteger        isnumber() or isnumber
/// duration() or duration          self() or self
/// exp(base, startExp, endExp)     min(n)
/// max(n)                          ranger(lo, hi)
/// time(layout)                    oneof(...strings)
/// array(...validators)            mapk(...validators)
/// mapv(...validators)             mapkv(...validators)
/// regexp(pattern)                 posixregexp(pattern)
/// timeformat => time(timelayout)
/// dateformat => time(datelayout)
/// datetimeformat => time(datetimelayout)
/// ```
pub fn register_defaults(b: &Builder) {
    b.register_symbol("timelayout", "15:04:05");
    b.register_symbol("datelayout", "2006-01-02");
    b.register_symbol("datetimelayout", "2006-01-02 15:04:05");
    register_time_validator(b, "timeformat", "15:04:05");
    register_time_validator(b, "dateformat", "2006-01-02");
    register_time_validator(b, "datetimeformat", "2006-01-02 15:04:05");

    b.register_function(function::with_no_args("zero", validator::zero));
    b.register_function(function::with_no_args("empty", validator::empty));
    b.register_function(function::with_no_args("notzero", validator::not_zero));
    b.register_function(function::with_no_args("notempty", validator::not_empty));
    b.register_function(function::with_no_args("required", validator::required));
    b.register_function(function::with_no_args("isnumber", validator::is_number));
    b.register_function(function::with_no_args("isinteger", validator::is_integer));

    b.register_function(function::with_no_args("ip", validator::ip));
    b.register_function(function::with_no_args("mac", validator::mac));
    b.register_function(function::with_no_args("url", validator::url));
    b.register_function(function::with_no_args("cidr", validator::cidr));
    b.register_function(function::with_no_args("addr", validator::addr));

    b.register_function(function::with_one_float("min", validator::min));
    b.register_function(function::with_one_float("max", validator::max));
    b.register_function(function::with_two_floats("ranger", validator::ranger));
    b.register_function(function::with_three_ints("exp", validator::exp));

    b.register_function(function::with_one_string("time", |layout| {
        Ok(validator::time(layout))
    }));
    b.register_function(function::with_no_args("duration", validator::duration));

    b.register_function(function::with_one_string("regexp", validator::regexp));
    b.register_function(function::with_one_string(
        "posixregexp",
        validator::posix_regexp,
    ));

    b.register_function(function::with_strings("oneof", validator::one_of));
    b.register_function(function::with_validators("array", validator::array));
    b.register_function(function::with_validators("mapk", validator::mapk));
    b.register_function(function::with_validators("mapv", validator::mapv));
    b.register_function(function::with_validators("mapkv", validator::mapkv));

    b.register_validator_func("self", |value| match value {
        Value::Custom(c) => c.self_validate(),
        _ => Err(ValidateError::new(
            "the value does not support self-validation",
        )),
    });
}

fn register_time_validator(b: &Builder, name: &str, layout: &'static str) {
    b.register_function(function::with_no_args(name, move || {
        validator::time(layout)
    }));
}

/// Register the extra catalog of `is<name>` string predicates, each failing
/// with `"the string is not <name>"`.
///
/// The registered names: ascii, alpha, alphanumeric, base64, crc32, crc64,
/// dnsname, e164, email, float, hexadecimal, hexcolor, host, int, ipv4,
/// ipv6, latitude, longitude, lowercase, md5, port, printableascii,
/// rgbcolor, semver, sha1, sha256, sha512, ssn, ulid, uppercase, utfdigit,
/// utfletter, uuid, uuid3, uuid4, uuid5, and (with the `json` feature) json.
///
/// Note: `crc64` is bound to the same 8-hex-digit checker as `crc32`,
/// matching the upstream catalog this is modeled on.
pub fn register_string_predicates(b: &Builder) {
    register_pattern(b, "ascii", r"^[\x00-\x7F]+$");
    register_pattern(b, "alpha", "^[a-zA-Z]+$");
    register_pattern(b, "alphanumeric", "^[a-zA-Z0-9]+$");
    register_pattern(
        b,
        "base64",
        r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{4})$",
    );
    register_pattern(b, "crc32", "^[a-fA-F0-9]{8}$");
    register_pattern(b, "crc64", "^[a-fA-F0-9]{8}$");
    register_pattern(
        b,
        "dnsname",
        r"^([a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})(\.[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})*$",
    );
    register_pattern(b, "e164", r"^\+?[1-9]\d{1,14}$");
    register_pattern(
        b,
        "email",
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    );
    register_pattern(b, "hexadecimal", "^[0-9a-fA-F]+$");
    register_pattern(b, "hexcolor", "^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$");
    register_pattern(b, "int", "^[-+]?(?:0|[1-9][0-9]*)$");
    register_pattern(
        b,
        "latitude",
        r"^[-+]?([1-8]?\d(\.\d+)?|90(\.0+)?)$",
    );
    register_pattern(
        b,
        "longitude",
        r"^[-+]?(180(\.0+)?|(1[0-7]\d|[1-9]?\d)(\.\d+)?)$",
    );
    register_pattern(b, "md5", "^[a-fA-F0-9]{32}$");
    register_pattern(b, "printableascii", r"^[\x20-\x7E]+$");
    register_pattern(
        b,
        "rgbcolor",
        r"^rgb\(\s*(0|[1-9]\d?|1\d\d?|2[0-4]\d|25[0-5])\s*,\s*(0|[1-9]\d?|1\d\d?|2[0-4]\d|25[0-5])\s*,\s*(0|[1-9]\d?|1\d\d?|2[0-4]\d|25[0-5])\s*\)$",
    );
    register_pattern(
        b,
        "semver",
        r"^v?(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$",
    );
    register_pattern(b, "sha1", "^[a-fA-F0-9]{40}$");
    register_pattern(b, "sha256", "^[a-fA-F0-9]{64}$");
    register_pattern(b, "sha512", "^[a-fA-F0-9]{128}$");
    register_pattern(b, "ssn", r"^\d{3}[- ]?\d{2}[- ]?\d{4}$");
    register_pattern(b, "ulid", "^[0-7][0-9A-HJKMNP-TV-Z]{25}$");
    register_pattern(
        b,
        "uuid",
        "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    );
    register_pattern(
        b,
        "uuid3",
        "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-3[0-9a-fA-F]{3}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    );
    register_pattern(
        b,
        "uuid4",
        "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
    );
    register_pattern(
        b,
        "uuid5",
        "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-5[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
    );

    register_check(b, "float", |s| !s.is_empty() && s.parse::<f64>().is_ok());
    register_check(b, "ipv4", |s| s.parse::<Ipv4Addr>().is_ok());
    register_check(b, "ipv6", |s| s.parse::<Ipv6Addr>().is_ok());
    register_check(b, "port", |s| {
        s.parse::<u16>().is_ok_and(|p| p > 0) && !s.starts_with('+')
    });
    register_check(b, "lowercase", |s| s == s.to_lowercase());
    register_check(b, "uppercase", |s| s == s.to_uppercase());
    register_check(b, "utfdigit", |s| {
        !s.is_empty() && s.chars().all(char::is_numeric)
    });
    register_check(b, "utfletter", |s| {
        !s.is_empty() && s.chars().all(char::is_alphabetic)
    });
    register_check(b, "host", |s| {
        s.parse::<std::net::IpAddr>().is_ok() || is_dns_name(s)
    });

    #[cfg(feature = "json")]
    register_check(b, "json", |s| {
        serde_json::from_str::<serde_json::Value>(s).is_ok()
    });
}

fn is_dns_name(s: &str) -> bool {
    !s.is_empty()
        && s.len() < 254
        && s.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
                && !label.starts_with('-')
                && !label.ends_with('-')
        })
}

fn register_pattern(b: &Builder, name: &str, pattern: &str) {
    let full = format!("is{name}");
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("invalid built-in pattern for {full}: {err}"),
    };
    b.register_validator(
        &full,
        validator::new_text_bool(
            full.clone(),
            format!("the string is not {name}"),
            move |s| re.is_match(s),
        ),
    );
}

fn register_check(b: &Builder, name: &str, check: impl Fn(&str) -> bool + Send + Sync + 'static) {
    let full = format!("is{name}");
    b.register_validator(
        &full,
        validator::new_text_bool(full.clone(), format!("the string is not {name}"), check),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_catalog() {
        let b = Builder::with_defaults();
        let names = b.validator_names();
        for expected in [
            "addr", "array", "cidr", "dateformat", "datetimeformat", "duration", "empty", "exp",
            "ip", "isinteger", "isnumber", "mac", "mapk", "mapkv", "mapv", "max", "min",
            "notempty", "notzero", "oneof", "posixregexp", "ranger", "regexp", "required", "self",
            "time", "timeformat", "url", "zero",
        ] {
            assert!(
                names.iter().any(|n| n == expected),
                "missing default validator {expected}"
            );
        }
    }

    #[test]
    fn time_symbols_resolve() {
        let b = Builder::with_defaults();
        let v = b.build("time(datelayout)").unwrap();
        assert_eq!(v.describe(), "time(\"2006-01-02\")");
        assert!(v.check(&"2022-08-07".into()).is_ok());
    }

    #[test]
    fn string_predicates_register_and_check() {
        let b = Builder::with_defaults();
        register_string_predicates(&b);

        assert!(b.validate("abc", "isalpha").is_ok());
        assert_eq!(
            b.validate("abc1", "isalpha").unwrap_err().message(),
            "the string is not alpha"
        );
        assert!(b.validate("deadbeef", "iscrc32").is_ok());
        // crc64 is deliberately bound to the 8-hex-digit checker.
        assert!(b.validate("deadbeef", "iscrc64").is_ok());
        assert!(b.validate("1.2.3", "issemver").is_ok());
        assert!(b.validate("127.0.0.1", "isipv4").is_ok());
        assert!(b.validate("::1", "isipv6").is_ok());
        assert!(b.validate("8080", "isport").is_ok());
        assert!(b.validate("0", "isport").is_err());
        assert!(
            b.validate("550e8400-e29b-41d4-a716-446655440000", "isuuid4")
                .is_ok()
        );
        assert!(b.validate("example.com", "ishost").is_ok());
    }

    #[test]
    fn dns_name_labels() {
        assert!(is_dns_name("example.com"));
        assert!(is_dns_name("sub_domain.example-host.org"));
        assert!(!is_dns_name(""));
        assert!(!is_dns_name("bad..dots"));
        assert!(!is_dns_name("-leading.example"));
    }
}
