use std::net::IpAddr;

use url::Url;

use super::{ArcValidator, new};
use crate::types::{ValidateError, Value};

// Adapt the value to text for the parser-style checks below; non-text values
// report the unsupported-type error.
fn check_text(
    name: &'static str,
    message: &'static str,
    ok: impl Fn(&str) -> bool + Send + Sync + 'static,
) -> ArcValidator {
    new(name, move |value| match value {
        Value::String(s) => {
            if ok(s) {
                Ok(())
            } else {
                Err(ValidateError::new(message))
            }
        }
        Value::Custom(c) => match c.as_text() {
            Some(s) if ok(&s) => Ok(()),
            Some(_) => Err(ValidateError::new(message)),
            None => Err(unsupported(value)),
        },
        other => Err(unsupported(other)),
    })
}

fn unsupported(value: &Value) -> ValidateError {
    ValidateError::new(format!("unsupported type {}", value.kind()))
}

/// Passes iff the string is a valid IPv4 or IPv6 address.
///
/// The validator rule is `ip`.
pub fn ip() -> ArcValidator {
    check_text("ip", "the string is not a valid ip", |s| {
        s.parse::<IpAddr>().is_ok()
    })
}

/// Passes iff the string is a valid 48-bit MAC address.
///
/// Supported forms: `xx:xx:xx:xx:xx:xx`, `xx-xx-xx-xx-xx-xx` and
/// `xxxx.xxxx.xxxx`, upper or lower case.
///
/// The validator rule is `mac`.
pub fn mac() -> ArcValidator {
    new("mac", |value| match value {
        Value::String(s) => {
            if is_mac(s) {
                Ok(())
            } else {
                Err(ValidateError::new("the string is not a valid mac"))
            }
        }
        Value::Custom(c) => match c.as_text() {
            Some(s) if is_mac(&s) => Ok(()),
            Some(_) => Err(ValidateError::new("the string is not a valid mac")),
            None => Err(expect_string(value)),
        },
        other => Err(expect_string(other)),
    })
}

fn expect_string(value: &Value) -> ValidateError {
    ValidateError::new(format!("expect a string, but got {}", value.kind()))
}

fn is_mac(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.len() {
        // xx:xx:xx:xx:xx:xx or xx-xx-xx-xx-xx-xx with one consistent separator
        17 => {
            let sep = bytes[2];
            if sep != b':' && sep != b'-' {
                return false;
            }
            bytes.chunks(3).all(|group| {
                group[0].is_ascii_hexdigit()
                    && group[1].is_ascii_hexdigit()
                    && (group.len() == 2 || group[2] == sep)
            })
        }
        // xxxx.xxxx.xxxx
        14 => bytes.chunks(5).all(|group| {
            group[..4].iter().all(u8::is_ascii_hexdigit) && (group.len() == 4 || group[4] == b'.')
        }),
        _ => false,
    }
}

/// Passes iff the string is a valid CIDR block such as `192.168.0.0/24`.
///
/// The validator rule is `cidr`.
pub fn cidr() -> ArcValidator {
    check_text("cidr", "the string is not a valid cidr", is_cidr)
}

fn is_cidr(s: &str) -> bool {
    let Some((addr, prefix)) = s.split_once('/') else {
        return false;
    };
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let Ok(bits) = prefix.parse::<u8>() else {
        return false;
    };
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => bits <= 32,
        Ok(IpAddr::V6(_)) => bits <= 128,
        Err(_) => false,
    }
}

/// Passes iff the string is a valid `HOST:PORT` address, with IPv6 hosts in
/// brackets.
///
/// The validator rule is `addr`.
pub fn addr() -> ArcValidator {
    check_text("addr", "the string is not a valid address", is_addr)
}

fn is_addr(s: &str) -> bool {
    if let Some(rest) = s.strip_prefix('[') {
        // [host]:port
        let Some((host, port)) = rest.split_once("]:") else {
            return false;
        };
        return !host.is_empty() && !port.is_empty() && !port.contains(':');
    }
    let Some((host, port)) = s.rsplit_once(':') else {
        return false;
    };
    // A bare IPv6 address has more than one colon and needs brackets.
    !host.is_empty() && !port.is_empty() && !host.contains(':')
}

/// Passes iff the string parses as an absolute URL with a host.
///
/// The validator rule is `url`.
pub fn url() -> ArcValidator {
    check_text("url", "the string is not a valid url", |s| {
        Url::parse(s).is_ok_and(|u| u.has_host())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_accepts_v4_and_v6() {
        let v = ip();
        assert!(v.check(&Value::from("127.0.0.1")).is_ok());
        assert!(v.check(&Value::from("::1")).is_ok());
        assert_eq!(
            v.check(&Value::from("256.0.0.1")).unwrap_err().message(),
            "the string is not a valid ip"
        );
    }

    #[test]
    fn ip_rejects_non_strings() {
        let v = ip();
        assert_eq!(
            v.check(&Value::Int(1)).unwrap_err().message(),
            "unsupported type int"
        );
    }

    #[test]
    fn mac_forms() {
        let v = mac();
        assert!(v.check(&Value::from("aa:bb:cc:dd:ee:ff")).is_ok());
        assert!(v.check(&Value::from("AA-BB-CC-DD-EE-FF")).is_ok());
        assert!(v.check(&Value::from("aabb.ccdd.eeff")).is_ok());
        assert!(v.check(&Value::from("aa:bb:cc:dd:ee")).is_err());
        assert!(v.check(&Value::from("gg:hh:ii:jj:kk:ll")).is_err());
        assert!(v.check(&Value::from("aa:bb-cc:dd:ee:ff")).is_err());
    }

    #[test]
    fn cidr_blocks() {
        let v = cidr();
        assert!(v.check(&Value::from("192.168.0.0/24")).is_ok());
        assert!(v.check(&Value::from("fe80::/10")).is_ok());
        assert!(v.check(&Value::from("192.168.0.0/33")).is_err());
        assert!(v.check(&Value::from("192.168.0.0")).is_err());
    }

    #[test]
    fn addr_host_port() {
        let v = addr();
        assert!(v.check(&Value::from("localhost:80")).is_ok());
        assert!(v.check(&Value::from("[::1]:80")).is_ok());
        assert!(v.check(&Value::from("localhost")).is_err());
        assert!(v.check(&Value::from(":80")).is_err());
        assert!(v.check(&Value::from("localhost:")).is_err());
        assert!(v.check(&Value::from("::1:80")).is_err());
    }

    #[test]
    fn addr_describe_is_addr() {
        assert_eq!(addr().describe(), "addr");
    }

    #[test]
    fn url_requires_scheme_and_host() {
        let v = url();
        assert!(v.check(&Value::from("http://localhost")).is_ok());
        assert!(v.check(&Value::from("https://example.com/path?q=1")).is_ok());
        assert!(v.check(&Value::from("localhost")).is_err());
        assert!(v.check(&Value::from("http://")).is_err());
        assert!(v.check(&Value::from("http:///path")).is_err());
        assert!(v.check(&Value::from("/path/to")).is_err());
    }
}
