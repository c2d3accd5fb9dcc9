use lazy_static::lazy_static;
use regex::Regex;

use super::{compile, PatternSpec};

lazy_static! {
    /// Labeled key/token assignments; the value itself is in group 1.
    static ref API_KEYS: Regex =
        compile(r#"(?:api[_\-]?key|access[_\-]?token)[\s=:'"`]{0,5}([a-zA-Z0-9\-_]{16,})"#).unwrap();

    static ref EMAIL_ADDRESSES: Regex =
        compile(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();

    static ref URLS: Regex =
        compile(r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+").unwrap();

    static ref PASSWORDS: Regex =
        compile(r#"(?:password|pwd|pass)[\s=:'"`]{0,5}([a-zA-Z0-9@#$%^&*()\-_+]{8,})"#).unwrap();

    /// All known AWS access-key-id prefixes, not just AKIA.
    static ref AWS_KEYS: Regex =
        compile(r"((?:A3T[A-Z0-9]|AKIA|AGPA|AIDA|AROA|AIPA|ANPA|ANVA|ASIA)[A-Z0-9]{16})").unwrap();

    /// Whole PEM block including markers; spans lines.
    static ref PRIVATE_KEYS: Regex = compile(
        r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |PGP )?PRIVATE KEY(?: BLOCK)?-----[\s\S]+?-----END (?:RSA |EC |DSA |OPENSSH |PGP )?PRIVATE KEY(?: BLOCK)?-----"
    ).unwrap();
}

/// The built-in detector set, in report order.
pub fn default_specs() -> Vec<PatternSpec> {
    vec![
        PatternSpec::from_compiled("API Keys", API_KEYS.clone()),
        PatternSpec::from_compiled("Email Addresses", EMAIL_ADDRESSES.clone()),
        PatternSpec::from_compiled("URLs", URLS.clone()),
        PatternSpec::from_compiled("Passwords", PASSWORDS.clone()),
        PatternSpec::from_compiled("AWS Keys", AWS_KEYS.clone()),
        PatternSpec::from_compiled("Private Keys", PRIVATE_KEYS.clone()),
    ]
}
