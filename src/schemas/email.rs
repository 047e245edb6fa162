//! Email address syntax check.
//!
//! Domains, including IP literals and internationalized names, are checked
//! by `validator`. The local part follows the dot-atom or quoted-string
//! forms, with no length cap of its own.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

/// Quoted local part: ASCII text, spaces included, or backslash escapes
/// between quotes.
static QUOTED_LOCAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"(?:[\x01-\x08\x0b\x0c\x0e-\x21#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*"$"#)
        .unwrap()
});

/// Domains accepted without a dot.
const DOMAIN_ALLOWLIST: &[&str] = &["localhost"];

/// Stand-in local part used when handing a domain to `validator`.
const DOMAIN_CHECK_LOCAL: &str = "user";

fn is_atom_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_valid_local(local: &str) -> bool {
    let dot_atom = local
        .split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atom_char));
    dot_atom || QUOTED_LOCAL.is_match(local)
}

/// Host names need a top-level label of two or more characters.
fn has_top_level_label(domain: &str) -> bool {
    if domain.starts_with('[') {
        return true;
    }
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.chars().count() >= 2,
        None => false,
    }
}

/// Returns `true` if `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    if domain.is_empty() || !is_valid_local(local) {
        return false;
    }

    if DOMAIN_ALLOWLIST
        .iter()
        .any(|allowed| domain.eq_ignore_ascii_case(allowed))
    {
        return true;
    }

    has_top_level_label(domain) && format!("{DOMAIN_CHECK_LOCAL}@{domain}").validate_email()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "a@b.com",
            "jane.doe@clinic.example.org",
            "first+tag@sub.domain.co",
            "x_y-z@host-name.io",
            "admin@localhost",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn accepts_ip_literal_quoted_and_idn_addresses() {
        for email in [
            "user@[127.0.0.1]",
            "\"john doe\"@example.com",
            "user@exämple.com",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn long_local_part_is_not_capped() {
        let local = "a".repeat(65);
        assert!(is_valid_email(&format!("{local}@b.com")));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "not-an-email",
            "",
            "@b.com",
            "a@",
            "a@b",
            "a@b.c",
            "a..b@c.com",
            ".a@c.com",
            "a@-b.com",
            "a@b-.com",
            "a b@c.com",
            "a@b..com",
            "\"unterminated@c.com",
            "user@[not-an-ip]",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn rejects_overlong_domain() {
        let label = "d".repeat(63);
        let domain = format!("{label}.{label}.{label}.{label}.com");
        assert!(domain.len() > 255);
        assert!(!is_valid_email(&format!("a@{domain}")));
    }
}
