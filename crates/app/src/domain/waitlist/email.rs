//! Email validation, hashing, and free-text input hygiene.

use sha2::{Digest, Sha256};

/// Check an email against the permissive signup pattern.
///
/// Equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`: no whitespace anywhere,
/// exactly one `@`, a non-empty local part, and a domain with a dot that
/// has at least one character on each side. Deliberately not RFC-complete;
/// the signup client applies this same function so both sides agree on
/// what is accepted.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.splitn(2, '@');

    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // A dot that is neither the first nor the last character of the domain.
    let domain = domain.as_bytes();
    domain.len() >= 3 && domain[1..domain.len() - 1].contains(&b'.')
}

/// Normalize an email for hashing and duplicate comparison.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// SHA-256 hex digest of the normalized email.
///
/// This one-way digest backs the uniqueness index, so duplicate detection
/// never needs a second reversible copy of the address.
#[must_use]
pub fn hash_email(email: &str) -> String {
    format!("{:x}", Sha256::digest(normalize_email(email).as_bytes()))
}

/// Trim whitespace and strip angle brackets from free-text input.
///
/// Returns `None` when nothing remains, so empty submissions are stored as
/// NULL rather than empty strings.
#[must_use]
pub fn sanitize(input: &str) -> Option<String> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect();

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user.name+tag@sub.example.co.uk"));
        assert!(is_valid_email("UPPER@EXAMPLE.COM"));
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a.b.com"));
    }

    #[test]
    fn rejects_missing_domain_dot() {
        assert!(!is_valid_email("a@bcom"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@.b"));
    }

    #[test]
    fn rejects_whitespace() {
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b .com"));
        assert!(!is_valid_email(" a@b.com"));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn hash_is_case_insensitive() {
        assert_eq!(hash_email("User@Example.com"), hash_email("user@example.com"));
    }

    #[test]
    fn hash_is_hex_sha256() {
        let hash = hash_email("a@b.com");

        assert_eq!(hash.len(), 64, "expected a 256-bit hex digest");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_emails_hash_differently() {
        assert_ne!(hash_email("a@b.com"), hash_email("b@a.com"));
    }

    #[test]
    fn sanitize_strips_angle_brackets_and_trims() {
        assert_eq!(sanitize("  <b>PlayerOne</b>  "), Some("bPlayerOne/b".to_string()));
        assert_eq!(sanitize("Rocket League"), Some("Rocket League".to_string()));
    }

    #[test]
    fn sanitize_empty_yields_none() {
        assert_eq!(sanitize(""), None);
        assert_eq!(sanitize("   "), None);
        assert_eq!(sanitize("<>"), None);
    }
}
