//! Domain name normalization and validation.

use std::sync::LazyLock;

use regex::Regex;

/// Labels of letters/digits/hyphens, at least one dot, and an alphabetic TLD
/// of two or more letters.
#[allow(clippy::expect_used)]
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}$")
        .expect("domain regex is valid")
});

/// Normalize user input into a bare domain name: trim, lowercase, and strip
/// any leading `@` (users paste the address-suffix form). Idempotent.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase().trim_start_matches('@').to_string()
}

/// Whether a normalized domain name is acceptable.
#[must_use]
pub fn is_valid(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}
