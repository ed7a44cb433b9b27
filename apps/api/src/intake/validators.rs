//! Pure input validators used to gate wizard transitions.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// RFC 5322 `atext` symbols allowed in an unquoted local part.
const ATEXT_SYMBOLS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Accepted Loom share-link prefixes. Anchored at the start only, so query
/// strings and trailing path segments after the id are allowed.
const SHARE_LINK_PATTERNS: &[&str] = &[
    r"^https://www\.loom\.com/share/[a-zA-Z0-9]+",
    r"^https://loom\.com/share/[a-zA-Z0-9]+",
    r"^https://www\.loom\.com/embed/[a-zA-Z0-9]+",
    r"^https://loom\.com/embed/[a-zA-Z0-9]+",
];

fn share_link_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SHARE_LINK_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// Syntactic email check: `local@domain` with dot-atom local part and
/// hostname-style domain labels. No DNS or MX lookup.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty()
        || local.len() > MAX_LOCAL_PART_LEN
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
    {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || ATEXT_SYMBOLS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }
    // Top-level domain: alphabetic, at least two characters.
    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// True iff `link` is an absolute URL matching one of the Loom share/embed
/// patterns. Blank input is never valid.
pub fn is_valid_share_link(link: &str) -> bool {
    let link = link.trim();
    if link.is_empty() {
        return false;
    }
    match Url::parse(link) {
        Ok(url) if url.host_str().is_some() => {}
        _ => return false,
    }
    share_link_patterns().iter().any(|re| re.is_match(link))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in [
            "ada@example.com",
            "ada.lovelace@analytical-engine.co.uk",
            "first+tag@sub.domain.io",
            "o'brien@example.ie",
            "x_y-z@example.museum",
        ] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn test_email_without_at_is_invalid() {
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_without_domain_label_is_invalid() {
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("ada@localhost"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("ada@example."));
        assert!(!is_valid_email("ada@exa..mple.com"));
    }

    #[test]
    fn test_email_malformed_parts_are_invalid() {
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(".ada@example.com"));
        assert!(!is_valid_email("ada.@example.com"));
        assert!(!is_valid_email("a..da@example.com"));
        assert!(!is_valid_email("ada lovelace@example.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada@-example.com"));
        assert!(!is_valid_email("ada@example-.com"));
        assert!(!is_valid_email("ada@example.c0m"));
        assert!(!is_valid_email(" ada@example.com"));
    }

    #[test]
    fn test_email_length_limits() {
        let long_local = format!("{}@example.com", "a".repeat(65));
        assert!(!is_valid_email(&long_local));
        let long_label = format!("ada@{}.com", "a".repeat(64));
        assert!(!is_valid_email(&long_label));
        let max_local = format!("{}@example.com", "a".repeat(64));
        assert!(is_valid_email(&max_local));
    }

    #[test]
    fn test_share_link_accepts_whitelisted_shapes() {
        assert!(is_valid_share_link("https://www.loom.com/share/abc123XYZ"));
        assert!(is_valid_share_link("https://loom.com/share/abc123"));
        assert!(is_valid_share_link("https://www.loom.com/embed/abc123"));
        assert!(is_valid_share_link("https://loom.com/embed/abc123"));
        assert!(is_valid_share_link(
            "  https://www.loom.com/share/0f3a9c?sid=42  "
        ));
    }

    #[test]
    fn test_share_link_rejects_other_hosts() {
        assert!(!is_valid_share_link("https://evil.com/share/abc123"));
        assert!(!is_valid_share_link("https://loom.com.evil.com/share/abc123"));
        assert!(!is_valid_share_link("https://www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_share_link_rejects_wrong_shape() {
        assert!(!is_valid_share_link("http://www.loom.com/share/abc123"));
        assert!(!is_valid_share_link("https://WWW.LOOM.COM/share/abc123"));
        assert!(!is_valid_share_link("https://www.loom.com/share/"));
        assert!(!is_valid_share_link("https://www.loom.com/looms/abc123"));
        assert!(!is_valid_share_link("https://www.loom.com/share/-abc"));
    }

    #[test]
    fn test_share_link_rejects_blank_and_garbage() {
        assert!(!is_valid_share_link(""));
        assert!(!is_valid_share_link("   "));
        assert!(!is_valid_share_link("not a url"));
        assert!(!is_valid_share_link("www.loom.com/share/abc123"));
        assert!(!is_valid_share_link("loom.com/share/abc123"));
    }
}
