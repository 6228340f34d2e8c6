//! Domain name canonicalization.
//!
//! Allow-list entries are stored as entered to preserve display fidelity,
//! so both sides of every policy comparison are normalized at check time.

/// Canonicalize a host name for comparison.
///
/// Lower-cases, trims surrounding whitespace, and strips a single leading
/// `www.` prefix. Empty or absent input normalizes to the empty string,
/// which is never considered allowed.
///
/// # Examples
///
/// ```
/// use worktrack_core::domain::normalize_domain;
///
/// assert_eq!(normalize_domain("WWW.Example.COM"), "example.com");
/// assert_eq!(normalize_domain("  docs.rs "), "docs.rs");
/// assert_eq!(normalize_domain(""), "");
/// ```
pub fn normalize_domain(raw: &str) -> String {
    let domain = raw.trim().to_lowercase();
    match domain.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => domain,
    }
}

/// Extract a bare host name from a full URL.
///
/// Tolerates input that is already a bare host. Strips the scheme, any
/// path or query, and a port suffix, then lower-cases and removes a
/// leading `www.`. Total: malformed input degrades to best-effort rather
/// than failing.
///
/// # Examples
///
/// ```
/// use worktrack_core::domain::extract_domain_from_url;
///
/// assert_eq!(
///     extract_domain_from_url("https://www.example.com:8443/a/b?q=1"),
///     "example.com"
/// );
/// assert_eq!(extract_domain_from_url("notion.so"), "notion.so");
/// ```
pub fn extract_domain_from_url(url: &str) -> String {
    let mut host = url.trim();
    if let Some(idx) = host.find("://") {
        host = &host[idx + 3..];
    }
    if let Some(idx) = host.find('/') {
        host = &host[..idx];
    }
    if let Some(idx) = host.find('?') {
        host = &host[..idx];
    }
    if let Some(idx) = host.rfind(':') {
        // Only treat the suffix as a port if it is purely numeric, so
        // IPv6-ish or otherwise odd input is left alone.
        if host[idx + 1..].chars().all(|c| c.is_ascii_digit()) {
            host = &host[..idx];
        }
    }
    normalize_domain(host)
}

/// Canonicalize a client-reported domain field, accepting either a bare
/// host or a full URL.
pub fn canonical_domain(raw: &str) -> String {
    if raw.contains("://") || raw.contains('/') {
        extract_domain_from_url(raw)
    } else {
        normalize_domain(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_www() {
        assert_eq!(normalize_domain("WWW.Example.COM"), "example.com");
    }

    #[test]
    fn www_and_bare_forms_agree() {
        assert_eq!(
            normalize_domain("example.com"),
            normalize_domain("www.example.com")
        );
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize_domain("  GitHub.com\t"), "github.com");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("   "), "");
    }

    #[test]
    fn strips_only_one_www_prefix() {
        assert_eq!(normalize_domain("www.www.example.com"), "www.example.com");
    }

    #[test]
    fn url_with_scheme_path_and_port() {
        assert_eq!(
            extract_domain_from_url("https://www.example.com:8443/a/b?q=1"),
            "example.com"
        );
    }

    #[test]
    fn url_without_scheme() {
        assert_eq!(
            extract_domain_from_url("example.com/path/to/page"),
            "example.com"
        );
    }

    #[test]
    fn bare_host_passes_through() {
        assert_eq!(extract_domain_from_url("notion.so"), "notion.so");
    }

    #[test]
    fn canonical_accepts_both_forms() {
        assert_eq!(canonical_domain("https://WWW.Notion.so/page"), "notion.so");
        assert_eq!(canonical_domain("Notion.so"), "notion.so");
    }
}
