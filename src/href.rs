//! Href validation.
//!
//! Decides whether an `href` attribute value is usable: an absolute
//! `http`/`https` URL, or something that reads as a request path once a
//! leading `/` is ensured. This is an accept/reject check only, values are
//! never normalized.

use url::Url;

/// Base used to check that a path candidate can be resolved.
const PATH_BASE: &str = "http://localhost/";

/// Check whether `href` is acceptable as a base or link target.
///
/// Absolute URLs must use the `http` or `https` scheme; every other scheme
/// is rejected even when the URL is well formed. Anything that does not
/// parse as an absolute URL is treated as a path and accepted when it is a
/// well-formed request path, so the empty string counts as `/`.
///
/// # Example
///
/// ```rust
/// use head_meta::is_valid_href;
///
/// assert!(is_valid_href("https://example.com/feed.xml"));
/// assert!(is_valid_href("static/style.css"));
/// assert!(is_valid_href(""));
/// assert!(!is_valid_href("ftp://example.com/"));
/// ```
#[must_use]
pub fn is_valid_href(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) if !url.scheme().is_empty() => matches!(url.scheme(), "http" | "https"),
        _ => is_request_path(href),
    }
}

/// Check whether `href`, with a leading `/` ensured, is a well-formed path.
fn is_request_path(href: &str) -> bool {
    let path = if href.starts_with('/') {
        href.to_string()
    } else {
        format!("/{href}")
    };

    if path.bytes().any(|b| b.is_ascii_control()) {
        return false;
    }

    // The query is kept raw, only the path part must carry valid escapes.
    let path_part = path.split('?').next().unwrap_or_default();
    if !has_valid_escapes(path_part) {
        return false;
    }

    Url::parse(PATH_BASE).and_then(|base| base.join(&path)).is_ok()
}

/// Every `%` must be followed by two hex digits.
fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_http_urls() {
        assert!(is_valid_href("http://example.com/"));
        assert!(is_valid_href("https://example.com/"));
        assert!(is_valid_href("HTTPS://EXAMPLE.COM/Path?q=1#frag"));
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(!is_valid_href("ftp://example.com/"));
        assert!(!is_valid_href("mailto:someone@example.com"));
        assert!(!is_valid_href("javascript:alert(1)"));
        assert!(!is_valid_href("data:text/plain,hello"));
    }

    #[test]
    fn test_malformed_http_falls_through() {
        assert!(is_valid_href("http:/example.com/"));
    }

    #[test]
    fn test_paths() {
        assert!(is_valid_href("/example/absolute/path"));
        assert!(is_valid_href("example/relative/path"));
        assert!(is_valid_href("example.com"));
        assert!(is_valid_href("//cdn.example.com/app.js"));
        assert!(is_valid_href("/search?q=%zz"));
    }

    #[test]
    fn test_empty_href_is_root_path() {
        assert!(is_valid_href(""));
        assert!(is_request_path(""));
    }

    #[test]
    fn test_invalid_paths() {
        assert!(!is_valid_href("/bad%zzescape"));
        assert!(!is_valid_href("/trailing%2"));
        assert!(!is_valid_href("/with\ncontrol"));
    }

    #[test]
    fn test_has_valid_escapes() {
        assert!(has_valid_escapes("/a%20b"));
        assert!(has_valid_escapes("/plain"));
        assert!(!has_valid_escapes("/a%2"));
        assert!(!has_valid_escapes("/%g0"));
    }
}
