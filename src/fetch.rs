//! Fetching a document by URL.
//!
//! `process_url` performs a blocking GET, rejects responses that are not a
//! successful HTML document, and streams the body into the tokenizer. Since
//! extraction stops at `</head>`, the body is normally only read up to the
//! end of the head.

use crate::error::{Error, Result};

/// Media types accepted as HTML.
const HTML_MEDIA_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Parse a `Content-Type` value, returning the lowercased `type/subtype`.
///
/// Parameters must be well formed `key=value` pairs, with quoted values
/// allowed. Returns `None` when the value is not a valid media type.
///
/// # Example
///
/// ```rust
/// use head_meta::parse_media_type;
///
/// assert_eq!(parse_media_type("Text/HTML; charset=utf-8").as_deref(), Some("text/html"));
/// assert_eq!(parse_media_type("text/"), None);
/// ```
#[must_use]
pub fn parse_media_type(value: &str) -> Option<String> {
    let mut parts = value.split(';');
    let media_type = parts.next()?.trim();
    let (kind, subtype) = media_type.split_once('/')?;
    if !is_token(kind) || !is_token(subtype) {
        return None;
    }

    for param in parts {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let (key, val) = param.split_once('=')?;
        if !is_token(key.trim()) {
            return None;
        }
        let val = val.trim();
        let quoted = val.len() >= 2 && val.starts_with('"') && val.ends_with('"');
        if !quoted && !is_token(val) {
            return None;
        }
    }

    Some(media_type.to_ascii_lowercase())
}

/// RFC 2045 token: non-empty, no controls, spaces or tspecials.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"' | b'/' | b'[' | b']' | b'?' | b'='
                )
        })
}

/// Check a response's status code and `Content-Type` header.
///
/// An absent or empty content type is accepted.
pub fn check_response(status: u16, content_type: Option<&str>) -> Result<()> {
    if !(200..300).contains(&status) {
        return Err(Error::InvalidStatusCode(status));
    }

    let Some(raw) = content_type.filter(|value| !value.is_empty()) else {
        return Ok(());
    };
    let media_type = parse_media_type(raw).ok_or_else(|| Error::InvalidContentType(raw.to_string()))?;
    if !HTML_MEDIA_TYPES.contains(&media_type.as_str()) {
        return Err(Error::ContentTypeNotHtml(media_type));
    }
    Ok(())
}

#[cfg(feature = "fetch")]
mod client {
    use reqwest::blocking::Client;
    use reqwest::header::{CONTENT_TYPE, USER_AGENT};
    use url::Url;

    use super::check_response;
    use crate::error::Result;
    use crate::extractor::extract;
    use crate::result::HeadMetadata;
    use crate::tokenizer::Tokenizer;
    use crate::Options;

    /// Fetch `url` and extract the metadata of its `<head>`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidUrl`] if `url` does not parse
    /// - [`crate::Error::Http`] if the request fails
    /// - [`crate::Error::InvalidStatusCode`] for a final status outside `200..300`
    /// - [`crate::Error::InvalidContentType`] / [`crate::Error::ContentTypeNotHtml`] for a
    ///   `Content-Type` that is not HTML
    /// - [`crate::Error::Io`] / [`crate::Error::BufferExceeded`] while reading the body
    pub fn process_url(url: &str, options: &Options) -> Result<HeadMetadata> {
        let url = Url::parse(url)?;
        let client = Client::builder().timeout(options.timeout).build()?;
        process_url_with_client(&client, url, options)
    }

    /// Like [`process_url`], with a caller-provided client.
    ///
    /// The client's own timeout and redirect policy apply; `options` only
    /// supplies the user agent and the tokenizer buffer limit.
    pub fn process_url_with_client(client: &Client, url: Url, options: &Options) -> Result<HeadMetadata> {
        tracing::debug!(%url, "fetching document");
        let response = client.get(url).header(USER_AGENT, &options.user_agent).send()?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        tracing::debug!(status, content_type = content_type.as_deref(), final_url = %response.url(), "received response");

        if let Err(err) = check_response(status, content_type.as_deref()) {
            tracing::warn!(error = %err, "rejecting fetched document");
            return Err(err);
        }

        let mut tokenizer = Tokenizer::with_options(response, options);
        extract(&mut tokenizer).map_err(|err| {
            tracing::warn!(error = %err, "reading fetched document failed");
            err
        })
    }
}

#[cfg(feature = "fetch")]
pub use client::{process_url, process_url_with_client};
