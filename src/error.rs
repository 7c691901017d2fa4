//! Error types for head-meta.
//!
//! This module defines the errors returned by tokenizing, fetching and
//! serializing. Extraction itself never fails on malformed markup; the only
//! errors it reports are the ones its token source hands it.

/// Error type for head-meta operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading the HTML input failed.
    #[error("reading HTML failed: {0}")]
    Io(#[from] std::io::Error),

    /// A single token grew past the tokenizer's buffer limit.
    #[error("tokenizer buffer exceeded ({limit} bytes)")]
    BufferExceeded {
        /// The configured limit in bytes.
        limit: usize,
    },

    /// The URL to fetch could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP request could not be completed.
    #[cfg(feature = "fetch")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The final HTTP response status was outside `200..300`.
    #[error("invalid status code: {0}")]
    InvalidStatusCode(u16),

    /// The `Content-Type` response header could not be parsed.
    #[error("invalid content type: {0}")]
    InvalidContentType(String),

    /// The `Content-Type` response header does not describe HTML.
    #[error("content type not html: {0} (should be \"text/html\" or \"application/xhtml+xml\" or empty)")]
    ContentTypeNotHtml(String),

    /// The metadata could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status an adaptation layer should answer with for this error.
    ///
    /// Bad caller input maps to `400`, failures of the fetched upstream
    /// document map to `502`, and anything produced locally maps to `500`.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidUrl(_) => 400,
            #[cfg(feature = "fetch")]
            Self::Http(err) if err.is_builder() => 400,
            #[cfg(feature = "fetch")]
            Self::Http(_) => 502,
            Self::Io(_)
            | Self::BufferExceeded { .. }
            | Self::InvalidStatusCode(_)
            | Self::InvalidContentType(_)
            | Self::ContentTypeNotHtml(_) => 502,
            Self::Serialize(_) => 500,
        }
    }
}

/// Result type alias for head-meta operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(Error::InvalidStatusCode(404).status_code(), 502);
        assert_eq!(Error::ContentTypeNotHtml("application/json".into()).status_code(), 502);
        assert_eq!(Error::BufferExceeded { limit: 16 }.status_code(), 502);

        let err = url::Url::parse("not a url").expect_err("should not parse");
        assert_eq!(Error::from(err).status_code(), 400);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::InvalidStatusCode(500).to_string(), "invalid status code: 500");
        assert_eq!(
            Error::InvalidContentType("text/".into()).to_string(),
            "invalid content type: text/"
        );
    }
}
