//! Configuration options for fetching and tokenizing.
//!
//! The `Options` struct controls the collaborators around the extractor:
//! how a URL is fetched and how much input the tokenizer may buffer for a
//! single token. Extraction rules themselves are not configurable.

use std::time::Duration;

/// Default `User-Agent` header sent when fetching a URL.
pub const DEFAULT_USER_AGENT: &str = concat!("head-meta/", env!("CARGO_PKG_VERSION"));

/// Default timeout for a whole fetch, connection through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration options for head extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use head_meta::Options;
/// use std::time::Duration;
///
/// let options = Options {
///     timeout: Duration::from_secs(3),
///     max_buffer: Some(64 * 1024),
///     ..Options::default()
/// };
/// assert_eq!(options.user_agent, head_meta::DEFAULT_USER_AGENT);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Timeout applied to the HTTP request when fetching a URL.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,

    /// `User-Agent` header sent when fetching a URL.
    ///
    /// Default: `head-meta/<version>`
    pub user_agent: String,

    /// Largest number of bytes the tokenizer may buffer for one token.
    ///
    /// A document with a longer tag, comment or text run fails with
    /// `Error::BufferExceeded`. `None` means unlimited.
    ///
    /// Default: `None`
    pub max_buffer: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_buffer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert!(options.user_agent.starts_with("head-meta/"));
        assert!(options.max_buffer.is_none());
    }
}
