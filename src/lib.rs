//! # head-meta
//!
//! Extracts structured metadata from the `<head>` of an HTML document: the
//! title, the `<base>` URL, the declared charset, `<link>` elements grouped
//! by relation, and `<meta>` properties.
//!
//! ## Quick Start
//!
//! ```rust
//! use head_meta::parse_html;
//!
//! let html = r#"<html><head>
//!   <title>My Page</title>
//!   <link rel="icon" href="/favicon.ico">
//!   <meta property="og:title" content="My Page on OG">
//! </head><body></body></html>"#;
//!
//! let metadata = parse_html(html)?;
//! assert_eq!(metadata.title, "My Page");
//! assert_eq!(metadata.links_for("icon")[0].href, "/favicon.ico");
//! assert_eq!(metadata.meta("og:title"), Some("My Page on OG"));
//! # Ok::<(), head_meta::Error>(())
//! ```
//!
//! ## How it works
//!
//! The document is tokenized lazily and walked once by a small state
//! machine that stops at `</head>`. Nothing after the head is read, and no
//! DOM is built. `href` values are checked with [`is_valid_href`] before
//! they are recorded.
//!
//! With the `fetch` feature (on by default), [`process_url`] downloads a
//! document and extracts its head, rejecting non-2xx responses and
//! non-HTML content types.

mod error;
mod options;
mod result;

/// Lexical tokens and the token source interface.
pub mod token;

/// Lazy HTML tokenizer.
pub mod tokenizer;

/// Head extraction state machine.
pub mod extractor;

/// Href validation.
pub mod href;

/// Fetching documents by URL.
pub mod fetch;

/// Request/response adaptation for HTTP front ends.
pub mod handler;

// Public API - re-exports
pub use error::{Error, Result};
pub use extractor::{extract, HeadExtractor};
pub use fetch::{check_response, parse_media_type};
#[cfg(feature = "fetch")]
pub use fetch::{process_url, process_url_with_client};
pub use href::is_valid_href;
pub use options::{Options, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use result::{HeadMetadata, Link};
pub use token::{Attribute, Attributes, Tag, Token, TokenSource};
pub use tokenizer::Tokenizer;

use std::io::Read;

/// Extracts head metadata from an HTML string.
///
/// # Example
///
/// ```rust
/// use head_meta::parse_html;
///
/// let metadata = parse_html("<head><meta charset=\"utf-8\"></head>")?;
/// assert_eq!(metadata.charset, "utf-8");
/// # Ok::<(), head_meta::Error>(())
/// ```
pub fn parse_html(html: &str) -> Result<HeadMetadata> {
    parse_reader(html.as_bytes())
}

/// Extracts head metadata from any reader, reading only as far as needed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the reader fails.
pub fn parse_reader<R: Read>(reader: R) -> Result<HeadMetadata> {
    parse_reader_with_options(reader, &Options::default())
}

/// Extracts head metadata from a reader with custom options.
///
/// # Example
///
/// ```rust
/// use head_meta::{parse_reader_with_options, Error, Options};
///
/// let options = Options { max_buffer: Some(16), ..Options::default() };
/// let html = format!("<head><title>{}</title></head>", "x".repeat(64));
/// let result = parse_reader_with_options(html.as_bytes(), &options);
/// assert!(matches!(result, Err(Error::BufferExceeded { limit: 16 })));
/// ```
pub fn parse_reader_with_options<R: Read>(reader: R, options: &Options) -> Result<HeadMetadata> {
    let mut tokenizer = Tokenizer::with_options(reader, options);
    extract(&mut tokenizer)
}
