//! Lazy, pull-based HTML tokenizer.
//!
//! `Tokenizer` drives an [`html5gum`] tokenizer over any `Read` and hands
//! out one [`Token`] at a time. Input is read in small chunks, only when the
//! state machine needs more bytes, so a caller that stops early never reads
//! the rest of the document.
//!
//! This is a lexer, not a tree builder: html5gum recognizes tags, text,
//! comments and doctypes, decodes character references, and switches to
//! raw text after elements such as `<script>` and `<title>`. Invalid UTF-8
//! is replaced, never transcoded.

mod emitter;

use std::io::Read;

use html5gum::IoReader;

use crate::error::{Error, Result};
use crate::token::{Token, TokenSource};
use crate::Options;

use self::emitter::{Event, HeadEmitter};

/// Size of the read buffer html5gum fills from the reader.
const CHUNK_SIZE: usize = 4096;

/// Lazy HTML tokenizer over any `Read`.
///
/// # Example
///
/// ```rust
/// use head_meta::{Token, TokenSource, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new("<title>Caf&eacute;</title>".as_bytes());
/// let mut kinds = Vec::new();
/// while let Some(token) = tokenizer.next_token()? {
///     kinds.push(match token {
///         Token::StartTag(_) => "start".to_string(),
///         Token::EndTag(_) => "end".to_string(),
///         Token::Text(text) => text.into_owned(),
///         _ => "other".to_string(),
///     });
/// }
/// assert_eq!(kinds, ["start", "Café", "end"]);
/// # Ok::<(), head_meta::Error>(())
/// ```
pub struct Tokenizer<R: Read> {
    inner: html5gum::Tokenizer<IoReader<R>, HeadEmitter>,
    /// The event the last handed-out token borrows from.
    current: Option<Event>,
    /// Set once a token exceeded the buffer limit.
    exceeded: Option<usize>,
}

impl<R: Read> Tokenizer<R> {
    /// Create a tokenizer with no buffer limit.
    pub fn new(reader: R) -> Self {
        Self::build(reader, None)
    }

    /// Create a tokenizer that fails once a single token needs more than
    /// `limit` bytes.
    pub fn with_max_buffer(reader: R, limit: usize) -> Self {
        Self::build(reader, Some(limit))
    }

    /// Create a tokenizer configured from `options`.
    pub fn with_options(reader: R, options: &Options) -> Self {
        Self::build(reader, options.max_buffer)
    }

    fn build(reader: R, max_buffer: Option<usize>) -> Self {
        let reader = IoReader::new_with_buffer_size::<CHUNK_SIZE>(reader);
        Self {
            inner: html5gum::Tokenizer::new_with_emitter(reader, HeadEmitter::new(max_buffer)),
            current: None,
            exceeded: None,
        }
    }
}

impl<R: Read> TokenSource for Tokenizer<R> {
    type Error = Error;

    fn next_token(&mut self) -> Result<Option<Token<'_>>> {
        if let Some(limit) = self.exceeded {
            return Err(Error::BufferExceeded { limit });
        }

        self.current = match self.inner.next() {
            None => {
                tracing::trace!("tokenizer reached end of input");
                None
            }
            Some(Ok(Event::BufferExceeded(limit))) => {
                tracing::debug!(limit, "token exceeded buffer limit");
                self.exceeded = Some(limit);
                return Err(Error::BufferExceeded { limit });
            }
            Some(Ok(event)) => Some(event),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "reader failed mid-document");
                return Err(err.into());
            }
        };
        Ok(self.current.as_ref().and_then(Event::as_token))
    }
}
