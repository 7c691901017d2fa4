//! Head extraction state machine.
//!
//! `HeadExtractor` walks a token stream once, from the start of the
//! document to `</head>`, and fills a [`HeadMetadata`] as it goes:
//!
//! - before `<head>`: everything is skipped; an end tag means there is no
//!   head to read and extraction stops
//! - inside `<head>`: `<title>`, `<base>`, `<link>` and `<meta>` are read,
//!   every other tag is skipped without looking at its attributes
//! - inside `<title>`: the next token is the title if it is text
//!
//! Attribute scans are linear, so wherever an attribute repeats (or several
//! of `property`/`name`/`http-equiv`/`itemprop` appear on one tag) the last
//! one in source order wins.

use crate::href::is_valid_href;
use crate::result::{HeadMetadata, Link};
use crate::token::{Tag, Token, TokenSource};

const ATTR_REL: &str = "rel";
const ATTR_HREF: &str = "href";
const ATTR_TYPE: &str = "type";
const ATTR_TITLE: &str = "title";
const ATTR_CHARSET: &str = "charset";
const ATTR_CONTENT: &str = "content";

/// Attributes naming the property a `<meta>` tag describes.
const PROPERTY_ATTRS: &[&str] = &["property", "name", "http-equiv", "itemprop"];

/// Whether the caller should keep pulling tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Done,
}

/// Single-use extraction state: the metadata under construction and where
/// in the document the stream currently is.
#[derive(Debug, Default)]
pub struct HeadExtractor {
    metadata: HeadMetadata,
    in_head: bool,
    in_title: bool,
}

impl HeadExtractor {
    /// Create an extractor positioned before `<head>`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull tokens from `source` until `</head>`, end of input, or an error.
    ///
    /// On error the partially built metadata is dropped and the source's
    /// error is returned unchanged.
    pub fn run<S: TokenSource + ?Sized>(mut self, source: &mut S) -> Result<HeadMetadata, S::Error> {
        while let Some(token) = source.next_token()? {
            if self.step(&token) == Flow::Done {
                tracing::debug!(in_head = self.in_head, "head extraction finished early");
                return Ok(self.metadata);
            }
        }
        tracing::debug!(in_head = self.in_head, "head extraction reached end of input");
        Ok(self.metadata)
    }

    fn step(&mut self, token: &Token<'_>) -> Flow {
        if matches!(token, Token::Comment(_) | Token::Doctype(_)) {
            return Flow::Continue;
        }

        if !self.in_head {
            return match token {
                Token::StartTag(tag) if tag.name() == "head" => {
                    tracing::trace!("entered head");
                    self.in_head = true;
                    Flow::Continue
                }
                Token::EndTag(tag) => {
                    tracing::debug!(tag = tag.name(), "end tag before head, nothing to extract");
                    Flow::Done
                }
                _ => Flow::Continue,
            };
        }

        if self.in_title {
            self.in_title = false;
            if let Token::Text(text) = token {
                self.metadata.title = text.to_string();
                return Flow::Continue;
            }
        }

        let (tag, is_end) = match token {
            Token::StartTag(tag) | Token::SelfClosingTag(tag) => (tag, false),
            Token::EndTag(tag) => (tag, true),
            _ => return Flow::Continue,
        };

        match tag.name() {
            "head" if is_end => Flow::Done,
            "head" => Flow::Continue,
            "title" if matches!(token, Token::StartTag(_)) => {
                self.in_title = true;
                Flow::Continue
            }
            "base" | "link" | "meta" if !is_end && tag.has_attributes() => {
                match tag.name() {
                    "base" => self.read_base(tag),
                    "link" => self.read_link(tag),
                    _ => self.read_meta(tag),
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn read_base(&mut self, tag: &Tag<'_>) {
        for attr in tag.attributes() {
            if attr.key == ATTR_HREF && is_valid_href(&attr.value) {
                self.metadata.base = attr.value.into_owned();
            }
        }
    }

    fn read_link(&mut self, tag: &Tag<'_>) {
        let mut rel = String::new();
        let mut link = Link::default();
        for attr in tag.attributes() {
            match attr.key.as_ref() {
                ATTR_REL => rel = attr.value.into_owned(),
                ATTR_HREF => {
                    if is_valid_href(&attr.value) {
                        link.href = attr.value.into_owned();
                    }
                }
                ATTR_TYPE => link.link_type = attr.value.into_owned(),
                ATTR_TITLE => link.title = attr.value.into_owned(),
                _ => {}
            }
        }

        if rel.is_empty() {
            tracing::trace!(href = %link.href, "discarding link without rel");
            return;
        }
        self.metadata.links.entry(rel).or_default().push(link);
    }

    fn read_meta(&mut self, tag: &Tag<'_>) {
        let mut property = String::new();
        let mut content = String::new();
        for attr in tag.attributes() {
            match attr.key.as_ref() {
                ATTR_CHARSET => {
                    self.metadata.charset = attr.value.into_owned();
                    return;
                }
                ATTR_CONTENT => content = attr.value.into_owned(),
                key if PROPERTY_ATTRS.contains(&key) => property = attr.value.into_owned(),
                _ => {}
            }
        }

        if !property.is_empty() {
            self.metadata.metas.insert(property, content);
        }
    }
}

/// Extract head metadata from a token stream.
///
/// # Example
///
/// ```rust
/// use head_meta::{extract, Tokenizer};
///
/// let html = r#"<head><meta property="og:type" content="website"></head>"#;
/// let metadata = extract(&mut Tokenizer::new(html.as_bytes()))?;
/// assert_eq!(metadata.meta("og:type"), Some("website"));
/// # Ok::<(), head_meta::Error>(())
/// ```
pub fn extract<S: TokenSource + ?Sized>(source: &mut S) -> Result<HeadMetadata, S::Error> {
    HeadExtractor::new().run(source)
}
