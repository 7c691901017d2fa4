//! Lexical HTML tokens and the pull interface the extractor consumes.
//!
//! A [`TokenSource`] hands out one [`Token`] at a time. Tag tokens borrow
//! from the source, so a tag and its attribute iterator are only usable
//! until the next token is pulled.

use std::borrow::Cow;

/// A lexical unit of HTML.
///
/// End of input and tokenizer errors are not variants: a source reports
/// them as `Ok(None)` and `Err(_)` from [`TokenSource::next_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name ...>`
    StartTag(Tag<'a>),
    /// `</name ...>`
    EndTag(Tag<'a>),
    /// `<name .../>`
    SelfClosingTag(Tag<'a>),
    /// A run of text with character references decoded (except raw text).
    Text(Cow<'a, str>),
    /// `<!-- ... -->` and bogus comments.
    Comment(Cow<'a, str>),
    /// `<!DOCTYPE ...>`
    Doctype(Cow<'a, str>),
}

/// A lazy, pull-based sequence of tokens.
pub trait TokenSource {
    /// Error reported by the underlying tokenizer.
    type Error;

    /// Pull the next token, `Ok(None)` at end of input.
    fn next_token(&mut self) -> Result<Option<Token<'_>>, Self::Error>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    type Error = S::Error;

    fn next_token(&mut self) -> Result<Option<Token<'_>>, Self::Error> {
        (**self).next_token()
    }
}

/// Name and attributes of a tag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    name: Cow<'a, str>,
    attrs: Cow<'a, [(String, String)]>,
}

impl<'a> Tag<'a> {
    /// Build a tag from its name and its `(key, value)` attribute pairs.
    ///
    /// The name is ASCII-lowercased. Values are taken as given: the
    /// tokenizer has already decoded character references in them.
    ///
    /// ```rust
    /// use head_meta::Tag;
    ///
    /// let attrs = vec![("name".to_string(), "description".to_string())];
    /// let tag = Tag::new("META", attrs);
    /// assert_eq!(tag.name(), "meta");
    /// let pairs: Vec<_> = tag.attributes().map(|a| (a.key, a.value)).collect();
    /// assert_eq!(pairs.len(), 1);
    /// ```
    pub fn new(name: impl Into<Cow<'a, str>>, attrs: impl Into<Cow<'a, [(String, String)]>>) -> Self {
        Self {
            name: lowercase(name.into()),
            attrs: attrs.into(),
        }
    }

    /// Lowercased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the tag carries at least one attribute.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attrs.is_empty()
    }

    /// Attributes in source order, duplicates included.
    #[must_use]
    pub fn attributes(&self) -> Attributes<'_> {
        Attributes { inner: self.attrs.iter() }
    }
}

/// One `key="value"` pair of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'t> {
    /// Lowercased attribute name.
    pub key: Cow<'t, str>,
    /// Value with character references decoded, empty when the attribute has none.
    pub value: Cow<'t, str>,
}

/// Forward-only iterator over the attributes of a [`Tag`].
#[derive(Debug, Clone)]
pub struct Attributes<'t> {
    inner: std::slice::Iter<'t, (String, String)>,
}

impl<'t> Iterator for Attributes<'t> {
    type Item = Attribute<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| Attribute {
            key: lowercase(Cow::Borrowed(key.as_str())),
            value: Cow::Borrowed(value.as_str()),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

fn lowercase(s: Cow<'_, str>) -> Cow<'_, str> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        s
    }
}
