//! An [`html5gum::Emitter`] that builds owned head-level events.
//!
//! html5gum's own emitters either drop duplicate attributes or report a tag
//! before the text preceding it, so this one collects tokens itself. Text is
//! only flushed when a real token is emitted, which keeps the tentative end
//! tags of RCDATA and raw text (`</b` inside `<title>`) part of the text run.

use std::collections::VecDeque;
use std::mem::take;

use html5gum::{naive_next_state, Emitter, Error as ParseError, State};

use crate::token::{Tag, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Start,
    End,
    SelfClosing,
}

/// A finished token, owned until the adapter hands out a borrow of it.
#[derive(Debug)]
pub(crate) enum Event {
    Tag {
        kind: TagKind,
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
    Doctype(String),
    /// A single token grew past the configured limit.
    BufferExceeded(usize),
}

impl Event {
    /// Borrow the event as a [`Token`]. `BufferExceeded` has no token form.
    pub(crate) fn as_token(&self) -> Option<Token<'_>> {
        Some(match self {
            Self::Tag { kind, name, attrs } => {
                let tag = Tag::new(name.as_str(), attrs.as_slice());
                match kind {
                    TagKind::Start => Token::StartTag(tag),
                    TagKind::End => Token::EndTag(tag),
                    TagKind::SelfClosing => Token::SelfClosingTag(tag),
                }
            }
            Self::Text(s) => Token::Text(s.as_str().into()),
            Self::Comment(s) => Token::Comment(s.as_str().into()),
            Self::Doctype(s) => Token::Doctype(s.as_str().into()),
            Self::BufferExceeded(_) => return None,
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct HeadEmitter {
    queue: VecDeque<Event>,
    text: Vec<u8>,
    /// Start or end, while a tag is being built.
    tag_kind: Option<TagKind>,
    self_closing: bool,
    tag_name: Vec<u8>,
    attrs: Vec<(String, String)>,
    attr: Option<(Vec<u8>, Vec<u8>)>,
    last_start_tag: Vec<u8>,
    comment: Vec<u8>,
    doctype: Vec<u8>,
    max_buffer: Option<usize>,
    /// Bytes held for the token being built, pending text included.
    buffered: usize,
    exceeded: bool,
}

impl HeadEmitter {
    pub(crate) fn new(max_buffer: Option<usize>) -> Self {
        Self {
            max_buffer,
            ..Self::default()
        }
    }

    /// Account for `len` more buffered bytes. Returns `false` once the
    /// limit is crossed; nothing is collected after that.
    fn reserve(&mut self, len: usize) -> bool {
        if self.exceeded {
            return false;
        }
        self.buffered += len;
        match self.max_buffer {
            Some(limit) if self.buffered > limit => {
                self.exceeded = true;
                self.queue.push_back(Event::BufferExceeded(limit));
                false
            }
            _ => true,
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = lossy(take(&mut self.text));
            self.queue.push_back(Event::Text(text));
        }
    }

    fn push_event(&mut self, event: Event) {
        if self.exceeded {
            return;
        }
        self.flush_text();
        self.queue.push_back(event);
        self.buffered = 0;
    }

    fn init_tag(&mut self, kind: TagKind) {
        self.tag_kind = Some(kind);
        self.self_closing = false;
        self.tag_name.clear();
        self.attrs.clear();
        self.attr = None;
    }

    fn finish_attribute(&mut self) {
        if let Some((name, value)) = self.attr.take() {
            if !name.is_empty() {
                self.attrs.push((lossy(name), lossy(value)));
            }
        }
    }
}

fn lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

impl Emitter for HeadEmitter {
    type Token = Event;

    fn set_last_start_tag(&mut self, last_start_tag: Option<&[u8]>) {
        self.last_start_tag.clear();
        self.last_start_tag.extend_from_slice(last_start_tag.unwrap_or_default());
    }

    fn emit_eof(&mut self) {
        if !self.exceeded {
            self.flush_text();
        }
    }

    fn emit_error(&mut self, _error: ParseError) {}

    fn should_emit_errors(&mut self) -> bool {
        false
    }

    fn pop_token(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    fn emit_string(&mut self, s: &[u8]) {
        if self.reserve(s.len()) {
            self.text.extend_from_slice(s);
        }
    }

    fn init_start_tag(&mut self) {
        self.init_tag(TagKind::Start);
    }

    fn init_end_tag(&mut self) {
        self.init_tag(TagKind::End);
    }

    fn init_comment(&mut self) {
        self.comment.clear();
    }

    fn emit_current_tag(&mut self) -> Option<State> {
        self.finish_attribute();
        let kind = self.tag_kind.take()?;
        let name = take(&mut self.tag_name);
        let mut attrs = take(&mut self.attrs);

        let (kind, next_state) = if kind == TagKind::Start {
            let next_state = naive_next_state(&name);
            self.last_start_tag.clone_from(&name);
            let kind = if self.self_closing { TagKind::SelfClosing } else { kind };
            (kind, next_state)
        } else {
            // Attributes on end tags carry no meaning.
            attrs.clear();
            self.last_start_tag.clear();
            (kind, None)
        };

        self.push_event(Event::Tag {
            kind,
            name: lossy(name),
            attrs,
        });
        next_state
    }

    fn emit_current_comment(&mut self) {
        let comment = lossy(take(&mut self.comment));
        self.push_event(Event::Comment(comment));
    }

    fn emit_current_doctype(&mut self) {
        let name = lossy(take(&mut self.doctype));
        self.push_event(Event::Doctype(name));
    }

    fn set_self_closing(&mut self) {
        if self.tag_kind == Some(TagKind::Start) {
            self.self_closing = true;
        }
    }

    fn set_force_quirks(&mut self) {}

    fn push_tag_name(&mut self, s: &[u8]) {
        if self.reserve(s.len()) {
            self.tag_name.extend_from_slice(s);
        }
    }

    fn push_comment(&mut self, s: &[u8]) {
        if self.reserve(s.len()) {
            self.comment.extend_from_slice(s);
        }
    }

    fn push_doctype_name(&mut self, s: &[u8]) {
        if self.reserve(s.len()) {
            self.doctype.extend_from_slice(s);
        }
    }

    fn init_doctype(&mut self) {
        self.doctype.clear();
    }

    fn init_attribute(&mut self) {
        self.finish_attribute();
        self.attr = Some((Vec::new(), Vec::new()));
    }

    fn push_attribute_name(&mut self, s: &[u8]) {
        if self.reserve(s.len()) {
            if let Some((name, _)) = &mut self.attr {
                name.extend_from_slice(s);
            }
        }
    }

    fn push_attribute_value(&mut self, s: &[u8]) {
        if self.reserve(s.len()) {
            if let Some((_, value)) = &mut self.attr {
                value.extend_from_slice(s);
            }
        }
    }

    fn set_doctype_public_identifier(&mut self, _value: &[u8]) {}

    fn set_doctype_system_identifier(&mut self, _value: &[u8]) {}

    fn push_doctype_public_identifier(&mut self, _value: &[u8]) {}

    fn push_doctype_system_identifier(&mut self, _value: &[u8]) {}

    fn current_is_appropriate_end_tag_token(&mut self) -> bool {
        self.tag_kind == Some(TagKind::End) && !self.last_start_tag.is_empty() && self.last_start_tag == self.tag_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_flushed_before_tag() {
        let mut emitter = HeadEmitter::new(None);
        emitter.emit_string(b"a ");
        emitter.init_start_tag();
        emitter.push_tag_name(b"title");
        assert_eq!(emitter.emit_current_tag(), Some(State::RcData));

        assert!(matches!(emitter.pop_token(), Some(Event::Text(s)) if s == "a "));
        assert!(matches!(emitter.pop_token(), Some(Event::Tag { kind: TagKind::Start, name, .. }) if name == "title"));
        assert!(emitter.pop_token().is_none());
    }

    #[test]
    fn test_appropriate_end_tag_follows_last_start_tag() {
        let mut emitter = HeadEmitter::new(None);
        emitter.set_last_start_tag(Some(b"title"));
        emitter.init_end_tag();
        emitter.push_tag_name(b"b");
        assert!(!emitter.current_is_appropriate_end_tag_token());

        emitter.init_end_tag();
        emitter.push_tag_name(b"title");
        assert!(emitter.current_is_appropriate_end_tag_token());
    }

    #[test]
    fn test_limit_reported_once() {
        let mut emitter = HeadEmitter::new(Some(4));
        emitter.emit_string(b"abc");
        emitter.emit_string(b"def");
        emitter.emit_string(b"ghi");
        emitter.emit_eof();

        assert!(matches!(emitter.pop_token(), Some(Event::BufferExceeded(4))));
        assert!(emitter.pop_token().is_none());
    }
}
