//! Result types for head extraction output.
//!
//! This module defines the record built while walking the `<head>` of a
//! document and handed back once extraction terminates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Information attached to a `<link>` element.
///
/// `href` is only set when the attribute passed [`crate::is_valid_href`];
/// `link_type` and `title` are copied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Validated `href` attribute, empty if none was acceptable.
    #[serde(rename = "HREF")]
    pub href: String,

    /// Raw `type` attribute.
    #[serde(rename = "Type")]
    pub link_type: String,

    /// Raw `title` attribute.
    #[serde(rename = "Title")]
    pub title: String,
}

/// Metadata extracted from the `<head>` of an HTML document.
///
/// Every field starts empty. `links` and `metas` are always present, so
/// they serialize as (possibly empty) JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadMetadata {
    /// Text of the `<title>` element.
    pub title: String,

    /// Last valid `href` of a `<base>` element.
    pub base: String,

    /// Last `<meta charset>` value.
    pub charset: String,

    /// Links grouped by their `rel` attribute, in document order.
    pub links: BTreeMap<String, Vec<Link>>,

    /// Meta `content` values keyed by `property`, `name`, `http-equiv` or `itemprop`.
    pub metas: BTreeMap<String, String>,
}

impl HeadMetadata {
    /// Returns true when nothing at all was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.base.is_empty()
            && self.charset.is_empty()
            && self.links.is_empty()
            && self.metas.is_empty()
    }

    /// Links recorded under the relation `rel`, empty if there are none.
    #[must_use]
    pub fn links_for(&self, rel: &str) -> &[Link] {
        self.links.get(rel).map_or(&[], Vec::as_slice)
    }

    /// Meta content recorded under `property`.
    #[must_use]
    pub fn meta(&self, property: &str) -> Option<&str> {
        self.metas.get(property).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metadata_serializes_containers() {
        let value = serde_json::to_value(HeadMetadata::default()).expect("metadata serializes");
        assert_eq!(value["title"], "");
        assert!(value["links"].is_object());
        assert!(value["metas"].is_object());
    }

    #[test]
    fn test_link_wire_names() {
        let link = Link {
            href: "http://e.com/a".into(),
            link_type: "text/html".into(),
            title: "A".into(),
        };
        let json = serde_json::to_string(&link).expect("link serializes");
        assert_eq!(json, r#"{"HREF":"http://e.com/a","Type":"text/html","Title":"A"}"#);
    }

    #[test]
    fn test_accessors() {
        let mut metadata = HeadMetadata::default();
        assert!(metadata.is_empty());
        assert!(metadata.links_for("icon").is_empty());

        metadata.metas.insert("og:title".into(), "Hello".into());
        assert!(!metadata.is_empty());
        assert_eq!(metadata.meta("og:title"), Some("Hello"));
        assert_eq!(metadata.meta("og:type"), None);
    }
}
