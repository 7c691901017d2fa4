//! Request/response adaptation.
//!
//! Framework-agnostic handlers that take the HTML (or the URL of a
//! document) out of an inbound request and answer with the extracted
//! metadata as JSON. Wiring them into an actual HTTP server means converting
//! that server's request into a [`Request`] and writing the [`Response`]
//! back.
//!
//! Status codes: `400` when the request carries no usable input, `502` when
//! the fetched upstream document is unusable, `500` when serialization
//! fails.

use crate::result::HeadMetadata;
use crate::Options;

/// The parts of an inbound HTTP request the handlers look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Build a request from a query string and a body.
    pub fn new(query: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            query: query.map(str::to_string),
            body: body.into(),
        }
    }

    /// First value of the query parameter `name`, percent-decoded.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// An outbound HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Plain-text error response.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: format!("{message}\n").into_bytes(),
        }
    }

    /// Body as text, lossily decoded.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Reads the URL from the `url` query parameter, falling back to the body.
#[must_use]
pub fn url_from_request(request: &Request) -> String {
    match request.query_param("url") {
        Some(url) if !url.is_empty() => url,
        _ => String::from_utf8_lossy(&request.body).trim().to_string(),
    }
}

/// Reads the HTML from the request body.
#[must_use]
pub fn html_from_request(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

/// Serializes `metadata` as a `200 application/json` response.
#[must_use]
pub fn write_response(metadata: &HeadMetadata) -> Response {
    match serde_json::to_vec(metadata) {
        Ok(body) => Response {
            status: 200,
            content_type: "application/json",
            body,
        },
        Err(err) => {
            tracing::error!(error = %err, "serializing metadata failed");
            Response::error(500, &err.to_string())
        }
    }
}

/// Answers with the metadata of the HTML carried by the request.
#[derive(Debug, Clone)]
pub struct HtmlHandler {
    /// Options for the tokenizer.
    pub options: Options,
    /// Extracts the HTML from a request.
    pub get_html: fn(&Request) -> String,
    /// Turns the metadata into a response.
    pub write_response: fn(&HeadMetadata) -> Response,
}

impl Default for HtmlHandler {
    fn default() -> Self {
        Self {
            options: Options::default(),
            get_html: html_from_request,
            write_response,
        }
    }
}

impl HtmlHandler {
    /// Handle one request.
    #[must_use]
    pub fn handle(&self, request: &Request) -> Response {
        let html = (self.get_html)(request);
        if html.is_empty() {
            return Response::error(400, "html string not found in request");
        }

        match crate::parse_reader_with_options(html.as_bytes(), &self.options) {
            Ok(metadata) => (self.write_response)(&metadata),
            Err(err) => {
                tracing::debug!(error = %err, "rejecting html request");
                Response::error(400, &err.to_string())
            }
        }
    }
}

/// Answers with the metadata of the document at the URL carried by the
/// request.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct UrlHandler {
    /// Options for fetching and tokenizing.
    pub options: Options,
    /// Client used for fetching; a client honoring `options.timeout` is
    /// built per request when unset.
    pub client: Option<reqwest::blocking::Client>,
    /// Extracts the URL from a request.
    pub get_url: fn(&Request) -> String,
    /// Turns the metadata into a response.
    pub write_response: fn(&HeadMetadata) -> Response,
}

#[cfg(feature = "fetch")]
impl Default for UrlHandler {
    fn default() -> Self {
        Self {
            options: Options::default(),
            client: None,
            get_url: url_from_request,
            write_response,
        }
    }
}

#[cfg(feature = "fetch")]
impl UrlHandler {
    /// Handle one request.
    #[must_use]
    pub fn handle(&self, request: &Request) -> Response {
        let url = (self.get_url)(request);
        if url.is_empty() {
            return Response::error(400, "url not found in request");
        }

        let result = match &self.client {
            Some(client) => url::Url::parse(&url)
                .map_err(crate::Error::from)
                .and_then(|parsed| crate::fetch::process_url_with_client(client, parsed, &self.options)),
            None => crate::fetch::process_url(&url, &self.options),
        };

        match result {
            Ok(metadata) => (self.write_response)(&metadata),
            Err(err) => {
                let status = err.status_code();
                tracing::debug!(%url, status, error = %err, "url request failed");
                Response::error(status, &err.to_string())
            }
        }
    }
}
