//! Response assembly and the [`IntoResponse`] conversion trait.
//!
//! An action never builds the wire-level response itself. It calls the
//! setters it cares about on a [`Response`] and leaves the rest unset;
//! [`Response::produce`] fills the gaps so the result is always a complete
//! [`Triple`].

use bytes::Bytes;
use http::StatusCode;
use tracing::trace;

use crate::headers::Headers;

/// Status used when the action never calls [`Response::set_status`].
pub const DEFAULT_STATUS: u16 = 200;

/// The finished response: status, headers, body chunks in write order.
pub type Triple = (u16, Headers, Vec<Bytes>);

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`Response::set_content_type`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    Csv,
    EventStream,
    FormData,
    Html,
    Json,
    OctetStream,
    Text,
    Xml,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv         => "text/csv",
            Self::EventStream => "text/event-stream",
            Self::FormData    => "application/x-www-form-urlencoded",
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Body ─────────────────────────────────────────────────────────────────────

/// A value assigned with [`Response::set_body`].
///
/// Strings and byte buffers convert to [`Body::Single`]; vectors and arrays of
/// them convert to [`Body::Sequence`]. A single value is always sent as one
/// chunk, never split into characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Single(Bytes),
    Sequence(Vec<Bytes>),
}

impl Body {
    /// The normalized chunk list.
    pub fn into_chunks(self) -> Vec<Bytes> {
        match self {
            Self::Single(chunk) => vec![chunk],
            Self::Sequence(chunks) => chunks,
        }
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self { Self::Single(b) }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Self { Self::Single(b.into()) }
}

impl From<&[u8]> for Body {
    fn from(b: &[u8]) -> Self { Self::Single(Bytes::copy_from_slice(b)) }
}

impl From<String> for Body {
    fn from(s: String) -> Self { Self::Single(s.into()) }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self { Self::Single(Bytes::copy_from_slice(s.as_bytes())) }
}

impl From<Vec<Bytes>> for Body {
    fn from(chunks: Vec<Bytes>) -> Self { Self::Sequence(chunks) }
}

impl From<Vec<String>> for Body {
    fn from(chunks: Vec<String>) -> Self {
        Self::Sequence(chunks.into_iter().map(Bytes::from).collect())
    }
}

impl From<Vec<&str>> for Body {
    fn from(chunks: Vec<&str>) -> Self {
        Self::Sequence(chunks.into_iter().map(|s| Bytes::copy_from_slice(s.as_bytes())).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Body {
    fn from(chunks: [&str; N]) -> Self {
        Self::Sequence(chunks.iter().map(|s| Bytes::copy_from_slice(s.as_bytes())).collect())
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// Per-request response state.
///
/// ```rust
/// use tsu_action::Response;
///
/// let mut res = Response::new();
/// res.set_status(201u16);
/// res.headers_mut().insert("location", "/users/42");
/// res.set_body("created");
///
/// let (status, headers, body) = res.produce();
/// assert_eq!(status, 201);
/// assert_eq!(headers.get("location"), Some("/users/42"));
/// assert_eq!(body, ["created"]);
/// ```
///
/// One value belongs to one request. If a framework keeps `Response`s around
/// for reuse, it must call [`reset`](Response::reset) before the next request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    status: Option<u16>,
    headers: Headers,
    body: Option<Vec<Bytes>>,
}

impl Response {
    /// A response with nothing set: produces `(200, {}, [])`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut: `text/plain` body, status left unset.
    pub fn text(body: impl Into<String>) -> Self {
        let mut res = Self::new();
        res.set_content_type(ContentType::Text);
        res.set_body(body.into());
        res
    }

    /// Shortcut: `application/json` body, status left unset.
    pub fn json(body: Vec<u8>) -> Self {
        let mut res = Self::new();
        res.set_content_type(ContentType::Json);
        res.set_body(body);
        res
    }

    /// Shortcut: status only, no body.
    pub fn with_status(code: impl Into<u16>) -> Self {
        let mut res = Self::new();
        res.set_status(code);
        res
    }

    /// Stores `code` verbatim. Any `u16` is accepted, including ones that are
    /// not registered HTTP statuses.
    pub fn set_status(&mut self, code: impl Into<u16>) {
        self.status = Some(code.into());
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Stores the body, wrapping a single value into a one-chunk sequence.
    pub fn set_body(&mut self, value: impl Into<Body>) {
        self.body = Some(value.into().into_chunks());
    }

    pub fn body(&self) -> Option<&[Bytes]> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable access to the owned header mapping. Changes made here show up
    /// in every later [`produce`](Response::produce).
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name, value);
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.headers.insert("content-type", content_type.as_str());
    }

    /// Assembles the final triple. Unset status becomes [`DEFAULT_STATUS`];
    /// an unset body becomes a new empty `Vec` on every call.
    pub fn produce(&self) -> Triple {
        let status = self.status.unwrap_or(DEFAULT_STATUS);
        let body = self.body.clone().unwrap_or_default();
        trace!(status, headers = self.headers.len(), chunks = body.len(), "response produced");
        (status, self.headers.clone(), body)
    }

    /// Like [`produce`](Response::produce) but moves the fields out.
    pub fn into_triple(self) -> Triple {
        (
            self.status.unwrap_or(DEFAULT_STATUS),
            self.headers,
            self.body.unwrap_or_default(),
        )
    }

    /// Returns every field to its unset state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion of a handler's return value into a [`Response`].
///
/// Implement on your own types to return them directly from handlers.
///
/// ```rust,ignore
/// use tsu_action::{IntoResponse, Response};
/// use serde::Serialize;
///
/// struct Json<T: Serialize>(T);
///
/// impl<T: Serialize> IntoResponse for Json<T> {
///     fn into_response(self) -> Response {
///         match serde_json::to_vec(&self.0) {
///             Ok(bytes) => Response::json(bytes),
///             Err(_)    => Response::with_status(500u16),
///         }
///     }
/// }
/// ```
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a status directly from a handler: `return StatusCode::NOT_FOUND`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::with_status(self) }
}

/// A handler that returns nothing gets the all-defaults response.
impl IntoResponse for () {
    fn into_response(self) -> Response { Response::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let (status, headers, body) = Response::new().produce();
        assert_eq!(status, 200);
        assert!(headers.is_empty());
        assert!(body.is_empty());
    }

    #[test]
    fn status_is_stored_verbatim() {
        let mut res = Response::new();
        res.set_status(201u16);
        assert_eq!(res.produce().0, 201);

        res.set_status(999u16);
        assert_eq!(res.produce().0, 999);

        res.set_status(StatusCode::IM_A_TEAPOT);
        assert_eq!(res.status(), Some(418));
    }

    #[test]
    fn single_string_is_wrapped_not_split() {
        let mut res = Response::new();
        res.set_body("Hi!");
        assert_eq!(res.produce().2, ["Hi!"]);
    }

    #[test]
    fn sequence_is_stored_as_is() {
        let mut res = Response::new();
        res.set_body(["a", "b"]);
        assert_eq!(res.produce().2, ["a", "b"]);

        res.set_body(vec!["x".to_owned(), "y".to_owned(), "z".to_owned()]);
        assert_eq!(res.produce().2, ["x", "y", "z"]);
    }

    #[test]
    fn byte_buffer_is_a_single_chunk() {
        let mut res = Response::new();
        res.set_body(vec![1u8, 2, 3]);
        assert_eq!(res.body(), Some(&[Bytes::from_static(&[1, 2, 3])][..]));
    }

    #[test]
    fn empty_sequence_is_kept_empty() {
        let mut res = Response::new();
        res.set_body(Vec::<Bytes>::new());
        assert_eq!(res.body(), Some(&[][..]));
        assert!(res.produce().2.is_empty());
    }

    #[test]
    fn produce_is_repeatable() {
        let mut res = Response::new();
        res.set_status(204u16);
        assert_eq!(res.produce(), res.produce());
    }

    #[test]
    fn defaulted_body_is_a_fresh_vec_each_call() {
        let res = Response::new();
        let (_, _, mut first) = res.produce();
        first.push(Bytes::from_static(b"leak"));

        let (_, _, second) = res.produce();
        assert!(second.is_empty());
        assert_eq!(res.body(), None);
    }

    #[test]
    fn header_mutation_is_visible_in_produce() {
        let mut res = Response::new();
        res.headers_mut().insert("x-trace", "1");
        assert_eq!(res.produce().1.get("x-trace"), Some("1"));

        res.headers_mut().remove("x-trace");
        assert!(res.produce().1.is_empty());
    }

    #[test]
    fn setters_are_independent() {
        let mut res = Response::new();
        res.set_body("only a body");
        let (status, headers, body) = res.produce();
        assert_eq!(status, 200);
        assert!(headers.is_empty());
        assert_eq!(body, ["only a body"]);
    }

    #[test]
    fn shortcuts_set_content_type() {
        let res = Response::text("hello");
        assert_eq!(res.headers().get("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.status(), None);

        let res = Response::json(br#"{"id":1}"#.to_vec());
        assert_eq!(res.headers().get("content-type"), Some("application/json"));
    }

    #[test]
    fn reset_clears_every_field() {
        let mut res = Response::text("stale");
        res.set_status(500u16);
        res.reset();
        assert_eq!(res, Response::new());
        assert_eq!(res.produce(), (200, Headers::new(), Vec::new()));
    }

    #[test]
    fn into_triple_matches_produce() {
        let mut res = Response::with_status(StatusCode::CREATED);
        res.set_header("location", "/a");
        let expected = res.produce();
        assert_eq!(res.into_triple(), expected);
    }

    #[test]
    fn into_response_conversions() {
        assert_eq!(().into_response(), Response::new());
        assert_eq!(StatusCode::NOT_FOUND.into_response().status(), Some(404));
        assert_eq!("hi".into_response().produce().2, ["hi"]);
    }
}
