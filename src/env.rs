//! The request environment handed to middleware.
//!
//! Keys follow the CGI convention every Rack-style middleware already
//! understands: `REQUEST_METHOD`, `PATH_INFO`, `QUERY_STRING`,
//! `SERVER_PROTOCOL`, `CONTENT_TYPE`, `CONTENT_LENGTH`, and one `HTTP_<NAME>`
//! entry per request header. Middleware that needs to hand typed data to the
//! action (a loaded session, an authenticated user) puts it in
//! [`extensions_mut`](Env::extensions_mut) instead of stringifying it.

use std::borrow::Cow;
use std::collections::HashMap;

use http::Extensions;
use http::header::COOKIE;
use http::request::Parts;
use tracing::warn;

pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const PATH_INFO: &str = "PATH_INFO";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";

/// Raw transport-level request data, shared mutably by every hook of a request.
#[derive(Debug, Default)]
pub struct Env {
    vars: HashMap<String, String>,
    extensions: Extensions,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the environment from already-parsed request head parts.
    ///
    /// Repeated headers are joined under a single key: `cookie` fragments with
    /// `"; "`, everything else with `", "`. Values that are not valid UTF-8
    /// are kept with the offending bytes replaced by `U+FFFD`.
    pub fn from_parts(parts: &Parts) -> Self {
        let mut env = Self::new();
        env.insert(REQUEST_METHOD, parts.method.as_str());
        env.insert(PATH_INFO, parts.uri.path());
        env.insert(QUERY_STRING, parts.uri.query().unwrap_or(""));
        env.insert(SERVER_PROTOCOL, format!("{:?}", parts.version));

        for (name, value) in &parts.headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            if matches!(value, Cow::Owned(_)) {
                warn!(header = %name, "header value is not valid UTF-8, kept lossily");
            }
            let separator = if *name == COOKIE { "; " } else { ", " };
            env.vars
                .entry(header_key(name.as_str()))
                .and_modify(|existing| {
                    existing.push_str(separator);
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }
        env
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Sets `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Looks up a request header by its HTTP name, e.g. `"x-request-id"`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.get(&header_key(name))
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            extensions: Extensions::new(),
        }
    }
}

/// `content-type` and `content-length` keep their CGI names without the
/// `HTTP_` prefix; every other header becomes `HTTP_<UPPER_SNAKE>`.
fn header_key(name: &str) -> String {
    let upper = name.to_ascii_uppercase().replace('-', "_");
    match upper.as_str() {
        CONTENT_TYPE | CONTENT_LENGTH => upper,
        _ => format!("HTTP_{upper}"),
    }
}
