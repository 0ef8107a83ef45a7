//! Incoming request context.

use std::collections::HashMap;

use bytes::Bytes;

use crate::env::{self, Env};

/// The in-flight request an action's hooks and main logic operate on.
///
/// Everything middleware sees lives in the [`Env`]; path params and the body
/// are carried alongside for the action's own use.
#[derive(Debug, Default)]
pub struct Request {
    env: Env,
    params: HashMap<String, String>,
    body: Bytes,
}

impl Request {
    pub fn new(env: Env, params: HashMap<String, String>, body: Bytes) -> Self {
        Self { env, params, body }
    }

    /// Adapts an already-parsed `http::Request` whose body has been collected.
    pub fn from_http(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(Env::from_parts(&parts), HashMap::new(), body)
    }

    /// Attaches path params resolved by whatever routed the request here.
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn env(&self) -> &Env { &self.env }
    pub fn env_mut(&mut self) -> &mut Env { &mut self.env }
    pub fn body(&self) -> &[u8] { &self.body }

    pub fn method(&self) -> &str { self.env.get(env::REQUEST_METHOD).unwrap_or("") }
    pub fn path(&self) -> &str { self.env.get(env::PATH_INFO).unwrap_or("") }
    pub fn query(&self) -> &str { self.env.get(env::QUERY_STRING).unwrap_or("") }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.env.header(name)
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
