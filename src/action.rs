//! Actions: pre-hooks plus main logic.
//!
//! An [`Action`] is defined once, at startup, and shared across every
//! request it serves. Per request, [`Action::call`]:
//!
//! 1. runs the [`HookChain`] (middleware included) in registration order,
//! 2. runs the main-logic handler, which returns its [`Response`](crate::Response),
//! 3. calls [`produce`](crate::Response::produce) on that response exactly
//!    once; the stored handler does this, not the caller.
//!
//! Request and response state are moved through the call, never stored on
//! the action, so concurrent requests cannot see each other's state.

use std::fmt;

use tracing::debug;

use crate::error::Error;
use crate::handler::{Handler, Responder};
use crate::hook::{HookChain, HookOutcome};
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::Triple;

/// A request-handling unit.
///
/// ```rust
/// use tsu_action::{Action, Env, Request, Response};
///
/// async fn create(req: Request) -> Response {
///     let mut res = Response::new();
///     res.set_status(201u16);
///     res.headers_mut().insert("location", "/users/99");
///     res.set_body(req.env().get("rack.session").unwrap_or("none").to_owned());
///     res
/// }
///
/// let action = Action::new(create)
///     .middleware(|env: &mut Env| { env.insert("rack.session", "alice"); });
/// ```
pub struct Action {
    hooks: HookChain,
    handler: Responder,
}

impl Action {
    pub fn new(handler: impl Handler) -> Self {
        Self { hooks: HookChain::new(), handler: handler.into_responder() }
    }

    /// Registers `middleware` as the next pre-hook. Returns `self` for chaining.
    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.hooks.register_middleware(middleware);
        self
    }

    /// Registers a pre-hook over the whole request context.
    pub fn before<F, R>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: HookOutcome,
    {
        self.hooks.register_pre_hook(hook);
        self
    }

    pub fn hooks(&self) -> &HookChain {
        &self.hooks
    }

    /// Handles one request and returns the finished response triple.
    ///
    /// A failing pre-hook aborts the request: the handler does not run and
    /// the hook's error is returned.
    pub async fn call(&self, mut req: Request) -> Result<Triple, Error> {
        self.hooks.run(&mut req)?;
        debug!(
            method = req.method(),
            path = req.path(),
            handler = self.handler.name(),
            "pre-hooks done, running action"
        );
        Ok(self.handler.respond(req).await)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("hooks", &self.hooks)
            .field("handler", &self.handler.name())
            .finish()
    }
}
