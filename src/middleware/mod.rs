//! Middleware adaptation.
//!
//! Middleware here is anything that can look at (and change) the raw
//! request [`Env`] before an action's main logic runs: session loading,
//! request-id injection, authentication-header inspection. The crate ships
//! no concrete middleware; it only turns yours into a pre-hook.
//!
//! ```rust
//! use tsu_action::{Action, Env, Middleware, Request, Response};
//! use tsu_action::middleware::BoxError;
//!
//! struct RequestId;
//!
//! impl Middleware for RequestId {
//!     fn call(&self, env: &mut Env) -> Result<(), BoxError> {
//!         if !env.contains_key("HTTP_X_REQUEST_ID") {
//!             env.insert("HTTP_X_REQUEST_ID", "generated");
//!         }
//!         Ok(())
//!     }
//! }
//!
//! async fn show(req: Request) -> Response {
//!     Response::text(req.header("x-request-id").unwrap_or_default())
//! }
//!
//! let action = Action::new(show)
//!     .middleware(RequestId)
//!     .middleware(|env: &mut Env| { env.insert("rack.session", "{}"); });
//! assert_eq!(action.hooks().len(), 2);
//! ```

use std::sync::Arc;

use crate::env::Env;
use crate::hook::{BoxedHook, HookOutcome};
use crate::request::Request;

pub use crate::error::BoxError;

// ── Middleware trait ──────────────────────────────────────────────────────────

/// A request pre-processor over the raw environment.
///
/// Implemented automatically for closures `Fn(&mut Env) -> R` where `R` is
/// `()` or any `Result<T, E>` with `E: Into<BoxError>`. Construct and
/// configure the middleware yourself before registering it; registration
/// only stores it.
pub trait Middleware: Send + Sync + 'static {
    /// Called once per request with the shared environment. An `Err` stops
    /// the remaining hooks and the action's main logic.
    fn call(&self, env: &mut Env) -> Result<(), BoxError>;

    /// Name used in logs and in [`Error::name`](crate::Error::name).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F, R> Middleware for F
where
    F: Fn(&mut Env) -> R + Send + Sync + 'static,
    R: HookOutcome,
{
    fn call(&self, env: &mut Env) -> Result<(), BoxError> {
        self(env).into_outcome()
    }
}

// ── Named closures ────────────────────────────────────────────────────────────

/// A closure middleware with an explicit name. See [`from_fn`].
pub struct FromFn<F> {
    name: &'static str,
    f: F,
}

/// Wraps a closure so it shows up under `name` in logs and errors instead of
/// its compiler-generated type name.
pub fn from_fn<F, R>(name: &'static str, f: F) -> FromFn<F>
where
    F: Fn(&mut Env) -> R + Send + Sync + 'static,
    R: HookOutcome,
{
    FromFn { name, f }
}

impl<F, R> Middleware for FromFn<F>
where
    F: Fn(&mut Env) -> R + Send + Sync + 'static,
    R: HookOutcome,
{
    fn call(&self, env: &mut Env) -> Result<(), BoxError> {
        (self.f)(env).into_outcome()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Turns `middleware` into a hook that performs exactly
/// `middleware.call(req.env_mut())`.
///
/// The middleware is moved into the hook, so it lives exactly as long as
/// the action that registered it. Nothing is returned to the executor but
/// the failure, if any.
pub(crate) fn adapt(middleware: impl Middleware) -> BoxedHook {
    Arc::new(move |req: &mut Request| middleware.call(req.env_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(Arc<AtomicUsize>);

    impl Middleware for Counter {
        fn call(&self, env: &mut Env) -> Result<(), BoxError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            env.insert("counter.calls", n.to_string());
            Ok(())
        }
    }

    #[test]
    fn adapted_hook_passes_the_environment() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hook = adapt(Counter(Arc::clone(&calls)));

        let mut req = Request::default();
        hook(&mut req).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(req.env().get("counter.calls"), Some("1"));
    }

    #[test]
    fn closure_errors_propagate() {
        let hook = adapt(|_: &mut Env| Err::<(), _>("no session store"));
        let err = hook(&mut Request::default()).unwrap_err();
        assert_eq!(err.to_string(), "no session store");
    }

    #[test]
    fn names() {
        assert_eq!(from_fn("auth", |_: &mut Env| {}).name(), "auth");
        assert!(Counter(Arc::default()).name().ends_with("Counter"));
    }
}
