//! Main-logic handlers and how an action stores them.
//!
//! # From an `async fn` to a finished triple
//!
//! An [`Action`](crate::Action) can wrap any main-logic function, so the
//! concrete function type is erased behind one trait object, [`Respond`].
//! The erased value owns the whole tail of a request: it runs the main
//! logic, converts whatever came back into a [`Response`](crate::Response), and calls
//! [`Response::produce`](crate::Response::produce) exactly once. The executor never touches response
//! state itself.
//!
//! ```text
//! async fn show(req: Request) -> Response { … }   ← user writes this
//!        ↓ Action::new(show)
//! show.into_responder()                          ← Handler blanket impl
//!        ↓
//! Arc::new(MainLogic { f: show, name })          ← stored as Responder
//!        ↓
//! responder.respond(req) per request             ← one vtable dispatch
//!        ↓
//! show(req).await.into_response().produce()      ← the Triple
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::request::Request;
use crate::response::{IntoResponse, Triple};

// ── Erased form ───────────────────────────────────────────────────────────────

/// A boxed future that resolves to the produced [`Triple`].
///
/// `Send + 'static` so a caller on a multi-threaded runtime can move the
/// request across worker threads.
pub(crate) type TripleFuture = Pin<Box<dyn Future<Output = Triple> + Send + 'static>>;

/// Type-erased main logic: request in, produced triple out.
#[doc(hidden)]
pub trait Respond {
    fn respond(&self, req: Request) -> TripleFuture;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// Shared by every request the action serves; one atomic increment per
/// request is the only cost of sharing.
#[doc(hidden)]
pub type Responder = Arc<dyn Respond + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid main-logic function.
///
/// You never implement this yourself. It is satisfied by any function or
/// closure shaped like:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The return value only decides the response *state*; defaults for
/// anything left unset are filled in afterwards by
/// [`Response::produce`](crate::Response::produce).
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_responder(self) -> Responder;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_responder(self) -> Responder {
        Arc::new(MainLogic { f: self, name: std::any::type_name::<F>() })
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

struct MainLogic<F> {
    f: F,
    name: &'static str,
}

impl<F, Fut, R> Respond for MainLogic<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn respond(&self, req: Request) -> TripleFuture {
        let name = self.name;
        let fut = (self.f)(req);
        Box::pin(async move {
            let response = fut.await.into_response();
            debug!(handler = name, "main logic done, producing response");
            response.produce()
        })
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
