//! # tsu-action
//!
//! Actions for tsu: run middleware ahead of your own logic, then answer with
//! a response you fill in field by field.
//!
//! ## The contract
//!
//! An [`Action`] owns two things:
//!
//! - a [`HookChain`]: pre-hooks and [`Middleware`], run in the order they
//!   were registered, all sharing one mutable request [`Env`];
//! - a main-logic handler, `async fn(Request) -> impl IntoResponse`.
//!
//! The handler sets only what it cares about on a [`Response`]. Whatever it
//! leaves unset is filled in by [`Response::produce`]: status `200`, an
//! empty header map, an empty body. A bare string body is sent as one chunk,
//! never character by character.
//!
//! What this crate intentionally does not do: parse HTTP, own sockets, route
//! requests, persist sessions, or ship concrete middleware. Pass an
//! already-parsed request in with [`Request::from_http`] and take the result
//! out with [`into_http_response`].
//!
//! ## Quick start
//!
//! ```rust
//! use tsu_action::{Action, Env, Request, Response};
//!
//! # async fn run() -> Result<(), tsu_action::Error> {
//! let action = Action::new(greet)
//!     .middleware(|env: &mut Env| { env.insert("rack.session.user", "alice"); });
//!
//! let (status, headers, body) = action.call(Request::default()).await?;
//! assert_eq!(status, 200);
//! assert!(headers.is_empty());
//! assert_eq!(body, ["Hi alice!"]);
//! # Ok(())
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(run()).unwrap();
//!
//! async fn greet(req: Request) -> Response {
//!     let user = req.env().get("rack.session.user").unwrap_or("stranger");
//!     let mut res = Response::new();
//!     res.set_body(format!("Hi {user}!"));
//!     res
//! }
//! ```

mod action;
mod error;
mod handler;
mod headers;
mod hook;
mod request;
mod response;
mod transport;

pub mod env;
pub mod middleware;

pub use action::Action;
pub use env::Env;
pub use error::{BoxError, Error};
pub use handler::Handler;
pub use headers::Headers;
pub use hook::{HookChain, HookOutcome};
pub use middleware::Middleware;
pub use request::Request;
pub use response::{Body, ContentType, DEFAULT_STATUS, IntoResponse, Response, Triple};
pub use transport::into_http_response;
