//! Minimal tsu-action example: middleware ahead of an action, then the
//! assembled response handed to `http` types.
//!
//! Run with:
//!   cargo run --example basic

use bytes::Bytes;
use tsu_action::middleware::{self, BoxError};
use tsu_action::{Action, Env, Middleware, Request, Response, into_http_response};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let action = Action::new(show_user)
        .middleware(RequestId)
        .middleware(middleware::from_fn("session", load_session));

    for cookie in ["sid=alice", "sid=unknown"] {
        let req = Request::from_http(
            http::Request::get("/users/me")
                .header("cookie", cookie)
                .body(Bytes::new())
                .expect("valid request"),
        );

        match action.call(req).await {
            Ok(triple) => {
                let res = into_http_response(triple);
                println!("{cookie}: {} {:?}", res.status(), res.headers());
            }
            Err(e) => println!("{cookie}: rejected: {e}"),
        }
    }
}

// Adds an `x-request-id` header to the environment if the client sent none.
struct RequestId;

impl Middleware for RequestId {
    fn call(&self, env: &mut Env) -> Result<(), BoxError> {
        if env.header("x-request-id").is_none() {
            env.insert("HTTP_X_REQUEST_ID", "req-1");
        }
        Ok(())
    }
}

#[derive(Clone)]
struct Session {
    user: &'static str,
}

// Real app: look the session id up in a store.
fn load_session(env: &mut Env) -> Result<(), BoxError> {
    match env.header("cookie") {
        Some("sid=alice") => {
            env.extensions_mut().insert(Session { user: "alice" });
            Ok(())
        }
        Some(other) => Err(format!("no session for `{other}`").into()),
        None => Ok(()),
    }
}

// GET /users/me
async fn show_user(req: Request) -> Response {
    let mut res = Response::new();
    if let Some(id) = req.header("x-request-id") {
        res.set_header("x-request-id", id);
    }
    match req.env().extensions().get::<Session>() {
        Some(session) => res.set_body(format!(r#"{{"user":"{}"}}"#, session.user)),
        None => res.set_status(401u16),
    }
    res
}
