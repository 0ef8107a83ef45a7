//! Handing a finished triple to an `http`-based server.
//!
//! This is where status and header legality is finally enforced. The
//! assembler passes anything through; a value that cannot go on the wire is
//! dealt with here and logged, so one bad header never takes the whole
//! response down.

use bytes::{Bytes, BytesMut};
use http::{HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;
use tracing::{error, warn};

use crate::response::Triple;

/// Converts a produced triple into an `http::Response` ready for hyper.
///
/// - A status outside `100..=999` becomes `500 Internal Server Error`.
/// - A header with an illegal name or value is dropped.
/// - Body chunks are concatenated in order.
pub fn into_http_response((status, headers, body): Triple) -> http::Response<Full<Bytes>> {
    let status = StatusCode::from_u16(status).unwrap_or_else(|_| {
        error!(status, "invalid status code, sending 500");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut res = http::Response::new(Full::new(concat(body)));
    *res.status_mut() = status;

    let map = res.headers_mut();
    for (name, value) in headers {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) else {
            warn!(header = %name, "dropping header that is not valid on the wire");
            continue;
        };
        map.append(name, value);
    }
    res
}

fn concat(chunks: Vec<Bytes>) -> Bytes {
    match chunks.len() {
        0 => Bytes::new(),
        1 => chunks.into_iter().next().unwrap_or_default(),
        _ => {
            let mut buf = BytesMut::with_capacity(chunks.iter().map(Bytes::len).sum());
            for chunk in &chunks {
                buf.extend_from_slice(chunk);
            }
            buf.freeze()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;
    use http_body_util::BodyExt;

    async fn body_of(res: http::Response<Full<Bytes>>) -> Bytes {
        res.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn chunks_are_written_in_order() {
        let mut res = Response::new();
        res.set_status(201u16);
        res.set_header("location", "/a");
        res.set_body(["one,", "two,", "three"]);

        let http = into_http_response(res.produce());
        assert_eq!(http.status(), StatusCode::CREATED);
        assert_eq!(http.headers()["location"], "/a");
        assert_eq!(body_of(http).await, "one,two,three");
    }

    #[tokio::test]
    async fn defaults_become_empty_200() {
        let http = into_http_response(Response::new().produce());
        assert_eq!(http.status(), StatusCode::OK);
        assert!(http.headers().is_empty());
        assert!(body_of(http).await.is_empty());
    }

    #[test]
    fn invalid_status_becomes_500() {
        let http = into_http_response(Response::with_status(42u16).produce());
        assert_eq!(http.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_headers_are_dropped() {
        let mut res = Response::new();
        res.headers_mut().append("bad name", "x");
        res.headers_mut().append("x-ok", "fine");
        res.headers_mut().append("x-bad-value", "line\nbreak");

        let http = into_http_response(res.produce());
        assert_eq!(http.headers().len(), 1);
        assert_eq!(http.headers()["x-ok"], "fine");
    }

    #[test]
    fn repeated_headers_survive() {
        let mut res = Response::new();
        res.headers_mut().append("set-cookie", "a=1");
        res.headers_mut().append("set-cookie", "b=2");

        let http = into_http_response(res.produce());
        let cookies: Vec<_> = http.headers().get_all("set-cookie").iter().collect();
        assert_eq!(cookies, ["a=1", "b=2"]);
    }
}
