use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};

/// Methods the server answers; sent back in `Allow` on 405 responses.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Produces the response for `req`. Total over every method.
///
/// - GET greets the target with its leading `/` removed.
/// - HEAD advertises the request's own `Content-Length` (or `0`) without a body.
/// - Everything else is 405 with an `Allow` header.
pub fn handle_request(req: Request) -> Response {
    let version = req.version;
    let keep_alive = req.keep_alive();

    match req.method {
        Method::GET => {
            let name = req.path.strip_prefix('/').unwrap_or(&req.path);
            Response::string(
                StatusCode::Ok,
                format!("Hello, {name}"),
                version,
                keep_alive,
                None,
            )
        }
        Method::HEAD => {
            let content_length = req.header("Content-Length").unwrap_or("0");
            Response::empty(StatusCode::Ok, content_length, version, keep_alive, None)
        }
        _ => {
            let mut response = Response::string(
                StatusCode::MethodNotAllowed,
                "Invalid method",
                version,
                keep_alive,
                None,
            );
            response.headers.set("Allow", ALLOWED_METHODS);
            response
        }
    }
}
