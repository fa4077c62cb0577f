//! Demo routes served by the `httpserver` binary.

use http::StatusCode;
use http::header::CONTENT_TYPE;
use tcp_http::protocol::{Request, Response, content_type};

const BAD_REQUEST_PAGE: &str = r"<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>";

const INTERNAL_ERROR_PAGE: &str = r"<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>";

const SUCCESS_PAGE: &str = r"<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>";

/// Routes on the request target alone; method, headers and body are ignored.
pub async fn demo(request: Request) -> Response {
    let (status, page) = match request.request_target() {
        "/yourproblem" => (StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE),
        "/myproblem" => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_PAGE),
        _ => (StatusCode::OK, SUCCESS_PAGE),
    };

    Response::new(status).header(CONTENT_TYPE, content_type(&mime::TEXT_HTML)).body(page)
}
