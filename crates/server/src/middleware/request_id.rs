//! # Request ID Middleware
//!
//! Tags every request with an id, runs it inside a span carrying that id,
//! echoes the id in the response and logs the outcome.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use logging::{
    RequestId,
    request_id::{REQUEST_ID_HEADER, from_header_or_new},
};
use tracing::Instrument;

/// Request id middleware
///
/// A valid incoming `x-request-id` is reused; anything else is replaced.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = from_header_or_new(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!("request", request_id = %request_id, method = %method, path = %path);
    let started = std::time::Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;

    let _entered = span.enter();
    logging::log_api_request!(
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Id assigned to the current request, if the middleware ran.
pub fn current(request: &Request) -> Option<&RequestId> { request.extensions().get::<RequestId>() }
