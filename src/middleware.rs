use super::{errors::ServerError, htmx};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Every page is HTML; handlers that return a bare `String` would
/// otherwise go out as `text/plain`.
pub async fn html_headers<B>(
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, ServerError> {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    let is_plain_text = headers
        .get(CONTENT_TYPE)
        .map(|v| v.as_bytes().starts_with(b"text/plain"))
        .unwrap_or(true);
    if is_plain_text {
        headers.insert(CONTENT_TYPE, HeaderValue::from_str("text/html")?);
    }

    Ok(response)
}

/// htmx drops 4xx and 5xx bodies unless told where to put them. Boosted
/// requests that fail get their error page swapped in over the whole body.
pub async fn htmx_error_pages<B>(
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let is_htmx = htmx::is_htmx_request(request.headers());
    let mut response = next.run(request).await;
    let status = response.status();
    if is_htmx && (status.is_client_error() || status.is_server_error()) {
        let headers = response.headers_mut();
        headers.insert("Hx-Retarget", HeaderValue::from_static("body"));
        headers.insert("Hx-Reswap", HeaderValue::from_static("innerHTML"));
    }

    response
}
