/// HTMX utils
use super::routes::Route;
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.contains_key("Hx-Request")
}

/// Boosted requests get an `Hx-Redirect`, which htmx follows client-side;
/// plain form posts get a 303 so the browser re-fetches with GET.
pub fn redirect(request_headers: &HeaderMap, to: &Route) -> Response {
    let to = HeaderValue::from_str(&to.to_string())
        .unwrap_or(HeaderValue::from_static("/"));
    let mut headers = HeaderMap::new();
    if is_htmx_request(request_headers) {
        headers.insert("Hx-Redirect", to);
        (StatusCode::OK, headers).into_response()
    } else {
        headers.insert("Location", to);
        (StatusCode::SEE_OTHER, headers).into_response()
    }
}
