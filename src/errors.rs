use super::components::{Component, Page};
use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Every domain operation is total except for store writes, so in practice
/// this is "your change could not be saved".
#[derive(Debug)]
pub struct ServerError(Error);

struct SaveFailed;
impl Component for SaveFailed {
    fn render(&self) -> String {
        r#"
            <h1 class="text-xl">Something went wrong</h1>
            <p>Your change could not be saved. New tags typed into the
            form may already have been created.</p>
            <p>Please try again.</p>
            <a class="link" href="/">Back to your notes</a>
        "#
        .to_string()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");
        let page = Page {
            title: "Something went wrong".into(),
            children: Box::new(SaveFailed),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.render())).into_response()
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// to turn them into `Result<_, ServerError>`. That way you don't need to do
// that manually.
impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
