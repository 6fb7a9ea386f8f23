use super::{
    components::Component,
    errors::ServerError,
    filter::models::NoteFilter,
    htmx,
    models::{AppState, NoteData, Tag},
    navigation::{self, Location, View},
    repository::{new_tag, NoteRepository},
    routes::Route,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

/// Every GET lands here. The path picks the screen, the query string
/// carries the list filter.
pub async fn navigate(
    State(AppState { repo }): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let repo = repo.read().await;
    let view = navigation::dispatch(
        Location::parse(uri.path()),
        &repo,
        NoteFilter::from_pairs(&query),
    );
    match &view {
        View::Redirect(to) => htmx::redirect(&headers, to),
        View::NotFound { .. } => {
            tracing::debug!(path = uri.path(), "note not found");
            (StatusCode::NOT_FOUND, view.render()).into_response()
        }
        _ => view.render().into_response(),
    }
}

/// The note form as submitted. Checkboxes repeat `tag_id`, so it arrives
/// as raw pairs rather than a struct.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NoteSubmission {
    pub title: String,
    pub markdown: String,
    pub tag_ids: Vec<String>,
    pub new_tags: Vec<String>,
}

impl NoteSubmission {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |mut form, (k, v)| {
                match k.as_str() {
                    "title" => form.title = v,
                    "markdown" => form.markdown = v,
                    "tag_id" => form.tag_ids.push(v),
                    "new_tags" => form.new_tags.extend(
                        v.split(',')
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(String::from),
                    ),
                    _ => (),
                };
                form
            })
    }

    /// Create the typed-in tags, then gather every tag the note should
    /// carry. Checked ids that no longer exist are dropped.
    async fn into_note_data(
        self,
        repo: &mut NoteRepository,
    ) -> anyhow::Result<NoteData> {
        let mut tags: Vec<Tag> = repo
            .tags()
            .iter()
            .filter(|t| self.tag_ids.contains(&t.id))
            .cloned()
            .collect();
        for label in &self.new_tags {
            let tag = new_tag(label);
            repo.add_tag(tag.clone()).await?;
            tags.push(tag);
        }

        Ok(NoteData {
            title: self.title,
            markdown: self.markdown,
            tags,
        })
    }
}

pub async fn create_note(
    State(AppState { repo }): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ServerError> {
    let mut repo = repo.write().await;
    let data = NoteSubmission::from_pairs(pairs)
        .into_note_data(&mut repo)
        .await?;
    repo.create_note(data).await?;

    Ok(htmx::redirect(&headers, &Route::List))
}

pub async fn update_note(
    State(AppState { repo }): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ServerError> {
    let mut repo = repo.write().await;
    if repo.find_note(&id).is_none() {
        return Ok(htmx::redirect(&headers, &Route::List));
    }
    let data = NoteSubmission::from_pairs(pairs)
        .into_note_data(&mut repo)
        .await?;
    repo.update_note(&id, data).await?;

    Ok(htmx::redirect(&headers, &Route::Note(Some(id))))
}

pub async fn delete_note(
    State(AppState { repo }): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    repo.write().await.delete_note(&id).await?;

    Ok(htmx::redirect(&headers, &Route::List))
}

#[derive(Deserialize)]
pub struct TagForm {
    label: String,
}

pub async fn update_tag(
    State(AppState { repo }): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(TagForm { label }): Form<TagForm>,
) -> Result<impl IntoResponse, ServerError> {
    repo.write().await.update_tag(&id, &label).await?;

    Ok(htmx::redirect(&headers, &Route::List))
}

pub async fn delete_tag(
    State(AppState { repo }): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    repo.write().await.delete_tag(&id).await?;

    Ok(htmx::redirect(&headers, &Route::List))
}
