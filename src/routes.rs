//! Every URL the app knows about. A variant with `None` params renders as
//! the axum path pattern; with `Some` it renders a concrete href.
//!
//! Mutations are registered as axum POST routes. Every GET, on those paths
//! or anywhere else, goes to `controllers::navigate`, which hands the path
//! to `navigation::dispatch`.

use super::{controllers, models};
use axum::routing::{get, Router};
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    NewNote,
    Note(Option<String>),
    EditNote(Option<String>),
    DeleteNote(Option<String>),
    UpdateTag(Option<String>),
    DeleteTag(Option<String>),
}

impl Route {
    fn as_string(&self) -> String {
        match self {
            Self::List => "/".into(),
            Self::NewNote => "/new".into(),
            Self::Note(id) => match id {
                Some(id) => format!("/{id}"),
                None => "/:id".into(),
            },
            Self::EditNote(id) => match id {
                Some(id) => format!("/{id}/edit"),
                None => "/:id/edit".into(),
            },
            Self::DeleteNote(id) => match id {
                Some(id) => format!("/{id}/delete"),
                None => "/:id/delete".into(),
            },
            Self::UpdateTag(id) => match id {
                Some(id) => format!("/tags/{id}"),
                None => "/tags/:id".into(),
            },
            Self::DeleteTag(id) => match id {
                Some(id) => format!("/tags/{id}/delete"),
                None => "/tags/:id/delete".into(),
            },
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[rustfmt::skip]
pub fn get_routes() -> Router<models::AppState> {
    Router::new()
        .route(&Route::NewNote.as_string(), get(controllers::navigate).post(controllers::create_note))
        .route(&Route::EditNote(None).as_string(), get(controllers::navigate).post(controllers::update_note))
        .route(&Route::DeleteNote(None).as_string(), get(controllers::navigate).post(controllers::delete_note))
        .route(&Route::UpdateTag(None).as_string(), get(controllers::navigate).post(controllers::update_tag))
        .route(&Route::DeleteTag(None).as_string(), get(controllers::navigate).post(controllers::delete_tag))
        .fallback(controllers::navigate)
}
