//! Maps a path to the one screen it shows.
//!
//! Parsing (`Location::parse`) and resolving (`dispatch`) are separate so
//! the note subtree can resolve its parent first: `/:id` and `/:id/edit`
//! both look the note up once, and only then pick the child screen.

use super::{
    filter::models::NoteFilter,
    models::{Note, Tag},
    repository::NoteRepository,
    routes::Route,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteChild {
    View,
    Edit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    List,
    New,
    Note { id: String, child: NoteChild },
    Unknown,
}

impl Location {
    /// Expects a path without its query string. One trailing slash is
    /// ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.strip_suffix('/').unwrap_or(path);
        let segments: Vec<&str> = path.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Self::List,
            ["new"] => Self::New,
            [id] if !id.is_empty() => Self::Note {
                id: id.to_string(),
                child: NoteChild::View,
            },
            [id, "edit"] if !id.is_empty() => Self::Note {
                id: id.to_string(),
                child: NoteChild::Edit,
            },
            _ => Self::Unknown,
        }
    }
}

/// What to render, with everything the screen needs already resolved.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    List {
        notes: Vec<&'a Note>,
        tags: &'a [Tag],
        filter: NoteFilter,
    },
    New {
        tags: &'a [Tag],
    },
    Note(&'a Note),
    Edit {
        note: &'a Note,
        tags: &'a [Tag],
    },
    NotFound {
        id: String,
    },
    Redirect(Route),
}

pub fn dispatch<'a>(
    location: Location,
    repo: &'a NoteRepository,
    filter: NoteFilter,
) -> View<'a> {
    match location {
        Location::List => View::List {
            notes: filter.apply(repo.notes()),
            tags: repo.tags(),
            filter,
        },
        Location::New => View::New { tags: repo.tags() },
        Location::Note { id, child } => {
            let note = match repo.find_note(&id) {
                Some(note) => note,
                None => return View::NotFound { id },
            };
            match child {
                NoteChild::View => View::Note(note),
                NoteChild::Edit => View::Edit {
                    note,
                    tags: repo.tags(),
                },
            }
        }
        Location::Unknown => View::Redirect(Route::List),
    }
}
