use super::repository::NoteRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub label: String,
}

/// A note as it is persisted: tags are referenced by id only, and those ids
/// may point at tags which no longer exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    pub id: String,
    pub title: String,
    pub markdown: String,
    pub tag_ids: Vec<String>,
}

/// A note with its tag ids resolved against the current tag collection.
/// This is never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

/// What the create and edit forms submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteData {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

impl NoteData {
    pub fn tag_ids(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.id.clone()).collect()
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Writers take the lock for the whole mutation, store write included,
    /// so every request sees a complete snapshot.
    pub repo: Arc<RwLock<NoteRepository>>,
}

impl AppState {
    pub fn new(repo: NoteRepository) -> Self {
        Self {
            repo: Arc::new(RwLock::new(repo)),
        }
    }
}
