//! The note/tag repository: two independently persisted collections, and
//! the resolved notes derived from them.

use super::{
    config,
    models::{Note, NoteData, RawNote, Tag},
    storage::{PersistentValue, Storage},
};
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

pub struct NoteRepository {
    notes: PersistentValue<Vec<RawNote>>,
    tags: PersistentValue<Vec<Tag>>,
    /// Always equal to `resolve_notes(notes, tags)`; refreshed after each
    /// mutation so reads never recompute.
    resolved: Vec<Note>,
}

/// Attach to each note the tags it references, in tag-collection order.
/// Ids with no matching tag are dropped.
pub fn resolve_notes(notes: &[RawNote], tags: &[Tag]) -> Vec<Note> {
    notes
        .iter()
        .map(|note| Note {
            id: note.id.clone(),
            title: note.title.clone(),
            markdown: note.markdown.clone(),
            tags: tags
                .iter()
                .filter(|tag| note.tag_ids.contains(&tag.id))
                .cloned()
                .collect(),
        })
        .collect()
}

impl NoteRepository {
    pub async fn open(storage: Option<Arc<dyn Storage>>) -> Self {
        let notes =
            PersistentValue::load(storage.clone(), config::NOTES_KEY, vec![])
                .await;
        let tags =
            PersistentValue::load(storage, config::TAGS_KEY, vec![]).await;
        let resolved = resolve_notes(notes.get(), tags.get());
        tracing::info!(
            notes = notes.get().len(),
            tags = tags.get().len(),
            "loaded notebook"
        );

        Self {
            notes,
            tags,
            resolved,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.resolved
    }

    #[cfg(test)]
    pub fn raw_notes(&self) -> &[RawNote] {
        self.notes.get()
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.get()
    }

    pub fn find_note(&self, id: &str) -> Option<&Note> {
        self.resolved.iter().find(|n| n.id == id)
    }

    pub async fn create_note(&mut self, data: NoteData) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let note = RawNote {
            id: id.clone(),
            tag_ids: data.tag_ids(),
            title: data.title,
            markdown: data.markdown,
        };
        self.notes
            .update(|prev| {
                let mut next = prev.clone();
                next.push(note);
                next
            })
            .await?;
        self.refresh();
        tracing::info!(%id, "created note");

        Ok(id)
    }

    /// Notes other than `id` are carried over untouched. Updating an id
    /// that doesn't exist changes nothing.
    pub async fn update_note(
        &mut self,
        id: &str,
        data: NoteData,
    ) -> Result<()> {
        let tag_ids = data.tag_ids();
        self.notes
            .update(|prev| {
                prev.iter()
                    .map(|note| {
                        if note.id == id {
                            RawNote {
                                id: note.id.clone(),
                                title: data.title.clone(),
                                markdown: data.markdown.clone(),
                                tag_ids: tag_ids.clone(),
                            }
                        } else {
                            note.clone()
                        }
                    })
                    .collect()
            })
            .await?;
        self.refresh();
        tracing::info!(id, "updated note");

        Ok(())
    }

    pub async fn delete_note(&mut self, id: &str) -> Result<()> {
        self.notes
            .update(|prev| {
                prev.iter().filter(|n| n.id != id).cloned().collect()
            })
            .await?;
        self.refresh();
        tracing::info!(id, "deleted note");

        Ok(())
    }

    /// The caller picks the id; see `new_tag`.
    pub async fn add_tag(&mut self, tag: Tag) -> Result<()> {
        let id = tag.id.clone();
        self.tags
            .update(|prev| {
                let mut next = prev.clone();
                next.push(tag);
                next
            })
            .await?;
        self.refresh();
        tracing::info!(%id, "added tag");

        Ok(())
    }

    pub async fn update_tag(&mut self, id: &str, label: &str) -> Result<()> {
        self.tags
            .update(|prev| {
                prev.iter()
                    .map(|tag| {
                        if tag.id == id {
                            Tag {
                                id: tag.id.clone(),
                                label: label.to_string(),
                            }
                        } else {
                            tag.clone()
                        }
                    })
                    .collect()
            })
            .await?;
        self.refresh();
        tracing::info!(id, "renamed tag");

        Ok(())
    }

    /// Notes keep the id in their `tag_ids`; it just stops resolving.
    pub async fn delete_tag(&mut self, id: &str) -> Result<()> {
        self.tags
            .update(|prev| {
                prev.iter().filter(|t| t.id != id).cloned().collect()
            })
            .await?;
        self.refresh();
        tracing::info!(id, "deleted tag");

        Ok(())
    }

    fn refresh(&mut self) {
        self.resolved = resolve_notes(self.notes.get(), self.tags.get());
    }
}

/// A tag with a freshly generated id.
pub fn new_tag(label: &str) -> Tag {
    Tag {
        id: Uuid::new_v4().to_string(),
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{tests::FlakyStorage, MemoryStorage};
    use std::sync::atomic::Ordering;

    fn tag(id: &str, label: &str) -> Tag {
        Tag {
            id: id.into(),
            label: label.into(),
        }
    }

    fn data(title: &str, tags: Vec<Tag>) -> NoteData {
        NoteData {
            title: title.into(),
            markdown: format!("# {title}"),
            tags,
        }
    }

    async fn empty_repo() -> (Arc<MemoryStorage>, NoteRepository) {
        let storage = Arc::new(MemoryStorage::new());
        let repo = NoteRepository::open(Some(storage.clone())).await;
        (storage, repo)
    }

    #[test]
    fn test_resolve_drops_dangling_and_unreferenced_tags() {
        let notes = vec![RawNote {
            id: "n1".into(),
            title: "".into(),
            markdown: "".into(),
            tag_ids: vec!["t1".into(), "t3".into()],
        }];
        let tags = vec![tag("t1", "A"), tag("t2", "B")];

        let resolved = resolve_notes(&notes, &tags);
        assert_eq!(resolved[0].tags, vec![tag("t1", "A")]);
    }

    #[test]
    fn test_resolve_keeps_tag_collection_order() {
        let notes = vec![RawNote {
            id: "n1".into(),
            title: "".into(),
            markdown: "".into(),
            tag_ids: vec!["t2".into(), "t1".into()],
        }];
        let tags = vec![tag("t1", "A"), tag("t2", "B")];

        let resolved = resolve_notes(&notes, &tags);
        assert_eq!(resolved[0].tags, vec![tag("t1", "A"), tag("t2", "B")]);
    }

    #[tokio::test]
    async fn test_create_note() {
        let (_, mut repo) = empty_repo().await;
        let id = repo
            .create_note(NoteData {
                title: "X".into(),
                markdown: "Y".into(),
                tags: vec![tag("t1", "A")],
            })
            .await
            .unwrap();

        assert_eq!(
            repo.raw_notes(),
            &[RawNote {
                id: id.clone(),
                title: "X".into(),
                markdown: "Y".into(),
                tag_ids: vec!["t1".into()],
            }]
        );
        let other = repo.create_note(data("Z", vec![])).await.unwrap();
        assert_ne!(id, other);
    }

    #[tokio::test]
    async fn test_update_only_touches_target_note() {
        let (_, mut repo) = empty_repo().await;
        repo.add_tag(tag("t1", "A")).await.unwrap();
        let first = repo.create_note(data("first", vec![])).await.unwrap();
        let second = repo
            .create_note(data("second", vec![tag("t1", "A")]))
            .await
            .unwrap();
        let before = repo.raw_notes()[1].clone();
        let tags_before = repo.tags().to_vec();

        repo.update_note(&first, data("renamed", vec![tag("t1", "A")]))
            .await
            .unwrap();

        assert_eq!(repo.raw_notes()[0].id, first);
        assert_eq!(repo.raw_notes()[0].title, "renamed");
        assert_eq!(repo.raw_notes()[0].tag_ids, vec!["t1".to_string()]);
        assert_eq!(repo.raw_notes()[1], before);
        assert_eq!(repo.raw_notes()[1].id, second);
        assert_eq!(repo.tags(), tags_before.as_slice());
        assert_eq!(repo.find_note(&first).unwrap().tags, vec![tag("t1", "A")]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let (_, mut repo) = empty_repo().await;
        repo.create_note(data("first", vec![])).await.unwrap();
        let before = repo.raw_notes().to_vec();

        repo.update_note("missing", data("x", vec![])).await.unwrap();
        assert_eq!(repo.raw_notes(), before.as_slice());
    }

    #[tokio::test]
    async fn test_delete_note() {
        let (_, mut repo) = empty_repo().await;
        let first = repo.create_note(data("first", vec![])).await.unwrap();
        let second = repo.create_note(data("second", vec![])).await.unwrap();

        repo.delete_note(&first).await.unwrap();
        assert_eq!(repo.notes().len(), 1);
        assert_eq!(repo.notes()[0].id, second);
        assert!(repo.find_note(&first).is_none());
    }

    #[tokio::test]
    async fn test_rename_tag_shows_on_notes() {
        let (_, mut repo) = empty_repo().await;
        repo.add_tag(tag("t1", "A")).await.unwrap();
        repo.add_tag(tag("t2", "B")).await.unwrap();
        let id = repo
            .create_note(data("n", vec![tag("t1", "A")]))
            .await
            .unwrap();

        repo.update_tag("t1", "Renamed").await.unwrap();
        assert_eq!(repo.tags(), &[tag("t1", "Renamed"), tag("t2", "B")]);
        assert_eq!(
            repo.find_note(&id).unwrap().tags,
            vec![tag("t1", "Renamed")]
        );
    }

    #[tokio::test]
    async fn test_delete_tag_does_not_cascade() {
        let (_, mut repo) = empty_repo().await;
        repo.add_tag(tag("t1", "A")).await.unwrap();
        let id = repo
            .create_note(data("n", vec![tag("t1", "A")]))
            .await
            .unwrap();

        repo.delete_tag("t1").await.unwrap();
        assert!(repo.tags().is_empty());
        assert_eq!(repo.raw_notes()[0].tag_ids, vec!["t1".to_string()]);
        assert!(repo.find_note(&id).unwrap().tags.is_empty());
    }

    #[tokio::test]
    async fn test_reopen_reads_both_collections() {
        let (storage, mut repo) = empty_repo().await;
        repo.add_tag(tag("t1", "A")).await.unwrap();
        repo.create_note(data("n", vec![tag("t1", "A")]))
            .await
            .unwrap();

        let reopened = NoteRepository::open(Some(storage)).await;
        assert_eq!(reopened.raw_notes(), repo.raw_notes());
        assert_eq!(reopened.tags(), repo.tags());
        assert_eq!(reopened.notes(), repo.notes());
    }

    #[tokio::test]
    async fn test_corrupt_notes_slot_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(config::NOTES_KEY, "oops").await.unwrap();
        storage
            .set_item(config::TAGS_KEY, r#"[{"id":"t1","label":"A"}]"#)
            .await
            .unwrap();

        let repo = NoteRepository::open(Some(storage)).await;
        assert!(repo.notes().is_empty());
        assert_eq!(repo.tags(), &[tag("t1", "A")]);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_alone() {
        let storage = Arc::new(FlakyStorage::default());
        let mut repo = NoteRepository::open(Some(storage.clone())).await;
        repo.create_note(data("kept", vec![])).await.unwrap();
        storage.fail_writes.store(true, Ordering::SeqCst);

        assert!(repo.create_note(data("lost", vec![])).await.is_err());
        assert_eq!(repo.notes().len(), 1);
        assert_eq!(repo.notes()[0].title, "kept");
    }
}
