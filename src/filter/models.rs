use crate::models::Note;

/// Narrows the note list. An empty filter matches every note.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub title: String,
    pub tag_ids: Vec<String>,
}

impl NoteFilter {
    /// Build from query-string pairs: `title=...` and any number of
    /// `tag=<id>`. Unrecognized keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        pairs.iter().fold(Self::default(), |mut filter, (k, v)| {
            match k.as_str() {
                "title" => filter.title = v.trim().to_string(),
                "tag" if !v.is_empty() => filter.tag_ids.push(v.clone()),
                _ => (),
            };
            filter
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tag_ids.is_empty()
    }

    /// Title matches case-insensitively as a substring, and the note must
    /// carry every selected tag.
    pub fn matches(&self, note: &Note) -> bool {
        let title_ok = self.title.is_empty()
            || note
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());
        title_ok
            && self
                .tag_ids
                .iter()
                .all(|id| note.tags.iter().any(|t| &t.id == id))
    }

    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}
