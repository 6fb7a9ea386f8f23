// In many cases, we need to do a let binding to satisfy the borrow checker
// and for some reason, clippy identifies those as unnecessary. Maybe there
// are and clippy knows more than me, maybe not.
#![allow(clippy::let_and_return)]

use super::{
    filter::{
        components::{FilterToolbar, TagCheckbox},
        models::NoteFilter,
    },
    models::{Note, Tag},
    navigation::View,
    routes::Route,
};
use ammonia::{clean, clean_text};

const STYLES: &str = r#"
    body { font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
    .link { color: #4338ca; text-decoration: underline; }
    .button { padding: 0.25rem 0.75rem; border-radius: 0.25rem; border: 1px solid #64748b; background: #e0e7ff; cursor: pointer; }
    .button-danger { background: #fee2e2; border-color: #dc2626; }
    .badge { display: inline-block; padding: 0.1rem 0.5rem; margin: 0.1rem; border-radius: 9999px; background: #dbeafe; font-size: 0.8rem; }
    .card { display: block; padding: 1rem; border: 1px solid #cbd5e1; border-radius: 0.5rem; color: inherit; text-decoration: none; }
    .card:hover { box-shadow: 0 2px 6px rgba(0,0,0,0.15); }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr)); gap: 1rem; }
    .flex { display: flex; } .flex-row { flex-direction: row; } .flex-col { flex-direction: column; }
    .flex-wrap { flex-wrap: wrap; } .gap-2 { gap: 0.5rem; } .gap-4 { gap: 1rem; }
    .items-end { align-items: flex-end; } .items-center { align-items: center; } .justify-between { justify-content: space-between; }
    .mt-3 { margin-top: 0.75rem; } .mb-4 { margin-bottom: 1rem; }
    .text-xl { font-size: 1.5rem; } .rounded { border-radius: 0.25rem; }
    textarea { width: 100%; min-height: 16rem; }
"#;

pub trait Component {
    /// Render the component to a HTML string. By convention, the
    /// implementation should sanitize all string properties at render-time
    fn render(&self) -> String;
}

pub struct Page<'a> {
    pub title: String,
    pub children: Box<dyn Component + 'a>,
}

impl Component for Page<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <html>
                <head>
                    <meta name="viewport" content="width=device-width, initial-scale=1.0"></meta>
                    <title>{title}</title>
                    <style>
                        {STYLES}
                    </style>
                </head>
                <body hx-boost="true">
                    {body_html}
                    <script src="https://unpkg.com/htmx.org@1.9.6"></script>
                </body>
            </html>
            "#,
            title = clean_text(&self.title),
            body_html = self.children.render()
        )
    }
}

/// Wraps a resolved view in the page shell. The controller answers
/// redirects with a redirect response, so their page is only a bare link.
impl Component for View<'_> {
    fn render(&self) -> String {
        let page = match self {
            View::List {
                notes,
                tags,
                filter,
            } => Page {
                title: "Notes".into(),
                children: Box::new(NoteList {
                    notes,
                    tags,
                    filter,
                }),
            },
            View::New { tags } => Page {
                title: "New Note".into(),
                children: Box::new(NoteForm {
                    heading: "New Note",
                    action: Route::NewNote,
                    cancel: Route::List,
                    note: None,
                    tags,
                }),
            },
            View::Note(note) => Page {
                title: note.title.clone(),
                children: Box::new(NoteView { note }),
            },
            View::Edit { note, tags } => Page {
                title: format!("Edit {}", note.title),
                children: Box::new(NoteForm {
                    heading: "Edit Note",
                    action: Route::EditNote(Some(note.id.clone())),
                    cancel: Route::Note(Some(note.id.clone())),
                    note: Some(*note),
                    tags,
                }),
            },
            View::NotFound { id } => Page {
                title: "Note not found".into(),
                children: Box::new(NotFound { id }),
            },
            View::Redirect(to) => Page {
                title: "Redirecting".into(),
                children: Box::new(Redirecting { to }),
            },
        };
        page.render()
    }
}

pub struct NoteList<'a> {
    pub notes: &'a [&'a Note],
    pub tags: &'a [Tag],
    pub filter: &'a NoteFilter,
}
impl Component for NoteList<'_> {
    fn render(&self) -> String {
        let new_note = Route::NewNote;
        let toolbar = FilterToolbar {
            filter: self.filter,
            tags: self.tags,
        }
        .render();
        let edit_tags = EditTags { tags: self.tags }.render();
        let cards = if self.notes.is_empty() {
            "<p>No notes yet.</p>".to_string()
        } else {
            let cards = self
                .notes
                .iter()
                .map(|note| NoteCard { note }.render())
                .collect::<Vec<String>>()
                .join("");
            format!(r#"<div class="grid">{cards}</div>"#)
        };
        format!(
            r#"
            <div class="flex flex-row justify-between items-center">
                <h1 class="text-xl">Notes</h1>
                <a class="button" href="{new_note}">Create</a>
            </div>
            {edit_tags}
            {toolbar}
            {cards}
            "#
        )
    }
}

pub struct NoteCard<'a> {
    pub note: &'a Note,
}
impl Component for NoteCard<'_> {
    fn render(&self) -> String {
        let href = Route::Note(Some(self.note.id.clone()));
        let title = clean_text(&self.note.title);
        let tags = TagBadges {
            tags: &self.note.tags,
        }
        .render();
        format!(
            r#"
            <a class="card" href="{href}">
                <h2>{title}</h2>
                {tags}
            </a>
            "#
        )
    }
}

pub struct TagBadges<'a> {
    pub tags: &'a [Tag],
}
impl Component for TagBadges<'_> {
    fn render(&self) -> String {
        self.tags
            .iter()
            .map(|t| {
                let label = clean_text(&t.label);
                format!(r#"<span class="badge">{label}</span>"#)
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

/// Rename or delete any tag. Deleting leaves notes alone; the tag just
/// stops showing up on them.
pub struct EditTags<'a> {
    pub tags: &'a [Tag],
}
impl Component for EditTags<'_> {
    fn render(&self) -> String {
        if self.tags.is_empty() {
            return "".into();
        };
        let rows = self
            .tags
            .iter()
            .map(|tag| {
                let update = Route::UpdateTag(Some(tag.id.clone()));
                let delete = Route::DeleteTag(Some(tag.id.clone()));
                let label = clean_text(&tag.label);
                format!(
                    r#"
                    <li class="flex flex-row gap-2 items-center">
                        <form method="post" action="{update}">
                            <input class="rounded" type="text" name="label" value="{label}" required />
                            <button class="button">Rename</button>
                        </form>
                        <form method="post" action="{delete}">
                            <button class="button button-danger">Delete</button>
                        </form>
                    </li>
                    "#
                )
            })
            .collect::<Vec<String>>()
            .join("\n");
        format!(
            r#"
            <details class="mt-3">
                <summary class="link">Edit Tags</summary>
                <ul>{rows}</ul>
            </details>
            "#
        )
    }
}

/// Used for both create and edit. Existing tags are checkboxes; new tags
/// are typed as comma-separated labels and created on submit.
pub struct NoteForm<'a> {
    pub heading: &'a str,
    pub action: Route,
    pub cancel: Route,
    pub note: Option<&'a Note>,
    pub tags: &'a [Tag],
}
impl Component for NoteForm<'_> {
    fn render(&self) -> String {
        let heading = clean_text(self.heading);
        let action = &self.action;
        let cancel = &self.cancel;
        let (title, markdown) = match self.note {
            Some(note) => (clean_text(&note.title), clean_text(&note.markdown)),
            None => ("".to_string(), "".to_string()),
        };
        let tag_options = self
            .tags
            .iter()
            .map(|tag| {
                let checked = self
                    .note
                    .map(|n| n.tags.iter().any(|t| t.id == tag.id))
                    .unwrap_or(false);
                TagCheckbox {
                    tag,
                    name: "tag_id",
                    checked,
                }
                .render()
            })
            .collect::<Vec<String>>()
            .join("");
        format!(
            r#"
            <h1 class="text-xl mb-4">{heading}</h1>
            <form method="post" action="{action}" class="flex flex-col gap-4">
                <div class="flex flex-col">
                    <label for="title">Title</label>
                    <input class="rounded" type="text" name="title" id="title" value="{title}" required />
                </div>
                <fieldset class="flex flex-row flex-wrap gap-2">
                    <legend>Tags</legend>
                    {tag_options}
                </fieldset>
                <div class="flex flex-col">
                    <label for="new_tags">New tags (comma separated)</label>
                    <input class="rounded" type="text" name="new_tags" id="new_tags" />
                </div>
                <div class="flex flex-col">
                    <label for="markdown">Body</label>
                    <textarea class="rounded" name="markdown" id="markdown" required>{markdown}</textarea>
                </div>
                <div class="flex flex-row gap-2">
                    <button class="button">Save</button>
                    <a class="button" href="{cancel}">Cancel</a>
                </div>
            </form>
            "#
        )
    }
}

pub struct NoteView<'a> {
    pub note: &'a Note,
}
impl Component for NoteView<'_> {
    fn render(&self) -> String {
        let list = Route::List;
        let edit = Route::EditNote(Some(self.note.id.clone()));
        let delete = Route::DeleteNote(Some(self.note.id.clone()));
        let title = clean_text(&self.note.title);
        let tags = TagBadges {
            tags: &self.note.tags,
        }
        .render();
        let body = clean(&markdown::to_html(&self.note.markdown));
        format!(
            r#"
            <div class="flex flex-row justify-between items-center mb-4">
                <div>
                    <h1 class="text-xl">{title}</h1>
                    {tags}
                </div>
                <div class="flex flex-row gap-2">
                    <a class="button" href="{edit}">Edit</a>
                    <form method="post" action="{delete}">
                        <button class="button button-danger">Delete</button>
                    </form>
                    <a class="button" href="{list}">Back</a>
                </div>
            </div>
            <article>
                {body}
            </article>
            "#
        )
    }
}

pub struct NotFound<'a> {
    pub id: &'a str,
}
impl Component for NotFound<'_> {
    fn render(&self) -> String {
        let list = Route::List;
        let id = clean_text(self.id);
        format!(
            r#"
            <h1 class="text-xl">Note not found</h1>
            <p>There is no note with id <code>{id}</code>.</p>
            <a class="link" href="{list}">Back to your notes</a>
            "#
        )
    }
}

struct Redirecting<'a> {
    to: &'a Route,
}
impl Component for Redirecting<'_> {
    fn render(&self) -> String {
        let to = self.to;
        format!(r#"<a class="link" href="{to}">Continue</a>"#)
    }
}
