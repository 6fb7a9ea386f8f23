use super::models;
use crate::{components::Component, models::Tag, routes::Route};
use ammonia::clean_text;

const FILTER_CONTAINER_STYLE: &str =
    "flex flex-row flex-wrap gap-4 items-end mt-3 mb-4";

/// The search form above the note list. Submits back to the list itself,
/// so the filter ends up in the query string.
pub struct FilterToolbar<'a> {
    pub filter: &'a models::NoteFilter,
    pub tags: &'a [Tag],
}
impl Component for FilterToolbar<'_> {
    fn render(&self) -> String {
        let list = Route::List;
        let title = clean_text(&self.filter.title);
        let tag_options = self.tags.iter().fold(String::new(), |mut acc, tag| {
            acc.push_str(
                &TagCheckbox {
                    tag,
                    name: "tag",
                    checked: self.filter.tag_ids.contains(&tag.id),
                }
                .render(),
            );
            acc
        });
        let clear = if self.filter.is_empty() {
            "".to_string()
        } else {
            format!(r#"<a class="link" href="{list}">Clear</a>"#)
        };
        format!(
            r#"
            <form method="get" action="{list}" class="{FILTER_CONTAINER_STYLE}">
                <div class="flex flex-col">
                    <label for="title">Title</label>
                    <input class="rounded" type="text" name="title" id="title" value="{title}" />
                </div>
                <fieldset class="flex flex-row flex-wrap gap-2">
                    <legend>Tags</legend>
                    {tag_options}
                </fieldset>
                <button class="button">Filter</button>
                {clear}
            </form>
            "#
        )
    }
}

/// Shared with the note form, where the field is named `tag_id`.
pub struct TagCheckbox<'a> {
    pub tag: &'a Tag,
    pub name: &'a str,
    pub checked: bool,
}
impl Component for TagCheckbox<'_> {
    fn render(&self) -> String {
        let name = self.name;
        let id = clean_text(&self.tag.id);
        let label = clean_text(&self.tag.label);
        let checked_state = if self.checked { "checked" } else { "" };
        format!(
            r#"
            <label class="badge">
                <input type="checkbox" name="{name}" value="{id}" {checked_state} />
                {label}
            </label>
            "#
        )
    }
}
