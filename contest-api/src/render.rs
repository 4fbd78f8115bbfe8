//! Markup of a single comment and of the empty-list placeholder
//!
//! Both the server (when rendering a page or fragment) and the client (when
//! inserting a freshly created comment) go through these, so that a node looks
//! the same whichever way it got into the page.

use crate::{dom, Comment};

pub const PLACEHOLDER_TEXT: &str = "No comments yet.";

pub fn escape_html(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            c => res.push(c),
        }
    }
    res
}

pub fn placeholder() -> String {
    format!(r#"<div class="list-group-item text-muted comment-placeholder">{PLACEHOLDER_TEXT}</div>"#)
}

/// Whether an element is the empty-list placeholder, given its `class`
/// attribute and text
///
/// Pages rendered by the server mark it with a muted `list-group-item` holding
/// the placeholder text, without the dedicated class.
pub fn is_placeholder(classes: &str, text: &str) -> bool {
    let mut classes = classes.split_whitespace();
    classes.clone().any(|c| c == dom::CLASS_PLACEHOLDER)
        || (classes.any(|c| c == dom::CLASS_MUTED) && text.trim() == PLACEHOLDER_TEXT)
}

pub fn comment_item(c: &Comment) -> String {
    let id = escape_html(&c.id.0);
    let author = escape_html(&c.author);
    let created_at = escape_html(&c.created_at);
    let text = escape_html(&c.text);
    let edit_url = escape_html(&c.edit_url);
    let delete_url = escape_html(&c.delete_url);
    format!(
        r#"<div class="list-group-item" data-comment-id="{id}" data-op-token="0">
    <div class="d-flex justify-content-between align-items-start mb-2">
        <strong class="comment-author">{author}</strong>
        <div class="d-flex gap-2 align-items-center">
            <small class="text-muted comment-date">{created_at}</small>
            <button type="button" class="btn btn-sm btn-link edit-comment-btn" data-comment-id="{id}" data-edit-url="{edit_url}">Edit</button>
            <button type="button" class="btn btn-sm btn-link text-danger delete-comment-btn" data-comment-id="{id}" data-delete-url="{delete_url}">Delete</button>
        </div>
    </div>
    <p class="mb-0 comment-text">{text}</p>
    <div class="comment-edit-form" style="display: none;">
        <textarea class="form-control form-control-sm mb-2" rows="2">{text}</textarea>
        <div class="d-flex gap-2">
            <button type="button" class="btn btn-sm btn-primary save-comment-btn">Save</button>
            <button type="button" class="btn btn-sm btn-secondary cancel-edit-btn">Cancel</button>
        </div>
    </div>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommentId;

    fn comment(text: &str) -> Comment {
        Comment {
            id: CommentId(String::from("7")),
            author: String::from("Alice"),
            text: String::from(text),
            created_at: String::from("2 mins ago"),
            edit_url: String::from("/comments/7/edit"),
            delete_url: String::from("/comments/7/delete"),
        }
    }

    #[test]
    fn recognizes_both_placeholder_forms() {
        assert!(is_placeholder("list-group-item text-muted comment-placeholder", ""));
        assert!(is_placeholder("list-group-item text-muted", " No comments yet.\n"));
        assert!(!is_placeholder("list-group-item text-muted", "2 mins ago"));
        assert!(!is_placeholder("list-group-item", PLACEHOLDER_TEXT));
    }

    #[test]
    fn item_carries_ids_and_endpoints() {
        let html = comment_item(&comment("Great shot!"));
        assert!(html.starts_with(r#"<div class="list-group-item" data-comment-id="7""#));
        assert!(html.contains(r#"data-edit-url="/comments/7/edit""#));
        assert!(html.contains(r#"data-delete-url="/comments/7/delete""#));
        assert!(html.contains(r#"<p class="mb-0 comment-text">Great shot!</p>"#));
        assert!(html.contains("<strong class=\"comment-author\">Alice</strong>"));
        assert!(html.contains("2 mins ago"));
    }

    #[test]
    fn text_is_escaped() {
        let html = comment_item(&comment("<script>alert(\"x\")</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
    }

    #[test]
    fn escaped_text_never_opens_a_tag() {
        bolero::check!().with_type::<String>().for_each(|s| {
            let e = escape_html(s);
            assert!(!e.contains('<'));
            assert!(!e.contains('"'));
        });
    }
}
