//! The page as the controller sees it
//!
//! All state lives in the page itself: implementations are cheap handles onto
//! page nodes (web elements in the browser, shared in-memory nodes in tests),
//! so every method takes `&self`.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use crate::api::{CommentId, EntryId};

/// A form creating comments
pub trait CommentForm {
    type List: CommentList;

    fn action(&self) -> String;

    /// All the form's fields, as the browser would serialize them
    fn fields(&self) -> Vec<(String, String)>;

    /// Current value of the comment text input
    fn text(&self) -> String;

    /// Empties the text input and gives it focus
    fn reset_text(&self);

    /// The comment list inside the nearest ancestor carrying `scope_class`
    fn list_in_scope(&self, scope_class: &str) -> Option<Self::List>;
}

/// Container of the comment nodes of one entry, newest first
pub trait CommentList: Clone {
    /// False once the list was dropped from the page, eg. by a pagination swap
    fn is_attached(&self) -> bool;

    fn comment_count(&self) -> usize;

    fn has_placeholder(&self) -> bool;

    fn remove_placeholder(&self);

    /// Replaces the whole contents with the empty-list placeholder
    fn show_placeholder(&self);

    /// Inserts markup as the first child
    fn prepend_html(&self, html: &str);
}

/// One comment node, with its text display and its hidden edit form
pub trait CommentItem: Clone {
    type List: CommentList;

    fn comment_id(&self) -> Option<CommentId>;

    fn is_attached(&self) -> bool;

    /// The list this comment is displayed in
    fn list(&self) -> Option<Self::List>;

    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    fn editor_text(&self) -> String;
    fn set_editor_text(&self, text: &str);

    fn is_editing(&self) -> bool;

    /// Shows either the edit form (true) or the text display (false), never both
    fn set_editing(&self, editing: bool);

    fn focus_editor(&self);

    fn edit_url(&self) -> Option<String>;
    fn delete_url(&self) -> Option<String>;

    fn op_token(&self) -> u64;
    fn set_op_token(&self, token: u64);

    /// Anti-forgery token found in the nearest enclosing scope, if any
    fn scoped_csrf_token(&self, field: &str) -> Option<String>;

    fn remove(&self);
}

/// The element whose contents a pagination fragment replaces
pub trait CommentSection {
    fn replace_html(&self, html: &str);
}

pub trait PaginationLink: Clone {
    /// Absolute target url
    fn href(&self) -> Option<String>;

    /// Value of `data-entry-id`
    fn entry_id(&self) -> Option<EntryId>;

    /// Sets the single click handler of this link, dropping any previous one.
    /// Implementations also cancel the default navigation.
    fn set_click_handler(&self, handler: Box<dyn Fn()>);
}

pub trait ImageOverlay {
    fn show_image(&self, src: &str);
}

pub trait ToastRegion {
    fn push(&self, message: &str);
}

pub trait Page {
    type List: CommentList;
    type Section: CommentSection;
    type Link: PaginationLink + 'static;
    type Overlay: ImageOverlay;
    type Toasts: ToastRegion;

    fn section(&self, section_id: &str) -> Option<Self::Section>;

    /// The comment list inside the section with id `section_id`
    fn list_in_section(&self, section_id: &str) -> Option<Self::List>;

    fn pagination_links(&self) -> Vec<Self::Link>;

    /// Page-wide anti-forgery token field
    fn page_csrf_token(&self, field: &str) -> Option<String>;

    fn image_overlay(&self) -> Option<Self::Overlay>;

    /// Creates the notification region on first call, returns the same one afterwards
    fn toast_region(&self) -> Self::Toasts;
}

/// Window-level facilities
#[async_trait(?Send)]
pub trait Browser {
    fn alert(&self, message: &str);

    /// Blocks until the user answers
    fn confirm(&self, message: &str) -> bool;

    fn navigate(&self, url: &str);

    async fn sleep(&self, duration: Duration);

    /// Runs a continuation on the event loop
    fn spawn(&self, fut: LocalBoxFuture<'static, ()>);
}
