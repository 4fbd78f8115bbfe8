mod comment;
pub use comment::{Comment, CommentId, EditedComment, EntryId};

pub mod dom;

mod error;
pub use error::Error;

mod links;
pub use links::{
    entry_id_from_action, entry_id_from_href, mark_ajax, section_id, AJAX_PARAM, SECTION_ID_PREFIX,
};

pub mod render;

mod reply;
pub use reply::{CreateReply, DeleteReply, EditReply, Reply};

/// Header every asynchronous request carries so the server can tell it apart
/// from a full page load
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Default name of the hidden anti-forgery field rendered into forms
pub const DEFAULT_CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Default header used when the anti-forgery token is sent out-of-band
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";
