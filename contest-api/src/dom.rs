//! Class and attribute names the server-rendered markup provides
//!
//! These are only ever used as selectors, never for styling.

pub const ATTR_FULL_IMAGE: &str = "data-full-image";
pub const ATTR_ENTRY_ID: &str = "data-entry-id";
pub const ATTR_COMMENT_ID: &str = "data-comment-id";
pub const ATTR_EDIT_URL: &str = "data-edit-url";
pub const ATTR_DELETE_URL: &str = "data-delete-url";

/// Incremented on every save of a comment
pub const ATTR_OP_TOKEN: &str = "data-op-token";

pub const CLASS_PREVIEW: &str = "winner-image";
pub const CLASS_COMMENT_FORM: &str = "comment-form";
pub const CLASS_COMMENT_LIST: &str = "comment-list";
pub const CLASS_COMMENT_ITEM: &str = "list-group-item";
pub const CLASS_COMMENT_TEXT: &str = "comment-text";
pub const CLASS_EDIT_FORM: &str = "comment-edit-form";
pub const CLASS_PAGINATION: &str = "comment-pagination";
pub const CLASS_PLACEHOLDER: &str = "comment-placeholder";
pub const CLASS_MUTED: &str = "text-muted";

pub const CLASS_EDIT_BUTTON: &str = "edit-comment-btn";
pub const CLASS_CANCEL_BUTTON: &str = "cancel-edit-btn";
pub const CLASS_SAVE_BUTTON: &str = "save-comment-btn";
pub const CLASS_DELETE_BUTTON: &str = "delete-comment-btn";

pub const CLASS_JOIN_BUTTON: &str = "join-contest-btn";
pub const ID_JOIN_BUTTON: &str = "join-button";

/// Where the join control leads when it is not a link
pub const ATTR_REDIRECT_URL: &str = "data-redirect-url";

pub const ID_IMAGE_MODAL: &str = "imageModal";
pub const ID_MODAL_IMAGE: &str = "modalImage";
pub const ID_JOIN_NOTIFICATIONS: &str = "join-notifications";

/// Ancestors of a comment form that also contain its comment list, innermost first
pub const FORM_SCOPES: &[&str] = &["comment-section", "card-body", "card"];

/// Ancestors that scope an anti-forgery token to a comment, innermost first
pub const TOKEN_SCOPES: &[&str] = &["comment-section", "card-body"];
