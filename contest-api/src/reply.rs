use serde::de::IgnoredAny;

use crate::{Comment, EditedComment};

/// JSON envelope of every comment mutation answer
///
/// `comment` is only expected when `success` is true, `errors` only when it
/// is false. Both are optional so that a minimal `{"success": false}` parses.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Reply<C> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<C>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

pub type CreateReply = Reply<Comment>;
pub type EditReply = Reply<EditedComment>;

/// Delete answers carry no comment, anything the server sends there is ignored
pub type DeleteReply = Reply<IgnoredAny>;

impl<C> Reply<C> {
    pub fn ok(comment: C) -> Reply<C> {
        Reply {
            success: true,
            comment: Some(comment),
            errors: None,
        }
    }

    pub fn rejected(errors: serde_json::Value) -> Reply<C> {
        Reply {
            success: false,
            comment: None,
            errors: Some(errors),
        }
    }
}
