use anyhow::{anyhow, Context};
use serde_json::json;

use crate::CommentId;

/// Reasons for which the server refuses a comment request
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Comment text is empty")]
    EmptyComment,

    #[error("Missing or invalid anti-forgery token")]
    MissingCsrfToken,

    #[error("Endpoint only answers asynchronous requests")]
    NotAjax,

    #[error("Comment not found {0}")]
    CommentNotFound(CommentId),

    #[error("Entry not found {0}")]
    EntryNotFound(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::EmptyComment => StatusCode::BAD_REQUEST,
            Error::MissingCsrfToken => StatusCode::FORBIDDEN,
            Error::NotAjax => StatusCode::BAD_REQUEST,
            Error::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Error::EntryNotFound(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Full JSON answer body, in the same envelope as successful replies
    pub fn contents(&self) -> Vec<u8> {
        let errors = match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::PermissionDenied => json!({
                "message": "permission denied",
                "type": "permission-denied",
            }),
            Error::EmptyComment => json!({
                "message": "comment text cannot be empty",
                "type": "empty-comment",
            }),
            Error::MissingCsrfToken => json!({
                "message": "anti-forgery token missing or incorrect",
                "type": "csrf",
            }),
            Error::NotAjax => json!({
                "message": "this endpoint only answers asynchronous requests",
                "type": "not-ajax",
            }),
            Error::CommentNotFound(id) => json!({
                "message": "no such comment",
                "type": "comment-not-found",
                "id": id,
            }),
            Error::EntryNotFound(e) => json!({
                "message": "entry id not found",
                "type": "entry-not-found",
                "entry": e,
            }),
        };
        serde_json::to_vec(&json!({
            "success": false,
            "errors": errors,
        }))
        .expect("serializing error contents")
    }

    /// Parses either a full answer body or its bare `errors` object
    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        Error::from_errors(data.get("errors").unwrap_or(&data))
    }

    pub fn from_errors(data: &serde_json::Value) -> anyhow::Result<Error> {
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                "permission-denied" => Error::PermissionDenied,
                "empty-comment" => Error::EmptyComment,
                "csrf" => Error::MissingCsrfToken,
                "not-ajax" => Error::NotAjax,
                "comment-not-found" => Error::CommentNotFound(
                    data.get("id")
                        .cloned()
                        .and_then(|id| serde_json::from_value(id).ok())
                        .ok_or_else(|| anyhow!("error is a missing comment without an id"))?,
                ),
                "entry-not-found" => Error::EntryNotFound(String::from(
                    data.get("entry")
                        .and_then(|e| e.as_str())
                        .ok_or_else(|| anyhow!("error is a missing entry without an entry"))?,
                )),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
