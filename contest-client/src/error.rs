/// Texts shown to the user
pub mod notice {
    pub const CREATE_FAILED: &str = "Error posting comment. Please try again.";
    pub const EDIT_FAILED: &str = "Error updating comment. Please try again.";
    pub const DELETE_FAILED: &str = "Error deleting comment. Please try again.";
    pub const PAGINATE_FAILED: &str = "Error loading comments. Please try again.";
    pub const EMPTY_COMMENT: &str = "Comment cannot be empty.";
    pub const MISSING_TOKEN: &str =
        "Your session could not be verified. Please reload the page and try again.";
    pub const UNRESOLVED: &str = "Could not find where to show this comment. Please reload the page.";
    pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this comment?";
}

/// Why a comment action stopped
///
/// Every failure is terminal for the action that raised it: nothing is
/// retried and the page is left as it was before the action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Rejected locally, no request was sent
    #[error("{0}")]
    Validation(&'static str),

    /// A node the action needs is not on the page, no request was sent
    #[error("could not locate {0}")]
    Resolution(String),

    #[error("server answered with status {status}")]
    HttpStatus {
        status: u16,
        errors: Option<serde_json::Value>,
    },

    #[error("network error")]
    Network(#[source] anyhow::Error),

    #[error("malformed server answer")]
    Malformed(#[source] serde_json::Error),

    #[error("server answer lacks {0}")]
    Incomplete(&'static str),

    /// `success: false`
    #[error("server rejected the request")]
    Rejected(Option<serde_json::Value>),

    /// The node was removed or a newer action on it was started meanwhile
    #[error("superseded by a newer action")]
    Stale,
}

impl ActionError {
    /// Text to show the user when `failed` is the action's generic failure text
    pub fn notice(&self, failed: &'static str) -> Option<&'static str> {
        match self {
            ActionError::Validation(msg) => Some(*msg),
            ActionError::Resolution(_) => Some(notice::UNRESOLVED),
            ActionError::Stale => None,
            ActionError::HttpStatus { .. }
            | ActionError::Network(_)
            | ActionError::Malformed(_)
            | ActionError::Incomplete(_)
            | ActionError::Rejected(_) => Some(failed),
        }
    }

    pub fn log(&self, action: &str) {
        match self {
            ActionError::Validation(msg) => tracing::debug!(action, %msg, "rejected locally"),
            ActionError::Resolution(what) => {
                tracing::error!(action, %what, "failed locating page node")
            }
            ActionError::HttpStatus { status, errors } => {
                let kind = errors
                    .as_ref()
                    .and_then(|e| crate::api::Error::from_errors(e).ok());
                tracing::error!(action, status, ?errors, ?kind, "server answered with an error status")
            }
            ActionError::Network(e) => tracing::error!(action, "network error: {e:#}"),
            ActionError::Malformed(e) => tracing::error!(action, "malformed server answer: {e}"),
            ActionError::Incomplete(what) => {
                tracing::error!(action, %what, "server answer is incomplete")
            }
            ActionError::Rejected(errors) => {
                tracing::warn!(action, ?errors, "server rejected the request")
            }
            ActionError::Stale => tracing::debug!(action, "dropping stale continuation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices() {
        assert_eq!(
            ActionError::Validation(notice::EMPTY_COMMENT).notice(notice::EDIT_FAILED),
            Some(notice::EMPTY_COMMENT)
        );
        assert_eq!(
            ActionError::Resolution(String::from("list")).notice(notice::CREATE_FAILED),
            Some(notice::UNRESOLVED)
        );
        assert_eq!(
            ActionError::Rejected(None).notice(notice::DELETE_FAILED),
            Some(notice::DELETE_FAILED)
        );
        assert_eq!(
            ActionError::HttpStatus {
                status: 500,
                errors: None
            }
            .notice(notice::EDIT_FAILED),
            Some(notice::EDIT_FAILED)
        );
        assert_eq!(ActionError::Stale.notice(notice::EDIT_FAILED), None);
    }
}
