use std::fmt;

/// Opaque comment identifier
///
/// Servers are free to use numbers or strings, both are accepted on the wire
/// and kept in their textual form, which is also what `data-comment-id` holds.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(from = "IdRepr", into = "String")]
pub struct CommentId(pub String);

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

impl From<IdRepr> for CommentId {
    fn from(r: IdRepr) -> CommentId {
        match r {
            IdRepr::Number(n) => CommentId(n.to_string()),
            IdRepr::Text(s) => CommentId(s),
        }
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> String {
        id.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a contest entry, which owns one comment section
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,

    /// Display name of the author
    pub author: String,

    pub text: String,

    /// Already formatted by the server, never parsed client-side
    pub created_at: String,

    pub edit_url: String,
    pub delete_url: String,
}

/// What the server sends back after an edit: only the canonical text
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EditedComment {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_textual_ids_parse_the_same() {
        let a: CommentId = serde_json::from_str("7").unwrap();
        let b: CommentId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "7");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"7\"");
    }
}
