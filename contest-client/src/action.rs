use crate::api::dom;

/// What a click inside a comment does, looked up from the clicked control's classes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionKind {
    BeginEdit,
    CancelEdit,
    SaveEdit,
    Delete,
}

impl ActionKind {
    pub fn from_class(class: &str) -> Option<ActionKind> {
        match class {
            dom::CLASS_EDIT_BUTTON => Some(ActionKind::BeginEdit),
            dom::CLASS_CANCEL_BUTTON => Some(ActionKind::CancelEdit),
            dom::CLASS_SAVE_BUTTON => Some(ActionKind::SaveEdit),
            dom::CLASS_DELETE_BUTTON => Some(ActionKind::Delete),
            _ => None,
        }
    }

    pub fn from_classes<'a, I>(classes: I) -> Option<ActionKind>
    where
        I: IntoIterator<Item = &'a str>,
    {
        classes.into_iter().find_map(ActionKind::from_class)
    }

    /// Whether handling this action may contact the server
    pub fn is_remote(&self) -> bool {
        matches!(self, ActionKind::SaveEdit | ActionKind::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(
            ActionKind::from_classes("btn btn-sm btn-link edit-comment-btn".split(' ')),
            Some(ActionKind::BeginEdit)
        );
        assert_eq!(
            ActionKind::from_classes(["btn", "text-danger", "delete-comment-btn"]),
            Some(ActionKind::Delete)
        );
        assert_eq!(
            ActionKind::from_classes(["save-comment-btn"]),
            Some(ActionKind::SaveEdit)
        );
        assert_eq!(
            ActionKind::from_classes(["cancel-edit-btn"]),
            Some(ActionKind::CancelEdit)
        );
        assert_eq!(ActionKind::from_classes(["btn", "btn-primary"]), None);
        assert_eq!(ActionKind::from_classes(std::iter::empty()), None);
    }

    #[test]
    fn only_save_and_delete_are_remote() {
        assert!(!ActionKind::BeginEdit.is_remote());
        assert!(!ActionKind::CancelEdit.is_remote());
        assert!(ActionKind::SaveEdit.is_remote());
        assert!(ActionKind::Delete.is_remote());
    }
}
