use crate::CommentItem;

/// Proof that an action is the latest one started on a comment
///
/// Issuing a ticket bumps the node's operation token, so any continuation
/// still holding an older ticket can tell it was superseded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OpTicket(u64);

impl OpTicket {
    pub fn issue<I: CommentItem>(item: &I) -> OpTicket {
        let token = item.op_token().wrapping_add(1);
        item.set_op_token(token);
        OpTicket(token)
    }

    pub fn is_current<I: CommentItem>(&self, item: &I) -> bool {
        item.is_attached() && item.op_token() == self.0
    }
}
