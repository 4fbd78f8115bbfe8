use serde::de::{DeserializeOwned, IgnoredAny};

use crate::{
    api::{self, dom, render, Comment, EditedComment, Reply},
    csrf::{self, CsrfToken},
    notice, ActionError, ActionKind, Browser, CommentForm, CommentItem, CommentList, Config,
    OpTicket, Page, Request, Response, Transport,
};

/// Comment lifecycle controller
///
/// Holds no state of its own besides its configuration: every action reads
/// what it needs from the page when it starts, and patches the page only once
/// the server confirmed the change.
pub struct Controller<P, B, T> {
    pub(crate) page: P,
    pub(crate) browser: B,
    pub(crate) transport: T,
    pub(crate) config: Config,
}

impl<P, B, T> Controller<P, B, T>
where
    P: Page,
    B: Browser,
    T: Transport,
{
    pub fn new(page: P, browser: B, transport: T, config: Config) -> Controller<P, B, T> {
        Controller {
            page,
            browser,
            transport,
            config,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn report(&self, action: &str, failed: &'static str, e: ActionError) {
        e.log(action);
        if let Some(msg) = e.notice(failed) {
            self.browser.alert(msg);
        }
    }

    fn resolve_token(&self, scoped: Option<String>) -> Result<CsrfToken, ActionError> {
        csrf::resolve(scoped, || self.page.page_csrf_token(&self.config.csrf_field))
            .ok_or(ActionError::Validation(notice::MISSING_TOKEN))
    }

    fn mutation(&self, url: String, form: Vec<(String, String)>, token: &CsrfToken) -> Request {
        let mut req = Request::post(url, form);
        csrf::attach(&mut req, token, &self.config);
        req
    }

    /// Entry point of the delegated click listener
    pub async fn dispatch<I: CommentItem>(&self, kind: ActionKind, item: &I) {
        match kind {
            ActionKind::BeginEdit => self.begin_edit(item),
            ActionKind::CancelEdit => self.cancel_edit(item),
            ActionKind::SaveEdit => self.save_edit(item).await,
            ActionKind::Delete => self.delete(item).await,
        }
    }

    /// Finds the list a form's new comments go to
    ///
    /// Known enclosing scopes are tried innermost first, then the section whose
    /// id derives from the entry id embedded in the form action.
    pub fn resolve_list<F>(&self, form: &F) -> Result<P::List, ActionError>
    where
        F: CommentForm<List = P::List>,
    {
        if let Some(list) = dom::FORM_SCOPES
            .iter()
            .find_map(|scope| form.list_in_scope(scope))
        {
            return Ok(list);
        }
        let action = form.action();
        let entry = api::entry_id_from_action(&action).ok_or_else(|| {
            ActionError::Resolution(format!("comment list of form with action {action:?}"))
        })?;
        let section = api::section_id(entry);
        self.page.list_in_section(&section).ok_or_else(|| {
            ActionError::Resolution(format!("comment list in section {section:?}"))
        })
    }

    pub async fn submit<F>(&self, form: &F)
    where
        F: CommentForm<List = P::List>,
    {
        if let Err(e) = self.try_submit(form).await {
            self.report("create", notice::CREATE_FAILED, e);
        }
    }

    async fn try_submit<F>(&self, form: &F) -> Result<(), ActionError>
    where
        F: CommentForm<List = P::List>,
    {
        if form.text().trim().is_empty() {
            return Err(ActionError::Validation(notice::EMPTY_COMMENT));
        }
        let list = self.resolve_list(form)?;
        let fields = form.fields();
        let scoped = fields
            .iter()
            .find(|(k, _)| *k == self.config.csrf_field)
            .map(|(_, v)| v.clone());
        let token = self.resolve_token(scoped)?;
        let req = self.mutation(form.action(), fields, &token);

        tracing::debug!(url = %req.url, "submitting comment");
        let resp = self.transport.send(req).await;
        let comment: Comment = expect_comment(resp.map_err(ActionError::Network)?)?;
        tracing::debug!(comment_id = %comment.id, "comment created");

        if list.is_attached() {
            if list.has_placeholder() {
                list.remove_placeholder();
            }
            list.prepend_html(&render::comment_item(&comment));
        } else {
            tracing::debug!(comment_id = %comment.id, "comment list was replaced meanwhile, not inserting");
        }
        form.reset_text();
        Ok(())
    }

    pub fn begin_edit<I: CommentItem>(&self, item: &I) {
        if !item.is_editing() {
            item.set_editor_text(&item.text());
        }
        item.set_editing(true);
        item.focus_editor();
    }

    pub fn cancel_edit<I: CommentItem>(&self, item: &I) {
        item.set_editor_text(&item.text());
        item.set_editing(false);
    }

    pub async fn save_edit<I: CommentItem>(&self, item: &I) {
        if let Err(e) = self.try_save_edit(item).await {
            self.report("edit", notice::EDIT_FAILED, e);
        }
    }

    async fn try_save_edit<I: CommentItem>(&self, item: &I) -> Result<(), ActionError> {
        let text = item.editor_text().trim().to_string();
        if text.is_empty() {
            return Err(ActionError::Validation(notice::EMPTY_COMMENT));
        }
        let token = self.resolve_token(item.scoped_csrf_token(&self.config.csrf_field))?;
        let url = item.edit_url().ok_or_else(|| {
            ActionError::Resolution(format!("edit url of comment {:?}", item.comment_id()))
        })?;
        let req = self.mutation(url, vec![(String::from("text"), text)], &token);

        let ticket = OpTicket::issue(item);
        tracing::debug!(comment_id = ?item.comment_id(), url = %req.url, "saving comment edit");
        let resp = self.transport.send(req).await;
        if !ticket.is_current(item) {
            return Err(ActionError::Stale);
        }
        let edited: EditedComment = expect_comment(resp.map_err(ActionError::Network)?)?;

        item.set_text(&edited.text);
        item.set_editor_text(&edited.text);
        item.set_editing(false);
        Ok(())
    }

    pub async fn delete<I: CommentItem>(&self, item: &I) {
        if let Err(e) = self.try_delete(item).await {
            self.report("delete", notice::DELETE_FAILED, e);
        }
    }

    async fn try_delete<I: CommentItem>(&self, item: &I) -> Result<(), ActionError> {
        if !self.browser.confirm(notice::CONFIRM_DELETE) {
            tracing::debug!(comment_id = ?item.comment_id(), "deletion not confirmed");
            return Ok(());
        }
        let token = self.resolve_token(item.scoped_csrf_token(&self.config.csrf_field))?;
        let url = item.delete_url().ok_or_else(|| {
            ActionError::Resolution(format!("delete url of comment {:?}", item.comment_id()))
        })?;
        let req = self.mutation(url, Vec::new(), &token);

        // pending saves go stale once the node is removed, not before
        let list = item.list();
        tracing::debug!(comment_id = ?item.comment_id(), url = %req.url, "deleting comment");
        let resp = self.transport.send(req).await;
        if !item.is_attached() {
            return Err(ActionError::Stale);
        }
        expect_success::<IgnoredAny>(resp.map_err(ActionError::Network)?)?;

        item.remove();
        if let Some(list) = list {
            if list.is_attached() && list.comment_count() == 0 {
                list.show_placeholder();
            }
        }
        Ok(())
    }
}

/// Checks status and `success` flag, returning the reply's payload if any
fn expect_success<C: DeserializeOwned>(resp: Response) -> Result<Option<C>, ActionError> {
    if !resp.is_success() {
        let errors = serde_json::from_str::<serde_json::Value>(&resp.body)
            .ok()
            .and_then(|v| v.get("errors").cloned());
        return Err(ActionError::HttpStatus {
            status: resp.status,
            errors,
        });
    }
    let reply: Reply<C> = serde_json::from_str(&resp.body).map_err(ActionError::Malformed)?;
    if !reply.success {
        return Err(ActionError::Rejected(reply.errors));
    }
    Ok(reply.comment)
}

fn expect_comment<C: DeserializeOwned>(resp: Response) -> Result<C, ActionError> {
    expect_success(resp)?.ok_or(ActionError::Incomplete("comment"))
}
