use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use contest_client::{
    api::{self, render, Comment, CommentId, EditedComment, EntryId, Error, Reply},
    Method, Request, Response,
};
use url::Url;

mod browser;
pub use browser::MockBrowser;

mod markup;

mod page;
pub use page::{MockForm, MockItem, MockLink, MockList, MockOverlay, MockPage, MockSection, MockToasts};

mod transport;
pub use transport::{Failure, MockTransport};

pub const BASE_URL: &str = "http://testserver";
pub const CSRF_TOKEN: &str = "mock-csrf-token";
pub const COMMENTS_PER_PAGE: usize = 3;

/// In-memory server answering the comment endpoints the way the real one does
pub struct MockServer {
    entries: BTreeMap<EntryId, Vec<StoredComment>>, // oldest first
    next_comment_id: u64,
    current_user: String,
}

#[derive(Clone, Debug)]
struct StoredComment {
    id: u64,
    author: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl StoredComment {
    fn to_api(&self) -> Comment {
        Comment {
            id: CommentId(self.id.to_string()),
            author: self.author.clone(),
            text: self.text.clone(),
            created_at: self.created_at.format("%b %-d, %Y, %H:%M").to_string(),
            edit_url: format!("/comments/{}/edit/", self.id),
            delete_url: format!("/comments/{}/delete/", self.id),
        }
    }
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            entries: BTreeMap::new(),
            next_comment_id: 1,
            current_user: String::from("Alice"),
        }
    }

    /// Name comments get created under, and the only author allowed to change them
    pub fn set_current_user(&mut self, name: &str) {
        self.current_user = String::from(name);
    }

    pub fn add_entry(&mut self, entry: EntryId) {
        self.entries.entry(entry).or_insert_with(Vec::new);
    }

    pub fn entries(&self) -> Vec<EntryId> {
        self.entries.keys().copied().collect()
    }

    /// Adds a comment as if posted earlier by `author`
    pub fn seed_comment(&mut self, entry: EntryId, author: &str, text: &str) -> CommentId {
        let id = self.next_comment_id;
        self.next_comment_id += 1;
        self.entries.entry(entry).or_default().push(StoredComment {
            id,
            author: String::from(author),
            text: String::from(text),
            created_at: Utc::now(),
        });
        CommentId(id.to_string())
    }

    /// Comments of an entry, newest first
    pub fn comments(&self, entry: EntryId) -> Vec<Comment> {
        self.entries
            .get(&entry)
            .map(|c| c.iter().rev().map(StoredComment::to_api).collect())
            .unwrap_or_default()
    }

    pub fn comment(&self, id: &CommentId) -> Option<Comment> {
        self.entries
            .values()
            .flat_map(|c| c.iter())
            .find(|c| c.id.to_string() == id.0)
            .map(StoredComment::to_api)
    }

    fn find_mut(&mut self, id: &str) -> Result<(EntryId, usize), Error> {
        for (entry, comments) in self.entries.iter() {
            if let Some(idx) = comments.iter().position(|c| c.id.to_string() == id) {
                return Ok((*entry, idx));
            }
        }
        Err(Error::CommentNotFound(CommentId(String::from(id))))
    }

    pub fn create(&mut self, entry: EntryId, text: &str) -> Result<Comment, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyComment);
        }
        if !self.entries.contains_key(&entry) {
            return Err(Error::EntryNotFound(entry.to_string()));
        }
        let author = self.current_user.clone();
        let id = self.seed_comment(entry, &author, text);
        self.comment(&id)
            .ok_or_else(|| Error::Unknown(String::from("comment vanished after creation")))
    }

    pub fn edit(&mut self, id: &str, text: &str) -> Result<EditedComment, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyComment);
        }
        let (entry, idx) = self.find_mut(id)?;
        let user = self.current_user.clone();
        let c = &mut self.entries.get_mut(&entry).expect("entry just found")[idx];
        if c.author != user {
            return Err(Error::PermissionDenied);
        }
        c.text = String::from(text);
        Ok(EditedComment { text: c.text.clone() })
    }

    pub fn delete(&mut self, id: &str) -> Result<(), Error> {
        let (entry, idx) = self.find_mut(id)?;
        let comments = self.entries.get_mut(&entry).expect("entry just found");
        if comments[idx].author != self.current_user {
            return Err(Error::PermissionDenied);
        }
        comments.remove(idx);
        Ok(())
    }

    pub fn num_pages(&self, entry: EntryId) -> usize {
        let n = self.entries.get(&entry).map(|c| c.len()).unwrap_or(0);
        std::cmp::max(1, (n + COMMENTS_PER_PAGE - 1) / COMMENTS_PER_PAGE)
    }

    /// Contents of an entry's comment section for a page number, out-of-range
    /// page numbers being clamped
    pub fn render_section(&self, entry: EntryId, page: usize) -> Result<String, Error> {
        if !self.entries.contains_key(&entry) {
            return Err(Error::EntryNotFound(entry.to_string()));
        }
        let num_pages = self.num_pages(entry);
        let page = page.clamp(1, num_pages);
        let comments = self
            .comments(entry)
            .into_iter()
            .skip((page - 1) * COMMENTS_PER_PAGE)
            .take(COMMENTS_PER_PAGE)
            .collect::<Vec<_>>();

        let mut html = String::from("<div class=\"list-group comment-list\">\n");
        if comments.is_empty() {
            html.push_str(&render::placeholder());
            html.push('\n');
        }
        for c in comments {
            html.push_str(&render::comment_item(&c));
            html.push('\n');
        }
        html.push_str("</div>\n");
        if num_pages > 1 {
            html.push_str("<nav class=\"comment-pagination\"><ul class=\"pagination pagination-sm\">\n");
            for p in (1..=num_pages).filter(|p| *p != page) {
                html.push_str(&format!(
                    "<li class=\"page-item\"><a class=\"page-link\" href=\"{BASE_URL}/?comments_{entry}={p}\" data-entry-id=\"{entry}\">{p}</a></li>\n"
                ));
            }
            html.push_str("</ul></nav>\n");
        }
        Ok(html)
    }

    pub fn handle(&mut self, req: &Request) -> Response {
        let res = self.route(req);
        match res {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!(url = %req.url, error = %e, "mock server refusing request");
                Response {
                    status: e.status_code().as_u16(),
                    body: String::from_utf8_lossy(&e.contents()).into_owned(),
                }
            }
        }
    }

    fn route(&mut self, req: &Request) -> Result<Response, Error> {
        if req.header(api::REQUESTED_WITH_HEADER) != Some(api::REQUESTED_WITH_VALUE) {
            return Err(Error::NotAjax);
        }
        let url = Url::parse(BASE_URL)
            .and_then(|base| base.join(&req.url))
            .map_err(|e| Error::Unknown(format!("unparseable url {:?}: {e}", req.url)))?;
        let segments = url
            .path_segments()
            .map(|s| s.filter(|s| !s.is_empty()).collect::<Vec<_>>())
            .unwrap_or_default();
        match (req.method, segments.as_slice()) {
            (Method::Get, []) => self.fragment(&url),
            (Method::Post, ["entries", entry, "comment"]) => {
                check_csrf(req)?;
                let entry = entry
                    .parse()
                    .map(EntryId)
                    .map_err(|_| Error::EntryNotFound(String::from(*entry)))?;
                let text = req
                    .form
                    .iter()
                    .find(|(k, _)| k == "text" || k.ends_with("-text"))
                    .map(|(_, v)| v as &str)
                    .unwrap_or("");
                json(&Reply::ok(self.create(entry, text)?))
            }
            (Method::Post, ["comments", id, "edit"]) => {
                check_csrf(req)?;
                let text = req.field("text").unwrap_or("");
                json(&Reply::ok(self.edit(id, text)?))
            }
            (Method::Post, ["comments", id, "delete"]) => {
                check_csrf(req)?;
                self.delete(id)?;
                json(&serde_json::json!({ "success": true }))
            }
            _ => Err(Error::Unknown(format!(
                "no route for {:?} {}",
                req.method, req.url
            ))),
        }
    }

    fn fragment(&self, url: &Url) -> Result<Response, Error> {
        if !url.query_pairs().any(|(k, v)| k == api::AJAX_PARAM && v == "1") {
            return Err(Error::NotAjax);
        }
        let (entry, page) = url
            .query_pairs()
            .find_map(|(k, v)| {
                let entry = k.strip_prefix("comments_")?.parse().ok()?;
                Some((EntryId(entry), v.parse().unwrap_or(1)))
            })
            .ok_or_else(|| Error::EntryNotFound(String::from("none")))?;
        Ok(Response {
            status: 200,
            body: self.render_section(entry, page)?,
        })
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

fn check_csrf(req: &Request) -> Result<(), Error> {
    let token = req
        .field(api::DEFAULT_CSRF_FIELD)
        .or_else(|| req.header(api::DEFAULT_CSRF_HEADER));
    match token {
        Some(CSRF_TOKEN) => Ok(()),
        _ => Err(Error::MissingCsrfToken),
    }
}

fn json<V: serde::Serialize>(v: &V) -> Result<Response, Error> {
    Ok(Response {
        status: 200,
        body: serde_json::to_string(v)
            .map_err(|e| Error::Unknown(format!("serializing answer: {e}")))?,
    })
}
