//! In-memory model of the server-rendered page
//!
//! Every handle shares its node with the page, mirroring how DOM element
//! handles behave: cloning a handle never clones the node.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use contest_client::{
    api::{self, CommentId, EntryId},
    CommentForm, CommentItem, CommentList, CommentSection, ImageOverlay, Page, PaginationLink,
    ToastRegion,
};

use crate::markup::{self, ParsedNode};

#[derive(Clone)]
pub struct MockPage(Rc<PageState>);

struct PageState {
    sections: RefCell<BTreeMap<String, MockSection>>,
    page_token: RefCell<Option<String>>,
    overlay: RefCell<Option<MockOverlay>>,
    toasts: RefCell<Option<MockToasts>>,
    toast_regions_created: Cell<usize>,
}

impl MockPage {
    pub fn new() -> MockPage {
        MockPage(Rc::new(PageState {
            sections: RefCell::new(BTreeMap::new()),
            page_token: RefCell::new(None),
            overlay: RefCell::new(Some(MockOverlay::default())),
            toasts: RefCell::new(None),
            toast_regions_created: Cell::new(0),
        }))
    }

    /// The page as the server renders it: first comment page of every entry,
    /// each section scoping the server's anti-forgery token
    pub fn load(server: &crate::MockServer) -> MockPage {
        let page = MockPage::new();
        for entry in server.entries() {
            let html = server
                .render_section(entry, 1)
                .unwrap_or_else(|e| panic!("rendering section of entry {entry}: {e}"));
            page.add_section(&api::section_id(entry), Some(crate::CSRF_TOKEN), &html);
        }
        page
    }

    pub fn add_section(&self, id: &str, scope_token: Option<&str>, html: &str) -> MockSection {
        let section = MockSection(Rc::new(SectionState {
            scope_token: scope_token.map(String::from),
            list: RefCell::new(MockList::detached()),
            links: RefCell::new(Vec::new()),
            html: RefCell::new(String::new()),
        }));
        section.replace_html(html);
        self.0
            .sections
            .borrow_mut()
            .insert(String::from(id), section.clone());
        section
    }

    pub fn section_by_id(&self, id: &str) -> Option<MockSection> {
        self.0.sections.borrow().get(id).cloned()
    }

    pub fn set_page_token(&self, token: Option<&str>) {
        *self.0.page_token.borrow_mut() = token.map(String::from);
    }

    pub fn remove_overlay(&self) {
        *self.0.overlay.borrow_mut() = None;
    }

    /// The form under an entry's comment section, inside the same card
    pub fn comment_form(&self, entry: EntryId, token: Option<&str>) -> MockForm {
        MockForm(Rc::new(FormState {
            page: self.clone(),
            action: format!("/entries/{entry}/comment/"),
            text_field: format!("entry_{entry}-text"),
            text: RefCell::new(String::new()),
            token: token.map(String::from),
            scopes: vec![String::from("card-body")],
            section_id: Some(api::section_id(entry)),
            focused: Cell::new(false),
        }))
    }

    /// A form outside of any known scope, only its action tells where it belongs
    pub fn orphan_form(&self, action: &str, token: Option<&str>) -> MockForm {
        MockForm(Rc::new(FormState {
            page: self.clone(),
            action: String::from(action),
            text_field: String::from("text"),
            text: RefCell::new(String::new()),
            token: token.map(String::from),
            scopes: Vec::new(),
            section_id: None,
            focused: Cell::new(false),
        }))
    }

    /// Comment node currently on the page
    pub fn item(&self, id: &str) -> Option<MockItem> {
        self.0
            .sections
            .borrow()
            .values()
            .flat_map(|s| s.list().items())
            .find(|i| i.0.id == id)
    }

    pub fn overlay(&self) -> Option<MockOverlay> {
        self.0.overlay.borrow().clone()
    }

    pub fn toasts(&self) -> Option<MockToasts> {
        self.0.toasts.borrow().clone()
    }

    pub fn toast_regions_created(&self) -> usize {
        self.0.toast_regions_created.get()
    }
}

impl Default for MockPage {
    fn default() -> MockPage {
        MockPage::new()
    }
}

impl Page for MockPage {
    type List = MockList;
    type Section = MockSection;
    type Link = MockLink;
    type Overlay = MockOverlay;
    type Toasts = MockToasts;

    fn section(&self, section_id: &str) -> Option<MockSection> {
        self.section_by_id(section_id)
    }

    fn list_in_section(&self, section_id: &str) -> Option<MockList> {
        self.section_by_id(section_id).map(|s| s.list())
    }

    fn pagination_links(&self) -> Vec<MockLink> {
        self.0
            .sections
            .borrow()
            .values()
            .flat_map(|s| s.links())
            .collect()
    }

    fn page_csrf_token(&self, _field: &str) -> Option<String> {
        self.0.page_token.borrow().clone()
    }

    fn image_overlay(&self) -> Option<MockOverlay> {
        self.overlay()
    }

    fn toast_region(&self) -> MockToasts {
        self.0
            .toasts
            .borrow_mut()
            .get_or_insert_with(|| {
                self.0
                    .toast_regions_created
                    .set(self.0.toast_regions_created.get() + 1);
                MockToasts::default()
            })
            .clone()
    }
}

#[derive(Clone)]
pub struct MockSection(Rc<SectionState>);

struct SectionState {
    scope_token: Option<String>,
    list: RefCell<MockList>,
    links: RefCell<Vec<MockLink>>,
    html: RefCell<String>,
}

impl MockSection {
    pub fn list(&self) -> MockList {
        self.0.list.borrow().clone()
    }

    pub fn links(&self) -> Vec<MockLink> {
        self.0.links.borrow().clone()
    }

    /// Last markup swapped in
    pub fn html(&self) -> String {
        self.0.html.borrow().clone()
    }
}

impl CommentSection for MockSection {
    fn replace_html(&self, html: &str) {
        // like innerHTML, the old nodes and their listeners are gone
        self.0.list.borrow().0.attached.set(false);
        let list = MockList::new(self.0.scope_token.clone());
        list.set_nodes(markup::parse_nodes(html));
        *self.0.list.borrow_mut() = list;
        *self.0.links.borrow_mut() = markup::parse_links(html)
            .into_iter()
            .map(|l| {
                MockLink(Rc::new(LinkState {
                    href: l.href,
                    entry_id: l.entry_id,
                    handler: RefCell::new(None),
                }))
            })
            .collect();
        *self.0.html.borrow_mut() = String::from(html);
    }
}

#[derive(Clone)]
pub struct MockList(Rc<ListState>);

struct ListState {
    nodes: RefCell<Vec<MockNode>>,
    attached: Cell<bool>,
    scope_token: Option<String>,
}

#[derive(Clone)]
enum MockNode {
    Comment(MockItem),
    Placeholder,
}

impl MockList {
    fn new(scope_token: Option<String>) -> MockList {
        MockList(Rc::new(ListState {
            nodes: RefCell::new(Vec::new()),
            attached: Cell::new(true),
            scope_token,
        }))
    }

    fn detached() -> MockList {
        let l = MockList::new(None);
        l.0.attached.set(false);
        l
    }

    fn to_nodes(&self, parsed: Vec<ParsedNode>) -> Vec<MockNode> {
        parsed
            .into_iter()
            .map(|n| match n {
                ParsedNode::Placeholder => MockNode::Placeholder,
                ParsedNode::Comment(c) => MockNode::Comment(MockItem(Rc::new(ItemState {
                    id: c.id,
                    author: c.author,
                    created_at: c.created_at,
                    text: RefCell::new(c.text.clone()),
                    editor: RefCell::new(c.text),
                    editing: Cell::new(false),
                    editor_focused: Cell::new(false),
                    edit_url: c.edit_url,
                    delete_url: c.delete_url,
                    op_token: Cell::new(0),
                    removed: Cell::new(false),
                    list: Rc::downgrade(&self.0),
                }))),
            })
            .collect()
    }

    fn set_nodes(&self, parsed: Vec<ParsedNode>) {
        let nodes = self.to_nodes(parsed);
        *self.0.nodes.borrow_mut() = nodes;
    }

    /// Comment nodes, first one on top
    pub fn items(&self) -> Vec<MockItem> {
        self.0
            .nodes
            .borrow()
            .iter()
            .filter_map(|n| match n {
                MockNode::Comment(i) => Some(i.clone()),
                MockNode::Placeholder => None,
            })
            .collect()
    }

    pub fn comment_ids(&self) -> Vec<String> {
        self.items().iter().map(|i| i.0.id.clone()).collect()
    }

    pub fn num_placeholders(&self) -> usize {
        self.0
            .nodes
            .borrow()
            .iter()
            .filter(|n| matches!(n, MockNode::Placeholder))
            .count()
    }

    pub fn num_nodes(&self) -> usize {
        self.0.nodes.borrow().len()
    }
}

impl CommentList for MockList {
    fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    fn comment_count(&self) -> usize {
        self.items().len()
    }

    fn has_placeholder(&self) -> bool {
        self.num_placeholders() > 0
    }

    fn remove_placeholder(&self) {
        self.0
            .nodes
            .borrow_mut()
            .retain(|n| !matches!(n, MockNode::Placeholder));
    }

    fn show_placeholder(&self) {
        let old = std::mem::replace(&mut *self.0.nodes.borrow_mut(), vec![MockNode::Placeholder]);
        for n in old {
            if let MockNode::Comment(i) = n {
                i.0.removed.set(true);
            }
        }
    }

    fn prepend_html(&self, html: &str) {
        let mut nodes = self.to_nodes(markup::parse_nodes(html));
        let mut current = self.0.nodes.borrow_mut();
        nodes.append(&mut current);
        *current = nodes;
    }
}

#[derive(Clone)]
pub struct MockItem(Rc<ItemState>);

struct ItemState {
    id: String,
    author: String,
    created_at: String,
    text: RefCell<String>,
    editor: RefCell<String>,
    editing: Cell<bool>,
    editor_focused: Cell<bool>,
    edit_url: Option<String>,
    delete_url: Option<String>,
    op_token: Cell<u64>,
    removed: Cell<bool>,
    list: Weak<ListState>,
}

impl MockItem {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn author(&self) -> &str {
        &self.0.author
    }

    pub fn created_at(&self) -> &str {
        &self.0.created_at
    }

    pub fn is_editor_focused(&self) -> bool {
        self.0.editor_focused.get()
    }

    /// Simulates typing into the edit form
    pub fn type_in_editor(&self, text: &str) {
        *self.0.editor.borrow_mut() = String::from(text);
    }
}

impl CommentItem for MockItem {
    type List = MockList;

    fn comment_id(&self) -> Option<CommentId> {
        Some(CommentId(self.0.id.clone()))
    }

    fn is_attached(&self) -> bool {
        !self.0.removed.get() && self.list().map_or(false, |l| l.is_attached())
    }

    fn list(&self) -> Option<MockList> {
        self.0.list.upgrade().map(MockList)
    }

    fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.0.text.borrow_mut() = String::from(text);
    }

    fn editor_text(&self) -> String {
        self.0.editor.borrow().clone()
    }

    fn set_editor_text(&self, text: &str) {
        *self.0.editor.borrow_mut() = String::from(text);
    }

    fn is_editing(&self) -> bool {
        self.0.editing.get()
    }

    fn set_editing(&self, editing: bool) {
        self.0.editing.set(editing);
        if !editing {
            self.0.editor_focused.set(false);
        }
    }

    fn focus_editor(&self) {
        self.0.editor_focused.set(true);
    }

    fn edit_url(&self) -> Option<String> {
        self.0.edit_url.clone()
    }

    fn delete_url(&self) -> Option<String> {
        self.0.delete_url.clone()
    }

    fn op_token(&self) -> u64 {
        self.0.op_token.get()
    }

    fn set_op_token(&self, token: u64) {
        self.0.op_token.set(token);
    }

    fn scoped_csrf_token(&self, _field: &str) -> Option<String> {
        self.0.list.upgrade().and_then(|l| l.scope_token.clone())
    }

    fn remove(&self) {
        if let Some(l) = self.0.list.upgrade() {
            l.nodes.borrow_mut().retain(|n| match n {
                MockNode::Comment(i) => !Rc::ptr_eq(&i.0, &self.0),
                MockNode::Placeholder => true,
            });
        }
        self.0.removed.set(true);
    }
}

#[derive(Clone)]
pub struct MockForm(Rc<FormState>);

struct FormState {
    page: MockPage,
    action: String,
    text_field: String,
    text: RefCell<String>,
    token: Option<String>,
    scopes: Vec<String>,
    section_id: Option<String>,
    focused: Cell<bool>,
}

impl MockForm {
    pub fn type_text(&self, text: &str) {
        *self.0.text.borrow_mut() = String::from(text);
        self.0.focused.set(false);
    }

    pub fn is_focused(&self) -> bool {
        self.0.focused.get()
    }
}

impl CommentForm for MockForm {
    type List = MockList;

    fn action(&self) -> String {
        self.0.action.clone()
    }

    fn fields(&self) -> Vec<(String, String)> {
        let mut res = Vec::new();
        if let Some(tok) = &self.0.token {
            res.push((String::from(api::DEFAULT_CSRF_FIELD), tok.clone()));
        }
        res.push((self.0.text_field.clone(), self.0.text.borrow().clone()));
        res
    }

    fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    fn reset_text(&self) {
        self.0.text.borrow_mut().clear();
        self.0.focused.set(true);
    }

    fn list_in_scope(&self, scope_class: &str) -> Option<MockList> {
        if !self.0.scopes.iter().any(|s| s == scope_class) {
            return None;
        }
        self.0
            .section_id
            .as_ref()
            .and_then(|s| self.0.page.list_in_section(s))
    }
}

#[derive(Clone)]
pub struct MockLink(Rc<LinkState>);

struct LinkState {
    href: String,
    entry_id: Option<EntryId>,
    handler: RefCell<Option<Rc<dyn Fn()>>>,
}

impl MockLink {
    /// Runs the link's click handler, returns whether there was one
    pub fn click(&self) -> bool {
        let handler = self.0.handler.borrow().clone();
        match handler {
            Some(h) => {
                h();
                true
            }
            None => false,
        }
    }

    pub fn href_str(&self) -> &str {
        &self.0.href
    }
}

impl PaginationLink for MockLink {
    fn href(&self) -> Option<String> {
        Some(self.0.href.clone())
    }

    fn entry_id(&self) -> Option<EntryId> {
        self.0.entry_id
    }

    fn set_click_handler(&self, handler: Box<dyn Fn()>) {
        *self.0.handler.borrow_mut() = Some(Rc::from(handler));
    }
}

#[derive(Clone, Default)]
pub struct MockOverlay(Rc<OverlayState>);

#[derive(Default)]
struct OverlayState {
    src: RefCell<Option<String>>,
    times_shown: Cell<usize>,
}

impl MockOverlay {
    pub fn src(&self) -> Option<String> {
        self.0.src.borrow().clone()
    }

    pub fn times_shown(&self) -> usize {
        self.0.times_shown.get()
    }
}

impl ImageOverlay for MockOverlay {
    fn show_image(&self, src: &str) {
        *self.0.src.borrow_mut() = Some(String::from(src));
        self.0.times_shown.set(self.0.times_shown.get() + 1);
    }
}

#[derive(Clone, Default)]
pub struct MockToasts(Rc<RefCell<Vec<String>>>);

impl MockToasts {
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl ToastRegion for MockToasts {
    fn push(&self, message: &str) {
        self.0.borrow_mut().push(String::from(message));
    }
}
