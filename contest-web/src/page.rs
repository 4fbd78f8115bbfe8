use std::cell::RefCell;

use contest_client::{
    api::{dom, render, CommentId, EntryId},
    CommentForm, CommentItem, CommentList, CommentSection, ImageOverlay, Page, PaginationLink,
    ToastRegion,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlFormElement, HtmlImageElement,
    HtmlInputElement, HtmlTextAreaElement, MouseEvent,
};
use yew::html::Scope;

use crate::{ui, util};

fn closest(elt: &Element, selector: &str) -> Option<Element> {
    elt.closest(selector).ok().flatten()
}

fn find(elt: &Element, selector: &str) -> Option<Element> {
    elt.query_selector(selector).ok().flatten()
}

fn find_all(elt: &Element, selector: &str) -> Vec<Element> {
    let nodes = match elt.query_selector_all(selector) {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(selector, ?e, "invalid selector");
            return Vec::new();
        }
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn set_shown(elt: &Element, shown: bool) {
    if let Some(elt) = elt.dyn_ref::<HtmlElement>() {
        let style = elt.style();
        let res = match shown {
            true => style.remove_property("display").map(|_| ()),
            false => style.set_property("display", "none"),
        };
        if let Err(e) = res {
            tracing::error!(?e, "failed toggling element display");
        }
    }
}

fn is_shown(elt: &Element) -> bool {
    elt.dyn_ref::<HtmlElement>()
        .map(|e| e.style().get_property_value("display").ok().as_deref() != Some("none"))
        .unwrap_or(true)
}

/// Value of the `input` named `field` inside `scope`
fn token_input(scope: &Element, field: &str) -> Option<String> {
    find(scope, &format!("input[name=\"{field}\"]"))
        .and_then(|i| i.dyn_into::<HtmlInputElement>().ok())
        .map(|i| i.value())
        .filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    pub fn new(document: Document) -> WebPage {
        WebPage { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    pub fn all(&self, selector: &str) -> Vec<Element> {
        self.root()
            .map(|r| find_all(&r, selector))
            .unwrap_or_default()
    }
}

impl Page for WebPage {
    type List = WebList;
    type Section = WebSection;
    type Link = WebLink;
    type Overlay = WebOverlay;
    type Toasts = WebToasts;

    fn section(&self, section_id: &str) -> Option<WebSection> {
        self.document.get_element_by_id(section_id).map(WebSection)
    }

    fn list_in_section(&self, section_id: &str) -> Option<WebList> {
        self.document
            .get_element_by_id(section_id)
            .and_then(|s| find(&s, &format!(".{}", dom::CLASS_COMMENT_LIST)))
            .map(WebList)
    }

    fn pagination_links(&self) -> Vec<WebLink> {
        self.all(&format!(".{} a[href]", dom::CLASS_PAGINATION))
            .into_iter()
            .filter_map(|a| a.dyn_into::<HtmlAnchorElement>().ok())
            .map(WebLink)
            .collect()
    }

    fn page_csrf_token(&self, field: &str) -> Option<String> {
        self.root().and_then(|r| token_input(&r, field))
    }

    fn image_overlay(&self) -> Option<WebOverlay> {
        let modal = self.document.get_element_by_id(dom::ID_IMAGE_MODAL)?;
        let image = self
            .document
            .get_element_by_id(dom::ID_MODAL_IMAGE)?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        Some(WebOverlay { modal, image })
    }

    fn toast_region(&self) -> WebToasts {
        match ui::toast_region(&self.document) {
            Ok(scope) => WebToasts(Some(scope)),
            Err(e) => {
                tracing::error!("failed creating the notification region: {e:#}");
                WebToasts(None)
            }
        }
    }
}

#[derive(Clone)]
pub struct WebForm(pub HtmlFormElement);

impl WebForm {
    fn text_input(&self) -> Option<Element> {
        find(&self.0, "textarea[name$=\"text\"], input[name$=\"text\"]")
    }
}

impl CommentForm for WebForm {
    type List = WebList;

    fn action(&self) -> String {
        self.0
            .get_attribute("action")
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.0.action())
    }

    fn fields(&self) -> Vec<(String, String)> {
        let data = match web_sys::FormData::new_with_form(&self.0) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(?e, "failed serializing comment form");
                return Vec::new();
            }
        };
        let entries = match js_sys::try_iter(&data) {
            Ok(Some(entries)) => entries,
            _ => return Vec::new(),
        };
        entries
            .flatten()
            .filter_map(|entry| {
                let pair = js_sys::Array::from(&entry);
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn text(&self) -> String {
        match self.text_input() {
            Some(i) => match i.dyn_into::<HtmlTextAreaElement>() {
                Ok(t) => t.value(),
                Err(i) => i
                    .dyn_into::<HtmlInputElement>()
                    .map(|i| i.value())
                    .unwrap_or_default(),
            },
            None => String::new(),
        }
    }

    fn reset_text(&self) {
        if let Some(i) = self.text_input() {
            match i.dyn_into::<HtmlTextAreaElement>() {
                Ok(t) => {
                    t.set_value("");
                    let _ = t.focus();
                }
                Err(i) => {
                    if let Ok(i) = i.dyn_into::<HtmlInputElement>() {
                        i.set_value("");
                        let _ = i.focus();
                    }
                }
            }
        }
    }

    fn list_in_scope(&self, scope_class: &str) -> Option<WebList> {
        let scope = closest(&self.0, &format!(".{scope_class}"))?;
        find(&scope, &format!(".{}", dom::CLASS_COMMENT_LIST)).map(WebList)
    }
}

#[derive(Clone)]
pub struct WebList(Element);

impl WebList {
    fn placeholders(&self) -> Vec<Element> {
        find_all(
            &self.0,
            &format!(".{}, .{}", dom::CLASS_PLACEHOLDER, dom::CLASS_MUTED),
        )
        .into_iter()
        .filter(|e| {
            render::is_placeholder(&e.class_name(), &e.text_content().unwrap_or_default())
        })
        .collect()
    }
}

impl CommentList for WebList {
    fn is_attached(&self) -> bool {
        self.0.is_connected()
    }

    fn comment_count(&self) -> usize {
        find_all(
            &self.0,
            &format!(":scope > [{}]", dom::ATTR_COMMENT_ID),
        )
        .len()
    }

    fn has_placeholder(&self) -> bool {
        !self.placeholders().is_empty()
    }

    fn remove_placeholder(&self) {
        for p in self.placeholders() {
            p.remove();
        }
    }

    fn show_placeholder(&self) {
        self.0.set_inner_html(&render::placeholder());
    }

    fn prepend_html(&self, html: &str) {
        if let Err(e) = self.0.insert_adjacent_html("afterbegin", html) {
            tracing::error!(?e, "failed inserting comment markup");
        }
    }
}

/// A comment node, found from any element inside of it
#[derive(Clone)]
pub struct WebItem(Element);

impl WebItem {
    pub fn containing(elt: &Element) -> Option<WebItem> {
        closest(
            elt,
            &format!(".{}[{}]", dom::CLASS_COMMENT_ITEM, dom::ATTR_COMMENT_ID),
        )
        .map(WebItem)
    }

    fn editor(&self) -> Option<HtmlTextAreaElement> {
        find(&self.0, &format!(".{} textarea", dom::CLASS_EDIT_FORM))
            .and_then(|t| t.dyn_into().ok())
    }

    fn attr_below(&self, attr: &str) -> Option<String> {
        find(&self.0, &format!("[{attr}]")).and_then(|e| e.get_attribute(attr))
    }
}

impl CommentItem for WebItem {
    type List = WebList;

    fn comment_id(&self) -> Option<CommentId> {
        self.0.get_attribute(dom::ATTR_COMMENT_ID).map(CommentId)
    }

    fn is_attached(&self) -> bool {
        self.0.is_connected()
    }

    fn list(&self) -> Option<WebList> {
        closest(&self.0, &format!(".{}", dom::CLASS_COMMENT_LIST)).map(WebList)
    }

    fn text(&self) -> String {
        find(&self.0, &format!(".{}", dom::CLASS_COMMENT_TEXT))
            .and_then(|t| t.text_content())
            .unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        if let Some(t) = find(&self.0, &format!(".{}", dom::CLASS_COMMENT_TEXT)) {
            t.set_text_content(Some(text));
        }
    }

    fn editor_text(&self) -> String {
        self.editor().map(|e| e.value()).unwrap_or_default()
    }

    fn set_editor_text(&self, text: &str) {
        if let Some(e) = self.editor() {
            e.set_value(text);
        }
    }

    fn is_editing(&self) -> bool {
        find(&self.0, &format!(".{}", dom::CLASS_EDIT_FORM))
            .map(|f| is_shown(&f))
            .unwrap_or(false)
    }

    fn set_editing(&self, editing: bool) {
        if let Some(f) = find(&self.0, &format!(".{}", dom::CLASS_EDIT_FORM)) {
            set_shown(&f, editing);
        }
        if let Some(t) = find(&self.0, &format!(".{}", dom::CLASS_COMMENT_TEXT)) {
            set_shown(&t, !editing);
        }
    }

    fn focus_editor(&self) {
        if let Some(e) = self.editor() {
            let _ = e.focus();
        }
    }

    fn edit_url(&self) -> Option<String> {
        self.attr_below(dom::ATTR_EDIT_URL)
    }

    fn delete_url(&self) -> Option<String> {
        self.attr_below(dom::ATTR_DELETE_URL)
    }

    fn op_token(&self) -> u64 {
        self.0
            .get_attribute(dom::ATTR_OP_TOKEN)
            .and_then(|t| t.parse().ok())
            .unwrap_or(0)
    }

    fn set_op_token(&self, token: u64) {
        if let Err(e) = self
            .0
            .set_attribute(dom::ATTR_OP_TOKEN, &token.to_string())
        {
            tracing::error!(?e, "failed setting operation token");
        }
    }

    fn scoped_csrf_token(&self, field: &str) -> Option<String> {
        dom::TOKEN_SCOPES
            .iter()
            .filter_map(|s| closest(&self.0, &format!(".{s}")))
            .find_map(|scope| token_input(&scope, field))
    }

    fn remove(&self) {
        self.0.remove();
    }
}

pub struct WebSection(Element);

impl CommentSection for WebSection {
    fn replace_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }
}

thread_local! {
    /// Closures currently installed as a pagination link's `onclick`
    static LINK_HANDLERS: RefCell<Vec<(HtmlAnchorElement, Closure<dyn FnMut(MouseEvent)>)>> =
        RefCell::new(Vec::new());
}

#[derive(Clone)]
pub struct WebLink(HtmlAnchorElement);

impl PaginationLink for WebLink {
    fn href(&self) -> Option<String> {
        Some(self.0.href()).filter(|h| !h.is_empty())
    }

    fn entry_id(&self) -> Option<EntryId> {
        self.0
            .get_attribute(dom::ATTR_ENTRY_ID)
            .and_then(|e| e.parse().ok())
            .map(EntryId)
    }

    fn set_click_handler(&self, handler: Box<dyn Fn()>) {
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            e.prevent_default();
            handler();
        });
        self.0.set_onclick(Some(closure.as_ref().unchecked_ref()));
        LINK_HANDLERS.with(|handlers| {
            let mut handlers = handlers.borrow_mut();
            // drops the replaced closure, and those of links swapped out of the page
            handlers.retain(|(link, _)| link.is_connected() && *link != self.0);
            handlers.push((self.0.clone(), closure));
        });
    }
}

#[derive(Clone)]
pub struct WebOverlay {
    modal: Element,
    image: HtmlImageElement,
}

impl ImageOverlay for WebOverlay {
    fn show_image(&self, src: &str) {
        self.image.set_src(src);
        util::show_modal(&self.modal);
    }
}

#[derive(Clone)]
pub struct WebToasts(Option<Scope<ui::ToastStack>>);

impl ToastRegion for WebToasts {
    fn push(&self, message: &str) {
        match &self.0 {
            Some(scope) => scope.send_message(ui::ToastMsg::Push(String::from(message))),
            None => tracing::warn!(%message, "no notification region to show message in"),
        }
    }
}
