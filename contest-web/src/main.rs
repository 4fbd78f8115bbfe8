use std::rc::Rc;

use anyhow::{anyhow, Context};
use contest_client::{api::dom, bind_pagination, ActionKind, Browser, Config, Controller};
use futures::FutureExt;
use gloo_events::{EventListener, EventListenerOptions};
use url::Url;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, Window};

mod api;
use api::HttpTransport;

mod browser;
use browser::WebBrowser;

mod config;

mod page;
use page::{WebForm, WebItem, WebPage};

mod ui;
mod util;

lazy_static::lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

type WebController = Controller<WebPage, WebBrowser, HttpTransport>;

fn main() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let (config, problems) = config::load(&document);
    let level = config.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build(),
    );
    for p in problems {
        tracing::warn!("{p}");
    }
    if let Err(e) = start(window, document, config) {
        tracing::error!("failed setting up the page: {e:#}");
    }
}

fn start(window: Window, document: Document, config: Config) -> anyhow::Result<()> {
    let page_url = document.url().map_err(|e| anyhow!("{e:?}"))?;
    let base = Url::parse(&page_url).with_context(|| format!("parsing page url {page_url:?}"))?;
    let ctl = Rc::new(Controller::new(
        WebPage::new(document.clone()),
        WebBrowser::new(window),
        HttpTransport::new(base),
        config,
    ));
    bind_previews(&ctl);
    bind_forms(&ctl);
    bind_comment_actions(&ctl, &document);
    bind_pagination(&ctl);
    bind_join(&ctl);
    tracing::info!("page behaviour ready");
    Ok(())
}

fn bind_previews(ctl: &Rc<WebController>) {
    let thumbs = ctl
        .page()
        .all(&format!("[{}], .{}", dom::ATTR_FULL_IMAGE, dom::CLASS_PREVIEW));
    tracing::debug!(num_thumbnails = thumbs.len(), "binding image previews");
    for thumb in thumbs {
        let ctl = ctl.clone();
        let elt = thumb.clone();
        EventListener::new(&thumb, "click", move |_| {
            ctl.open_preview(elt.get_attribute(dom::ATTR_FULL_IMAGE).as_deref())
        })
        .forget();
    }
}

fn bind_forms(ctl: &Rc<WebController>) {
    let forms = ctl
        .page()
        .all(&format!("form.{}", dom::CLASS_COMMENT_FORM))
        .into_iter()
        .filter_map(|f| f.dyn_into::<HtmlFormElement>().ok());
    for form in forms {
        let ctl = ctl.clone();
        let target = form.clone();
        EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                e.prevent_default();
                let form = WebForm(target.clone());
                let c = ctl.clone();
                ctl.browser()
                    .spawn(Box::pin(async move { c.submit(&form).await }));
            },
        )
        .forget();
    }
}

/// One listener for the edit, cancel, save and delete controls of every
/// comment, present or future
fn bind_comment_actions(ctl: &Rc<WebController>, document: &Document) {
    let controls = [
        dom::CLASS_EDIT_BUTTON,
        dom::CLASS_CANCEL_BUTTON,
        dom::CLASS_SAVE_BUTTON,
        dom::CLASS_DELETE_BUTTON,
    ]
    .map(|c| format!(".{c}"))
    .join(", ");
    let ctl = ctl.clone();
    EventListener::new_with_options(
        document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |e| {
            let Some(control) = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|t| t.closest(&controls).ok().flatten())
            else {
                return;
            };
            let Some(kind) = ActionKind::from_classes(control.class_name().split_whitespace())
            else {
                return;
            };
            let Some(item) = WebItem::containing(&control) else {
                tracing::warn!(?kind, "comment control outside of any comment");
                return;
            };
            e.prevent_default();
            if kind.is_remote() {
                let c = ctl.clone();
                ctl.browser()
                    .spawn(Box::pin(async move { c.dispatch(kind, &item).await }));
            } else if ctl.dispatch(kind, &item).now_or_never().is_none() {
                tracing::error!(?kind, "local comment action did not complete synchronously");
            }
        },
    )
    .forget();
}

fn bind_join(ctl: &Rc<WebController>) {
    let buttons = ctl
        .page()
        .all(&format!("#{}, .{}", dom::ID_JOIN_BUTTON, dom::CLASS_JOIN_BUTTON));
    for button in buttons {
        let ctl = ctl.clone();
        let elt = button.clone();
        EventListener::new_with_options(
            &button,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                let target = elt
                    .get_attribute("href")
                    .filter(|h| !h.is_empty())
                    .or_else(|| elt.get_attribute(dom::ATTR_REDIRECT_URL));
                let Some(target) = target else {
                    tracing::warn!("join control has no target");
                    return;
                };
                e.prevent_default();
                let c = ctl.clone();
                ctl.browser()
                    .spawn(Box::pin(async move { c.notify_and_redirect(&target).await }));
            },
        )
        .forget();
    }
}
