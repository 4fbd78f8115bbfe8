use std::cell::RefCell;

use anyhow::{anyhow, Context as _};
use contest_client::api::dom;
use web_sys::Document;
use yew::{html::Scope, prelude::*};

thread_local! {
    static REGION: RefCell<Option<Scope<ToastStack>>> = RefCell::new(None);
}

/// The page's notification region, mounted on first use
pub fn toast_region(document: &Document) -> anyhow::Result<Scope<ToastStack>> {
    REGION.with(|r| {
        if let Some(scope) = &*r.borrow() {
            return Ok(scope.clone());
        }
        let scope = mount(document)?;
        *r.borrow_mut() = Some(scope.clone());
        Ok(scope)
    })
}

fn mount(document: &Document) -> anyhow::Result<Scope<ToastStack>> {
    let root = match document.get_element_by_id(dom::ID_JOIN_NOTIFICATIONS) {
        Some(root) => root,
        None => {
            let root = document
                .create_element("div")
                .map_err(|e| anyhow!("{e:?}"))
                .context("creating notification region")?;
            root.set_id(dom::ID_JOIN_NOTIFICATIONS);
            root.set_class_name("toast-container position-fixed top-0 end-0 p-3");
            document
                .body()
                .context("page has no body")?
                .append_child(&root)
                .map_err(|e| anyhow!("{e:?}"))
                .context("inserting notification region")?;
            root
        }
    };
    tracing::debug!("mounting notification region");
    let app = yew::Renderer::<ToastStack>::with_root(root).render();
    Ok((*app).clone())
}

pub enum ToastMsg {
    Push(String),
    Dismiss(usize),
}

pub struct ToastStack {
    toasts: Vec<(usize, String)>,
    next_id: usize,
}

impl Component for ToastStack {
    type Message = ToastMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ToastMsg::Push(text) => {
                self.toasts.push((self.next_id, text));
                self.next_id += 1;
            }
            ToastMsg::Dismiss(id) => self.toasts.retain(|(i, _)| *i != id),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
            { for self.toasts.iter().map(|(id, text)| {
                let id = *id;
                html! {
                    <div
                        key={ id }
                        class="toast show align-items-center text-bg-info border-0"
                        role="alert"
                        aria-live="assertive"
                        aria-atomic="true"
                    >
                        <div class="d-flex">
                            <div class="toast-body">{ text }</div>
                            <button
                                type="button"
                                class="btn-close me-2 m-auto"
                                aria-label="Close"
                                onclick={ ctx.link().callback(move |_| ToastMsg::Dismiss(id)) }
                            />
                        </div>
                    </div>
                }
            }) }
            </>
        }
    }
}
