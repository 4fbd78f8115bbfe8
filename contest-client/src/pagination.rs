use std::rc::Rc;

use crate::{
    api, notice, ActionError, Browser, CommentSection, Controller, Page, PaginationLink, Request,
    Transport,
};

/// Gives every pagination link on the page its click handler
///
/// Handlers are set, never added, so calling this again after a fragment
/// swap leaves exactly one handler per link.
pub fn bind_pagination<P, B, T>(ctl: &Rc<Controller<P, B, T>>)
where
    P: Page + 'static,
    B: Browser + 'static,
    T: Transport + 'static,
{
    let links = ctl.page.pagination_links();
    tracing::trace!(num_links = links.len(), "binding pagination links");
    for link in links {
        let handler = {
            let ctl = ctl.clone();
            let link = link.clone();
            Box::new(move || {
                let task_ctl = ctl.clone();
                let link = link.clone();
                ctl.browser
                    .spawn(Box::pin(async move { paginate(&task_ctl, &link).await }));
            })
        };
        link.set_click_handler(handler);
    }
}

/// Loads the comment page a link points to into its entry's section
pub async fn paginate<P, B, T>(ctl: &Rc<Controller<P, B, T>>, link: &P::Link)
where
    P: Page + 'static,
    B: Browser + 'static,
    T: Transport + 'static,
{
    if let Err(e) = try_paginate(ctl, link).await {
        ctl.report("paginate", notice::PAGINATE_FAILED, e);
    }
}

async fn try_paginate<P, B, T>(
    ctl: &Rc<Controller<P, B, T>>,
    link: &P::Link,
) -> Result<(), ActionError>
where
    P: Page + 'static,
    B: Browser + 'static,
    T: Transport + 'static,
{
    let href = link
        .href()
        .ok_or_else(|| ActionError::Resolution(String::from("target of pagination link")))?;
    let entry = link
        .entry_id()
        .or_else(|| api::entry_id_from_href(&href))
        .ok_or_else(|| ActionError::Resolution(format!("entry of pagination link {href:?}")))?;
    let url = api::mark_ajax(&href)
        .map_err(|e| ActionError::Resolution(format!("pagination url {href:?}: {e}")))?;
    let section_id = api::section_id(entry);

    tracing::debug!(%url, %entry, "loading comment page");
    let resp = ctl
        .transport
        .send(Request::get(url.to_string()))
        .await
        .map_err(ActionError::Network)?;
    if !resp.is_success() {
        return Err(ActionError::HttpStatus {
            status: resp.status,
            errors: None,
        });
    }
    let section = ctl
        .page
        .section(&section_id)
        .ok_or_else(|| ActionError::Resolution(format!("comment section {section_id:?}")))?;
    section.replace_html(&resp.body);
    bind_pagination(ctl);
    Ok(())
}
