use std::time::Duration;

use async_trait::async_trait;
use contest_client::Browser;
use futures::future::LocalBoxFuture;
use web_sys::Window;

#[derive(Clone)]
pub struct WebBrowser {
    window: Window,
}

impl WebBrowser {
    pub fn new(window: Window) -> WebBrowser {
        WebBrowser { window }
    }
}

#[async_trait(?Send)]
impl Browser for WebBrowser {
    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::error!(?e, %message, "failed showing alert");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            tracing::error!(?e, url, "failed navigating");
        }
    }

    async fn sleep(&self, duration: Duration) {
        if let Err(e) = wasm_timer::Delay::new(duration).await {
            tracing::error!("failed sleeping: {e}");
        }
    }

    fn spawn(&self, fut: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(fut)
    }
}
