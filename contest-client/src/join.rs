use std::time::Duration;

use crate::{Browser, Controller, Page, ToastRegion, Transport};

impl<P, B, T> Controller<P, B, T>
where
    P: Page,
    B: Browser,
    T: Transport,
{
    /// Tells an already signed-in visitor where they are going, then goes there
    pub async fn notify_and_redirect(&self, target: &str) {
        self.page.toast_region().push(&self.config.join_message);
        self.browser
            .sleep(Duration::from_millis(self.config.join_redirect_delay_ms))
            .await;
        tracing::debug!(url = target, "redirecting signed-in visitor");
        self.browser.navigate(target);
    }
}
