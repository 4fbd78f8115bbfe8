use crate::{Browser, Controller, ImageOverlay, Page, Transport};

impl<P, B, T> Controller<P, B, T>
where
    P: Page,
    B: Browser,
    T: Transport,
{
    /// Shows the full-size image of a thumbnail in the shared overlay
    ///
    /// A thumbnail without an url opens the overlay with an empty source.
    pub fn open_preview(&self, full_image: Option<&str>) {
        match self.page.image_overlay() {
            Some(overlay) => overlay.show_image(full_image.unwrap_or("")),
            None => tracing::warn!("page has no image overlay"),
        }
    }
}
