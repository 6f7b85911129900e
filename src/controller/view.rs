//! Rendering surface for the controller

use crate::markers::MarkerWindow;

/// Sink the controller renders into.
///
/// Calls are fire-and-forget; the controller never reads anything back.
pub trait PageView: Send + Sync {
    /// Clear the page area and show the loading indicator
    fn show_loading(&self);

    /// Hide the loading indicator
    fn hide_loading(&self);

    /// Display the payload of `page`
    fn show_page(&self, page: usize, content: &str);

    /// Update the visible page markers
    fn show_markers(&self, window: &MarkerWindow);
}
