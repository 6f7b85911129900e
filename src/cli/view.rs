//! Terminal rendering surface

use crate::controller::PageView;
use crate::markers::MarkerWindow;

/// Prints markers and pages to stdout
#[derive(Debug, Clone, Copy)]
pub struct TerminalView {
    show_content: bool,
}

impl TerminalView {
    /// View that prints markers and page content
    pub fn new() -> Self {
        Self { show_content: true }
    }

    /// View that only prints markers
    pub fn markers_only() -> Self {
        Self {
            show_content: false,
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView for TerminalView {
    fn show_loading(&self) {
        if self.show_content {
            println!("Loading...");
        }
    }

    fn hide_loading(&self) {}

    fn show_page(&self, page: usize, content: &str) {
        if self.show_content {
            println!("--- page {page} ---");
            println!("{content}");
        }
    }

    fn show_markers(&self, window: &MarkerWindow) {
        println!("{}", format_marker_bar(window));
    }
}

/// Render a marker window as a single line, e.g. `… 4 5 [6] 7 8 …`
pub fn format_marker_bar(window: &MarkerWindow) -> String {
    let mut parts = Vec::with_capacity(window.len() + 2);

    if window.show_left_overflow {
        parts.push("…".to_string());
    }
    for page in window.pages() {
        if page == window.active_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.show_right_overflow {
        parts.push("…".to_string());
    }

    parts.join(" ")
}
