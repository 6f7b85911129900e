//! Marker window calculation

use crate::config::MarkerConfig;
use serde::Serialize;
use std::ops::RangeInclusive;

/// Visible slice of page markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerWindow {
    /// Total number of pages in the table
    pub total_pages: usize,
    /// First page number with a visible marker
    pub first_shown: usize,
    /// Last page number with a visible marker
    pub last_shown: usize,
    /// Page whose marker is highlighted
    pub active_page: usize,
    /// More pages exist before `first_shown`
    pub show_left_overflow: bool,
    /// More pages exist after `last_shown`
    pub show_right_overflow: bool,
}

impl MarkerWindow {
    /// Window for the very first render.
    ///
    /// Shows up to `max_markers` pages starting at page 1 with page 1 active.
    /// It is never centered, so no markers before page 1 are implied.
    pub fn initial(total_pages: usize, budget: &MarkerConfig) -> Self {
        let last_shown = total_pages.min(budget.max_markers);
        Self {
            total_pages,
            first_shown: 1,
            last_shown,
            active_page: total_pages.min(1),
            show_left_overflow: false,
            show_right_overflow: last_shown < total_pages,
        }
    }

    /// Window recentered on `current_page`.
    ///
    /// Near either edge the window is shifted rather than truncated, so it keeps
    /// `2 * side_span + 1` markers unless the table itself is smaller.
    pub fn centered(total_pages: usize, current_page: usize, budget: &MarkerConfig) -> Self {
        let (first_shown, last_shown) = if total_pages <= budget.max_markers {
            (1, total_pages)
        } else {
            let total = total_pages as i64;
            let span = budget.side_span as i64;
            let current = current_page as i64;

            let mut first = current - span;
            let mut last = current + span;
            if first < 1 {
                last += 1 - first;
                first = 1;
            } else if last > total {
                first -= last - total;
                last = total;
            }

            (first.max(1) as usize, last.min(total) as usize)
        };

        Self {
            total_pages,
            first_shown,
            last_shown,
            active_page: current_page,
            show_left_overflow: first_shown > 1,
            show_right_overflow: last_shown < total_pages,
        }
    }

    /// Page numbers with a visible marker
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.first_shown..=self.last_shown
    }

    /// Number of visible markers
    pub fn len(&self) -> usize {
        (self.last_shown + 1).saturating_sub(self.first_shown)
    }

    /// Check if no markers are visible
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `page` has a visible marker
    pub fn contains(&self, page: usize) -> bool {
        self.pages().contains(&page)
    }
}
