//! Tests for the marker window calculator

use super::*;
use crate::config::MarkerConfig;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn budget() -> MarkerConfig {
    MarkerConfig::default()
}

// ============================================================================
// Centered Window Tests
// ============================================================================

#[test]
fn test_centered_in_the_middle() {
    let window = MarkerWindow::centered(20, 10, &budget());
    assert_eq!(
        window,
        MarkerWindow {
            total_pages: 20,
            first_shown: 5,
            last_shown: 15,
            active_page: 10,
            show_left_overflow: true,
            show_right_overflow: true,
        }
    );
}

#[test]
fn test_centered_clamps_left_edge_preserving_width() {
    let window = MarkerWindow::centered(20, 2, &budget());
    assert_eq!(window.pages(), 1..=11);
    assert_eq!(window.len(), 11);
    assert!(!window.show_left_overflow);
    assert!(window.show_right_overflow);
    assert_eq!(window.active_page, 2);
}

#[test]
fn test_centered_clamps_right_edge_preserving_width() {
    let window = MarkerWindow::centered(20, 19, &budget());
    assert_eq!(window.pages(), 10..=20);
    assert_eq!(window.len(), 11);
    assert!(window.show_left_overflow);
    assert!(!window.show_right_overflow);
}

#[test]
fn test_centered_small_total_shows_everything() {
    let window = MarkerWindow::centered(5, 3, &budget());
    assert_eq!(window.pages(), 1..=5);
    assert!(!window.show_left_overflow);
    assert!(!window.show_right_overflow);
    assert_eq!(window.active_page, 3);
}

#[test_case(12, 1, 1, 11 ; "first page of twelve")]
#[test_case(12, 6, 1, 11 ; "exactly centered touches left edge")]
#[test_case(12, 7, 2, 12 ; "exactly centered touches right edge")]
#[test_case(12, 12, 2, 12 ; "last page of twelve")]
#[test_case(11, 11, 1, 11 ; "total equals budget")]
#[test_case(100, 50, 45, 55 ; "large table")]
#[test_case(100, 96, 90, 100 ; "near the end of a large table")]
fn test_centered_bounds(total: usize, current: usize, first: usize, last: usize) {
    let window = MarkerWindow::centered(total, current, &budget());
    assert_eq!((window.first_shown, window.last_shown), (first, last));
    assert_eq!(window.show_left_overflow, first > 1);
    assert_eq!(window.show_right_overflow, last < total);
    assert!(window.contains(current));
}

#[test]
fn test_centered_with_custom_budget() {
    let budget = MarkerConfig::new(5, 2);
    let window = MarkerWindow::centered(9, 5, &budget);
    assert_eq!(window.pages(), 3..=7);

    let window = MarkerWindow::centered(9, 1, &budget);
    assert_eq!(window.pages(), 1..=5);
}

// ============================================================================
// Initial Window Tests
// ============================================================================

#[test]
fn test_initial_window_caps_at_budget() {
    let window = MarkerWindow::initial(15, &budget());
    assert_eq!(
        window,
        MarkerWindow {
            total_pages: 15,
            first_shown: 1,
            last_shown: 11,
            active_page: 1,
            show_left_overflow: false,
            show_right_overflow: true,
        }
    );
}

#[test]
fn test_initial_window_small_table() {
    let window = MarkerWindow::initial(4, &budget());
    assert_eq!(window.pages(), 1..=4);
    assert!(!window.show_right_overflow);
    assert_eq!(window.active_page, 1);
}

#[test]
fn test_initial_window_empty_table() {
    let window = MarkerWindow::initial(0, &budget());
    assert!(window.is_empty());
    assert_eq!(window.active_page, 0);
    assert!(!window.show_left_overflow);
    assert!(!window.show_right_overflow);
}

#[test]
fn test_window_serializes_for_cli_output() {
    let window = MarkerWindow::centered(20, 10, &budget());
    let json = serde_json::to_value(window).unwrap();
    assert_eq!(json["first_shown"], 5);
    assert_eq!(json["show_right_overflow"], true);
}
