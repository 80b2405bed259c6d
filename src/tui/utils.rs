//! Layout and formatting helpers for the terminal user interface.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Carve a rectangle of `percent_x` by `percent_y` out of the middle of `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Format the age of a task relative to `now` ("just now", "5m ago", "3d ago").
pub fn format_age(created_at_utc: i64, now_utc: i64) -> String {
    let secs = (now_utc - created_at_utc).max(0);
    if secs < 60 {
        "just now".into()
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Horizontal scroll, in columns, that keeps `cursor` inside a field of
/// `width` columns.
pub fn scroll_offset(cursor: usize, width: u16) -> u16 {
    let width = width as usize;
    if width == 0 || cursor < width {
        0
    } else {
        (cursor + 1 - width).min(u16::MAX as usize) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(100, 100), "just now");
        assert_eq!(format_age(100, 50), "just now");
        assert_eq!(format_age(0, 300), "5m ago");
        assert_eq!(format_age(0, 7_200), "2h ago");
        assert_eq!(format_age(0, 3 * 86_400 + 5), "3d ago");
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(25, 10), 16);
        assert_eq!(scroll_offset(5, 0), 0);
    }

    #[test]
    fn test_centered_rect_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let r = centered_rect(50, 20, parent);
        assert!(r.x >= parent.x && r.right() <= parent.right());
        assert!(r.y >= parent.y && r.bottom() <= parent.bottom());
        assert_eq!(r.width, 50);
    }
}
