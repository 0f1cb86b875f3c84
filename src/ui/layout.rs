use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub page: Rect,
    pub scrollback: Rect,
    pub prompt: Rect,
    pub status: Rect,
}

/// Splits the screen top to bottom. The page pane collapses to zero rows
/// before the tutorial starts.
pub fn split_layout(area: Rect, page_visible: bool) -> UiLayout {
    let page_height = if page_visible {
        (area.height / 3).clamp(3, 12)
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(page_height),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    UiLayout {
        page: chunks[0],
        scrollback: chunks[1],
        prompt: chunks[2],
        status: chunks[3],
    }
}
