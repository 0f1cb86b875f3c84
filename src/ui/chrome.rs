use ratatui::Frame;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::StatusState;
use crate::tutorial::TutorialState;

use super::layout::UiLayout;

#[derive(Debug, Clone, Copy)]
pub struct ChromeInfo<'a> {
    pub tutorial: &'a TutorialState,
    pub grammar: &'a str,
    pub policy: &'a str,
    pub busy: bool,
    pub status: &'a StatusState,
}

pub fn draw_chrome(frame: &mut Frame<'_>, layout: UiLayout, info: ChromeInfo<'_>) {
    let status = Paragraph::new(status_text(info))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, layout.status);
}

pub(crate) fn status_text(info: ChromeInfo<'_>) -> String {
    let page = match info.tutorial.current_page() {
        Some(index) => format!("page {}/{}", index + 1, info.tutorial.page_count()),
        None => format!("page -/{}", info.tutorial.page_count()),
    };
    let busy = if info.busy { "busy" } else { "idle" };
    let command_id = info
        .status
        .last_action_id
        .map(|id| id.as_str())
        .unwrap_or("-");

    let mut text = format!(
        "{page} | {} | {} | {busy} | cmd={command_id}",
        info.grammar, info.policy
    );
    if !info.status.message.is_empty() {
        text.push_str(" | ");
        text.push_str(&info.status.message);
    }
    text
}
