use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{LineKind, ScrollbackLine};
use crate::tutorial::Page;

use super::layout::UiLayout;

pub struct ConsoleView<'a> {
    pub page: Option<(usize, &'a Page)>,
    pub page_count: usize,
    pub scrollback: &'a VecDeque<ScrollbackLine>,
    pub scroll_offset: usize,
    pub prompt_label: &'a str,
    pub input: &'a str,
    /// Cursor position in characters.
    pub cursor: usize,
}

pub fn draw_console(frame: &mut Frame<'_>, layout: UiLayout, view: &ConsoleView<'_>) {
    if let Some((index, page)) = view.page
        && layout.page.height > 0
    {
        draw_page(frame, layout, index, view.page_count, page);
    }

    let visible = layout.scrollback.height as usize;
    let width = layout.scrollback.width as usize;
    let rows: Vec<(LineKind, String)> = view
        .scrollback
        .iter()
        .flat_map(|line| {
            wrap_rows(&line.text, width)
                .into_iter()
                .map(move |row| (line.kind, row))
        })
        .collect();
    let offset = view.scroll_offset.min(rows.len().saturating_sub(visible));
    let end = rows.len() - offset;
    let start = end.saturating_sub(visible);
    let lines: Vec<Line<'_>> = rows[start..end]
        .iter()
        .map(|(kind, row)| Line::from(Span::styled(row.as_str(), line_style(*kind))))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.scrollback);

    let prompt = build_prompt_line(
        view.prompt_label,
        view.input,
        view.cursor,
        layout.prompt.width as usize,
    );
    frame.render_widget(Paragraph::new(prompt), layout.prompt);
}

fn draw_page(frame: &mut Frame<'_>, layout: UiLayout, index: usize, count: usize, page: &Page) {
    let title = format!(" {} ({}/{}) ", page.title, index + 1, count);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(layout.page);
    frame.render_widget(block, layout.page);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines: Vec<Line<'_>> = page.body.lines().map(Line::raw).collect();
    if let Some(url) = &page.url {
        lines.push(Line::from(Span::styled(
            url.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    for example in &page.examples {
        lines.push(Line::from(vec![
            Span::styled("  try: ", Style::default().fg(Color::DarkGray)),
            Span::styled(example.as_str(), Style::default().fg(Color::Cyan)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Splits `text` into rows of at most `width` display columns. An empty
/// line still takes one row.
pub(crate) fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        row.push(ch);
        used += w;
    }
    rows.push(row);
    rows
}

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Welcome => Style::default().fg(Color::Gray),
        LineKind::Input => Style::default().fg(Color::White),
        LineKind::Value => Style::default().fg(Color::Green),
        LineKind::Error => Style::default().fg(Color::Red),
        LineKind::Notice => Style::default().fg(Color::Yellow),
    }
}

/// Renders the prompt label followed by the part of `input` that fits in
/// `width` columns, keeping the caret visible.
pub(crate) fn build_prompt_line(
    label: &str,
    input: &str,
    cursor: usize,
    width: usize,
) -> Line<'static> {
    let label_width = label.width();
    let max_text_width = width.saturating_sub(label_width).max(1);

    let chars: Vec<char> = input.chars().collect();
    let cursor = cursor.min(chars.len());

    // Walk back from the caret until the window is full.
    let mut start = cursor;
    let mut used = 1usize;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > max_text_width {
            break;
        }
        used += w;
        start -= 1;
    }

    let mut spans = vec![Span::styled(
        label.to_string(),
        Style::default().fg(Color::Cyan),
    )];
    let mut filled = 0usize;
    for (idx, ch) in chars.iter().enumerate().skip(start) {
        let w = ch.width().unwrap_or(0);
        if filled + w.max(1) > max_text_width {
            break;
        }
        filled += w.max(1);
        if idx == cursor {
            spans.push(Span::styled(ch.to_string(), Style::default().reversed()));
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    if cursor == chars.len() {
        spans.push(Span::styled(" ".to_string(), Style::default().reversed()));
    }
    Line::from(spans)
}
