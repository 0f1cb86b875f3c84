use std::collections::VecDeque;

use unicode_width::UnicodeWidthStr;

use crate::command::ActionId;
use crate::console::StyleTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Welcome,
    /// An echoed prompt line.
    Input,
    Value,
    Error,
    /// Host diagnostics such as transport failures.
    Notice,
}

impl From<StyleTag> for LineKind {
    fn from(style: StyleTag) -> Self {
        match style {
            StyleTag::Error => Self::Error,
            StyleTag::Value => Self::Value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone)]
pub struct ConsoleState {
    /// Oldest lines are dropped once `scrollback_capacity` is reached.
    pub scrollback: VecDeque<ScrollbackLine>,
    pub scrollback_capacity: usize,
    /// Display rows scrolled up from the bottom.
    pub scroll_offset: usize,
    pub status: StatusState,
    /// Next example of the current page that Tab inserts.
    pub example_cursor: usize,
}

pub const DEFAULT_SCROLLBACK_CAPACITY: usize = 1000;

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLBACK_CAPACITY)
    }
}

impl ConsoleState {
    pub fn new(scrollback_capacity: usize) -> Self {
        Self {
            scrollback: VecDeque::new(),
            scrollback_capacity: scrollback_capacity.max(1),
            scroll_offset: 0,
            status: StatusState::default(),
            example_cursor: 0,
        }
    }

    pub fn push_line(&mut self, kind: LineKind, text: &str) {
        for line in text.split('\n') {
            if self.scrollback.len() == self.scrollback_capacity {
                self.scrollback.pop_front();
            }
            self.scrollback.push_back(ScrollbackLine {
                kind,
                text: line.to_string(),
            });
        }
        self.scroll_offset = 0;
    }

    pub fn scroll_up(&mut self, rows: usize) {
        // Upper bound on wrapped rows at any pane width; the renderer clamps
        // to the real count.
        let max = self
            .scrollback
            .iter()
            .map(|line| line.text.width().max(1))
            .sum::<usize>()
            .saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(rows).min(max);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }
}
