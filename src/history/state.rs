use std::collections::VecDeque;

/// Previously submitted console lines, browsed with Up/Down.
#[derive(Debug, Clone)]
pub struct PromptHistory {
    entries: VecDeque<String>,
    capacity: usize,
    /// Index into `entries` while browsing; `None` when editing a fresh line.
    cursor: Option<usize>,
    draft: String,
}

impl PromptHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            cursor: None,
            draft: String::new(),
        }
    }

    pub fn record(&mut self, line: &str) {
        self.cursor = None;
        self.draft.clear();

        let line = line.trim();
        if line.is_empty() || self.entries.back().is_some_and(|last| last == line) {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
    }

    /// Steps to an older entry. `current` is kept as the draft on first step.
    pub fn back(&mut self, current: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }

        let index = match self.cursor {
            None => {
                self.draft = current.to_string();
                self.entries.len() - 1
            }
            Some(0) => 0,
            Some(index) => index - 1,
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Steps to a newer entry, ending at the saved draft.
    pub fn forward(&mut self) -> Option<&str> {
        let index = self.cursor?;
        if index + 1 < self.entries.len() {
            self.cursor = Some(index + 1);
            return self.entries.get(index + 1).map(String::as_str);
        }

        self.cursor = None;
        Some(self.draft.as_str())
    }
}
