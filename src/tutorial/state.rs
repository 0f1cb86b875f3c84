use std::sync::Arc;

use crate::event::{NavReason, PageChange};

use super::page::Page;

/// Current position in a fixed, ordered page sequence.
///
/// Starts "not started" (`None`), which is distinct from page 0. The only
/// mutation is [`TutorialState::transition`], so the position is always either
/// the sentinel or a valid index.
#[derive(Debug, Clone)]
pub struct TutorialState {
    pages: Arc<[Page]>,
    current: Option<usize>,
}

impl TutorialState {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: pages.into(),
            current: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn current_page(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Page> {
        self.current.and_then(|index| self.pages.get(index))
    }

    /// Current index with the not-started sentinel as -1, for relative moves.
    pub fn position(&self) -> i64 {
        self.current.map_or(-1, |index| index as i64)
    }

    pub fn last_index(&self) -> i64 {
        self.pages.len() as i64 - 1
    }

    /// Moves to `target`. Out-of-range and redundant targets leave the state
    /// untouched and return `None`.
    pub fn transition(&mut self, target: i64, reason: NavReason) -> Option<PageChange> {
        let to = usize::try_from(target).ok()?;
        if to >= self.pages.len() || self.current == Some(to) {
            tracing::trace!(target, current = ?self.current, "transition ignored");
            return None;
        }

        let from = self.current.replace(to);
        tracing::debug!(?from, to, reason = reason.as_str(), "page changed");
        Some(PageChange { from, to, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::TutorialState;
    use crate::event::{NavReason, PageChange};
    use crate::tutorial::Page;

    fn five_pages() -> TutorialState {
        TutorialState::new((1..=5).map(|n| Page::new(format!("page{n}"))).collect())
    }

    #[test]
    fn starts_at_sentinel() {
        let state = five_pages();
        assert_eq!(state.current_page(), None);
        assert_eq!(state.position(), -1);
        assert!(state.current().is_none());
    }

    #[test]
    fn transition_sets_page_and_reports_change() {
        let mut state = five_pages();
        let change = state.transition(0, NavReason::Jump);
        assert_eq!(
            change,
            Some(PageChange {
                from: None,
                to: 0,
                reason: NavReason::Jump,
            })
        );
        assert_eq!(state.current_page(), Some(0));
        assert_eq!(state.current().map(|page| page.id.as_str()), Some("page1"));
    }

    #[test]
    fn out_of_range_and_redundant_targets_are_noops() {
        let mut state = five_pages();
        state.transition(2, NavReason::Jump);

        for target in [-2, -1, 5, 99, 2] {
            assert_eq!(state.transition(target, NavReason::Jump), None, "{target}");
            assert_eq!(state.current_page(), Some(2));
        }
    }

    #[test]
    fn transition_is_idempotent() {
        let mut state = five_pages();
        assert!(state.transition(4, NavReason::Jump).is_some());
        assert!(state.transition(4, NavReason::Jump).is_none());
        assert_eq!(state.current_page(), Some(4));
    }

    #[test]
    fn empty_tutorial_never_starts() {
        let mut state = TutorialState::new(Vec::new());
        assert_eq!(state.last_index(), -1);
        assert_eq!(state.transition(0, NavReason::Jump), None);
        assert_eq!(state.current_page(), None);
    }
}
