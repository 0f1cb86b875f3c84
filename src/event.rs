use crossterm::event::Event;

use crate::command::{ActionId, CommandOutcome};
use crate::console::StyleTag;
use crate::error::AppResult;
use crate::eval::EvalResponse;

/// Describes *why* a page navigation occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavReason {
    /// Incremental movement (next, previous).
    Step,
    /// Direct jump (tutorial, restart, last, goto).
    Jump,
    /// Auto-advance after the page's verify predicate accepted a result.
    Verified,
}

impl NavReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Jump => "jump",
            Self::Verified => "verified",
        }
    }
}

/// An accepted page transition. `from` is `None` when the tutorial had not
/// started yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub from: Option<usize>,
    pub to: usize,
    pub reason: NavReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    CommandExecuted {
        id: ActionId,
        outcome: CommandOutcome,
    },
    PageChanged(PageChange),
    EvaluationSettled {
        style: StyleTag,
    },
}

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    EvaluationSettled {
        ticket: u64,
        response: AppResult<EvalResponse>,
    },
}
