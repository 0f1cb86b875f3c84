use crate::event::NavReason;
use crate::tutorial::TutorialState;

use super::types::{Command, CommandGrammar};

/// A resolved navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavTarget {
    Index { target: i64, reason: NavReason },
    /// The classic grammar refused the move before navigating.
    Refused,
}

pub(crate) fn resolve_target(
    state: &TutorialState,
    grammar: CommandGrammar,
    command: Command,
) -> NavTarget {
    let current = state.position();
    let last = state.last_index();

    if grammar == CommandGrammar::Classic && !classic_precheck(command, current, last) {
        return NavTarget::Refused;
    }

    let (target, reason) = match command {
        Command::Next => (current + 1, NavReason::Step),
        Command::Previous => (current - 1, NavReason::Step),
        Command::Tutorial | Command::Restart => (0, NavReason::Jump),
        Command::Last => (last, NavReason::Jump),
        Command::Goto { page } => (page, NavReason::Jump),
    };
    NavTarget::Index { target, reason }
}

fn classic_precheck(command: Command, current: i64, last: i64) -> bool {
    match command {
        Command::Next => current >= 0 && current < last,
        Command::Previous | Command::Restart => current > 0,
        Command::Tutorial | Command::Last | Command::Goto { .. } => true,
    }
}
