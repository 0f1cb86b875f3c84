use crate::event::AppEvent;
use crate::tutorial::TutorialState;

use super::core::{NavTarget, resolve_target};
use super::types::{Command, CommandGrammar, CommandOutcome};

#[derive(Debug, Clone)]
pub struct CommandDispatchResult {
    pub outcome: CommandOutcome,
    pub emitted_events: Vec<AppEvent>,
}

pub fn dispatch(
    state: &mut TutorialState,
    grammar: CommandGrammar,
    cmd: Command,
) -> CommandDispatchResult {
    let action_id = cmd.action_id();
    let mut emitted_events = Vec::new();

    let outcome = match resolve_target(state, grammar, cmd) {
        NavTarget::Refused => CommandOutcome::Rejected,
        NavTarget::Index { target, reason } => match state.transition(target, reason) {
            Some(change) => {
                emitted_events.push(AppEvent::PageChanged(change));
                CommandOutcome::Applied
            }
            None => CommandOutcome::Noop,
        },
    };

    tracing::debug!(
        command = action_id.as_str(),
        grammar = grammar.id(),
        ?outcome,
        "command dispatched"
    );
    emitted_events.push(AppEvent::CommandExecuted {
        id: action_id,
        outcome,
    });

    CommandDispatchResult {
        outcome,
        emitted_events,
    }
}

#[cfg(test)]
mod tests {
    use super::dispatch;
    use crate::command::{ActionId, Command, CommandGrammar, CommandOutcome};
    use crate::event::{AppEvent, NavReason, PageChange};
    use crate::tutorial::{Page, TutorialState};

    fn five_pages_at(page: i64) -> TutorialState {
        let mut state = TutorialState::new((0..5).map(|n| Page::new(n.to_string())).collect());
        state.transition(page, NavReason::Jump);
        state
    }

    #[test]
    fn dispatch_next_emits_page_changed_and_command_executed() {
        let mut state = five_pages_at(0);

        let result = dispatch(&mut state, CommandGrammar::Extended, Command::Next);

        assert_eq!(result.outcome, CommandOutcome::Applied);
        assert_eq!(state.current_page(), Some(1));
        assert_eq!(
            result.emitted_events,
            vec![
                AppEvent::PageChanged(PageChange {
                    from: Some(0),
                    to: 1,
                    reason: NavReason::Step,
                }),
                AppEvent::CommandExecuted {
                    id: ActionId::Next,
                    outcome: CommandOutcome::Applied,
                },
            ]
        );
    }

    #[test]
    fn dispatch_goto_out_of_range_is_accepted_noop() {
        let mut state = five_pages_at(0);

        let result = dispatch(
            &mut state,
            CommandGrammar::Extended,
            Command::Goto { page: 99 },
        );

        assert_eq!(result.outcome, CommandOutcome::Noop);
        assert!(result.outcome.is_accepted());
        assert_eq!(state.current_page(), Some(0));
        assert_eq!(result.emitted_events.len(), 1);
    }

    #[test]
    fn dispatch_classic_back_on_first_page_is_rejected() {
        let mut state = five_pages_at(0);

        let result = dispatch(&mut state, CommandGrammar::Classic, Command::Previous);

        assert_eq!(result.outcome, CommandOutcome::Rejected);
        assert_eq!(state.current_page(), Some(0));
        assert!(matches!(
            result.emitted_events[..],
            [AppEvent::CommandExecuted {
                id: ActionId::Previous,
                outcome: CommandOutcome::Rejected,
            }]
        ));
    }

    #[test]
    fn dispatch_last_jumps_to_final_page() {
        let mut state = five_pages_at(1);
        let result = dispatch(&mut state, CommandGrammar::Extended, Command::Last);
        assert_eq!(result.outcome, CommandOutcome::Applied);
        assert_eq!(state.current_page(), Some(4));
    }
}
