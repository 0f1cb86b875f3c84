use crossterm::event::{Event, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::command::{ActionId, Command};
use crate::console::{EvalTicket, LineDisposition, LineOutcome};
use crate::error::{AppError, AppResult};
use crate::eval::EvalResponse;
use crate::event::AppEvent;
use crate::input::{ConsoleAction, map_key_to_action_with_preset};

use super::core::App;
use super::state::LineKind;

const SCROLL_STEP: usize = 5;

#[derive(Debug, Clone, Default)]
pub(crate) struct KeyEventOutcome {
    pub redraw: bool,
    pub quit_requested: bool,
    /// Set when the submitted line has to go to the evaluator.
    pub evaluate: Option<EvalTicket>,
}

impl KeyEventOutcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }
}

impl App {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> KeyEventOutcome {
        let Some(action) = map_key_to_action_with_preset(key, self.prompt.keymap) else {
            let changed = self.prompt.input.handle_event(&Event::Key(key)).is_some();
            return KeyEventOutcome {
                redraw: changed,
                ..KeyEventOutcome::default()
            };
        };

        match action {
            ConsoleAction::Quit => KeyEventOutcome {
                quit_requested: true,
                ..KeyEventOutcome::default()
            },
            ConsoleAction::Submit => {
                let line = self.prompt.input.value().to_string();
                KeyEventOutcome {
                    redraw: true,
                    quit_requested: false,
                    evaluate: self.submit_line(&line),
                }
            }
            ConsoleAction::Navigate(command) => {
                self.navigate(command);
                KeyEventOutcome::redraw()
            }
            ConsoleAction::HistoryBack => {
                let current = self.prompt.input.value().to_string();
                if let Some(entry) = self.prompt.history.back(&current) {
                    self.prompt.input = Input::new(entry.to_string());
                }
                KeyEventOutcome::redraw()
            }
            ConsoleAction::HistoryForward => {
                if let Some(entry) = self.prompt.history.forward() {
                    self.prompt.input = Input::new(entry.to_string());
                }
                KeyEventOutcome::redraw()
            }
            ConsoleAction::InsertExample => {
                self.insert_example();
                KeyEventOutcome::redraw()
            }
            ConsoleAction::ScrollUp => {
                self.state.scroll_up(SCROLL_STEP);
                KeyEventOutcome::redraw()
            }
            ConsoleAction::ScrollDown => {
                self.state.scroll_down(SCROLL_STEP);
                KeyEventOutcome::redraw()
            }
        }
    }

    /// Feeds one prompt line to the interpreter. Returns the ticket the
    /// caller has to evaluate, if any.
    pub(crate) fn submit_line(&mut self, line: &str) -> Option<EvalTicket> {
        match self.session.interpreter_mut().interpret(line) {
            Ok(LineDisposition::Ignored) => None,
            Ok(LineDisposition::Navigated(outcome)) => {
                if outcome.command_accepted {
                    self.accept_prompt_line(line);
                } else {
                    self.state.status.message = format!("'{}' is not available here", line.trim());
                }
                self.apply_line_outcome(outcome);
                None
            }
            Ok(LineDisposition::Evaluate(ticket)) => {
                self.accept_prompt_line(line);
                self.state.status.last_action_id = Some(ActionId::Evaluate);
                self.state.status.message = "evaluating...".to_string();
                Some(ticket)
            }
            Err(AppError::EvaluationInFlight) => {
                self.state.status.message = "waiting for the previous evaluation".to_string();
                None
            }
            Err(err) => {
                self.state.status.message = err.to_string();
                None
            }
        }
    }

    pub(crate) fn settle_evaluation(&mut self, ticket: u64, response: AppResult<EvalResponse>) {
        match self.session.interpreter_mut().settle(ticket, response) {
            Ok(outcome) => {
                self.state.status.message.clear();
                self.apply_line_outcome(outcome);
            }
            Err(err) => {
                self.state.status.message = "evaluation failed".to_string();
                self.state.push_line(LineKind::Notice, &err.to_string());
            }
        }
    }

    pub(crate) fn navigate(&mut self, command: Command) {
        if self.session.interpreter().is_busy() {
            self.state.status.message = "waiting for the previous evaluation".to_string();
            return;
        }
        let outcome = self.session.interpreter_mut().navigate(command);
        self.apply_line_outcome(outcome);
    }

    pub(crate) fn apply_line_outcome(&mut self, outcome: LineOutcome) {
        for message in outcome.instruction.messages() {
            self.state.push_line(LineKind::from(message.style), &message.text);
        }
        for event in outcome.events {
            match event {
                AppEvent::CommandExecuted { id, .. } => {
                    self.state.status.last_action_id = Some(id);
                }
                AppEvent::PageChanged(change) => {
                    self.state.example_cursor = 0;
                    let count = self.session.interpreter().state().page_count();
                    self.state.status.message =
                        format!("page {}/{} ({})", change.to + 1, count, change.reason.as_str());
                }
                AppEvent::EvaluationSettled { .. } => {}
            }
        }
    }

    fn accept_prompt_line(&mut self, line: &str) {
        let echo = format!("{}{}", self.session.prompt_label(), line.trim());
        self.state.push_line(LineKind::Input, &echo);
        self.prompt.history.record(line);
        self.prompt.input.reset();
    }

    fn insert_example(&mut self) {
        let Some(page) = self.session.interpreter().state().current() else {
            return;
        };
        if page.examples.is_empty() {
            return;
        }
        let example = page.examples[self.state.example_cursor % page.examples.len()].clone();
        self.state.example_cursor = self.state.example_cursor.wrapping_add(1);
        self.prompt.input = Input::new(example);
    }
}
