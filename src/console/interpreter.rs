use crate::command::{Command, CommandGrammar, dispatch, parse_command_text};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::eval::{EvalRequest, EvalResponse, EvaluationResult, Evaluator, ResultClassifier};
use crate::event::AppEvent;
use crate::tutorial::{AdvancementPolicy, Page, TutorialState};

use super::render::{Message, RenderInstruction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterOptions {
    pub grammar: CommandGrammar,
    pub policy: AdvancementPolicy,
    pub escape_markup: bool,
    pub eval_prefix: Option<String>,
}

impl InterpreterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            grammar: config.tutorial.grammar,
            policy: config.tutorial.advance,
            escape_markup: config.console.escape_markup,
            eval_prefix: config.console.eval_prefix.clone(),
        }
    }
}

/// Result of handling one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub instruction: RenderInstruction,
    /// Set when a navigation command was accepted; hosts use it to clear the
    /// prompt and record history.
    pub command_accepted: bool,
    pub events: Vec<AppEvent>,
}

impl LineOutcome {
    pub fn ignored() -> Self {
        Self {
            instruction: RenderInstruction::Silent,
            command_accepted: false,
            events: Vec::new(),
        }
    }
}

/// An evaluation the interpreter is waiting on. Only one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalTicket {
    id: u64,
    pub request: EvalRequest,
}

impl EvalTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDisposition {
    /// Failed the validation gate; nothing happens.
    Ignored,
    Navigated(LineOutcome),
    /// The caller must run the request and hand the response to
    /// [`CommandInterpreter::settle`].
    Evaluate(EvalTicket),
}

pub struct CommandInterpreter {
    state: TutorialState,
    grammar: CommandGrammar,
    policy: AdvancementPolicy,
    classifier: ResultClassifier,
    eval_prefix: Option<String>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl CommandInterpreter {
    pub fn new(pages: Vec<Page>, options: InterpreterOptions) -> Self {
        Self {
            state: TutorialState::new(pages),
            grammar: options.grammar,
            policy: options.policy,
            classifier: ResultClassifier::new(options.escape_markup),
            eval_prefix: options.eval_prefix,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> &TutorialState {
        &self.state
    }

    pub fn grammar(&self) -> CommandGrammar {
        self.grammar
    }

    pub fn policy(&self) -> AdvancementPolicy {
        self.policy
    }

    /// Pre-submission gate for the console widget.
    pub fn validate(&self, line: &str) -> bool {
        !line.trim().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Drops the in-flight slot without a response, e.g. when the host
    /// abandons a stalled request.
    pub fn cancel_in_flight(&mut self) -> bool {
        self.in_flight.take().is_some()
    }

    pub fn interpret(&mut self, line: &str) -> AppResult<LineDisposition> {
        if !self.validate(line) {
            return Ok(LineDisposition::Ignored);
        }
        if self.in_flight.is_some() {
            return Err(AppError::EvaluationInFlight);
        }

        let trimmed = line.trim();
        if let Some(prefix) = self.eval_prefix.as_deref()
            && let Some(code) = trimmed.strip_prefix(prefix)
        {
            let code = code.trim_start();
            if code.is_empty() {
                return Ok(LineDisposition::Ignored);
            }
            return Ok(LineDisposition::Evaluate(self.open_ticket(code)));
        }

        if let Some(command) = parse_command_text(trimmed, self.grammar) {
            return Ok(LineDisposition::Navigated(self.navigate(command)));
        }

        Ok(LineDisposition::Evaluate(self.open_ticket(trimmed)))
    }

    pub fn navigate(&mut self, command: Command) -> LineOutcome {
        let result = dispatch(&mut self.state, self.grammar, command);
        LineOutcome {
            instruction: RenderInstruction::Silent,
            command_accepted: result.outcome.is_accepted(),
            events: result.emitted_events,
        }
    }

    /// Completes the in-flight evaluation. Transport and malformed-response
    /// failures are returned as errors; the slot is released either way.
    pub fn settle(
        &mut self,
        ticket_id: u64,
        response: AppResult<EvalResponse>,
    ) -> AppResult<LineOutcome> {
        if self.in_flight != Some(ticket_id) {
            return Err(AppError::invalid_argument(format!(
                "evaluation ticket {ticket_id} is not in flight"
            )));
        }
        self.in_flight = None;

        let classified = response.and_then(|response| self.classifier.classify_raw(&response));
        let raw = match classified {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(ticket = ticket_id, error = %err, "evaluation failed");
                return Err(err);
            }
        };

        let mut events = Vec::new();
        if let EvaluationResult::Value { result } = &raw
            && let Some(change) = self.policy.after_success(&mut self.state, result)
        {
            events.push(AppEvent::PageChanged(change));
        }

        let message = Message::from(self.classifier.for_display(raw));
        tracing::debug!(ticket = ticket_id, style = message.style.as_str(), "evaluation settled");
        events.push(AppEvent::EvaluationSettled {
            style: message.style,
        });

        Ok(LineOutcome {
            instruction: RenderInstruction::message(message),
            command_accepted: false,
            events,
        })
    }

    /// Handles one line end to end, awaiting the evaluator when the line is
    /// code.
    pub async fn handle_line(
        &mut self,
        line: &str,
        evaluator: &dyn Evaluator,
    ) -> AppResult<LineOutcome> {
        match self.interpret(line)? {
            LineDisposition::Ignored => Ok(LineOutcome::ignored()),
            LineDisposition::Navigated(outcome) => Ok(outcome),
            LineDisposition::Evaluate(ticket) => {
                let guard = InFlightGuard {
                    interpreter: self,
                    ticket: ticket.id(),
                };
                let response = evaluator.evaluate(ticket.request.clone()).await;
                guard.interpreter.settle(ticket.id(), response)
            }
        }
    }

    fn open_ticket(&mut self, code: &str) -> EvalTicket {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.in_flight = Some(self.next_ticket);
        tracing::debug!(ticket = self.next_ticket, "evaluation requested");
        EvalTicket {
            id: self.next_ticket,
            request: EvalRequest::new(code),
        }
    }
}

/// Frees the slot if `handle_line` is dropped while awaiting the evaluator.
struct InFlightGuard<'a> {
    interpreter: &'a mut CommandInterpreter,
    ticket: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.interpreter.in_flight == Some(self.ticket) {
            self.interpreter.in_flight = None;
            tracing::warn!(ticket = self.ticket, "evaluation abandoned");
        }
    }
}
