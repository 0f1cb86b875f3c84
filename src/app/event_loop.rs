use crossterm::event::{Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::ui::{ChromeInfo, ConsoleView, draw_chrome, draw_console, split_layout};

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::terminal_session::{TerminalSession, TerminalSurface};

struct LoopRuntime {
    session: TerminalSession,
    loop_event_rx: UnboundedReceiver<DomainEvent>,
    loop_event_runtime: EventBusRuntime,
    needs_redraw: bool,
}

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl App {
    /// Runs the full-screen console until the user quits.
    pub async fn run(&mut self) -> AppResult<()> {
        let mut runtime = self.initialize_loop_runtime()?;

        loop {
            if runtime.needs_redraw {
                self.render_frame(&mut runtime.session)?;
                runtime.needs_redraw = false;
            }

            let waited = wait_next_event(&mut runtime.loop_event_rx).await;
            if matches!(
                self.handle_waited_event(waited, &mut runtime),
                LoopControl::Break
            ) {
                break;
            }
        }

        runtime.loop_event_runtime.shutdown();
        runtime.session.restore()?;
        Ok(())
    }

    fn initialize_loop_runtime(&mut self) -> AppResult<LoopRuntime> {
        let session = TerminalSession::enter()?;
        let (loop_event_rx, loop_event_runtime) = EventBusRuntime::spawn();

        Ok(LoopRuntime {
            session,
            loop_event_rx,
            loop_event_runtime,
            needs_redraw: true,
        })
    }

    pub(crate) fn render_frame(&self, surface: &mut impl TerminalSurface) -> AppResult<()> {
        let tutorial = self.session.interpreter().state();
        let page = tutorial
            .current_page()
            .and_then(|index| tutorial.page(index).map(|page| (index, page)));
        let interpreter = self.session.interpreter();
        let state = &self.state;
        let prompt = &self.prompt;
        let prompt_label = self.session.prompt_label();

        surface.draw(|frame| {
            let layout = split_layout(frame.area(), page.is_some());
            draw_console(
                frame,
                layout,
                &ConsoleView {
                    page,
                    page_count: tutorial.page_count(),
                    scrollback: &state.scrollback,
                    scroll_offset: state.scroll_offset,
                    prompt_label,
                    input: prompt.input.value(),
                    cursor: prompt.input.cursor(),
                },
            );
            draw_chrome(
                frame,
                layout,
                ChromeInfo {
                    tutorial,
                    grammar: interpreter.grammar().id(),
                    policy: interpreter.policy().id(),
                    busy: interpreter.is_busy(),
                    status: &state.status,
                },
            );
        })?;
        Ok(())
    }

    fn handle_waited_event(&mut self, waited: WaitEvent, runtime: &mut LoopRuntime) -> LoopControl {
        match waited {
            WaitEvent::Event(DomainEvent::Input(Event::Key(key))) => {
                if key.kind != KeyEventKind::Press {
                    return LoopControl::Continue;
                }
                let outcome = self.handle_key(key);
                if outcome.quit_requested {
                    return LoopControl::Break;
                }
                if let Some(ticket) = outcome.evaluate {
                    runtime
                        .loop_event_runtime
                        .spawn_evaluation(self.session.evaluator(), ticket);
                }
                runtime.needs_redraw |= outcome.redraw;
            }
            WaitEvent::Event(DomainEvent::Input(Event::Resize(_, _))) => {
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::Input(_)) => {}
            WaitEvent::Event(DomainEvent::InputError(message)) => {
                tracing::warn!(error = %message, "terminal input error");
                self.state.status.message = format!("input error: {message}");
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::EvaluationSettled { ticket, response }) => {
                self.settle_evaluation(ticket, response);
                runtime.needs_redraw = true;
            }
            WaitEvent::Closed => return LoopControl::Break,
        }
        LoopControl::Continue
    }
}

async fn wait_next_event(loop_event_rx: &mut UnboundedReceiver<DomainEvent>) -> WaitEvent {
    match loop_event_rx.recv().await {
        Some(event) => WaitEvent::Event(event),
        None => WaitEvent::Closed,
    }
}
