use std::sync::Arc;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::console::EvalTicket;
use crate::eval::Evaluator;
use crate::event::DomainEvent;

pub(crate) struct EventBusRuntime {
    tx: UnboundedSender<DomainEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventBusRuntime {
    pub(crate) fn spawn() -> (UnboundedReceiver<DomainEvent>, Self) {
        let (tx, rx) = unbounded_channel();
        let tasks = vec![spawn_input_task(tx.clone())];
        (rx, Self { tx, tasks })
    }

    /// Runs one evaluation off the UI loop; the response comes back as a
    /// [`DomainEvent::EvaluationSettled`].
    pub(crate) fn spawn_evaluation(&mut self, evaluator: Arc<dyn Evaluator>, ticket: EvalTicket) {
        self.tasks.retain(|task| !task.is_finished());
        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            let ticket_id = ticket.id();
            let response = evaluator.evaluate(ticket.request).await;
            let _ = tx.send(DomainEvent::EvaluationSettled {
                ticket: ticket_id,
                response,
            });
        }));
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
    })
}
