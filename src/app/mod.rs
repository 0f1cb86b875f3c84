mod core;
mod event_bus;
mod event_loop;
mod input_ops;
mod plain;
mod state;
pub(crate) mod terminal_session;

#[cfg(test)]
mod tests;

pub use core::{App, PromptSubsystem};
pub use plain::run_plain;
pub use state::{ConsoleState, LineKind, ScrollbackLine, StatusState};
