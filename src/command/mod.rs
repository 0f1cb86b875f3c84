mod core;
mod dispatch;
mod parse;
mod spec;
mod types;

pub use dispatch::{CommandDispatchResult, dispatch};
pub use parse::parse_command_text;
pub use spec::{command_registry, keyword_summary, supports_goto};
pub use types::{ActionId, Command, CommandGrammar, CommandOutcome, CommandSpec};
