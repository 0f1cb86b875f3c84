mod interpreter;
mod render;
mod session;

pub use interpreter::{
    CommandInterpreter, EvalTicket, InterpreterOptions, LineDisposition, LineOutcome,
};
pub use render::{Message, RenderInstruction, StyleTag};
pub use session::Session;
