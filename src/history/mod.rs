mod state;

pub use state::PromptHistory;
