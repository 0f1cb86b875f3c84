mod classify;
mod client;
mod types;

pub use classify::{ResultClassifier, escape_markup};
pub use client::{Evaluator, HttpEvaluator};
pub use types::{EvalRequest, EvalResponse, EvaluationResult};
