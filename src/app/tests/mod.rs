use async_trait::async_trait;

use crate::error::AppResult;
use crate::eval::{EvalRequest, EvalResponse, Evaluator};

mod config_init;

/// Answers `(fail ...)` with an evaluation error and echoes everything else.
struct EchoEvaluator;

#[async_trait]
impl Evaluator for EchoEvaluator {
    async fn evaluate(&self, request: EvalRequest) -> AppResult<EvalResponse> {
        if request.expr.starts_with("(fail") {
            return Ok(EvalResponse::error("boom"));
        }
        Ok(EvalResponse::value(request.expr))
    }

    fn name(&self) -> &str {
        "echo"
    }
}
