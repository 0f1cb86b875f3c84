use std::sync::Arc;

use crate::command::keyword_summary;
use crate::config::Config;
use crate::error::AppResult;
use crate::eval::{Evaluator, HttpEvaluator};

use super::interpreter::{CommandInterpreter, InterpreterOptions, LineOutcome};

/// One console's worth of tutorial state, owned by whichever host drives it.
pub struct Session {
    interpreter: CommandInterpreter,
    evaluator: Arc<dyn Evaluator>,
    prompt_label: String,
    welcome_message: String,
}

impl Session {
    pub fn new(config: &Config, evaluator: Arc<dyn Evaluator>) -> Self {
        let interpreter = CommandInterpreter::new(
            config.tutorial.build_pages(),
            InterpreterOptions::from_config(config),
        );
        tracing::info!(
            pages = interpreter.state().page_count(),
            grammar = interpreter.grammar().id(),
            policy = interpreter.policy().id(),
            evaluator = evaluator.name(),
            "console session initialized"
        );

        Self {
            interpreter,
            evaluator,
            prompt_label: config.console.prompt_label.clone(),
            welcome_message: config.console.welcome_message.clone(),
        }
    }

    /// Builds a session talking to the configured HTTP evaluator.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let evaluator = HttpEvaluator::from_config(&config.evaluator)?;
        Ok(Self::new(config, Arc::new(evaluator)))
    }

    pub fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut CommandInterpreter {
        &mut self.interpreter
    }

    pub fn evaluator(&self) -> Arc<dyn Evaluator> {
        Arc::clone(&self.evaluator)
    }

    pub fn prompt_label(&self) -> &str {
        &self.prompt_label
    }

    pub fn welcome_lines(&self) -> Vec<String> {
        vec![
            self.welcome_message.clone(),
            format!(
                "Commands: {}",
                keyword_summary(self.interpreter.grammar())
            ),
        ]
    }

    pub fn validate(&self, line: &str) -> bool {
        self.interpreter.validate(line)
    }

    pub async fn submit(&mut self, line: &str) -> AppResult<LineOutcome> {
        self.interpreter
            .handle_line(line, self.evaluator.as_ref())
            .await
    }
}
