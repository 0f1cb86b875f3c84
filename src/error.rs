pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("evaluator transport failed: {context}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("malformed evaluator response: {0}")]
    MalformedResponse(String),
    #[error("an evaluation is already in flight")]
    EvaluationInFlight,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn transport(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Errors that only affect the line being handled; the session stays usable.
    pub fn is_line_local(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::MalformedResponse(_) | Self::EvaluationInFlight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn transport_error_wraps_context_and_source() {
        let err = AppError::transport("GET eval.json", AppError::invalid_argument("boom"));
        assert!(matches!(err, AppError::Transport { .. }));
        assert_eq!(err.to_string(), "evaluator transport failed: GET eval.json");
        assert!(err.is_line_local());
    }

    #[test]
    fn config_errors_are_not_line_local() {
        assert!(!AppError::invalid_argument("bad config").is_line_local());
        assert!(AppError::malformed_response("no result").is_line_local());
    }
}
