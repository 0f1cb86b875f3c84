use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalRequest {
    pub expr: String,
}

impl EvalRequest {
    pub fn new(expr: impl Into<String>) -> Self {
        Self { expr: expr.into() }
    }
}

/// Evaluator response as it arrives on the wire. The error discriminant is a
/// loosely typed flag, so fields stay raw until classification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EvalResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl EvalResponse {
    pub fn value(result: impl Into<String>) -> Self {
        Self {
            error: Some(Value::Bool(false)),
            message: None,
            result: Some(Value::String(result.into())),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(Value::Bool(true)),
            message: Some(Value::String(message.into())),
            result: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.as_ref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    Error { message: String },
    Value { result: String },
}

impl EvaluationResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Error { message } => message,
            Self::Value { result } => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EvalResponse;

    fn parse(raw: &str) -> EvalResponse {
        serde_json::from_str(raw).expect("response should deserialize")
    }

    #[test]
    fn error_flag_follows_truthiness() {
        assert!(parse(r#"{"error": true, "message": "x"}"#).is_error());
        assert!(parse(r#"{"error": 1, "message": "x"}"#).is_error());
        assert!(parse(r#"{"error": "yes", "message": "x"}"#).is_error());
        assert!(!parse(r#"{"error": false, "result": "3"}"#).is_error());
        assert!(!parse(r#"{"error": 0, "result": "3"}"#).is_error());
        assert!(!parse(r#"{"error": "", "result": "3"}"#).is_error());
        assert!(!parse(r#"{"error": null, "result": "3"}"#).is_error());
        assert!(!parse(r#"{"result": "3"}"#).is_error());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let response = parse(r#"{"error": false, "result": "3", "expr": "(+ 1 2)"}"#);
        assert_eq!(response, EvalResponse::value("3"));
    }
}
