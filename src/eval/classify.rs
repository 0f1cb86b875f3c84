use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::types::{EvalResponse, EvaluationResult};

/// Maps raw evaluator responses into tagged outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultClassifier {
    escape_markup: bool,
}

impl ResultClassifier {
    pub fn new(escape_markup: bool) -> Self {
        Self { escape_markup }
    }

    /// Classifies and applies the display transform.
    pub fn classify(&self, response: &EvalResponse) -> AppResult<EvaluationResult> {
        self.classify_raw(response).map(|result| self.for_display(result))
    }

    /// Classifies without touching the payload text.
    pub fn classify_raw(&self, response: &EvalResponse) -> AppResult<EvaluationResult> {
        if response.is_error() {
            let message = payload_text(response.message.as_ref(), "message")?;
            return Ok(EvaluationResult::Error { message });
        }

        let result = payload_text(response.result.as_ref(), "result")?;
        Ok(EvaluationResult::Value { result })
    }

    pub fn for_display(&self, result: EvaluationResult) -> EvaluationResult {
        if !self.escape_markup {
            return result;
        }
        match result {
            EvaluationResult::Error { message } => EvaluationResult::Error {
                message: escape_markup(&message),
            },
            EvaluationResult::Value { result } => EvaluationResult::Value {
                result: escape_markup(&result),
            },
        }
    }
}

fn payload_text(field: Option<&Value>, name: &str) -> AppResult<String> {
    match field {
        None | Some(Value::Null) => Err(AppError::malformed_response(format!(
            "response has no `{name}` field"
        ))),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

/// Makes evaluator text safe to inject as markup. Angle brackets are escaped
/// before newlines become `<br/>` so the line breaks survive.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\n' => escaped.push_str("<br/>"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ResultClassifier, escape_markup};
    use crate::error::AppError;
    use crate::eval::{EvalResponse, EvaluationResult};

    #[test]
    fn classifies_value_and_error_responses() {
        let classifier = ResultClassifier::default();
        assert_eq!(
            classifier
                .classify(&EvalResponse::value("3"))
                .expect("value should classify"),
            EvaluationResult::Value {
                result: "3".to_string()
            }
        );
        assert_eq!(
            classifier
                .classify(&EvalResponse::error("unexpected EOF"))
                .expect("error should classify"),
            EvaluationResult::Error {
                message: "unexpected EOF".to_string()
            }
        );
    }

    #[test]
    fn escaping_replaces_angle_brackets_when_enabled() {
        let response = EvalResponse::value("<script>alert(1)</script>");

        let escaped = ResultClassifier::new(true)
            .classify(&response)
            .expect("value should classify");
        assert_eq!(escaped.text(), "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(!escaped.text().contains('<'));

        let raw = ResultClassifier::new(false)
            .classify(&response)
            .expect("value should classify");
        assert_eq!(raw.text(), "<script>alert(1)</script>");
    }

    #[test]
    fn escape_keeps_line_break_markers() {
        assert_eq!(escape_markup("a\nb<c>"), "a<br/>b&lt;c&gt;");
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn error_messages_are_escaped_too() {
        let escaped = ResultClassifier::new(true)
            .classify(&EvalResponse::error("bad <form>"))
            .expect("error should classify");
        assert_eq!(
            escaped,
            EvaluationResult::Error {
                message: "bad &lt;form&gt;".to_string()
            }
        );
    }

    #[test]
    fn missing_payload_fails_fast() {
        let classifier = ResultClassifier::default();

        let empty = EvalResponse::default();
        let err = classifier.classify(&empty).expect_err("must not guess");
        assert!(matches!(err, AppError::MalformedResponse(_)));

        let flagged = EvalResponse {
            error: Some(json!(true)),
            message: None,
            result: Some(json!("3")),
        };
        assert!(classifier.classify(&flagged).is_err());
    }

    #[test]
    fn non_string_payloads_are_rendered_as_json() {
        let response = EvalResponse {
            error: Some(json!(false)),
            message: None,
            result: Some(json!(42)),
        };
        let classified = ResultClassifier::default()
            .classify(&response)
            .expect("number should classify");
        assert_eq!(classified.text(), "42");
    }
}
