use crate::eval::EvaluationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Error,
    Value,
}

impl StyleTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Value => "value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub style: StyleTag,
}

impl From<EvaluationResult> for Message {
    fn from(result: EvaluationResult) -> Self {
        match result {
            EvaluationResult::Error { message } => Self {
                text: message,
                style: StyleTag::Error,
            },
            EvaluationResult::Value { result } => Self {
                text: result,
                style: StyleTag::Value,
            },
        }
    }
}

/// What the console should display for one handled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// The line was consumed without a visible message.
    Silent,
    Messages(Vec<Message>),
}

impl RenderInstruction {
    pub fn message(message: Message) -> Self {
        Self::Messages(vec![message])
    }

    pub fn messages(&self) -> &[Message] {
        match self {
            Self::Silent => &[],
            Self::Messages(messages) => messages,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.messages().is_empty()
    }
}
