use serde::Deserialize;

/// Which keyword set the console recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandGrammar {
    /// `tutorial`, `next`, `back`, `restart`, with single steps bounds-checked
    /// before navigating.
    Classic,
    /// Full keyword set plus `goto N`; out-of-range targets are silent no-ops.
    #[default]
    Extended,
}

impl CommandGrammar {
    pub fn id(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Extended => "extended",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "classic" => Some(Self::Classic),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tutorial,
    Next,
    Previous,
    Restart,
    Last,
    Goto { page: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    Tutorial,
    Next,
    Previous,
    Restart,
    Last,
    Goto,
    Evaluate,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tutorial => "tutorial",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Restart => "restart",
            Self::Last => "last",
            Self::Goto => "goto",
            Self::Evaluate => "evaluate",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::Tutorial => ActionId::Tutorial,
            Self::Next => ActionId::Next,
            Self::Previous => ActionId::Previous,
            Self::Restart => ActionId::Restart,
            Self::Last => ActionId::Last,
            Self::Goto { .. } => ActionId::Goto,
        }
    }

    pub(crate) fn from_action(id: ActionId) -> Option<Self> {
        match id {
            ActionId::Tutorial => Some(Self::Tutorial),
            ActionId::Next => Some(Self::Next),
            ActionId::Previous => Some(Self::Previous),
            ActionId::Restart => Some(Self::Restart),
            ActionId::Last => Some(Self::Last),
            ActionId::Goto | ActionId::Evaluate => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub keyword: &'static str,
    pub title: &'static str,
    pub action: ActionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command was accepted and moved the tutorial.
    Applied,
    /// The command was accepted but the target was redundant or out of range.
    Noop,
    /// The classic grammar's pre-check refused the move.
    Rejected,
}

impl CommandOutcome {
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}
