use serde::Deserialize;

use crate::event::{NavReason, PageChange};

use super::state::TutorialState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvancementPolicy {
    /// Movement only through explicit commands.
    Manual,
    /// Advance one page when the current page's predicate accepts a value.
    #[default]
    #[serde(alias = "verify")]
    VerifyAndAdvance,
}

impl AdvancementPolicy {
    pub fn id(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::VerifyAndAdvance => "verify",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "manual" => Some(Self::Manual),
            "verify" | "verify-and-advance" => Some(Self::VerifyAndAdvance),
            _ => None,
        }
    }

    /// Runs after a non-error evaluation. Only successful values reach here.
    pub fn after_success(self, state: &mut TutorialState, value: &str) -> Option<PageChange> {
        if self == Self::Manual {
            return None;
        }

        let current = state.current_page()?;
        let accepted = state.page(current)?.verify(value)?;
        if !accepted {
            return None;
        }

        tracing::debug!(page = current, "verify predicate accepted result");
        state.transition(current as i64 + 1, NavReason::Verified)
    }
}
