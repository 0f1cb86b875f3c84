use tui_input::Input;

use crate::config::Config;
use crate::console::Session;
use crate::error::AppResult;
use crate::history::PromptHistory;
use crate::input::KeymapPreset;

use super::state::{ConsoleState, LineKind};

pub struct PromptSubsystem {
    pub input: Input,
    pub history: PromptHistory,
    pub keymap: KeymapPreset,
}

pub struct App {
    pub state: ConsoleState,
    pub session: Session,
    pub prompt: PromptSubsystem,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> AppResult<Self> {
        let session = Session::from_config(&config)?;
        Ok(Self::new_with_session(config, session))
    }

    pub fn new_with_session(config: Config, session: Session) -> Self {
        let mut state = ConsoleState::new(config.console.scrollback_capacity);
        for line in session.welcome_lines() {
            state.push_line(LineKind::Welcome, &line);
        }

        Self {
            state,
            prompt: PromptSubsystem {
                input: Input::default(),
                history: PromptHistory::new(config.console.history_capacity),
                keymap: KeymapPreset::parse(&config.console.keymap),
            },
            session,
            config,
        }
    }
}
