use std::sync::Arc;

use super::EchoEvaluator;
use crate::app::{App, LineKind};
use crate::config::Config;
use crate::console::Session;
use crate::input::KeymapPreset;

#[test]
fn new_with_session_applies_console_config() {
    let mut config = Config::default();
    config.console.keymap = "emacs".to_string();
    config.console.history_capacity = 2;
    config.console.welcome_message = "hello\nthere".to_string();
    let session = Session::new(&config, Arc::new(EchoEvaluator));

    let mut app = App::new_with_session(config, session);

    assert_eq!(app.prompt.keymap, KeymapPreset::Emacs);
    assert_eq!(app.prompt.history.back(""), None);
    let welcome: Vec<&str> = app
        .state
        .scrollback
        .iter()
        .filter(|line| line.kind == LineKind::Welcome)
        .map(|line| line.text.as_str())
        .collect();
    assert_eq!(welcome[0], "hello");
    assert_eq!(welcome[1], "there");
    assert!(welcome[2].starts_with("Commands: "));
}

#[test]
fn new_rejects_unusable_evaluator_endpoint() {
    let mut config = Config::default();
    config.evaluator.endpoint = String::new();

    assert!(App::new(config).is_err());
}
