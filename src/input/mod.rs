pub mod keymap;

pub use keymap::{ConsoleAction, KeymapPreset, map_key_to_action, map_key_to_action_with_preset};
