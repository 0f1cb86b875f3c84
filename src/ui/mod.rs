mod chrome;
mod console;
mod layout;

pub use chrome::{ChromeInfo, draw_chrome};
pub use console::{ConsoleView, draw_console};
pub use layout::{UiLayout, split_layout};
