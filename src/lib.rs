pub mod app;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod eval;
pub mod event;
pub mod history;
pub mod input;
pub mod logging;
pub mod tutorial;
pub mod ui;
