#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod editor;
pub mod logging;
pub mod menu;
pub mod quiz_runner;
pub mod theory;
pub mod view;

pub use config::AppConfig;
pub use console::Console;
pub use menu::QuizApp;
