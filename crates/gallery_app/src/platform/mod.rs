pub mod app;
pub mod config;
pub mod logging;
pub mod terminal_sink;
pub mod ui;
