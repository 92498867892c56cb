mod app;
pub mod app_core;
pub mod auth;
mod background;
pub mod cli;
pub mod commands;
pub mod events;
pub mod input;
pub mod log_buffer;
pub mod logging;
pub mod refresh;
pub mod settings;
pub mod state;
pub mod ui;
mod utils;

pub use app::App;

// Always expose testing module (integration tests need it)
pub mod testing;
