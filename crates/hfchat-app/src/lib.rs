//! hfchat - streaming terminal chat for hosted language models

pub mod app;
pub mod cli;
pub mod config;

pub use cli::Cli;
pub use app::{setup_from_cli, run_once_mode, run_repl_mode, AppConfig};
