pub mod commands;
pub mod conversation;
pub mod once;
pub mod output;
pub mod repl;
pub mod setup;

pub use conversation::Conversation;
pub use once::run_once_mode;
pub use output::{print_fragments, TurnOutcome};
pub use repl::run_repl_mode;
pub use setup::{build_config, setup_from_cli, AppConfig};
