use anyhow::Result;
use clap::Parser;

use hfchat::{Cli, setup_from_cli, run_once_mode, run_repl_mode};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    hfchat_logging::init_logging(cli.verbose);

    // Resolve model, endpoint and credential before the first turn
    let app_config = setup_from_cli(&cli)?;

    // Handle single-turn mode if requested
    if let Some(text) = cli.once.as_deref() {
        return run_once_mode(app_config, text).await;
    }

    run_repl_mode(app_config).await
}
