use anyhow::Result;

use super::conversation::Conversation;
use super::output::TurnOutcome;
use super::setup::AppConfig;

/// Send a single message, print the streamed reply and exit.
///
/// A failed turn becomes the process error, so the exit status is non-zero.
pub async fn run_once_mode(config: AppConfig, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("--once needs a non-empty message");
    }

    let mut conversation = Conversation::from_config(&config).await;
    let mut stdout = std::io::stdout();

    let outcome = conversation.send(text, &mut stdout).await?;
    println!();
    conversation.shutdown().await;

    match outcome {
        TurnOutcome::Completed(_) => Ok(()),
        TurnOutcome::Failed(e) => Err(e.into()),
    }
}
