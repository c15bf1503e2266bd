use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

use hfchat_chat::ChatError;
use hfchat_llm_api::ClientConfig;
use hfchat_models::GenerationParams;

use crate::cli::Cli;
use crate::config::default_chain;

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_config: ClientConfig,
    pub params: GenerationParams,
    pub log_dir: Option<PathBuf>,
}

/// Set up application configuration from CLI arguments.
///
/// Fails with `CredentialMissing` before any network traffic when no token
/// can be found.
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let work_dir = std::env::current_dir().context("Failed to determine working directory")?;
    let allow_prompt = !cli.no_prompt && cli.once.is_none() && std::io::stdin().is_terminal();

    let credential = default_chain(cli.token.clone(), cli.secrets.clone(), &work_dir, allow_prompt)
        .resolve()
        .context("Set HF_TOKEN, add it to .hfchat/secrets.toml, or pass --token")?;

    build_config(cli, credential.token)
}

/// Assemble the configuration once a token is known
pub fn build_config(cli: &Cli, api_token: String) -> Result<AppConfig> {
    let model = cli.model.trim();
    if model.is_empty() {
        anyhow::bail!("Model identifier must not be empty");
    }

    let params = GenerationParams::new(cli.temperature, cli.top_p, cli.max_tokens).map_err(ChatError::from)?;

    let client_config = ClientConfig::new(api_token, model)
        .with_api_url(&cli.api_url)
        .with_verbose(cli.verbose);

    log::debug!("model: {}, endpoint: {}", client_config.model, client_config.api_url);

    Ok(AppConfig {
        client_config,
        params,
        log_dir: cli.log_dir.clone(),
    })
}
