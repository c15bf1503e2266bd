use clap::Parser;
use std::path::PathBuf;

use hfchat_llm_api::{DEFAULT_MODEL_ID, HF_ROUTER_URL};
use hfchat_models::params::{
    check_max_tokens, check_temperature, check_top_p, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P,
};

/// CLI arguments for hfchat
#[derive(Parser, Debug)]
#[command(name = "hfchat")]
#[command(about = "Streaming terminal chat for models served by the Hugging Face inference router")]
#[command(version)]
pub struct Cli {
    /// Model identifier sent to the inference service
    #[arg(long, value_name = "MODEL", env = "MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    pub model: String,

    /// Chat-completions endpoint; a bare base URL gets /v1/chat/completions appended
    #[arg(long, value_name = "URL", env = "HF_API_URL", default_value = HF_ROUTER_URL)]
    pub api_url: String,

    /// Bearer token; overrides the secrets file, HF_TOKEN and the prompt
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Secrets file holding HF_TOKEN (default: .hfchat/secrets.toml, then ~/.hfchat/secrets.toml)
    #[arg(long, value_name = "PATH")]
    pub secrets: Option<PathBuf>,

    /// Sampling temperature (0.0 - 1.5)
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, value_parser = parse_temperature)]
    pub temperature: f32,

    /// Nucleus sampling threshold (0.1 - 1.0)
    #[arg(long, default_value_t = DEFAULT_TOP_P, value_parser = parse_top_p)]
    pub top_p: f32,

    /// Maximum number of new tokens per reply (64 - 1024)
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS, value_parser = parse_max_tokens)]
    pub max_tokens: u32,

    /// Never ask for a token interactively
    #[arg(long)]
    pub no_prompt: bool,

    /// Write a JSONL transcript of the conversation into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Send a single message, print the streamed reply and exit
    #[arg(long, value_name = "TEXT")]
    pub once: Option<String>,

    /// Enable verbose debug output (shows HTTP requests, stream chunks, etc.)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

fn parse_temperature(s: &str) -> Result<f32, String> {
    let value = s.parse::<f32>().map_err(|e| e.to_string())?;
    check_temperature(value).map_err(|e| e.to_string())
}

fn parse_top_p(s: &str) -> Result<f32, String> {
    let value = s.parse::<f32>().map_err(|e| e.to_string())?;
    check_top_p(value).map_err(|e| e.to_string())
}

fn parse_max_tokens(s: &str) -> Result<u32, String> {
    let value = s.parse::<u32>().map_err(|e| e.to_string())?;
    check_max_tokens(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("MODEL_ID");
        std::env::remove_var("HF_API_URL");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let cli = Cli::try_parse_from(["hfchat"]).unwrap();
        assert_eq!(cli.model, "openai/gpt-oss-20b");
        assert_eq!(cli.api_url, HF_ROUTER_URL);
        assert_eq!(cli.temperature, 0.7);
        assert_eq!(cli.top_p, 0.95);
        assert_eq!(cli.max_tokens, 512);
        assert!(cli.token.is_none());
        assert!(!cli.no_prompt);
        assert!(cli.once.is_none());
    }

    #[test]
    #[serial]
    fn test_model_from_env() {
        clear_env();
        std::env::set_var("MODEL_ID", "meta-llama/Llama-3.1-8B-Instruct");
        let cli = Cli::try_parse_from(["hfchat"]).unwrap();
        clear_env();
        assert_eq!(cli.model, "meta-llama/Llama-3.1-8B-Instruct");
    }

    #[test]
    #[serial]
    fn test_flag_beats_env() {
        clear_env();
        std::env::set_var("MODEL_ID", "from-env");
        let cli = Cli::try_parse_from(["hfchat", "--model", "from-flag"]).unwrap();
        clear_env();
        assert_eq!(cli.model, "from-flag");
    }

    #[test]
    #[serial]
    fn test_generation_params_in_range() {
        clear_env();
        let cli = Cli::try_parse_from([
            "hfchat", "--temperature", "1.5", "--top-p", "0.1", "--max-tokens", "64",
        ])
        .unwrap();
        assert_eq!(cli.temperature, 1.5);
        assert_eq!(cli.top_p, 0.1);
        assert_eq!(cli.max_tokens, 64);
    }

    #[test]
    #[serial]
    fn test_generation_params_out_of_range_rejected() {
        clear_env();
        assert!(Cli::try_parse_from(["hfchat", "--temperature", "2"]).is_err());
        assert!(Cli::try_parse_from(["hfchat", "--top-p", "0"]).is_err());
        assert!(Cli::try_parse_from(["hfchat", "--max-tokens", "4096"]).is_err());
        assert!(Cli::try_parse_from(["hfchat", "--max-tokens", "many"]).is_err());
    }
}
