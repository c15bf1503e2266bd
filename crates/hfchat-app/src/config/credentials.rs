//! Bearer token resolution.
//!
//! Sources are asked in order and the first non-blank value wins. The default
//! chain is: `--token`, secrets file, `HF_TOKEN`, interactive prompt.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use hfchat_chat::ChatError;

/// Key looked up in the secrets file and in the environment
pub const TOKEN_KEY: &str = "HF_TOKEN";

/// Directory holding the secrets file, relative to the working or home directory
pub const SECRETS_DIR: &str = ".hfchat";
pub const SECRETS_FILE: &str = "secrets.toml";

/// One place a bearer token can come from
pub trait CredentialSource {
    /// Human readable name used in logs and in the "missing token" message
    fn name(&self) -> String;

    /// `Ok(None)` means "nothing here, ask the next source"
    fn fetch(&self) -> Result<Option<String>>;
}

/// A token passed explicitly, e.g. on the command line
pub struct StaticSource {
    label: String,
    value: Option<String>,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, value: Option<String>) -> Self {
        Self { label: label.into(), value }
    }
}

impl CredentialSource for StaticSource {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn fetch(&self) -> Result<Option<String>> {
        Ok(self.value.clone())
    }
}

/// TOML secrets file with a top-level `HF_TOKEN = "..."` entry.
///
/// Candidate paths are tried in order; the first one that exists is read and
/// the rest are ignored.
pub struct SecretsFileSource {
    candidates: Vec<PathBuf>,
    key: String,
}

impl SecretsFileSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            key: TOKEN_KEY.to_string(),
        }
    }

    /// `explicit` if given, otherwise the working-directory and home-directory defaults
    pub fn with_defaults(explicit: Option<PathBuf>, work_dir: &Path) -> Self {
        let candidates = match explicit {
            Some(path) => vec![path],
            None => default_secrets_paths(work_dir),
        };
        Self::new(candidates)
    }

    fn read(&self, path: &Path) -> Result<Option<String>> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read secrets file {}", path.display()))?;
        let table: toml::Table = contents
            .parse()
            .with_context(|| format!("Failed to parse secrets file {}", path.display()))?;

        match table.get(&self.key) {
            Some(toml::Value::String(token)) => Ok(Some(token.clone())),
            Some(_) => anyhow::bail!("{} in {} is not a string", self.key, path.display()),
            None => Ok(None),
        }
    }
}

impl CredentialSource for SecretsFileSource {
    fn name(&self) -> String {
        match self.candidates.as_slice() {
            [only] => format!("secrets file {}", only.display()),
            _ => "secrets file".to_string(),
        }
    }

    fn fetch(&self) -> Result<Option<String>> {
        match self.candidates.iter().find(|path| path.is_file()) {
            Some(path) => {
                log::debug!("reading secrets from {}", path.display());
                self.read(path)
            }
            None => Ok(None),
        }
    }
}

/// Environment variable source
pub struct EnvSource {
    var: String,
}

impl EnvSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvSource {
    fn name(&self) -> String {
        format!("${}", self.var)
    }

    fn fetch(&self) -> Result<Option<String>> {
        Ok(std::env::var(&self.var).ok())
    }
}

/// Masked interactive prompt; skipped when stdin is not a terminal
pub struct PromptSource {
    prompt: String,
}

impl PromptSource {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }
}

impl CredentialSource for PromptSource {
    fn name(&self) -> String {
        "interactive prompt".to_string()
    }

    fn fetch(&self) -> Result<Option<String>> {
        if !std::io::stdin().is_terminal() {
            log::debug!("stdin is not a terminal, skipping token prompt");
            return Ok(None);
        }

        eprintln!("⚠️  No {} found. Paste a Hugging Face access token to continue.", TOKEN_KEY);
        let input = dialoguer::Password::new()
            .with_prompt(&self.prompt)
            .allow_empty_password(true)
            .interact()
            .context("Failed to read token from terminal")?;
        Ok(Some(input))
    }
}

/// A resolved token and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub token: String,
    pub source: String,
}

/// Ordered list of credential sources
#[derive(Default)]
pub struct CredentialChain {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Ask each source in turn.
    ///
    /// A failing source (unreadable or malformed secrets file, prompt error)
    /// is logged and skipped. Values are trimmed; blank values count as absent.
    pub fn resolve(&self) -> Result<ResolvedCredential, ChatError> {
        for source in &self.sources {
            match source.fetch() {
                Ok(Some(value)) => {
                    let token = value.trim();
                    if token.is_empty() {
                        log::debug!("{} yielded a blank token, trying next source", source.name());
                        continue;
                    }
                    log::info!("using API token from {}", source.name());
                    return Ok(ResolvedCredential {
                        token: token.to_string(),
                        source: source.name(),
                    });
                }
                Ok(None) => log::debug!("no token in {}", source.name()),
                Err(e) => log::warn!("skipping {}: {:#}", source.name(), e),
            }
        }

        let tried: Vec<String> = self.sources.iter().map(|source| source.name()).collect();
        Err(ChatError::CredentialMissing(format!("tried {}", tried.join(", "))))
    }
}

/// `<work_dir>/.hfchat/secrets.toml`, then `~/.hfchat/secrets.toml`
pub fn default_secrets_paths(work_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![work_dir.join(SECRETS_DIR).join(SECRETS_FILE)];

    if let Ok(home_dir) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        let home_path = PathBuf::from(home_dir).join(SECRETS_DIR).join(SECRETS_FILE);
        if !paths.contains(&home_path) {
            paths.push(home_path);
        }
    }
    paths
}

/// The standard chain used by the CLI
pub fn default_chain(cli_token: Option<String>, secrets: Option<PathBuf>, work_dir: &Path, allow_prompt: bool) -> CredentialChain {
    let mut chain = CredentialChain::new()
        .with_source(StaticSource::new("--token", cli_token))
        .with_source(SecretsFileSource::with_defaults(secrets, work_dir))
        .with_source(EnvSource::new(TOKEN_KEY));

    if allow_prompt {
        chain = chain.with_source(PromptSource::new("HF token"));
    }
    chain
}
