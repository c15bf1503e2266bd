/// Hugging Face inference router (OpenAI-compatible chat completions)
pub const HF_ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Model used when neither `--model` nor `MODEL_ID` is given
pub const DEFAULT_MODEL_ID: &str = "openai/gpt-oss-20b";

/// Connection settings for an inference endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_token: String,
    pub model: String,
    pub api_url: String,
    pub verbose: bool,
}

impl ClientConfig {
    /// Settings for the Hugging Face router with the given token and model
    pub fn new(api_token: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            model: model.into(),
            api_url: HF_ROUTER_URL.to_string(),
            verbose: false,
        }
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = normalize_api_url(url);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Normalize API URL by ensuring it has the correct path for OpenAI-compatible endpoints
pub fn normalize_api_url(url: &str) -> String {
    let url = url.trim();

    // If URL already contains a path with "completions", use it as-is
    if url.contains("/completions") {
        return url.to_string();
    }

    let base = url.trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{}/chat/completions", base)
    } else {
        format!("{}/v1/chat/completions", base)
    }
}
