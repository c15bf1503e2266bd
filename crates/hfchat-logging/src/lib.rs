// Logging module - diagnostics, request debugging and conversation transcripts
pub mod conversation_logger;
pub mod request_logger;

pub use conversation_logger::ConversationLogger;

pub use request_logger::{
    log_request,
    log_response,
    log_stream_chunk,
    redact_token,
};

/// Initialise the `log` facade.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` for the
/// hfchat crates and `warn` for everything else.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        // Targets match by prefix, so this also covers the hfchat_* crates
        "warn,hfchat=debug"
    } else {
        "warn"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}
