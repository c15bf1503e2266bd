use colored::Colorize;

use hfchat_models::ChatCompletionRequest;
use crate::safe_truncate;

const MAX_BODY_CHARS: usize = 5000;
const MAX_CHUNK_CHARS: usize = 200;

const TOKEN_PREFIX_CHARS: usize = 6;

/// Show only the first few characters of a bearer token.
///
/// Tokens too short to keep most of their characters hidden are masked entirely.
pub fn redact_token(token: &str) -> String {
    if token.chars().count() <= TOKEN_PREFIX_CHARS * 2 {
        return "***".to_string();
    }
    format!("{}***", token.chars().take(TOKEN_PREFIX_CHARS).collect::<String>())
}

/// Log HTTP request details for debugging (console output)
pub fn log_request(url: &str, request: &ChatCompletionRequest, api_token: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());

    // Parse URL to show host and port
    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        println!("{}: {}", "URL".bright_yellow(), url);
        println!("{}: {}", "Host".bright_yellow(), parsed_url.host_str().unwrap_or("unknown"));
        println!("{}: {}", "Port".bright_yellow(), parsed_url.port().map(|p| p.to_string()).unwrap_or_else(||
            if parsed_url.scheme() == "https" { "443 (default)".to_string() } else { "80 (default)".to_string() }
        ));
    } else {
        println!("{}: {}", "URL".bright_yellow(), url);
    }

    println!("\n{}", "Headers:".bright_yellow());
    println!("  Content-Type: application/json");
    println!("  Accept: text/event-stream");
    println!("  Authorization: Bearer {}", redact_token(api_token));

    println!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(request) {
        Ok(json) => print_truncated(&json),
        Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
    }

    println!("{}", "═".repeat(80).bright_cyan());
    println!();
}

/// Log HTTP response details for debugging (console output)
pub fn log_response(status: &reqwest::StatusCode, headers: &reqwest::header::HeaderMap, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_green());
    println!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    println!("{}", "═".repeat(80).bright_green());

    println!("{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    println!("\n{}", "Headers:".bright_yellow());
    for (name, value) in headers.iter() {
        if let Ok(val_str) = value.to_str() {
            println!("  {}: {}", name.as_str().bright_white(), val_str);
        }
    }

    println!("\n{}", "Response Body:".bright_yellow());
    // Try to pretty-print JSON, fall back to raw text
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok());
    print_truncated(pretty.as_deref().unwrap_or(body));

    println!("{}", "═".repeat(80).bright_green());
    println!();
}

/// Log streaming chunk for debugging (console output)
pub fn log_stream_chunk(chunk_num: usize, data: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("{}", format!("📦 Stream Chunk #{}: {}", chunk_num,
        if data.chars().count() > MAX_CHUNK_CHARS {
            format!("{}... ({} bytes)", safe_truncate(data, MAX_CHUNK_CHARS), data.len())
        } else {
            data.to_string()
        }
    ).bright_black());
}

fn print_truncated(text: &str) {
    if text.chars().count() > MAX_BODY_CHARS {
        println!("{}", safe_truncate(text, MAX_BODY_CHARS));
        println!("\n{}", format!("... (truncated, total {} bytes)", text.len()).bright_black());
    } else {
        println!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::redact_token;

    #[test]
    fn test_redact_token_keeps_prefix_only() {
        assert_eq!(redact_token("hf_abcdefghijklmnop"), "hf_abc***");
    }

    #[test]
    fn test_redact_short_token_is_fully_masked() {
        assert_eq!(redact_token("abc"), "***");
        assert_eq!(redact_token("abcdef"), "***");
        assert_eq!(redact_token("abcdefghijkl"), "***");
        assert_eq!(redact_token(""), "***");
    }

    #[test]
    fn test_redact_token_just_over_threshold() {
        assert_eq!(redact_token("abcdefghijklm"), "abcdef***");
    }
}
