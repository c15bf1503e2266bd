use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use hfchat_models::Message;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO‑8601 Local time
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<&'a str>,
}

/// Append-only JSONL transcript of a chat session.
///
/// Write-only: the file is never read back into a session.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger in `logs_dir`; the file name is based on the current local time.
    pub async fn new(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir)
            .await
            .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

        let now_local = Local::now();
        let filename = format!("hfchat-{}.jsonl", now_local.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .with_context(|| format!("Failed to open transcript {}", file_path.display()))?;

        Ok(Self { file_path, file: Some(file) })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append one message that was added to the session
    pub async fn log_message(&mut self, message: &Message, model: Option<&str>) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role: message.role().as_str(),
            content: message.content(),
            model,
            event: None,
        };
        self.write_entry(&entry).await;
    }

    /// Record a session-level event such as a reset or a failed turn
    pub async fn log_event(&mut self, event: &str, detail: &str) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role: "event",
            content: detail,
            model: None,
            event: Some(event),
        };
        self.write_entry(&entry).await;
    }

    async fn write_entry(&mut self, entry: &LogEntry<'_>) {
        let Some(file) = &mut self.file else {
            return;
        };

        match serde_json::to_string(entry) {
            Ok(mut json) => {
                json.push('\n');
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    log::warn!("transcript write to {} failed: {}", self.file_path.display(), e);
                } else {
                    let _ = file.flush().await;
                }
            }
            Err(e) => log::warn!("could not serialize transcript entry: {}", e),
        }
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            // Ensure data is flushed
            let _ = file.sync_all().await;
        }
    }
}
