use futures::{Stream, StreamExt};
use std::io::{self, Write};

use hfchat_chat::ChatError;

/// How a streamed turn ended
#[derive(Debug)]
pub enum TurnOutcome {
    /// The full reply, as appended to the session
    Completed(String),
    /// The turn failed; whatever was printed before the error is not in the session
    Failed(ChatError),
}

/// Write fragments to `out` as they arrive, flushing after each one
pub async fn print_fragments<S, W>(mut fragments: S, out: &mut W) -> io::Result<TurnOutcome>
where
    S: Stream<Item = Result<String, ChatError>> + Unpin,
    W: Write,
{
    let mut reply = String::new();

    while let Some(item) = fragments.next().await {
        match item {
            Ok(fragment) => {
                out.write_all(fragment.as_bytes())?;
                out.flush()?;
                reply.push_str(&fragment);
            }
            Err(e) => return Ok(TurnOutcome::Failed(e)),
        }
    }

    Ok(TurnOutcome::Completed(reply))
}
