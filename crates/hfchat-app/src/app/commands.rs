use hfchat_models::ParamName;

/// One line of REPL input, classified
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Reset the session
    Clear,
    History,
    Settings,
    Set { name: ParamName, value: String },
    About,
    Help,
    /// Nothing to do (blank line)
    Empty,
    /// A command we could not understand, with a hint for the user
    Invalid(String),
    /// Text to send to the model
    Chat(String),
}

/// Classify a line of input.
///
/// Lines starting with `//` are sent as chat with one slash removed, so a
/// message can begin with a slash.
pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();

    if line.is_empty() {
        return ReplCommand::Empty;
    }

    if line == "exit" || line == "quit" {
        return ReplCommand::Exit;
    }

    if let Some(escaped) = line.strip_prefix("//") {
        return ReplCommand::Chat(format!("/{}", escaped));
    }

    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Chat(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("clear" | "reset", []) => ReplCommand::Clear,
        ("history", []) => ReplCommand::History,
        ("settings", []) => ReplCommand::Settings,
        ("about", []) => ReplCommand::About,
        ("help" | "?", []) => ReplCommand::Help,
        ("exit" | "quit", []) => ReplCommand::Exit,
        ("set", [param, value]) => match param.parse::<ParamName>() {
            Ok(name) => ReplCommand::Set {
                name,
                value: value.to_string(),
            },
            Err(e) => ReplCommand::Invalid(e.to_string()),
        },
        ("set", _) => ReplCommand::Invalid("Usage: /set <temperature|top_p|max_tokens> <value>".to_string()),
        _ => ReplCommand::Invalid(format!("Unknown command '/{}'. Type /help for a list of commands.", name)),
    }
}

pub const HELP_TEXT: &str = "\
  /clear                  - Start a new conversation
  /history                - Show the conversation so far
  /settings               - Show model, endpoint and generation parameters
  /set <param> <value>    - Change temperature, top_p or max_tokens
  /about                  - About this client
  /help                   - Show this help
  exit | quit             - Leave
  //text                  - Send a message that starts with '/'";
