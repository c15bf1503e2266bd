use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use hfchat_models::{Message, Role};

use super::commands::{parse_command, ReplCommand, HELP_TEXT};
use super::conversation::Conversation;
use super::output::TurnOutcome;
use super::setup::AppConfig;

/// Run interactive REPL mode
pub async fn run_repl_mode(config: AppConfig) -> Result<()> {
    let mut conversation = Conversation::from_config(&config).await;

    println!("{}", "🤖 hfchat - streaming chat with hosted models".bright_cyan().bold());
    println!("{}", format!("Model: {} • Endpoint: {}", conversation.model(), conversation.api_url()).bright_black());
    if let Some(path) = conversation.transcript_path() {
        println!("{}", format!("Transcript: {}", path.display()).bright_black());
    }
    println!("{}", "Type 'exit' or 'quit' to exit, or '/help' to see available commands\n".bright_black());

    let mut rl = DefaultEditor::new()?;

    loop {
        let model_indicator = format!("[{}]", conversation.model()).bright_magenta();
        let readline = rl.readline(&format!("{} {} ", model_indicator, "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let command = parse_command(&line);
                if command != ReplCommand::Empty {
                    rl.add_history_entry(line.trim())?;
                }

                match command {
                    ReplCommand::Empty => continue,
                    ReplCommand::Exit => {
                        println!("{}", "Goodbye!".bright_cyan());
                        break;
                    }
                    ReplCommand::Clear => {
                        conversation.reset().await;
                        println!("{} Conversation cleared", "🧹".bright_green());
                    }
                    ReplCommand::History => print_history(conversation.messages()),
                    ReplCommand::Settings => print_settings(&conversation),
                    ReplCommand::Set { name, value } => match conversation.set_param(name, &value) {
                        Ok(_) => println!("{} {} = {}", "🔧".bright_green(), name, value.trim()),
                        Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                    },
                    ReplCommand::About => print_about(),
                    ReplCommand::Help => {
                        println!("{} Commands:", "💡".bright_cyan());
                        println!("{}", HELP_TEXT);
                    }
                    ReplCommand::Invalid(message) => eprintln!("{} {}", "❌".bright_red(), message),
                    ReplCommand::Chat(text) => run_turn(&mut conversation, &text).await?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    // Graceful shutdown of logger (flush & close)
    conversation.shutdown().await;
    Ok(())
}

async fn run_turn(conversation: &mut Conversation, text: &str) -> Result<()> {
    let model_label = format!("[{}]", conversation.model()).bright_magenta();
    println!("{} {}", model_label, "🤔 Thinking...".bright_black());
    print!("{} ", "Assistant:".bright_blue().bold());

    let mut stdout = std::io::stdout();
    match conversation.send(text, &mut stdout).await? {
        TurnOutcome::Completed(_) => println!("\n"),
        TurnOutcome::Failed(e) => {
            println!();
            eprintln!("{} {}", "Error:".bright_red().bold(), e);
            if let Some(hint) = failure_hint(&e) {
                eprintln!("{}", hint.bright_black());
            }
            println!();
        }
    }
    Ok(())
}

fn failure_hint(error: &hfchat_chat::ChatError) -> Option<&'static str> {
    let hfchat_chat::ChatError::StreamFailure(api_error) = error else {
        return None;
    };

    if api_error.is_auth_failure() {
        Some("Check that HF_TOKEN is valid and allowed to call inference providers.")
    } else if api_error.is_rate_limited() {
        Some("Rate limited. Wait a moment before sending again.")
    } else {
        None
    }
}

fn print_history(messages: &[Message]) {
    if messages.is_empty() {
        println!("{} No messages yet", "ℹ️".bright_blue());
        return;
    }

    for message in messages {
        let label = match message.role() {
            Role::User => "You:".bright_green().bold(),
            Role::Assistant => "Assistant:".bright_blue().bold(),
        };
        println!("{} {}", label, message.content());
    }
    println!();
}

fn print_settings(conversation: &Conversation) {
    let params = conversation.params();
    println!("{} Settings:", "⚙️".bright_cyan());
    println!("  model        {}", conversation.model());
    println!("  endpoint     {}", conversation.api_url());
    println!("  temperature  {}", params.temperature());
    println!("  top_p        {}", params.top_p());
    println!("  max_tokens   {}", params.max_tokens());
    println!("  messages     {}", conversation.session().len());
}

fn print_about() {
    println!("{} hfchat {}", "🤖".bright_cyan(), env!("CARGO_PKG_VERSION"));
    println!("Streams replies from any OpenAI-compatible chat-completions endpoint,");
    println!("by default the Hugging Face inference router. The conversation lives");
    println!("in memory only and is gone when you exit.");
}
