use anyhow::Result;
use std::io::Write;
use std::sync::Arc;

use hfchat_chat::{ChatError, ChatTurnDriver, Session};
use hfchat_llm_api::{HfInferenceClient, LlmClient};
use hfchat_logging::ConversationLogger;
use hfchat_models::{GenerationParams, Message, ParamName, Role};

use super::output::{print_fragments, TurnOutcome};
use super::setup::AppConfig;

/// Everything one interactive context owns: the session, the parameters in
/// effect for the next turn and the optional transcript.
pub struct Conversation {
    driver: ChatTurnDriver,
    session: Session,
    params: GenerationParams,
    api_url: String,
    logger: Option<ConversationLogger>,
}

impl Conversation {
    /// Build a conversation against the configured inference endpoint
    pub async fn from_config(config: &AppConfig) -> Self {
        let client: Arc<dyn LlmClient> = Arc::new(HfInferenceClient::new(config.client_config.clone()));

        let logger = match &config.log_dir {
            Some(dir) => match ConversationLogger::new(dir).await {
                Ok(logger) => {
                    log::info!("transcript: {}", logger.file_path().display());
                    Some(logger)
                }
                Err(e) => {
                    eprintln!("Transcript disabled: {:#}", e);
                    None
                }
            },
            None => None,
        };

        Self::new(client, config.params, config.client_config.api_url.clone(), logger)
    }

    pub fn new(
        client: Arc<dyn LlmClient>,
        params: GenerationParams,
        api_url: String,
        logger: Option<ConversationLogger>,
    ) -> Self {
        Self {
            driver: ChatTurnDriver::new(client),
            session: Session::new(),
            params,
            api_url,
            logger,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }

    pub fn model(&self) -> &str {
        self.driver.model()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn transcript_path(&self) -> Option<&std::path::Path> {
        self.logger.as_ref().map(|logger| logger.file_path())
    }

    /// Change one generation parameter; the session is untouched.
    ///
    /// A rejected value leaves the previous parameters in effect.
    pub fn set_param(&mut self, name: ParamName, raw: &str) -> Result<GenerationParams, ChatError> {
        self.params.set(name, raw)?;
        log::debug!("{} set to {}", name, raw.trim());
        Ok(self.params)
    }

    /// Run one turn, streaming the reply into `out`.
    ///
    /// Messages the turn appended are mirrored into the transcript, also when
    /// writing to `out` fails and the error is returned.
    pub async fn send<W: Write>(&mut self, text: &str, out: &mut W) -> Result<TurnOutcome> {
        let before = self.session.len();

        let printed = {
            let fragments = self.driver.submit_turn(&mut self.session, text, self.params);
            print_fragments(fragments, out).await
        };

        let failure = match &printed {
            Ok(TurnOutcome::Completed(_)) => None,
            Ok(TurnOutcome::Failed(e)) => Some(e.to_string()),
            Err(e) => Some(format!("output error: {}", e)),
        };
        self.mirror_to_transcript(before, failure.as_deref()).await;

        Ok(printed?)
    }

    async fn mirror_to_transcript(&mut self, from: usize, failure: Option<&str>) {
        let Some(logger) = &mut self.logger else {
            return;
        };

        let model = self.driver.model();
        for message in &self.session.messages()[from..] {
            let model = (message.role() == Role::Assistant).then_some(model);
            logger.log_message(message, model).await;
        }
        if let Some(detail) = failure {
            logger.log_event("turn_failed", detail).await;
        }
    }

    /// Drop all messages and start over
    pub async fn reset(&mut self) {
        let dropped = self.session.len();
        self.session.reset();
        if let Some(logger) = &mut self.logger {
            logger.log_event("reset", &format!("cleared {} messages", dropped)).await;
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub async fn shutdown(&mut self) {
        if let Some(logger) = &mut self.logger {
            logger.shutdown().await;
        }
    }
}
