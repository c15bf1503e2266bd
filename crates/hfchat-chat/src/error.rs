use thiserror::Error;

use hfchat_llm_api::ApiError;
use hfchat_models::ParamError;

pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    /// No bearer token could be resolved; raised before any network call
    #[error("no API token available ({0})")]
    CredentialMissing(String),

    /// The completion call failed or broke off mid-stream
    #[error(transparent)]
    StreamFailure(#[from] ApiError),

    #[error(transparent)]
    InvalidParameter(#[from] ParamError),
}
