pub mod credentials;

pub use credentials::{
    default_chain, default_secrets_paths, CredentialChain, CredentialSource, EnvSource,
    PromptSource, ResolvedCredential, SecretsFileSource, StaticSource, TOKEN_KEY,
};
