//! rig-core OpenAI integration.
//!
//! A single chat-completion call per commit with a fixed model and
//! temperature. No retry, rate limiting, or streaming; a failed call is
//! surfaced to the batch driver as-is.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use crate::constants::{ENV_API_KEY, MAX_TOKENS, OPENAI_MODEL, TEMPERATURE};
use crate::env::Env;

use super::{ChatProvider, ProviderError};

/// OpenAI-backed chat provider.
pub struct OpenAiProvider {
    api_key: String,
}

impl OpenAiProvider {
    /// Create a provider from the environment's API credential.
    pub fn from_env(env: &Env) -> Result<Self, ProviderError> {
        let api_key = env.var(ENV_API_KEY).map_err(|_| {
            ProviderError::NotConfigured(format!("{ENV_API_KEY} is not set"))
        })?;
        Self::new(api_key)
    }

    /// Create a provider with an explicit API key.
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "API key is empty".to_string(),
            ));
        }
        Ok(Self { api_key })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let client: providers::openai::CompletionsClient =
            providers::openai::CompletionsClient::builder()
                .api_key(&self.api_key)
                .build()
                .map_err(|e| {
                    ProviderError::ApiError(format!("failed to create OpenAI client: {e}"))
                })?;

        let agent = client
            .agent(OPENAI_MODEL)
            .preamble(crate::prompt::SYSTEM_PRIMER)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| ProviderError::ApiError(format!("OpenAI API error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_not_configured() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        match OpenAiProvider::from_env(&env) {
            Err(ProviderError::NotConfigured(msg)) => {
                assert!(msg.contains(ENV_API_KEY), "got: {msg}");
            }
            Err(e) => panic!("expected NotConfigured, got {e}"),
            Ok(_) => panic!("expected an error for a missing API key"),
        }
    }

    #[test]
    fn empty_api_key_is_not_configured() {
        assert!(OpenAiProvider::new("  ".to_string()).is_err());
    }

    #[test]
    fn api_key_from_env_is_accepted() {
        let env = Env::mock([(ENV_API_KEY, "sk-test")]);
        assert!(OpenAiProvider::from_env(&env).is_ok());
    }
}
