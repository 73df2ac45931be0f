//! External text-completion oracle
//!
//! The pipeline only assumes "prompt in, text out"; all structure in the
//! response is recovered by the resolver.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

use crate::service::prompt::ANALYSIS_SYSTEM_PROMPT;

/// Environment variable for the analysis model (defaults to GPT-4O-mini)
const ENV_ANALYSIS_MODEL: &str = "ANALYSIS_MODEL";
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Default model for risk analysis
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Oracle configuration error: {0}")]
    Configuration(String),

    #[error("Oracle completion failed: {0}")]
    Completion(String),

    #[error("Oracle call timed out after {0}s")]
    Timeout(u64),
}

/// Text-completion oracle the pipeline consults once per analysis
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// OpenAI-backed oracle
pub struct OpenAiOracle {
    client: openai::Client,
    model: String,
}

impl OpenAiOracle {
    /// Create an oracle from `OPENAI_API_KEY` and optional `ANALYSIS_MODEL`
    pub fn from_env() -> Result<Self, OracleError> {
        let api_key = std::env::var(ENV_OPENAI_API_KEY).map_err(|_| {
            OracleError::Configuration(format!("{} is not set", ENV_OPENAI_API_KEY))
        })?;

        let client = openai::Client::new(&api_key);

        let model =
            std::env::var(ENV_ANALYSIS_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(model = %model, "Completion oracle initialized");

        Ok(Self { client, model })
    }
}

#[async_trait]
impl CompletionOracle for OpenAiOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let start_time = std::time::Instant::now();

        let agent = self
            .client
            .agent(&self.model)
            .preamble(ANALYSIS_SYSTEM_PROMPT)
            .build();

        match agent.prompt(prompt).await {
            Ok(response) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt.len(),
                    response_length = response.len(),
                    "Oracle completion succeeded"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt.len(),
                    error = %e,
                    "Oracle completion failed"
                );
                Err(OracleError::Completion(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_key_handling() {
        std::env::remove_var(ENV_ANALYSIS_MODEL);
        std::env::remove_var(ENV_OPENAI_API_KEY);

        assert!(matches!(
            OpenAiOracle::from_env(),
            Err(OracleError::Configuration(_))
        ));

        std::env::set_var(ENV_OPENAI_API_KEY, "test-key");
        let oracle = OpenAiOracle::from_env().unwrap();
        assert_eq!(oracle.model, DEFAULT_MODEL);
        std::env::remove_var(ENV_OPENAI_API_KEY);
    }
}
