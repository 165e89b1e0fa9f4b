//! GeminiExchangeClient -- concrete [`ExchangeClient`] for the Gemini API.
//!
//! Sends one `streamGenerateContent?alt=sse` request per user message and
//! folds the streamed chunks into a single reply string.
//!
//! The API key is wrapped in [`secrecy::SecretString`], sent only in the
//! `x-goog-api-key` header, and never logged or placed in the URL.

use personachat_core::exchange::{ExchangeClient, compose_prompt};
use personachat_types::config::ExchangeConfig;
use personachat_types::error::ExchangeError;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use super::sse::collect_text;
use super::types::GenerateContentRequest;

/// Gemini streaming exchange client.
///
/// Requests run until the stream completes or the transport fails; there is
/// no retry and no request timeout.
pub struct GeminiExchangeClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    error_fallback: String,
    empty_fallback: String,
}

impl GeminiExchangeClient {
    /// Create a client from the exchange settings and a resolved API key.
    pub fn new(config: &ExchangeConfig, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            error_fallback: config.error_fallback.clone(),
            empty_fallback: config.empty_fallback.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the streaming endpoint.
    fn url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }

    /// Run one exchange, reporting every failure as an [`ExchangeError`].
    ///
    /// A stream that completes without any text yields [`ExchangeError::Empty`].
    pub async fn generate(&self, prompt: &str, persona: &str) -> Result<String, ExchangeError> {
        let body = GenerateContentRequest::from_text(compose_prompt(persona, prompt));

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            persona_len = persona.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = collect_text(response.bytes_stream()).await?;
        if text.is_empty() {
            return Err(ExchangeError::Empty);
        }

        debug!(model = %self.model, reply_len = text.len(), "Gemini stream complete");
        Ok(text)
    }
}

impl ExchangeClient for GeminiExchangeClient {
    async fn reply(&self, prompt: &str, persona: &str) -> String {
        match self.generate(prompt, persona).await {
            Ok(text) => text,
            Err(ExchangeError::Empty) => {
                warn!(model = %self.model, "Gemini returned no text, using fallback reply");
                self.empty_fallback.clone()
            }
            Err(e) => {
                warn!(model = %self.model, error = %e, "Gemini exchange failed, using fallback reply");
                self.error_fallback.clone()
            }
        }
    }
}
