use super::prompt::system_prompt;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::domain::ResearchCommand;
use crate::infrastructure::security::ResponseSanitizer;
use telesonar_errors::AppError;

pub const DEFAULT_API_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";

pub struct PerplexityClient {
    http_client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl PerplexityClient {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
        }
    }

    pub async fn research(
        &self,
        command: ResearchCommand,
        user_text: &str,
    ) -> Result<String, AppError> {
        self.query(user_text, system_prompt(command)).await
    }

    /// Sends one system + user exchange and returns the sanitized answer.
    pub async fn query(&self, user_text: &str, system_prompt: &str) -> Result<String, AppError> {
        let request = ChatCompletionRequest::new(&self.model, system_prompt, user_text);

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Exception during Perplexity call: {}", e);
                AppError::PerplexityError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Perplexity API error: {} - {}", status, body);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::PerplexityError(e.to_string()))?;

        let content = completion
            .into_first_content()
            .ok_or_else(|| AppError::PerplexityError("No response from AI".to_string()))?;

        Ok(ResponseSanitizer::sanitize(&content))
    }
}
