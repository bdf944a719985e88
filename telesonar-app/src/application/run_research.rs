use crate::domain::ResearchCommand;
use crate::infrastructure::perplexity::PerplexityClient;
use telesonar_errors::AppError;

pub struct RunResearch {
    client: PerplexityClient,
}

impl RunResearch {
    pub fn new(client: PerplexityClient) -> Self {
        Self { client }
    }

    /// Returns the sanitized answer, ready to send in HTML mode.
    pub async fn execute(&self, command: ResearchCommand, input: &str) -> Result<String, AppError> {
        tracing::info!(command = command.name(), "Running research query");
        let answer = self.client.research(command, input).await?;

        if answer.is_empty() {
            return Err(AppError::PerplexityError("Empty answer".to_string()));
        }
        Ok(answer)
    }
}
