use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Telegram API error: {0}")]
    TelegramError(String),

    #[error("Failed to reach Perplexity: {0}")]
    PerplexityError(String),

    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Scraping failed: {0}")]
    ScrapingFailed(String),

    #[error("Upstream rate limit hit: {0}")]
    RateLimited(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text that is safe to send back to the chat in HTML parse mode.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) => "⚠️ The bot is misconfigured. Please contact the operator.".to_string(),
            Self::TelegramError(_) => "⚠️ Failed to deliver the message.".to_string(),
            Self::PerplexityError(_) => {
                "⚠️ A network error occurred while contacting the AI service.".to_string()
            }
            Self::UpstreamStatus(status) => {
                format!("⚠️ API Error: {}. Please try again later.", status)
            }
            Self::ScrapingFailed(_) => {
                "❌ <b>Error</b>: Could not reach the data source. Try again later.".to_string()
            }
            Self::RateLimited(_) => {
                "⏳ The data source is rate limiting us. Try again in a minute.".to_string()
            }
            Self::Timeout => "⌛ The request took too long. Try again later.".to_string(),
            Self::CacheError(_) | Self::Internal(_) => {
                "⚠️ Something went wrong on our side. Try again later.".to_string()
            }
        }
    }
}
