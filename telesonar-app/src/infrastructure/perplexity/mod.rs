mod client;
mod prompt;
mod types;

pub use client::{PerplexityClient, DEFAULT_API_URL, DEFAULT_MODEL};
pub use prompt::system_prompt;
pub use types::{ChatCompletionRequest, ChatCompletionResponse};
