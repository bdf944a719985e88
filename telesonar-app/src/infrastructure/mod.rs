pub mod perplexity;
pub mod scraper;
pub mod security;
pub mod telegram;
