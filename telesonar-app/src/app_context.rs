use crate::application::{FetchTrending, LookupCves, RunResearch};
use crate::config::AppConfig;
use crate::infrastructure::perplexity::PerplexityClient;
use crate::infrastructure::scraper::{CveCache, GithubTrendingScraper, NvdClient};
use crate::infrastructure::security::RateLimiter;
use crate::infrastructure::telegram::TelegramClient;
use std::sync::Arc;
use telesonar_errors::AppError;

#[derive(Clone)]
pub struct AppContext {
    pub telegram: Arc<TelegramClient>,
    pub run_research: Arc<RunResearch>,
    pub lookup_cves: Arc<LookupCves>,
    pub fetch_trending: Arc<FetchTrending>,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let perplexity = PerplexityClient::new(
            config.perplexity_api_key.clone(),
            config.perplexity_url.clone(),
            config.perplexity_model.clone(),
        );

        Ok(Self {
            telegram: Arc::new(TelegramClient::new(&config.telegram_bot_token)?),
            run_research: Arc::new(RunResearch::new(perplexity)),
            lookup_cves: Arc::new(LookupCves::new(
                NvdClient::new()?,
                CveCache::new(config.cve_cache_path.clone()),
            )),
            fetch_trending: Arc::new(FetchTrending::new(GithubTrendingScraper::new()?)),
            rate_limiter: RateLimiter::with_capacity(
                config.throttle_window,
                config.throttle_max_users,
            ),
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        tracing::info!(
            model = %config.perplexity_model,
            throttle_secs = config.throttle_window.as_secs_f64(),
            "Using Perplexity backend"
        );
        Self::new(&config)
    }
}
