use crate::infrastructure::perplexity::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::infrastructure::security::DEFAULT_MAX_TRACKED;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use telesonar_errors::AppError;

const DEFAULT_THROTTLE_SECONDS: f64 = 5.0;
const MAX_THROTTLE_SECONDS: f64 = 86_400.0;
const DEFAULT_CVE_CACHE_PATH: &str = "data/cve_cache.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub perplexity_api_key: String,
    pub perplexity_url: String,
    pub perplexity_model: String,
    pub throttle_window: Duration,
    pub throttle_max_users: usize,
    pub cve_cache_path: PathBuf,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let throttle_seconds: f64 = parse_or(
            get("THROTTLE_SECONDS"),
            "THROTTLE_SECONDS",
            DEFAULT_THROTTLE_SECONDS,
        )?;
        let throttle_window = Some(throttle_seconds)
            .filter(|secs| *secs <= MAX_THROTTLE_SECONDS)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "THROTTLE_SECONDS must be a positive number up to {}, got {}",
                    MAX_THROTTLE_SECONDS, throttle_seconds
                ))
            })?;

        let throttle_max_users =
            parse_or(get("THROTTLE_MAX_USERS"), "THROTTLE_MAX_USERS", DEFAULT_MAX_TRACKED)?;
        if throttle_max_users == 0 {
            return Err(AppError::Config("THROTTLE_MAX_USERS must be at least 1".to_string()));
        }

        Ok(Self {
            telegram_bot_token: require("TELEGRAM_BOT_TOKEN")?,
            perplexity_api_key: require("PERPLEXITY_API_KEY")?,
            perplexity_url: get("PERPLEXITY_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            perplexity_model: get("PERPLEXITY_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            throttle_window,
            throttle_max_users,
            cve_cache_path: get("CVE_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CVE_CACHE_PATH)),
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", key, value))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ("PERPLEXITY_API_KEY", "pplx-key"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();
        assert_eq!(config.telegram_bot_token, "123:abc");
        assert_eq!(config.perplexity_model, "sonar");
        assert_eq!(
            config.perplexity_url,
            "https://api.perplexity.ai/chat/completions"
        );
        assert_eq!(config.throttle_window, Duration::from_secs(5));
        assert_eq!(config.throttle_max_users, 10_000);
        assert_eq!(config.cve_cache_path, PathBuf::from("data/cve_cache.json"));
    }

    #[test]
    fn test_missing_token() {
        let err = AppConfig::from_lookup(lookup(&[("PERPLEXITY_API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("TELEGRAM_BOT_TOKEN")));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("PERPLEXITY_API_KEY", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("PERPLEXITY_API_KEY")));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("THROTTLE_SECONDS", "2.5"),
            ("THROTTLE_MAX_USERS", "50"),
            ("PERPLEXITY_MODEL", "sonar-pro"),
            ("CVE_CACHE_PATH", "/tmp/cves.json"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.throttle_window, Duration::from_millis(2500));
        assert_eq!(config.throttle_max_users, 50);
        assert_eq!(config.perplexity_model, "sonar-pro");
        assert_eq!(config.cve_cache_path, PathBuf::from("/tmp/cves.json"));
    }

    #[test]
    fn test_invalid_throttle() {
        for bad in ["fast", "0", "-1", "NaN", "inf", "1e19", "86400.5"] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push(("THROTTLE_SECONDS", bad));
            assert!(
                AppConfig::from_lookup(lookup(&pairs)).is_err(),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_throttle_upper_bound_is_inclusive() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("THROTTLE_SECONDS", "86400"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.throttle_window, Duration::from_secs(86_400));
    }
}
