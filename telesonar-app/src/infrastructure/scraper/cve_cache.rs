use crate::domain::CveRecord;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use telesonar_errors::AppError;
use tokio::sync::Mutex;

pub const CACHE_TTL_SECS: i64 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: DateTime<Utc>,
    pub data: Vec<CveRecord>,
}

/// JSON file mapping lower-cased search keywords to their last NVD results.
///
/// Stale entries are ignored on read and replaced on the next successful
/// fetch. Nothing is ever removed.
pub struct CveCache {
    path: PathBuf,
    ttl: Duration,
    write_lock: Mutex<()>,
}

impl CveCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: Duration::seconds(CACHE_TTL_SECS),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh results for `keyword`, if any.
    pub async fn get(&self, keyword: &str, now: DateTime<Utc>) -> Option<Vec<CveRecord>> {
        let mut entries = self.load().await;
        let entry = entries.remove(&Self::key(keyword))?;

        if now - entry.timestamp < self.ttl {
            Some(entry.data)
        } else {
            None
        }
    }

    pub async fn put(
        &self,
        keyword: &str,
        data: Vec<CveRecord>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await;
        entries.insert(Self::key(keyword), CacheEntry { timestamp: now, data });

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::CacheError(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(&entries)
            .map_err(|e| AppError::CacheError(e.to_string()))?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            tracing::error!("Error saving cache {}: {}", self.path.display(), e);
            AppError::CacheError(e.to_string())
        })
    }

    async fn load(&self) -> HashMap<String, CacheEntry> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::error!("Error loading cache {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::error!("Corrupt cache {}: {}", self.path.display(), e);
            HashMap::new()
        })
    }

    fn key(keyword: &str) -> String {
        keyword.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CveRecord {
        CveRecord::new(id.to_string()).with_severity(Some("9.8 (CRITICAL)".to_string()))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CveCache::new(dir.path().join("cve_cache.json"));
        assert!(cache.get("apache", Utc::now()).await.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CveCache::new(dir.path().join("nested/data/cve_cache.json"));
        let now = Utc::now();

        cache.put("Apache", vec![record("CVE-1")], now).await.unwrap();

        let hit = cache.get("APACHE", now + Duration::hours(1)).await.unwrap();
        assert_eq!(hit, vec![record("CVE-1")]);
        assert!(cache.path().exists());
    }

    #[tokio::test]
    async fn test_stale_entry_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CveCache::new(dir.path().join("cve_cache.json"));
        let then = Utc::now();

        cache.put("nginx", vec![record("CVE-2")], then).await.unwrap();

        let later = then + Duration::seconds(CACHE_TTL_SECS);
        assert!(cache.get("nginx", later).await.is_none());
        assert!(cache.get("nginx", later - Duration::seconds(1)).await.is_some());
    }

    #[tokio::test]
    async fn test_entries_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CveCache::new(dir.path().join("cve_cache.json"));
        let now = Utc::now();

        cache.put("a", vec![record("CVE-A")], now).await.unwrap();
        cache.put("b", vec![record("CVE-B")], now).await.unwrap();

        assert!(cache.get("a", now).await.is_some());
        assert!(cache.get("b", now).await.is_some());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cve_cache.json");
        std::fs::write(&path, b"{not json").unwrap();

        let cache = CveCache::new(&path);
        assert!(cache.get("a", Utc::now()).await.is_none());

        cache.put("a", vec![record("CVE-A")], Utc::now()).await.unwrap();
        assert!(cache.get("a", Utc::now()).await.is_some());
    }
}
