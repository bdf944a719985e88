mod csv_export;
mod cve_cache;
mod github_trending;
mod nvd;

pub use csv_export::trending_to_csv;
pub use cve_cache::{CacheEntry, CveCache, CACHE_TTL_SECS};
pub use github_trending::GithubTrendingScraper;
pub use nvd::{NvdClient, NvdResponse, MAX_RESULTS};
