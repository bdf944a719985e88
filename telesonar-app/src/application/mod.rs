mod fetch_trending;
mod formatting;
mod lookup_cves;
mod run_research;

pub use fetch_trending::{FetchTrending, TrendingReport};
pub use formatting::{escape_html, truncate_chars};
pub use lookup_cves::LookupCves;
pub use run_research::RunResearch;
