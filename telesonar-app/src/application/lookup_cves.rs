use super::formatting::{escape_html, truncate_chars};
use crate::domain::CveRecord;
use crate::infrastructure::scraper::{CveCache, NvdClient};
use chrono::Utc;
use telesonar_errors::AppError;

const DESCRIPTION_PREVIEW_CHARS: usize = 150;

pub struct LookupCves {
    nvd: NvdClient,
    cache: CveCache,
}

impl LookupCves {
    pub fn new(nvd: NvdClient, cache: CveCache) -> Self {
        Self { nvd, cache }
    }

    /// Serves fresh cached results, otherwise asks NVD and caches a non-empty answer.
    pub async fn execute(&self, keyword: &str) -> Result<Vec<CveRecord>, AppError> {
        if let Some(records) = self.cache.get(keyword, Utc::now()).await {
            tracing::info!("Returning cached results for '{}'", keyword);
            return Ok(records);
        }

        let records = self.nvd.search(keyword).await?;

        if !records.is_empty() {
            if let Err(e) = self.cache.put(keyword, records.clone(), Utc::now()).await {
                tracing::warn!("Could not cache results for '{}': {}", keyword, e);
            }
        }

        Ok(records)
    }

    pub fn format_reply(keyword: &str, records: &[CveRecord]) -> String {
        let keyword = escape_html(keyword);

        if records.is_empty() {
            return format!("No CVEs found for <code>{}</code>.", keyword);
        }

        let mut output = vec![format!(
            "🛡 <b>Top {} CVE Results for '{}'</b>\n",
            records.len(),
            keyword
        )];

        for record in records {
            output.push(format!(
                "🔹 <b><a href=\"{url}\">{id}</a></b>\n⚠️ Severity: {severity}\n{description}\n",
                url = escape_html(&record.url),
                id = escape_html(&record.id),
                severity = escape_html(&record.severity),
                description = escape_html(&truncate_chars(
                    &record.description,
                    DESCRIPTION_PREVIEW_CHARS
                )),
            ));
        }

        output.push("\n<i>Source: NVD (NIST)</i>".to_string());
        output.join("\n")
    }
}
