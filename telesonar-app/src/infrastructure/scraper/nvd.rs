use crate::domain::CveRecord;
use serde::Deserialize;
use std::time::Duration;
use telesonar_errors::AppError;

const NVD_API_URL: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";
const USER_AGENT: &str = "TeleSonarBot/1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const MAX_RESULTS: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct NvdResponse {
    #[serde(default)]
    pub vulnerabilities: Vec<NvdVulnerability>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdVulnerability {
    #[serde(default)]
    pub cve: NvdCve,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdCve {
    pub id: Option<String>,
    #[serde(default)]
    pub descriptions: Vec<NvdDescription>,
    #[serde(default)]
    pub metrics: NvdMetrics,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdDescription {
    pub lang: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvdMetrics {
    #[serde(default)]
    pub cvss_metric_v31: Vec<NvdMetric>,
    #[serde(default)]
    pub cvss_metric_v30: Vec<NvdMetric>,
    #[serde(default)]
    pub cvss_metric_v2: Vec<NvdMetric>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvdMetric {
    #[serde(default)]
    pub cvss_data: NvdCvssData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvdCvssData {
    pub base_score: Option<f64>,
    pub base_severity: Option<String>,
}

pub struct NvdClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl NvdClient {
    pub fn new() -> Result<Self, AppError> {
        Self::with_api_url(NVD_API_URL)
    }

    pub fn with_api_url(api_url: &str) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: api_url.to_string(),
        })
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<CveRecord>, AppError> {
        let results_per_page = MAX_RESULTS.to_string();
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("keywordSearch", keyword),
                ("resultsPerPage", results_per_page.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!("NVD API timeout");
                    AppError::Timeout
                } else {
                    tracing::error!("NVD API error: {}", e);
                    AppError::ScrapingFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::error!("NVD API rate limit hit");
            return Err(AppError::RateLimited("NVD".to_string()));
        }

        if !status.is_success() {
            tracing::error!("NVD API returned {}", status);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let body: NvdResponse = response
            .json()
            .await
            .map_err(|e| AppError::ScrapingFailed(format!("Invalid NVD response: {}", e)))?;

        Ok(Self::extract_records(body))
    }

    pub fn extract_records(response: NvdResponse) -> Vec<CveRecord> {
        response
            .vulnerabilities
            .into_iter()
            .take(MAX_RESULTS)
            .map(|vuln| Self::to_record(vuln.cve))
            .collect()
    }

    fn to_record(cve: NvdCve) -> CveRecord {
        let id = cve.id.unwrap_or_else(|| "Unknown".to_string());

        let description = cve
            .descriptions
            .into_iter()
            .find(|d| d.lang.as_deref() == Some("en"))
            .and_then(|d| d.value);

        let metrics = cve.metrics;
        let severity = [
            metrics.cvss_metric_v31,
            metrics.cvss_metric_v30,
            metrics.cvss_metric_v2,
        ]
        .into_iter()
        .find_map(|list| list.into_iter().next())
        .map(|metric| Self::format_severity(metric.cvss_data));

        CveRecord::new(id)
            .with_description(description)
            .with_severity(severity)
    }

    fn format_severity(data: NvdCvssData) -> String {
        let score = data
            .base_score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "N/A".to_string());

        match data.base_severity.filter(|s| !s.is_empty()) {
            Some(severity) => format!("{} ({})", score, severity),
            None => score,
        }
    }
}
