use serde::{Deserialize, Serialize};

const NVD_DETAIL_URL: &str = "https://nvd.nist.gov/vuln/detail";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CveRecord {
    pub id: String,
    pub description: String,
    pub severity: String,
    pub url: String,
}

impl CveRecord {
    pub fn new(id: String) -> Self {
        let url = format!("{}/{}", NVD_DETAIL_URL, id);
        Self {
            id,
            description: "No description available".to_string(),
            severity: "N/A".to_string(),
            url,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        if let Some(description) = description {
            self.description = description;
        }
        self
    }

    pub fn with_severity(mut self, severity: Option<String>) -> Self {
        if let Some(severity) = severity {
            self.severity = severity;
        }
        self
    }
}
