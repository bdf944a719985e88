use serde::{Deserialize, Serialize};

/// Commands answered by the search-backed LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResearchCommand {
    FactCheck,
    Cve,
    Osint,
}

impl ResearchCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FactCheck => "factcheck",
            Self::Cve => "cve",
            Self::Osint => "osint",
        }
    }

    /// Placeholder shown in the usage hint, already HTML-escaped.
    pub fn argument_hint(&self) -> &'static str {
        match self {
            Self::FactCheck => "&lt;claim to verify&gt;",
            Self::Cve => "&lt;CVE-ID or Technology Name&gt;",
            Self::Osint => "&lt;Company Name&gt;",
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            Self::FactCheck => "🔎 <i>Verifying facts...</i>",
            Self::Cve => "🛡️ <i>Scanning vulnerability database...</i>",
            Self::Osint => "🕵️‍♂️ <i>Gathering intelligence...</i>",
        }
    }

    pub fn usage_text(&self) -> String {
        format!(
            "ℹ️ <b>Usage:</b>\n\
             1. Reply to a message with <code>/{name}</code>\n\
             2. Or type <code>/{name} {hint}</code>",
            name = self.name(),
            hint = self.argument_hint()
        )
    }
}
