use super::formatting::{escape_html, truncate_chars};
use crate::domain::{TrendingPeriod, TrendingRepo};
use crate::infrastructure::scraper::{trending_to_csv, GithubTrendingScraper};
use telesonar_errors::AppError;

const PREVIEW_REPOS: usize = 5;
const PREVIEW_DESCRIPTION_CHARS: usize = 80;
const RULE: &str = "────────────────────";

/// Scraped trending page, packaged for a document reply.
#[derive(Debug, Clone)]
pub struct TrendingReport {
    pub repos: Vec<TrendingRepo>,
    pub filename: String,
    pub csv: Vec<u8>,
    pub caption: String,
}

pub struct FetchTrending {
    scraper: GithubTrendingScraper,
}

impl FetchTrending {
    pub fn new(scraper: GithubTrendingScraper) -> Self {
        Self { scraper }
    }

    pub async fn execute(
        &self,
        language: Option<&str>,
        period: TrendingPeriod,
    ) -> Result<TrendingReport, AppError> {
        let repos = self.scraper.scrape(language, period).await?;
        Ok(Self::build_report(language, period, repos))
    }

    pub fn language_label(language: Option<&str>) -> String {
        match language {
            Some(lang) => capitalize(lang),
            None => "All Languages".to_string(),
        }
    }

    pub fn build_report(
        language: Option<&str>,
        period: TrendingPeriod,
        repos: Vec<TrendingRepo>,
    ) -> TrendingReport {
        let filename = format!(
            "github_trending_{}_{}.csv",
            language.map(str::to_lowercase).unwrap_or_else(|| "all".to_string()),
            period
        );

        let mut caption = format!(
            "🚀 <b>GitHub Trending</b>\n<i>{} • {}</i>\n{}\n",
            escape_html(&Self::language_label(language)),
            period.label(),
            RULE
        );

        for repo in repos.iter().take(PREVIEW_REPOS) {
            caption.push_str(&format!(
                "<b>#{}</b> <a href=\"{}\">{}</a>\n    ⭐ {}  •  🍴 {}  •  {}\n    <i>{}</i>\n\n",
                repo.rank,
                escape_html(&repo.url),
                escape_html(&repo.name),
                escape_html(&repo.stars),
                escape_html(&repo.forks),
                escape_html(&repo.language),
                escape_html(&truncate_chars(&repo.description, PREVIEW_DESCRIPTION_CHARS)),
            ));
        }

        caption.push_str(&format!(
            "{}\n📎 <b>{} repos</b> attached as CSV",
            RULE,
            repos.len()
        ));

        TrendingReport {
            csv: trending_to_csv(&repos),
            repos,
            filename,
            caption,
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
