use crate::domain::{TrendingPeriod, TrendingRepo};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use telesonar_errors::AppError;
use url::Url;

const GITHUB_URL: &str = "https://github.com";
const GITHUB_TRENDING_URL: &str = "https://github.com/trending";
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 15;
const MAX_REPOS: usize = 25;
const MAX_DESCRIPTION_CHARS: usize = 200;

pub struct GithubTrendingScraper {
    http_client: reqwest::Client,
    base_url: String,
}

impl GithubTrendingScraper {
    pub fn new() -> Result<Self, AppError> {
        Self::with_base_url(GITHUB_TRENDING_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn trending_url(
        &self,
        language: Option<&str>,
        period: TrendingPeriod,
    ) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Internal(format!("Invalid trending URL: {}", e)))?;

        if let Some(language) = language {
            let path = format!(
                "{}/{}",
                url.path().trim_end_matches('/'),
                urlencoding::encode(&language.to_lowercase())
            );
            url.set_path(&path);
        }

        url.query_pairs_mut().append_pair("since", period.as_str());
        Ok(url)
    }

    pub async fn scrape(
        &self,
        language: Option<&str>,
        period: TrendingPeriod,
    ) -> Result<Vec<TrendingRepo>, AppError> {
        let url = self.trending_url(language, period)?;

        let response = self
            .http_client
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("GitHub scraping error: {}", e);
                AppError::ScrapingFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("GitHub returned {}", status);
            return Err(AppError::ScrapingFailed(format!("HTTP {}", status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::ScrapingFailed(e.to_string()))?;

        let repos = Self::parse_html(&html);
        if repos.is_empty() {
            tracing::warn!("No repos found. HTML length: {}", html.len());
        }
        Ok(repos)
    }

    pub fn parse_html(html: &str) -> Vec<TrendingRepo> {
        let document = Html::parse_document(html);
        let Some(row_selector) = selector("article.Box-row") else {
            return Vec::new();
        };

        let mut repos = Vec::new();
        for row in document.select(&row_selector).take(MAX_REPOS) {
            match Self::parse_row(row, repos.len() + 1) {
                Some(repo) => repos.push(repo),
                None => tracing::debug!("Skipping trending row without a repository link"),
            }
        }
        repos
    }

    fn parse_row(row: ElementRef<'_>, rank: usize) -> Option<TrendingRepo> {
        let link = first(row, "h2.h3 a")?;
        let full_name = link.value().attr("href")?.trim_matches('/').to_string();
        if full_name.is_empty() {
            return None;
        }

        let description: String = first(row, "p.col-9")
            .map(stripped_text)
            .unwrap_or_default()
            .chars()
            .take(MAX_DESCRIPTION_CHARS)
            .collect();

        let language = first(row, "span[itemprop='programmingLanguage']")
            .map(stripped_text)
            .unwrap_or_else(|| "N/A".to_string());

        let stars = first(row, "a[href$='/stargazers']")
            .map(|el| stripped_text(el).replace(',', ""))
            .unwrap_or_else(|| "0".to_string());

        let forks = first(row, "a[href$='/forks']")
            .map(|el| stripped_text(el).replace(',', ""))
            .unwrap_or_else(|| "0".to_string());

        let stars_period = first(row, "span.d-inline-block.float-sm-right")
            .map(stripped_text)
            .unwrap_or_else(|| "N/A".to_string());

        Some(TrendingRepo {
            rank,
            url: format!("{}/{}", GITHUB_URL, full_name),
            name: full_name,
            description,
            language,
            stars,
            forks,
            stars_period,
        })
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn first<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    element.select(&selector).next()
}

/// Text nodes trimmed one by one and joined without separators.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html><body>
      <article class="Box-row">
        <h2 class="h3 lh-condensed">
          <a href="/rust-lang/rust">
            <span class="text-normal">rust-lang /</span>
            rust
          </a>
        </h2>
        <p class="col-9 color-fg-muted my-1 pr-4">
          Empowering everyone to build reliable and efficient software.
        </p>
        <div>
          <span itemprop="programmingLanguage">Rust</span>
          <a href="/rust-lang/rust/stargazers">
            101,234
          </a>
          <a href="/rust-lang/rust/forks">13,001</a>
          <span class="d-inline-block float-sm-right">
            120 stars today
          </span>
        </div>
      </article>
      <article class="Box-row">
        <h2 class="h3"><span>no link here</span></h2>
      </article>
      <article class="Box-row">
        <h2 class="h3"><a href="/someone/tiny">someone / tiny</a></h2>
      </article>
    </body></html>
    "#;

    #[test]
    fn test_parse_rows() {
        let repos = GithubTrendingScraper::parse_html(PAGE);
        assert_eq!(repos.len(), 2);

        let rust = &repos[0];
        assert_eq!(rust.rank, 1);
        assert_eq!(rust.name, "rust-lang/rust");
        assert_eq!(rust.url, "https://github.com/rust-lang/rust");
        assert_eq!(
            rust.description,
            "Empowering everyone to build reliable and efficient software."
        );
        assert_eq!(rust.language, "Rust");
        assert_eq!(rust.stars, "101234");
        assert_eq!(rust.forks, "13001");
        assert_eq!(rust.stars_period, "120 stars today");

        let tiny = &repos[1];
        assert_eq!(tiny.rank, 2);
        assert_eq!(tiny.description, "");
        assert_eq!(tiny.language, "N/A");
        assert_eq!(tiny.stars, "0");
        assert_eq!(tiny.forks, "0");
        assert_eq!(tiny.stars_period, "N/A");
    }

    #[test]
    fn test_parse_page_without_rows() {
        assert!(GithubTrendingScraper::parse_html("<html><body>rate limited</body></html>").is_empty());
    }

    #[test]
    fn test_trending_url() {
        let scraper = GithubTrendingScraper::new().unwrap();

        let all = scraper.trending_url(None, TrendingPeriod::Daily).unwrap();
        assert_eq!(all.as_str(), "https://github.com/trending?since=daily");

        let rust = scraper
            .trending_url(Some("Rust"), TrendingPeriod::Weekly)
            .unwrap();
        assert_eq!(rust.as_str(), "https://github.com/trending/rust?since=weekly");

        let cpp = scraper
            .trending_url(Some("c++"), TrendingPeriod::Monthly)
            .unwrap();
        assert_eq!(
            cpp.as_str(),
            "https://github.com/trending/c%2B%2B?since=monthly"
        );
    }
}
