use telesonar_app::application::escape_html;

pub const WELCOME: &str = "<b>AI Intelligence Unit</b>\n\
I execute real-time research using the <b>Perplexity Sonar</b> engine.\n\n\
<b>📁 Capabilities</b>\n\n\
🔹 <code>/factcheck</code> — <b>Fact Verification</b>\n\
Validates statements against authoritative sources.\n\
<i>Usage: Reply or /factcheck [statement]</i>\n\n\
🔹 <code>/cve</code> — <b>Vulnerability Scanner</b>\n\
Retrieves severity, exploits, and mitigation strategies.\n\
<i>Usage: /cve [CVE-ID] or [Tech Name]</i>\n\n\
🔹 <code>/osint</code> — <b>Corporate Profiling</b>\n\
Generates dossiers on leadership, tech stack, and news.\n\
<i>Usage: /osint [Company Name]</i>\n\n\
🔹 <code>/nvd</code> — <b>NVD Search</b>\n\
Top CVE entries straight from the NIST database.\n\
<i>Usage: /nvd [keyword]</i>\n\n\
🔹 <code>/trending</code> — <b>GitHub Trending</b>\n\
Today's trending repositories as a CSV file.\n\
<i>Usage: /trending [language] [daily|weekly|monthly]</i>";

pub const NVD_USAGE: &str =
    "⚠️ <b>Usage:</b> <code>/nvd &lt;keyword&gt;</code>\nExample: <code>/nvd apache</code>";

pub const NVD_STATUS: &str = "🔍 <i>Searching NVD database...</i>";

pub fn trending_status(language_label: &str, period_label: &str) -> String {
    format!(
        "🔍 <i>Scraping GitHub Trending...</i>\n📊 {} | {}",
        escape_html(language_label),
        period_label
    )
}

pub fn trending_empty(language: Option<&str>) -> String {
    format!(
        "No trending repos found for <code>{}</code>.\nTry a different language or check the spelling.",
        escape_html(language.unwrap_or("all"))
    )
}
