//! Reduces raw LLM output to the inline markup Telegram's HTML mode accepts.
//!
//! The pipeline is a fixed, ordered list of pure steps. Later steps assume the
//! earlier removals already happened, so the order in [`STEPS`] matters.

use regex_lite::Regex;
use std::sync::LazyLock;

const CONTAINER_TAGS: &[&str] = &[
    "div", "span", "section", "article", "header", "footer", "main", "nav", "h1", "h2", "h3",
    "h4", "h5", "h6", "ul", "ol", "li",
];

const LINE_BREAK_TAGS: &[&str] = &["<br>", "<br/>", "<br />"];

static DOCTYPE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^\s*<!DOCTYPE html>"));
static HTML_OPEN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<html.*?>"));
static HTML_CLOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)</html>"));
static BODY_OPEN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<body.*?>"));
static BODY_CLOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)</body>"));
static HEAD_SECTION: LazyLock<Regex> = LazyLock::new(|| compile(r"(?is)<head.*?>.*?</head>"));
static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)</?p>"));
static CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)</?(?:{})\b[^>]*>",
        CONTAINER_TAGS.join("|")
    ))
});
static BOLD: LazyLock<Regex> = LazyLock::new(|| compile(r"\*\*(.*?)\*\*"));
static UNDERLINE: LazyLock<Regex> = LazyLock::new(|| compile(r"__(.*?)__"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"\n{3,}"));

fn compile(pattern: &str) -> Regex {
    // Every pattern is a literal in this file.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid sanitizer pattern {pattern:?}: {e}"))
}

/// One pipeline step.
pub type Step = fn(&str) -> String;

/// The sanitizer pipeline, in application order.
pub const STEPS: &[(&str, Step)] = &[
    ("strip_doctype", strip_doctype),
    ("strip_document_wrappers", strip_document_wrappers),
    ("paragraphs_to_newlines", paragraphs_to_newlines),
    ("strip_container_tags", strip_container_tags),
    ("normalize_line_breaks", normalize_line_breaks),
    ("markdown_emphasis_to_tags", markdown_emphasis_to_tags),
    ("strip_code_fences", strip_code_fences),
    ("strip_html_prefix", strip_html_prefix),
    ("collapse_blank_lines", collapse_blank_lines),
    ("trim", trim),
];

pub struct ResponseSanitizer;

impl ResponseSanitizer {
    /// Runs every step of [`STEPS`] in order. Never fails.
    pub fn sanitize(raw: &str) -> String {
        STEPS
            .iter()
            .fold(raw.to_string(), |text, (_, step)| step(&text))
    }
}

pub fn strip_doctype(text: &str) -> String {
    DOCTYPE.replace(text, "").into_owned()
}

pub fn strip_document_wrappers(text: &str) -> String {
    [&*HTML_OPEN, &*HTML_CLOSE, &*BODY_OPEN, &*BODY_CLOSE, &*HEAD_SECTION]
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

pub fn paragraphs_to_newlines(text: &str) -> String {
    PARAGRAPH.replace_all(text, "\n").into_owned()
}

pub fn strip_container_tags(text: &str) -> String {
    CONTAINER.replace_all(text, "").into_owned()
}

pub fn normalize_line_breaks(text: &str) -> String {
    LINE_BREAK_TAGS
        .iter()
        .fold(text.to_string(), |acc, tag| acc.replace(tag, "\n"))
}

/// `**x**` becomes `<b>x</b>`, then `__x__` becomes `<u>x</u>`.
///
/// Matching is non-greedy and unguarded: an odd number of delimiters leaves
/// the last one in place.
pub fn markdown_emphasis_to_tags(text: &str) -> String {
    let bold = BOLD.replace_all(text, "<b>$1</b>");
    UNDERLINE.replace_all(&bold, "<u>$1</u>").into_owned()
}

pub fn strip_code_fences(text: &str) -> String {
    text.replace("```html", "").replace("```", "")
}

/// Drops a leaked leading `html` token (any case) and the whitespace after it.
pub fn strip_html_prefix(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("html") => trimmed[4..].trim_start().to_string(),
        _ => trimmed.to_string(),
    }
}

pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}
