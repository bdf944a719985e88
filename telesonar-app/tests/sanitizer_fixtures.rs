//! End-to-end fixtures for the LLM response sanitizer.

use telesonar_app::infrastructure::security::{ResponseSanitizer, STEPS};

const FIXTURES: &[(&str, &str)] = &[
    ("**bold**", "<b>bold</b>"),
    ("__u__", "<u>u</u>"),
    ("<!DOCTYPE html><html><body><p>Hi</p></body></html>", "Hi"),
    ("```html\nText\n```", "Text"),
    ("html Some text", "Some text"),
    ("A\n\n\n\nB", "A\n\nB"),
    ("  plain words, nothing special  ", "plain words, nothing special"),
];

#[test]
fn test_fixtures() {
    for (raw, expected) in FIXTURES {
        assert_eq!(ResponseSanitizer::sanitize(raw), *expected, "input: {:?}", raw);
    }
}

#[test]
fn test_second_pass_changes_nothing() {
    for (raw, _) in FIXTURES {
        let once = ResponseSanitizer::sanitize(raw);
        let twice = ResponseSanitizer::sanitize(&once);
        assert_eq!(once, twice, "input: {:?}", raw);
    }
}

#[test]
fn test_realistic_llm_answer() {
    let raw = "```html\n<html>\n<head><title>Result</title>\n</head>\n<body>\n\
               <div class=\"verdict\"><h3>🎯 **Verdict**: FALSE</h3></div>\n\
               <p>📝 <b>Fact</b>: The Great Wall is not visible from orbit [1].</p>\n\n\n\n\
               <blockquote expandable><b>Sources</b>:<br>- NASA (https://nasa.gov)</blockquote>\n\
               </body>\n</html>\n```";

    let clean = ResponseSanitizer::sanitize(raw);

    assert!(clean.starts_with("🎯 <b>Verdict</b>: FALSE"), "{}", clean);
    assert!(clean.contains("📝 <b>Fact</b>: The Great Wall is not visible from orbit [1]."));
    assert!(clean.contains(
        "<blockquote expandable><b>Sources</b>:\n- NASA (https://nasa.gov)</blockquote>"
    ));
    assert!(!clean.contains("<div"));
    assert!(!clean.contains("<head"));
    assert!(!clean.contains("```"));
    assert!(!clean.contains("\n\n\n"));
}

#[test]
fn test_each_step_is_total_on_empty_input() {
    for (name, step) in STEPS {
        assert_eq!(step(""), "", "step {}", name);
    }
}
