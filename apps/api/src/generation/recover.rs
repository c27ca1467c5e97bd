//! JSONRecoverer — extracts a single balanced JSON object from noisy LLM
//! output and progressively repairs malformed JSON.
//!
//! Three escalating tiers, each an independent pure function applied by one
//! loop: (1) parse the cleaned candidate directly, (2) textual repairs for
//! common malformations (trailing commas, comments, raw newlines inside
//! strings), (3) an aggressive last-ditch pass. Repairs never fabricate
//! semantic content; if every tier fails the ORIGINAL parse error is
//! surfaced — the model produced unusable output and the caller must know.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RecoverError {
    #[error("AI did not return valid JSON format. Please try again.")]
    NoJsonFound,

    /// Carries the original (pre-repair) parse error message.
    #[error("{0}")]
    Unrecoverable(String),
}

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)```(?:json|javascript)?\s*").unwrap())
}

fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(here is|here's|this is|the json is):?\s*").unwrap())
}

/// Strips markdown code fences and common lead-in prose.
fn strip_noise(text: &str) -> String {
    let text = fence_pattern().replace_all(text, "");
    let text = prefix_pattern().replace(text.trim(), "");
    text.trim().to_string()
}

/// Finds the first `{` and its matching balanced `}` by depth counting.
/// String literals and escapes are respected so nested braces inside string
/// values cannot truncate the object early (a naive last-index scan would).
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.as_bytes().iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Repair tiers
// ────────────────────────────────────────────────────────────────────────────

fn trailing_comma_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r",(\s*[}\]])").unwrap())
}

fn double_comma_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r",\s*,").unwrap())
}

/// Tier 1: drop trailing commas before `}`/`]` and collapse double commas.
pub fn repair_commas(text: &str) -> String {
    let text = trailing_comma_pattern().replace_all(text, "$1");
    double_comma_pattern().replace_all(&text, ",").to_string()
}

/// Tier 2: strip `//` and `/* */` comments outside string literals and
/// escape raw newlines inside them. Both are things models emit when they
/// drift into "annotated JSON".
pub fn repair_comments_and_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\r' => {}
                _ => out.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn loose_quote_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"([^\\])"([^",:}\]]*)":"#).unwrap())
}

/// Tier 3: last-ditch pass — strip control characters and apply a looser
/// quote fix. May mangle text that was already beyond saving; it only ever
/// runs after the earlier tiers failed to parse.
pub fn repair_aggressive(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
    loose_quote_pattern()
        .replace_all(&cleaned, "$1\\\"$2\":")
        .to_string()
}

/// The ordered repair pipeline. Each tier builds on the previous tier's
/// output, mirroring the escalation: cheap fixes first, destructive last.
const REPAIRERS: &[fn(&str) -> String] = &[
    repair_commas,
    repair_comments_and_newlines,
    repair_aggressive,
];

/// Recovers a JSON object from raw LLM output.
pub fn recover(raw: &str) -> Result<Value, RecoverError> {
    let cleaned = strip_noise(raw);
    let candidate = balanced_object(&cleaned).ok_or_else(|| {
        warn!("No JSON object found in response");
        RecoverError::NoJsonFound
    })?;

    let original_error = match serde_json::from_str::<Value>(candidate) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    warn!(
        "JSON parse failed ({original_error}); content length {}. Attempting repairs.",
        candidate.len()
    );

    let mut current = candidate.to_string();
    for (tier, repair) in REPAIRERS.iter().enumerate() {
        current = repair(&current);
        if let Ok(value) = serde_json::from_str::<Value>(&current) {
            debug!("Successfully parsed after repair tier {}", tier + 1);
            return Ok(value);
        }
    }

    Err(RecoverError::Unrecoverable(original_error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_json_passes_through_unchanged() {
        let value = json!({
            "title": "A",
            "summary": "B",
            "skills": {},
            "experience": []
        });
        let recovered = recover(&value.to_string()).unwrap();
        assert_eq!(recovered, value);
    }

    #[test]
    fn strips_json_code_fence() {
        let raw = "```json\n{\"title\": \"Engineer\"}\n```";
        assert_eq!(recover(raw).unwrap()["title"], "Engineer");
    }

    #[test]
    fn strips_prose_prefix() {
        let raw = "Here is the resume:\n{\"title\": \"Engineer\"}";
        assert_eq!(recover(raw).unwrap()["title"], "Engineer");
    }

    #[test]
    fn nested_braces_inside_strings_do_not_truncate() {
        let raw = "noise {\"summary\": \"built {x} and {y}\", \"n\": 1} trailing";
        let value = recover(raw).unwrap();
        assert_eq!(value["summary"], "built {x} and {y}");
        assert_eq!(value["n"], 1);
    }

    #[test]
    fn recovers_single_trailing_comma() {
        let raw = r#"{"title":"A","summary":"B","skills":{},"experience":[],}"#;
        let value = recover(raw).unwrap();
        assert_eq!(
            value,
            json!({"title": "A", "summary": "B", "skills": {}, "experience": []})
        );
    }

    #[test]
    fn recovers_trailing_comma_in_array() {
        let raw = r#"{"experience": ["a", "b",]}"#;
        assert_eq!(recover(raw).unwrap()["experience"], json!(["a", "b"]));
    }

    #[test]
    fn recovers_line_comments() {
        let raw = "{\n  \"title\": \"A\", // the title\n  \"n\": 2\n}";
        let value = recover(raw).unwrap();
        assert_eq!(value["title"], "A");
        assert_eq!(value["n"], 2);
    }

    #[test]
    fn recovers_raw_newline_inside_string() {
        let raw = "{\"summary\": \"line one\nline two\"}";
        assert_eq!(recover(raw).unwrap()["summary"], "line one\nline two");
    }

    #[test]
    fn comment_stripper_leaves_urls_alone() {
        let repaired = repair_comments_and_newlines(r#"{"site": "https://example.com"}"#);
        assert_eq!(repaired, r#"{"site": "https://example.com"}"#);
    }

    #[test]
    fn no_object_at_all_is_no_json_found() {
        assert!(matches!(
            recover("The quick brown fox."),
            Err(RecoverError::NoJsonFound)
        ));
    }

    #[test]
    fn unrecoverable_surfaces_original_error() {
        let raw = r#"{"title": completely broken"#;
        assert!(matches!(
            recover(raw),
            Err(RecoverError::Unrecoverable(_))
        ));
    }

    #[test]
    fn repair_commas_is_pure_and_targeted() {
        assert_eq!(repair_commas(r#"{"a": 1,}"#), r#"{"a": 1}"#);
        assert_eq!(repair_commas(r#"[1,, 2]"#), r#"[1, 2]"#);
        assert_eq!(repair_commas(r#"{"a": "x,y"}"#), r#"{"a": "x,y"}"#);
    }
}
