//! Response extractor: recovers a JSON object from raw model text.
//!
//! Grounded calls cannot use strict JSON mode, so the text may arrive
//! wrapped in markdown fences or surrounded by prose. Strategies are tried
//! in order; the first one that yields a JSON object wins.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::error::StrategyError;

pub type JsonObject = Map<String, Value>;

/// A single recovery attempt.
pub struct Strategy {
    pub name: &'static str,
    pub attempt: fn(&str) -> Option<JsonObject>,
}

/// Ordered recovery strategies. Append new ones at the end.
pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "direct",
        attempt: parse_direct,
    },
    Strategy {
        name: "strip_fences",
        attempt: parse_without_fences,
    },
    Strategy {
        name: "outer_braces",
        attempt: parse_outer_braces,
    },
];

/// Extract the first recoverable JSON object from `raw`.
pub fn extract_json(raw: &str) -> Result<JsonObject, StrategyError> {
    if raw.trim().is_empty() {
        log::warn!("[EXTRACT] Empty response text");
        return Err(StrategyError::Parse { raw: raw.to_string() });
    }

    for strategy in STRATEGIES {
        if let Some(object) = (strategy.attempt)(raw) {
            log::info!("[EXTRACT] Parsed via '{}' ({} keys)", strategy.name, object.len());
            return Ok(object);
        }
        log::debug!("[EXTRACT] Strategy '{}' failed", strategy.name);
    }

    log::error!(
        "[EXTRACT] All strategies failed, raw: {}",
        preview(raw, 200)
    );
    Err(StrategyError::Parse { raw: raw.to_string() })
}

fn as_object(text: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// 1. The whole text is JSON.
pub fn parse_direct(raw: &str) -> Option<JsonObject> {
    as_object(raw)
}

/// 2. Remove every ```json / ``` marker, then parse what is left.
pub fn parse_without_fences(raw: &str) -> Option<JsonObject> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    as_object(cleaned.trim())
}

/// 3. First `{` through last `}` of the original text.
pub fn parse_outer_braces(raw: &str) -> Option<JsonObject> {
    static OUTER: OnceLock<Regex> = OnceLock::new();
    let re = OUTER.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("outer-brace pattern compiles"));
    let found = re.find(raw)?;
    as_object(found.as_str())
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BODY: &str = r##"{"hook": "Stop scrolling!", "virality_score": 88, "hashtags": ["#a", "#b"]}"##;

    fn expected() -> JsonObject {
        match serde_json::from_str(BODY).unwrap() {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn clean_json_parses_directly() {
        assert_eq!(extract_json(BODY).unwrap(), expected());
        assert!(parse_direct(BODY).is_some());
    }

    #[test]
    fn fenced_json_matches_plain_parse() {
        let fenced = format!("```json\n{BODY}\n```");
        assert!(parse_direct(&fenced).is_none());
        assert_eq!(extract_json(&fenced).unwrap(), expected());

        let bare_fence = format!("```\n{BODY}\n```");
        assert_eq!(extract_json(&bare_fence).unwrap(), expected());
    }

    #[test]
    fn prose_around_single_object() {
        let noisy = format!("Sure! Here is your strategy:\n\n{BODY}\n\nLet me know if you need more.");
        assert!(parse_without_fences(&noisy).is_none());
        assert_eq!(parse_outer_braces(&noisy).unwrap(), expected());
        assert_eq!(extract_json(&noisy).unwrap(), expected());
    }

    #[test]
    fn nested_objects_survive_brace_matching() {
        let noisy = r#"Result -> {"posting_strategy": {"recommended_posting_time_local": "Mon 9 AM"}, "hook": "x"} <- done"#;
        let object = extract_json(noisy).unwrap();
        assert_eq!(
            object["posting_strategy"],
            json!({"recommended_posting_time_local": "Mon 9 AM"})
        );
    }

    #[test]
    fn scalars_and_arrays_are_not_objects() {
        assert!(extract_json("42").is_err());
        assert!(extract_json(r##"["#a", "#b"]"##).is_err());
    }

    #[test]
    fn garbage_fails_with_raw_text() {
        let err = extract_json("I'm sorry, I can't help with that { broken").unwrap_err();
        match err {
            StrategyError::Parse { raw } => assert!(raw.starts_with("I'm sorry")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_text_fails() {
        assert!(matches!(extract_json(""), Err(StrategyError::Parse { .. })));
        assert!(matches!(extract_json("  \n "), Err(StrategyError::Parse { .. })));
    }

    #[test]
    fn strategies_run_in_declared_order() {
        let names: Vec<&str> = STRATEGIES.iter().map(|s| s.name).collect();
        assert_eq!(names, ["direct", "strip_fences", "outer_braces"]);
    }
}
