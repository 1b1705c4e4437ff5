//! Extracts callback invocations from a JSONP script body.

use once_cell::sync::Lazy;
use regex::Regex;

static INVOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)^\s*(?:/\*\*/)?\s*(?:typeof\s+[A-Za-z_$][\w$]*\s*===?\s*['"]function['"]\s*&&\s*)?([A-Za-z_$][\w$]*)\s*\((.*)\)\s*;?\s*$"#,
    )
    .expect("invocation pattern is valid")
});

/// A single `name(payload)` call found in a script.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub callback: String,
    pub payload: serde_json::Value,
}

/// Parses `name(<json>)`, optionally prefixed with `/**/` or a
/// `typeof name === 'function' &&` guard. Returns `None` for anything else.
pub fn parse_invocation(script: &str) -> Option<Invocation> {
    let caps = INVOCATION.captures(script)?;
    let callback = caps.get(1)?.as_str().to_string();
    let args = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    let payload = if args.is_empty() {
        serde_json::Value::Null
    } else {
        match serde_json::from_str(args) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(callback = %callback, error = %e, "callback argument is not JSON");
                return None;
            }
        }
    };
    Some(Invocation { callback, payload })
}
