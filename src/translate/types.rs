//! Typed view of a Youdao translation result, for callers that want one.

use serde::Deserialize;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslationResult {
    #[serde(rename = "errorCode")]
    pub error_code: String,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub translation: Vec<String>,
    #[serde(default)]
    pub basic: Option<BasicEntry>,
    /// Language pair, e.g. `en2zh-CHS`.
    #[serde(default, rename = "l")]
    pub language_pair: Option<String>,
}

/// Dictionary entry returned for single words.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BasicEntry {
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default, rename = "us-phonetic")]
    pub us_phonetic: Option<String>,
    #[serde(default, rename = "uk-phonetic")]
    pub uk_phonetic: Option<String>,
    #[serde(default)]
    pub explains: Vec<String>,
}

impl TranslationResult {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_success(&self) -> bool {
        self.error_code == "0"
    }

    pub fn first_translation(&self) -> Option<&str> {
        self.translation.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_word_lookup() {
        let result = TranslationResult::from_value(json!({
            "errorCode": "0",
            "query": "hello",
            "translation": ["你好"],
            "basic": {
                "us-phonetic": "həˈloʊ",
                "uk-phonetic": "həˈləʊ",
                "explains": ["int. 喂；哈罗"]
            },
            "l": "en2zh-CHS"
        }))
        .unwrap();
        assert!(result.is_success());
        assert_eq!(result.first_translation(), Some("你好"));
        let basic = result.basic.unwrap();
        assert_eq!(basic.us_phonetic.as_deref(), Some("həˈloʊ"));
        assert_eq!(basic.phonetic, None);
    }

    #[test]
    fn error_payload_has_no_translation() {
        let result = TranslationResult::from_value(json!({ "errorCode": "202" })).unwrap();
        assert!(!result.is_success());
        assert!(result.first_translation().is_none());
    }
}
