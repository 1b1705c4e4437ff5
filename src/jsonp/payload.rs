//! Callback naming and query-string construction for JSONP calls.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub const CALLBACK_PREFIX: &str = "CALLBACK";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Data appended to a JSONP request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonpData {
    /// Pre-serialized query text, appended verbatim after `&`.
    Text(String),
    /// Pairs whose values are percent-encoded; order is preserved.
    KeyValue(Vec<(String, String)>),
}

impl JsonpData {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self::KeyValue(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// `CALLBACK` + sequence number + nine random digits.
///
/// The random part has a fixed width, so distinct sequence numbers never
/// produce the same name within a process.
pub fn next_callback_name() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let random = Uuid::new_v4().as_u128() % 1_000_000_000;
    format!("{}{}{:09}", CALLBACK_PREFIX, seq, random)
}

/// Serialized `data` followed by `&_time=`; empty when there is no data.
///
/// Empty `Text` counts as no data. An empty `KeyValue` still gets `_time`.
pub fn serialize_params(data: Option<&JsonpData>, now_millis: u64) -> String {
    let data = match data {
        None => return String::new(),
        Some(JsonpData::Text(text)) if text.is_empty() => return String::new(),
        Some(data) => data,
    };
    let mut ret = String::new();
    match data {
        JsonpData::Text(text) => {
            ret.push('&');
            ret.push_str(text);
        }
        JsonpData::KeyValue(pairs) => {
            for (key, value) in pairs {
                ret.push('&');
                ret.push_str(key);
                ret.push('=');
                ret.push_str(&encode_uri_component(value));
            }
        }
    }
    ret.push_str(&format!("&_time={}", now_millis));
    ret
}

pub fn build_script_url(
    url: &str,
    callback: &str,
    data: Option<&JsonpData>,
    now_millis: u64,
) -> String {
    format!(
        "{}?callback={}{}",
        url,
        callback,
        serialize_params(data, now_millis)
    )
}
