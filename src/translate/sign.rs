//! Request signing for the Youdao `signType=v3` scheme.

use sha2::{Digest, Sha256};

use crate::clock::Clock;
use crate::jsonp::JsonpData;

pub const FROM_LANG: &str = "en";
pub const TO_LANG: &str = "zh-CHS";
pub const SIGN_TYPE: &str = "v3";

/// Shortens the query the way the provider expects inside the signature.
///
/// Up to 20 characters the text is used as-is; longer text becomes the first
/// ten characters, the character count, and the last ten characters.
///
/// Characters are Unicode scalar values, so an emoji counts once rather than
/// as two UTF-16 code units.
pub fn truncate(q: &str) -> String {
    let chars: Vec<char> = q.chars().collect();
    let len = chars.len();
    if len <= 20 {
        return q.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[len - 10..].iter().collect();
    format!("{}{}{}", head, len, tail)
}

/// Lowercase hex SHA-256 of `app_key + truncate(q) + salt + curtime + app_secret`.
pub fn sign(app_key: &str, q: &str, salt: u64, curtime: u64, app_secret: &str) -> String {
    let input = format!("{}{}{}{}{}", app_key, truncate(q), salt, curtime, app_secret);
    sha256_hex(&input)
}

pub(crate) fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// All parameters of one signed translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    pub q: String,
    pub app_key: String,
    pub salt: u64,
    pub curtime: u64,
    pub sign: String,
}

impl SignedQuery {
    /// `salt` is the clock's epoch milliseconds, `curtime` its epoch seconds.
    pub fn new(app_key: &str, app_secret: &str, q: &str, clock: &dyn Clock) -> Self {
        let salt = clock.now_millis();
        let curtime = clock.now_secs();
        Self {
            q: q.to_string(),
            app_key: app_key.to_string(),
            salt,
            curtime,
            sign: sign(app_key, q, salt, curtime, app_secret),
        }
    }

    /// Query pairs in the order the provider documents them.
    pub fn into_data(self) -> JsonpData {
        JsonpData::KeyValue(vec![
            ("q".to_string(), self.q),
            ("appKey".to_string(), self.app_key),
            ("salt".to_string(), self.salt.to_string()),
            ("from".to_string(), FROM_LANG.to_string()),
            ("to".to_string(), TO_LANG.to_string()),
            ("sign".to_string(), self.sign),
            ("signType".to_string(), SIGN_TYPE.to_string()),
            ("curtime".to_string(), self.curtime.to_string()),
        ])
    }
}
