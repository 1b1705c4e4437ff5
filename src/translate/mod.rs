//! Translation adapter (English to Simplified Chinese) for the Youdao API.

mod client;
mod sign;
mod types;

pub use client::{translate, translate_with, Translator, YOUDAO_ENDPOINT};
pub use sign::{sign, truncate, SignedQuery, FROM_LANG, SIGN_TYPE, TO_LANG};
pub use types::{BasicEntry, TranslationResult};
