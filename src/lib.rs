//! # phonetic-dict
//!
//! Outbound API-call layer of the Phonetic Dictionary: synthesize English
//! pronunciation through an OpenAI-compatible speech endpoint and translate
//! English text to Simplified Chinese through the Youdao API.
//!
//! ## Overview
//!
//! The crate is integration glue rather than an engine. A UI action calls a
//! provider adapter; the adapter goes through the HTTP client wrapper (speech)
//! or the JSONP bridge (translation); the payload comes back to the caller for
//! rendering or playback, neither of which happens here.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use phonetic_dict::config::{HttpConfig, JsonpConfig};
//! use phonetic_dict::jsonp::JsonpBridge;
//! use phonetic_dict::transport::HttpClient;
//! use phonetic_dict::{speech, translate};
//!
//! #[tokio::main]
//! async fn main() -> phonetic_dict::Result<()> {
//!     let http = Arc::new(HttpClient::new(&HttpConfig::default())?);
//!
//!     let mp3 = speech::speech_api(&http, "https://api.openai.com", "sk-...", "hello", 1.0, "alloy").await?;
//!     println!("{} bytes of audio", mp3.len());
//!
//!     let bridge = JsonpBridge::over_http(http, JsonpConfig::default());
//!     let result = translate::translate(&bridge, "app-id", "app-secret", "hello").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`transport`] | HTTP client wrapper with timeout and verb methods |
//! | [`interceptors`] | Request/response/error hooks around every HTTP call |
//! | [`jsonp`] | JSONP bridge with callback correlation and cleanup |
//! | [`speech`] | Speech synthesis adapter |
//! | [`translate`] | Signed translation adapter |
//! | [`router`] | Single-page route table and title handling |
//! | [`config`] | Explicit configuration objects |

pub mod clock;
pub mod config;
pub mod interceptors;
pub mod jsonp;
pub mod router;
pub mod speech;
pub mod translate;
pub mod transport;

pub use config::{HttpConfig, JsonpConfig};
pub use jsonp::{JsonpBridge, JsonpData};
pub use transport::{HttpClient, Payload, TransportError};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
