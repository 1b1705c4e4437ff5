//! Speech synthesis adapter for OpenAI-compatible `/v1/audio/speech` endpoints.

mod client;
mod types;

pub use client::{speech_api, SpeechClient, SpeechClientBuilder, SPEECH_PATH};
pub use types::{AudioOutput, SpeechOptions, SpeechRequest, Voice, RESPONSE_FORMAT, SPEECH_MODEL};
