//! Speech synthesis types.

use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::Error;

pub const SPEECH_MODEL: &str = "tts-1";
pub const RESPONSE_FORMAT: &str = "mp3";

/// Accepted `speed` range of the provider.
pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 4.0;

/// Request body of `POST /v1/audio/speech`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest<'a> {
    pub model: &'a str,
    pub voice: &'a str,
    pub response_format: &'a str,
    pub input: &'a str,
    pub speed: f64,
}

/// Built-in voices of the speech provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Self::Alloy,
        Self::Echo,
        Self::Fable,
        Self::Onyx,
        Self::Nova,
        Self::Shimmer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_argument(format!("unknown voice '{}'", s)))
    }
}

/// Options for [`SpeechClient::synthesize`](super::SpeechClient::synthesize).
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    pub voice: Voice,
    pub speed: f64,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice: Voice::Alloy,
            speed: 1.0,
        }
    }
}

/// Synthesized MP3 audio.
#[derive(Debug, Clone)]
pub struct AudioOutput {
    pub data: Bytes,
}

impl AudioOutput {
    pub fn mime_type(&self) -> &'static str {
        "audio/mpeg"
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
